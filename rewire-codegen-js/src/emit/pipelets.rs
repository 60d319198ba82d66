//! Pipelet renderers.
//!
//! `Assign` and `Script` have direct script equivalents. Every other pipelet
//! becomes a comment listing its bindings so the conversion never fails on
//! an unknown unit.

use rewire_codegen::builder::CodeFragment;
use rewire_ir::{KeyBinding, PipeletNode};

use crate::{
    naming::{property_key, string_literal},
    translate::translate,
};

/// Number of `From_n`/`To_n` pairs an `Assign` pipelet carries.
const ASSIGN_PAIRS: usize = 10;

pub(super) fn render(pipelet: &PipeletNode) -> Vec<CodeFragment> {
    match pipelet.name.as_str() {
        "Assign" => assign(pipelet),
        "Script" => script(pipelet),
        _ => placeholder(pipelet),
    }
}

fn assign(pipelet: &PipeletNode) -> Vec<CodeFragment> {
    let assignments: Vec<CodeFragment> = (0..ASSIGN_PAIRS)
        .filter_map(|n| {
            let from = bound(pipelet, &format!("From_{}", n))?;
            let to = bound(pipelet, &format!("To_{}", n))?;
            Some(CodeFragment::line(format!(
                "{} = {};",
                translate(to),
                translate(from)
            )))
        })
        .collect();

    if assignments.is_empty() {
        vec![CodeFragment::comment("Assign without bound From/To pairs")]
    } else {
        assignments
    }
}

fn script(pipelet: &PipeletNode) -> Vec<CodeFragment> {
    let Some(file) = pipelet.config_value("ScriptFile").filter(|f| !f.is_empty()) else {
        return placeholder(pipelet);
    };

    let call = format!(
        "pdict.ScriptStatus = require({}).execute(",
        string_literal(&script_module(file))
    );
    let arguments: Vec<String> = pipelet
        .key_bindings
        .iter()
        .filter(|b| !b.is_unbound())
        .map(|b| format!("{}: {}", property_key(&b.key), translate(&b.alias)))
        .collect();

    if arguments.is_empty() {
        return vec![CodeFragment::line(format!("{}{{}});", call))];
    }
    let last = arguments.len() - 1;
    let body = arguments
        .into_iter()
        .enumerate()
        .map(|(i, argument)| {
            if i < last {
                CodeFragment::line(format!("{},", argument))
            } else {
                CodeFragment::line(argument)
            }
        })
        .collect();
    vec![CodeFragment::block(
        format!("{}{{", call),
        body,
        Some("});".to_string()),
    )]
}

fn placeholder(pipelet: &PipeletNode) -> Vec<CodeFragment> {
    let mut header = format!("TODO: port pipelet {}", pipelet.name);
    if let Some(set) = &pipelet.set_identifier {
        header.push_str(&format!(" ({})", set));
    }

    let mut fragments = vec![CodeFragment::comment(header)];
    fragments.extend(
        pipelet
            .key_bindings
            .iter()
            .map(|b| CodeFragment::comment(format!("  {} = {}", b.key, b.alias))),
    );
    fragments.extend(
        pipelet
            .config
            .iter()
            .map(|p| CodeFragment::comment(format!("  config {} = {}", p.key, p.value))),
    );
    fragments
}

fn bound<'a>(pipelet: &'a PipeletNode, key: &str) -> Option<&'a str> {
    pipelet
        .binding(key)
        .filter(|alias| !alias.is_empty() && *alias != KeyBinding::NULL)
}

/// Module path of a script file reference.
///
/// `cartridge:path/File.ds` resolves into that cartridge, a bare path into
/// the current one.
///
/// ```
/// use rewire_codegen_js::emit::script_module;
///
/// assert_eq!(
///     script_module("app_storefront_core:cart/CalculateCart.ds"),
///     "app_storefront_core/cartridge/scripts/cart/CalculateCart"
/// );
/// assert_eq!(script_module("account/Login.js"), "~/cartridge/scripts/account/Login");
/// ```
pub fn script_module(file: &str) -> String {
    let path = file
        .strip_suffix(".ds")
        .or_else(|| file.strip_suffix(".js"))
        .unwrap_or(file);
    match path.split_once(':') {
        Some((cartridge, path)) => format!("{}/cartridge/scripts/{}", cartridge, path),
        None => format!("~/cartridge/scripts/{}", path),
    }
}
