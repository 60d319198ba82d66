//! Pipeline expression translation.
//!
//! Pipeline expressions address variables of the pipeline dictionary by bare
//! name and reach the request context through `Current*` prefixes. Controllers
//! keep pipeline variables in a local `pdict` object and use the script API
//! globals instead:
//!
//! ```text
//! CurrentHttpParameterMap.pid.stringValue  ->  request.httpParameterMap.pid.stringValue
//! empty(Basket) || Basket.productLineItems ->  empty(pdict.Basket) || Basket.productLineItems
//! ```
//!
//! The rewrite is a heuristic: a capitalized bare word is a pipeline variable
//! unless it is qualified (`x.Word`), qualifies something (`Word.x`) or is
//! called (`Word(...)`).

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

/// Legacy context prefixes and their script API replacements.
pub const CONTEXT_PREFIXES: &[(&str, &str)] = &[
    ("CurrentCustomer", "customer"),
    ("CurrentSession", "session"),
    ("CurrentRequest", "request"),
    ("CurrentForms", "session.forms"),
    ("CurrentHttpParameterMap", "request.httpParameterMap"),
];

/// Local object holding pipeline variables in generated code.
pub const PDICT: &str = "pdict";

static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*""#).expect("string literal pattern is valid")
});

// literals and script globals that must survive the identifier rewrite untouched
static RESERVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:true|false|null|undefined|empty|PIPELET_ERROR|PIPELET_NEXT)\b")
        .expect("reserved word pattern is valid")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_$][\w$]*").expect("identifier pattern is valid"));

/// Translate a pipeline expression to JavaScript.
///
/// An empty expression becomes `undefined`.
///
/// # Example
///
/// ```
/// use rewire_codegen_js::translate;
///
/// assert_eq!(translate("Product"), "pdict.Product");
/// assert_eq!(translate("CurrentCustomer.authenticated"), "customer.authenticated");
/// assert_eq!(translate("ScriptStatus !== PIPELET_ERROR"), "pdict.ScriptStatus !== PIPELET_ERROR");
/// ```
pub fn translate(expression: &str) -> String {
    let expression = expression.trim();
    if expression.is_empty() {
        return "undefined".to_string();
    }

    let mut masked = Vec::new();
    let input = mask(&STRING_LITERAL, expression, &mut masked);
    let input = mask(&RESERVED, &input, &mut masked);
    let output = rewrite_identifiers(&input);
    unmask(output, &masked)
}

fn placeholder(index: usize) -> String {
    format!("\u{1}{}\u{1}", index)
}

fn mask(pattern: &Regex, input: &str, masked: &mut Vec<String>) -> String {
    pattern
        .replace_all(input, |caps: &Captures<'_>| {
            masked.push(caps[0].to_string());
            placeholder(masked.len() - 1)
        })
        .into_owned()
}

fn unmask(mut output: String, masked: &[String]) -> String {
    for (index, original) in masked.iter().enumerate() {
        output = output.replace(&placeholder(index), original);
    }
    output
}

fn rewrite_identifiers(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    let mut last = 0;
    for found in IDENTIFIER.find_iter(input) {
        out.push_str(&input[last..found.start()]);
        let before = input[..found.start()].chars().next_back();
        let after = input[found.end()..].chars().next();
        out.push_str(&rewrite(found.as_str(), before, after));
        last = found.end();
    }
    out.push_str(&input[last..]);
    out
}

fn rewrite(ident: &str, before: Option<char>, after: Option<char>) -> Cow<'_, str> {
    // member access or the tail of a number literal
    if before.is_some_and(|c| c == '.' || c.is_ascii_digit()) {
        return Cow::Borrowed(ident);
    }
    if let Some((_, target)) = CONTEXT_PREFIXES.iter().find(|(prefix, _)| *prefix == ident) {
        return Cow::Borrowed(*target);
    }
    let capitalized = ident.starts_with(|c: char| c.is_ascii_uppercase());
    if capitalized && !matches!(after, Some('.') | Some('(')) {
        Cow::Owned(format!("{}.{}", PDICT, ident))
    } else {
        Cow::Borrowed(ident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_variables() {
        assert_eq!(translate("Basket"), "pdict.Basket");
        assert_eq!(translate("!Basket"), "!pdict.Basket");
        assert_eq!(translate("Order != null"), "pdict.Order != null");
    }

    #[test]
    fn test_context_prefixes() {
        assert_eq!(
            translate("CurrentHttpParameterMap.pid.stringValue"),
            "request.httpParameterMap.pid.stringValue"
        );
        assert_eq!(
            translate("CurrentForms.login.submit"),
            "session.forms.login.submit"
        );
        assert_eq!(translate("CurrentSession.custom.Step"), "session.custom.Step");
        assert_eq!(translate("CurrentRequest"), "request");
    }

    #[test]
    fn test_qualified_and_called_names_are_kept() {
        assert_eq!(translate("Product.online"), "Product.online");
        assert_eq!(translate("dw.system.Site"), "dw.system.Site");
        assert_eq!(translate("new Date()"), "new Date()");
        assert_eq!(translate("lowercase"), "lowercase");
    }

    #[test]
    fn test_reserved_words_are_protected() {
        assert_eq!(translate("empty(Basket)"), "empty(pdict.Basket)");
        assert_eq!(
            translate("Status == PIPELET_NEXT || Flag == true"),
            "pdict.Status == PIPELET_NEXT || pdict.Flag == true"
        );
        assert_eq!(translate("null"), "null");
    }

    #[test]
    fn test_string_literals_are_protected() {
        assert_eq!(
            translate("Step == 'Shipping' && Label == \"Basket\""),
            "pdict.Step == 'Shipping' && pdict.Label == \"Basket\""
        );
        assert_eq!(translate("'it\\'s Basket'"), "'it\\'s Basket'");
    }

    #[test]
    fn test_number_suffix_is_not_a_variable() {
        assert_eq!(translate("Count > 2E"), "pdict.Count > 2E");
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(translate("  "), "undefined");
    }
}
