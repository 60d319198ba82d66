//! CommonJS export builder.

use rewire_codegen::builder::{CodeFragment, Renderable};

use crate::naming::{member, string_literal};

/// An `exports.Name = ...;` assignment.
///
/// Guarded exports wrap the function in `guard.ensure([...], fn)` so the
/// storefront only routes matching requests to it.
#[derive(Debug, Clone)]
pub struct Export {
    entry: String,
    function: String,
    guard: Option<Vec<String>>,
    see: Option<String>,
}

impl Export {
    /// Export `function` under `entry` as is.
    pub fn direct(entry: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            function: function.into(),
            guard: None,
            see: None,
        }
    }

    /// Export `function` under `entry` behind `guard.ensure` with the given filters.
    pub fn guarded<I, S>(entry: impl Into<String>, function: impl Into<String>, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entry: entry.into(),
            function: function.into(),
            guard: Some(filters.into_iter().map(Into::into).collect()),
            see: None,
        }
    }

    /// Precede the export with a one-line `@see` reference.
    pub fn see(mut self, reference: impl Into<String>) -> Self {
        self.see = Some(reference.into());
        self
    }
}

impl Renderable for Export {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(reference) = &self.see {
            fragments.push(CodeFragment::line(format!("/** @see {} */", reference)));
        }
        let value = match &self.guard {
            Some(filters) => {
                let filters: Vec<String> =
                    filters.iter().map(String::as_str).map(string_literal).collect();
                format!("guard.ensure([{}], {})", filters.join(", "), self.function)
            }
            None => self.function.clone(),
        };
        fragments.push(CodeFragment::line(format!(
            "exports{} = {};",
            member(&self.entry),
            value
        )));
        fragments
    }
}
