//! CommonJS `require` declaration.

use rewire_codegen::builder::{CodeFragment, Renderable};

use crate::naming::string_literal;

/// A `var Name = require('path');` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Require {
    name: String,
    path: String,
}

impl Require {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Renderable for Require {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(format!(
            "var {} = require({});",
            self.name,
            string_literal(&self.path)
        ))]
    }
}

#[cfg(test)]
mod tests {
    use rewire_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_require_line() {
        let mut builder = CodeBuilder::controller();
        builder.emit(&Require::new("ISML", "dw/template/ISML"));
        assert_eq!(builder.build(), "var ISML = require('dw/template/ISML');\n");
    }
}
