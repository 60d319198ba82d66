//! Function declaration builder.

use rewire_codegen::builder::{CodeFragment, Renderable};

/// A documented `function name() { ... }` declaration without parameters.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    doc: Vec<String>,
    body: Vec<CodeFragment>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a line to the JSDoc block. An empty string renders as ` *`.
    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }

    /// Append a single statement line.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Append body fragments.
    pub fn body(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        self.body.extend(fragments);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Renderable for Function {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if !self.doc.is_empty() {
            fragments.push(CodeFragment::DocBlock(self.doc.clone()));
        }
        fragments.push(CodeFragment::braced(
            format!("function {}() {{", self.name),
            self.body.clone(),
        ));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use rewire_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_function_with_doc() {
        let function = Function::new("show")
            .doc("Renders the home page.")
            .line("var pdict = {};")
            .line("return;");
        let mut builder = CodeBuilder::controller();
        builder.emit(&function);
        assert_eq!(
            builder.build(),
            "/**\n * Renders the home page.\n */\nfunction show() {\n    var pdict = {};\n    return;\n}\n"
        );
    }

    #[test]
    fn test_empty_function() {
        let mut builder = CodeBuilder::controller();
        builder.emit(&Function::new("noop"));
        assert_eq!(builder.build(), "function noop() {\n}\n");
    }
}
