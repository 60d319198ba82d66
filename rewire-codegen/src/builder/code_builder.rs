//! Indented text buffer that code fragments are written into.

use super::{CodeFragment, Indent, Renderable};

/// Writes [`CodeFragment`]s as indented lines.
///
/// # Example
///
/// ```
/// use rewire_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::controller();
/// builder.emit(&CodeFragment::braced(
///     "function show() {",
///     vec![CodeFragment::line("return;")],
/// ));
///
/// assert_eq!(builder.build(), "function show() {\n    return;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Builder for controller modules.
    pub fn controller() -> Self {
        Self::new(Indent::CONTROLLER)
    }

    /// Builder for `rewire explain` outlines.
    pub fn outline() -> Self {
        Self::new(Indent::OUTLINE)
    }

    /// Write one line at the current depth.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Write an empty line; blank lines are never indented.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.push_line(&format!("// {}", text))
    }

    /// Write a JSDoc block. Empty lines become a bare ` *`.
    pub fn push_doc_block(&mut self, lines: &[String]) -> &mut Self {
        self.push_line("/**");
        for line in lines {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {}", line));
            }
        }
        self.push_line(" */")
    }

    /// Write every fragment of `node`.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
            CodeFragment::Comment(text) => {
                self.push_comment(&text);
            }
            CodeFragment::DocBlock(lines) => {
                self.push_doc_block(&lines);
            }
        }
    }

    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        let unit = self.indent.unit();
        for _ in 0..self.indent_level {
            self.buffer.push_str(&unit);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::controller()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut builder = CodeBuilder::controller();
        builder
            .push_line("function show() {")
            .push_indent()
            .push_line("var pdict = {};")
            .push_dedent()
            .push_line("}");

        assert_eq!(builder.build(), "function show() {\n    var pdict = {};\n}\n");
    }

    #[test]
    fn test_dedent_saturates_and_blank_is_unindented() {
        let mut builder = CodeBuilder::outline();
        builder
            .push_dedent()
            .push_line("a")
            .push_indent()
            .push_blank()
            .push_line("b");
        assert_eq!(builder.build(), "a\n\n  b\n");
    }

    #[test]
    fn test_tab_indent() {
        let mut builder = CodeBuilder::new(Indent::Tab);
        builder
            .push_line("{")
            .push_indent()
            .push_comment("empty")
            .push_dedent()
            .push_line("}");
        assert_eq!(builder.build(), "{\n\t// empty\n}\n");
    }

    #[test]
    fn test_emit_nested_fragments() {
        let fragments = CodeFragment::sequence(vec![
            CodeFragment::doc_block(["Shows the page.", "", "@see here"]),
            CodeFragment::braced(
                "function show() {",
                vec![CodeFragment::block(
                    "if (a) {",
                    vec![CodeFragment::line("return;")],
                    None,
                ),
                CodeFragment::braced("} else {", vec![CodeFragment::comment("nothing")])],
            ),
        ]);

        let mut builder = CodeBuilder::controller();
        builder.emit(&fragments);
        assert_eq!(
            builder.build(),
            "/**\n * Shows the page.\n *\n * @see here\n */\nfunction show() {\n    if (a) {\n        return;\n    } else {\n        // nothing\n    }\n}\n"
        );
    }
}
