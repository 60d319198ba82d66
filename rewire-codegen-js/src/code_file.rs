//! CodeFile abstraction for structured controller generation.
//!
//! Provides a high-level API for generating CommonJS modules with a
//! prologue, `require` declarations, body content and exports.

use rewire_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

use crate::ast::{Export, Require};

/// A structured representation of a controller module.
///
/// Sections are rendered in order: prologue, requires, body, exports. Every
/// prologue, body and export element is separated from the next by one blank
/// line; the require lines form a single group.
///
/// # Example
///
/// ```
/// use rewire_codegen::builder::CodeFragment;
/// use rewire_codegen_js::{
///     CodeFile,
///     ast::{Export, Function, Require},
/// };
///
/// let code = CodeFile::new()
///     .prologue(CodeFragment::line("'use strict';"))
///     .require(Require::new("guard", "~/cartridge/scripts/guard"))
///     .add(Function::new("show").line("return;"))
///     .export(Export::guarded("Show", "show", ["get"]))
///     .render();
///
/// assert_eq!(
///     code,
///     "'use strict';\n\nvar guard = require('~/cartridge/scripts/guard');\n\nfunction show() {\n    return;\n}\n\nexports.Show = guard.ensure(['get'], show);\n"
/// );
/// ```
#[derive(Default)]
pub struct CodeFile {
    prologue: Vec<Vec<CodeFragment>>,
    requires: Vec<Require>,
    body: Vec<Vec<CodeFragment>>,
    exports: Vec<Export>,
}

impl CodeFile {
    /// Create a new empty CodeFile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prologue element (directives, module documentation).
    pub fn prologue<R: Renderable>(mut self, node: R) -> Self {
        self.prologue.push(node.to_fragments());
        self
    }

    /// Add a require declaration.
    pub fn require(mut self, require: Require) -> Self {
        self.requires.push(require);
        self
    }

    /// Add requires from an iterator.
    pub fn requires(mut self, requires: impl IntoIterator<Item = Require>) -> Self {
        self.requires.extend(requires);
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add multiple body elements.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Add an export assignment.
    pub fn export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    /// Add exports from an iterator.
    pub fn exports(mut self, exports: impl IntoIterator<Item = Export>) -> Self {
        self.exports.extend(exports);
        self
    }

    /// Render the file with controller indentation (4 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::CONTROLLER)
    }

    /// Render the file with custom indentation.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut groups: Vec<Vec<CodeFragment>> = self.prologue.clone();
        if !self.requires.is_empty() {
            groups.push(self.requires.iter().flat_map(|r| r.to_fragments()).collect());
        }
        groups.extend(self.body.iter().cloned());
        groups.extend(self.exports.iter().map(|e| e.to_fragments()));

        let mut builder = CodeBuilder::new(indent);
        for (i, group) in groups.into_iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in group {
                builder.apply_fragment(fragment);
            }
        }
        builder.build()
    }

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.prologue.is_empty()
            && self.requires.is_empty()
            && self.body.is_empty()
            && self.exports.is_empty()
    }
}
