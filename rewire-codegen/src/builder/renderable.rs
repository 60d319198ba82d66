//! Renderable trait and CodeFragment for decoupled code generation.
//!
//! Control-flow blocks and controller sections are turned into fragments
//! first and written through [`CodeBuilder`](super::CodeBuilder) last, so
//! emitters never deal with indentation themselves.

/// A piece of generated code, indentation still pending.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// One statement line.
    Line(String),
    /// `header`, the body one level deeper, then `close` if any.
    ///
    /// Leaving `close` out lets an `} else {` block follow directly.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
    /// A line comment (`// text`).
    Comment(String),
    /// A multi-line documentation comment (`/** ... */`).
    DocBlock(Vec<String>),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a block fragment.
    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// Create a braced block closed by `}`.
    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::block(header, body, Some("}".to_string()))
    }

    /// Create a sequence of fragments.
    pub fn sequence(fragments: Vec<CodeFragment>) -> Self {
        Self::Sequence(fragments)
    }

    /// Create a line comment fragment.
    pub fn comment(s: impl Into<String>) -> Self {
        Self::Comment(s.into())
    }

    /// Create a documentation comment from its lines.
    pub fn doc_block<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::DocBlock(lines.into_iter().map(Into::into).collect())
    }
}

/// Syntax nodes and views that know their own fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl Renderable for CodeFragment {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.clone()]
    }
}
