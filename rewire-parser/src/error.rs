use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for rewire-parser operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the document text and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "Account.xml");
/// ctx.structure_error("expected <pipeline> root element", Some(span));
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a syntax error from a quick-xml error at a byte offset.
    pub fn xml_error(&self, source: quick_xml::Error, offset: usize) -> Box<Error> {
        Box::new(Error::Xml {
            src: self.named_source(),
            span: Some(self.point(offset)),
            source,
        })
    }

    /// Create a malformed attribute error.
    pub fn attribute_error(
        &self,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Attribute {
            src: self.named_source(),
            span: span.into(),
            message: message.into(),
        })
    }

    /// Create a structural error, optionally pointing at a span.
    pub fn structure_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Structure {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    fn point(&self, offset: usize) -> SourceSpan {
        let offset = offset.min(self.src.len());
        SourceSpan::from((offset, 0))
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check that the path points to an exported pipeline XML file"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pipeline document")]
    #[diagnostic(code(rewire::xml_error))]
    Xml {
        #[source_code]
        src: NamedSource<String>,
        #[label("syntax error here")]
        span: Option<SourceSpan>,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute: {message}")]
    #[diagnostic(code(rewire::attribute_error))]
    Attribute {
        #[source_code]
        src: NamedSource<String>,
        #[label("in this element")]
        span: SourceSpan,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(
        code(rewire::structure_error),
        help("a pipeline document has a single <pipeline> root containing <branch>/<segment>/<node> elements")
    )]
    Structure {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_error_message() {
        let ctx = SourceContext::new("<foo/>", "Account.xml");
        let err = ctx.structure_error("expected <pipeline> root element, found <foo>", None);
        assert_eq!(
            err.to_string(),
            "expected <pipeline> root element, found <foo>"
        );
        assert_eq!(ctx.filename(), "Account.xml");
    }

    #[test]
    fn test_point_is_clamped() {
        let ctx = SourceContext::new("<a>", "x.xml");
        assert_eq!(ctx.point(99).offset(), 3);
    }
}
