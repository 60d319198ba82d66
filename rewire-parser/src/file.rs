use std::path::{Path, PathBuf};

use rewire_ir::PipelineIR;

use crate::error::{Error, Result, SourceContext};

/// A pipeline document loaded from disk.
///
/// The pipeline name is the file stem, so `Account.xml` yields `Account`.
#[derive(Debug, Clone)]
pub struct PipelineFile {
    path: PathBuf,
    name: String,
    content: String,
}

impl PipelineFile {
    /// Read a pipeline document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Pipeline".to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            content,
        })
    }

    /// Path the document was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pipeline name derived from the file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw document text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Source context for error reporting.
    pub fn source_context(&self) -> SourceContext {
        SourceContext::new(&self.content, self.path.display().to_string())
    }

    /// Parse the document.
    pub fn parse(&self) -> Result<PipelineIR> {
        crate::parse_source(&self.source_context(), &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_derives_name_from_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Account.xml");
        std::fs::write(&path, "<pipeline/>").unwrap();

        let file = PipelineFile::open(&path).unwrap();
        assert_eq!(file.name(), "Account");
        assert_eq!(file.content(), "<pipeline/>");
        assert!(file.parse().unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_file() {
        let err = PipelineFile::open("/nonexistent/Missing.xml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
