use std::path::{Path, PathBuf};

use eyre::Result;
use serde::Deserialize;

/// Trait for outputs that are written to a file below an output directory
pub trait GeneratedFile {
    /// File path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// How an existing file at the target path is treated
    fn overwrite(&self) -> Overwrite {
        Overwrite::Always
    }

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_with(&self.path(base), &self.render(), self.overwrite())
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overwrite {
    /// Always replace the existing file
    #[default]
    Always,
    /// Only create the file if it doesn't exist yet (keeps hand-edited controllers)
    IfMissing,
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had identical content
    Unchanged,
    /// File was skipped (already exists)
    Skipped,
}

impl WriteResult {
    /// Short label for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteResult::Written => "written",
            WriteResult::Unchanged => "unchanged",
            WriteResult::Skipped => "skipped",
        }
    }
}

/// A file with known content and path
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    overwrite: Overwrite,
}

impl File {
    /// Create a new file that always overwrites
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: Overwrite::Always,
        }
    }

    /// Set the overwrite rule
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its overwrite rule
    pub fn write(&self) -> Result<WriteResult> {
        write_with(&self.path, &self.content, self.overwrite)
    }
}

fn write_with(path: &Path, content: &str, overwrite: Overwrite) -> Result<WriteResult> {
    if path.exists() {
        if overwrite == Overwrite::IfMissing {
            return Ok(WriteResult::Skipped);
        }
        if std::fs::read_to_string(path).is_ok_and(|existing| existing == content) {
            return Ok(WriteResult::Unchanged);
        }
    }
    write_file(path, content)?;
    Ok(WriteResult::Written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Controller;

    impl GeneratedFile for Controller {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("controllers").join("Account.js")
        }

        fn render(&self) -> String {
            "'use strict';\n".to_string()
        }
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.js");

        write_file(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Cart.js");
        fs::write(&path, "original").unwrap();

        let result = File::new(&path, "updated").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_file_write_identical_content_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Cart.js");
        fs::write(&path, "same").unwrap();

        let result = File::new(&path, "same").write().unwrap();
        assert_eq!(result, WriteResult::Unchanged);
    }

    #[test]
    fn test_file_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Cart.js");
        fs::write(&path, "hand edited").unwrap();

        let result = File::new(&path, "generated")
            .with_overwrite(Overwrite::IfMissing)
            .write()
            .unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand edited");
    }

    #[test]
    fn test_file_write_if_missing_creates_new() {
        let temp = TempDir::new().unwrap();
        let file = File::new(temp.path().join("Cart.js"), "generated")
            .with_overwrite(Overwrite::IfMissing);

        assert!(!file.exists());
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert!(file.exists());
    }

    #[test]
    fn test_generated_file_write() {
        let temp = TempDir::new().unwrap();

        let result = Controller.write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Written);
        let written = temp.path().join("controllers").join("Account.js");
        assert_eq!(fs::read_to_string(written).unwrap(), "'use strict';\n");
        assert_eq!(result.as_str(), "written");
    }
}
