//! Target language seam.

use std::path::Path;

use eyre::Result;
use rewire_core::{File, Overwrite, WriteResult};
use tracing::debug;

/// A generator that turns one analysed pipeline into one source module.
///
/// Implementors provide the module text and its file name; previewing and
/// writing come for free.
pub trait LanguageCodegen {
    /// Language identifier, e.g. `"javascript"`.
    fn language(&self) -> &'static str;

    /// Module path relative to the output directory, e.g. `Account.js`.
    fn file_name(&self) -> String;

    /// Full module source.
    fn render_module(&self) -> String;

    /// What to do when the module already exists on disk.
    fn overwrite(&self) -> Overwrite {
        Overwrite::Always
    }

    fn preview(&self) -> Vec<PreviewFile> {
        vec![PreviewFile {
            path: self.file_name(),
            content: self.render_module(),
        }]
    }

    /// Write the module below `output_dir`.
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let name = self.file_name();
        let result = File::new(output_dir.join(&name), self.render_module())
            .with_overwrite(self.overwrite())
            .write()?;
        debug!(
            language = self.language(),
            file = %name,
            result = result.as_str(),
            "module generated"
        );
        Ok(GenerateResult {
            files: vec![(name, result)],
        })
    }
}

#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Paths relative to the output directory, with what happened to each.
    pub files: Vec<(String, WriteResult)>,
}

impl GenerateResult {
    /// Number of files whose content changed on disk.
    pub fn written(&self) -> usize {
        self.files
            .iter()
            .filter(|(_, result)| *result == WriteResult::Written)
            .count()
    }
}

/// A module rendered for `--dry-run`.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    struct Fixed(Overwrite);

    impl LanguageCodegen for Fixed {
        fn language(&self) -> &'static str {
            "text"
        }

        fn file_name(&self) -> String {
            "controllers/Home.txt".to_string()
        }

        fn render_module(&self) -> String {
            "home\n".to_string()
        }

        fn overwrite(&self) -> Overwrite {
            self.0
        }
    }

    #[test]
    fn test_preview_uses_file_name() {
        let files = Fixed(Overwrite::Always).preview();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "controllers/Home.txt");
        assert_eq!(files[0].content, "home\n");
    }

    #[test]
    fn test_generate_respects_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("controllers/Home.txt");

        let first = Fixed(Overwrite::Always).generate(dir.path()).expect("generate");
        assert_eq!(first.written(), 1);
        assert_eq!(fs::read_to_string(&path).expect("read"), "home\n");

        fs::write(&path, "edited\n").expect("write");
        let second = Fixed(Overwrite::IfMissing).generate(dir.path()).expect("generate");
        assert_eq!(second.files, vec![("controllers/Home.txt".to_string(), WriteResult::Skipped)]);
        assert_eq!(fs::read_to_string(&path).expect("read"), "edited\n");
    }
}
