//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from document validation.
#[derive(Debug)]
pub struct CheckReport {
    /// One entry per input document.
    pub files: Vec<CheckedFile>,
}

/// Diagnostics of one document.
#[derive(Debug)]
pub struct CheckedFile {
    /// Input document.
    pub input: PathBuf,
    /// Names of the analysed functions.
    pub functions: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

impl CheckedFile {
    /// Whether the document passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl CheckReport {
    /// Whether every document passed.
    pub fn is_valid(&self) -> bool {
        self.files.iter().all(CheckedFile::is_valid)
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for file in &self.files {
            let input = file.input.display();

            for error in &file.errors {
                out.error(error);
            }
            for warning in &file.warnings {
                out.warning(&format!("{}: {}", input, warning));
            }
            for info in &file.infos {
                out.preformatted(&format!("info: {}: {}", input, info));
            }

            if file.is_valid() {
                let count = file.functions.len();
                out.preformatted(&format!(
                    "✓ {} is valid ({} function{}{}{})",
                    input,
                    count,
                    if count == 1 { "" } else { "s" },
                    if count == 0 { "" } else { ": " },
                    file.functions.join(", ")
                ));
            }
        }
    }
}
