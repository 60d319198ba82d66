//! Convert command report data structures.

use std::path::PathBuf;

use rewire_core::WriteResult;

use super::output::{Output, Report};

/// Report data from controller generation.
#[derive(Debug)]
pub struct ConvertReport {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Path to phase snapshots, if requested.
    pub snapshot_dir: Option<PathBuf>,
    /// Documents converted successfully.
    pub converted: Vec<ConvertedFile>,
    /// Documents that could not be converted.
    pub failed: Vec<FailedFile>,
}

/// A successfully converted document.
#[derive(Debug)]
pub struct ConvertedFile {
    /// Input document.
    pub input: PathBuf,
    /// Number of generated functions.
    pub functions: usize,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    /// Generated output.
    pub output: ConvertOutput,
}

/// What happened to the generated code.
#[derive(Debug)]
pub enum ConvertOutput {
    /// Files were written (or left alone) on disk.
    Written(Vec<(String, WriteResult)>),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

/// A document that failed to convert.
#[derive(Debug)]
pub struct FailedFile {
    /// Input document.
    pub input: PathBuf,
    /// Rendered error report.
    pub error: String,
}

impl ConvertReport {
    /// Whether any input failed.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    fn file_count(&self) -> usize {
        self.converted
            .iter()
            .map(|c| match &c.output {
                ConvertOutput::Written(files) => files.len(),
                ConvertOutput::Preview(files) => files.len(),
            })
            .sum()
    }
}

impl Report for ConvertReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(dir) = &self.snapshot_dir {
            out.key_value("Pipeline snapshots written to", &dir.display().to_string());
            out.newline();
        }

        for file in &self.converted {
            for warning in &file.warnings {
                out.warning(&format!("{}: {}", file.input.display(), warning));
            }
        }
        for failure in &self.failed {
            out.error(&failure.error);
        }

        if self.dry_run {
            self.render_preview(out);
        } else {
            self.render_written(out);
        }
    }
}

impl ConvertReport {
    fn render_written(&self, out: &mut dyn Output) {
        if !self.converted.is_empty() {
            out.section(&format!("Generated ({})", self.output_dir.display()));
            for file in &self.converted {
                let ConvertOutput::Written(files) = &file.output else {
                    continue;
                };
                for (path, result) in files {
                    let line = format!(
                        "{} ({} function{}, {})",
                        path,
                        file.functions,
                        plural(file.functions),
                        result.as_str()
                    );
                    match result {
                        WriteResult::Written => out.added_item(&line),
                        WriteResult::Unchanged | WriteResult::Skipped => out.list_item(&line),
                    }
                }
            }
            out.newline();
        }

        self.render_summary(out);
    }

    fn render_preview(&self, out: &mut dyn Output) {
        for file in &self.converted {
            let ConvertOutput::Preview(files) = &file.output else {
                continue;
            };
            for preview in files {
                out.divider(&preview.path);
                out.preformatted(&preview.content);
            }
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", self.file_count()));
        if self.has_failures() {
            self.render_summary(out);
        }
    }

    fn render_summary(&self, out: &mut dyn Output) {
        let total = self.converted.len() + self.failed.len();
        out.key_value(
            "Converted",
            &format!("{} of {} pipeline{}", self.converted.len(), total, plural(total)),
        );
        if self.has_failures() {
            out.section("Failed");
            for failure in &self.failed {
                out.list_item(&failure.input.display().to_string());
            }
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    fn report(dry_run: bool) -> ConvertReport {
        ConvertReport {
            output_dir: PathBuf::from("out"),
            dry_run,
            snapshot_dir: None,
            converted: vec![ConvertedFile {
                input: PathBuf::from("Account.xml"),
                functions: 2,
                warnings: vec!["cycle detected at pipelet node #4\n  --> Show".into()],
                output: if dry_run {
                    ConvertOutput::Preview(vec![PreviewFile {
                        path: "Account.js".into(),
                        content: "'use strict';".into(),
                    }])
                } else {
                    ConvertOutput::Written(vec![("Account.js".into(), WriteResult::Written)])
                },
            }],
            failed: vec![FailedFile {
                input: PathBuf::from("Broken.xml"),
                error: "error: failed to read 'Broken.xml'".into(),
            }],
        }
    }

    #[test]
    fn test_render_written() {
        let mut out = RecordingOutput::default();
        report(false).render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "warning: Account.xml: cycle detected at pipelet node #4\n  --> Show",
                "error: failed to read 'Broken.xml'",
                "Generated (out):",
                "  + Account.js (2 functions, written)",
                "",
                "Converted: 1 of 2 pipelines",
                "Failed:",
                "  - Broken.xml",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let mut report = report(true);
        report.failed.clear();
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "warning: Account.xml: cycle detected at pipelet node #4\n  --> Show",
                "── Account.js ──",
                "'use strict';",
                "── Summary ──",
                "1 files would be generated",
            ]
        );
    }
}
