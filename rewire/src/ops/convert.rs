//! Convert operation - controller generation from pipeline documents.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use rewire_codegen_js::{Generator, LanguageCodegen};
use tracing::debug;

use super::{compile, describe_diagnostic, describe_error};
use crate::reports::{ConvertOutput, ConvertReport, ConvertedFile, FailedFile, PreviewFile};

/// Options for the convert operation.
pub struct ConvertOptions<'a> {
    /// Output directory for generated controllers.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Explicit configuration file.
    pub config: Option<&'a Path>,
    /// Directory for phase snapshots, if requested.
    pub snapshot_dir: Option<&'a Path>,
}

/// Execute the convert operation.
///
/// Every input is converted independently; a document that fails is
/// recorded and the remaining inputs are still processed.
pub fn convert(inputs: &[PathBuf], opts: ConvertOptions) -> ConvertReport {
    let mut report = ConvertReport {
        output_dir: opts.output_dir.to_path_buf(),
        dry_run: opts.dry_run,
        snapshot_dir: opts.snapshot_dir.map(Path::to_path_buf),
        converted: Vec::new(),
        failed: Vec::new(),
    };

    for input in inputs {
        match convert_file(input, &opts) {
            Ok(file) => report.converted.push(file),
            Err(err) => {
                debug!(input = %input.display(), "conversion failed");
                report.failed.push(FailedFile {
                    input: input.clone(),
                    error: describe_error(err),
                });
            }
        }
    }

    report
}

fn convert_file(input: &Path, opts: &ConvertOptions) -> Result<ConvertedFile> {
    let compiled = compile(input, opts.config, opts.snapshot_dir)?;
    let name = compiled.file.name().to_string();

    let warnings = compiled.ctx.warnings().map(describe_diagnostic).collect();
    let functions = compiled.ctx.analysis()?.functions.len();

    let generator = Generator::from_context(compiled.ctx)?.with_config(&compiled.config);
    let output = if opts.dry_run {
        ConvertOutput::Preview(
            generator
                .preview()
                .into_iter()
                .map(|f| PreviewFile {
                    path: f.path,
                    content: f.content,
                })
                .collect(),
        )
    } else {
        let result = generator
            .generate(opts.output_dir)
            .wrap_err_with(|| format!("failed to write the {} controller", name))?;
        ConvertOutput::Written(result.files)
    };

    Ok(ConvertedFile {
        input: input.to_path_buf(),
        functions,
        warnings,
        output,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rewire_core::WriteResult;

    use super::*;

    const HOME: &str = r#"<pipeline>
  <branch basename="Show">
    <segment>
      <node><start-node name="Show" call-mode="public"/></node>
      <simple-transition/>
      <node><interaction-node><template name="home/homepage"/></interaction-node></node>
    </segment>
  </branch>
</pipeline>"#;

    #[test]
    fn test_convert_writes_and_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("controllers");
        fs::write(dir.path().join("Home.xml"), HOME).unwrap();
        fs::write(dir.path().join("Broken.xml"), "<pipeline><branch>").unwrap();

        let inputs = vec![dir.path().join("Broken.xml"), dir.path().join("Home.xml")];
        let report = convert(
            &inputs,
            ConvertOptions {
                output_dir: &out,
                dry_run: false,
                config: None,
                snapshot_dir: None,
            },
        );

        assert!(report.has_failures());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].input, dir.path().join("Broken.xml"));
        assert_eq!(report.converted.len(), 1);

        let home = &report.converted[0];
        assert_eq!(home.input, dir.path().join("Home.xml"));
        assert_eq!(home.functions, 1);
        assert!(home.warnings.is_empty());
        match &home.output {
            ConvertOutput::Written(files) => {
                assert_eq!(files, &vec![("Home.js".to_string(), WriteResult::Written)]);
            }
            ConvertOutput::Preview(_) => panic!("expected written files"),
        }
        assert!(fs::read_to_string(out.join("Home.js")).unwrap().contains("function show()"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("controllers");
        fs::write(dir.path().join("Home.xml"), HOME).unwrap();
        fs::write(dir.path().join("rewire.toml"), "[output]\nindent = 2\n").unwrap();

        let report = convert(
            &[dir.path().join("Home.xml")],
            ConvertOptions {
                output_dir: &out,
                dry_run: true,
                config: None,
                snapshot_dir: None,
            },
        );

        assert!(!report.has_failures());
        match &report.converted[0].output {
            ConvertOutput::Preview(files) => {
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].path, "Home.js");
                assert!(files[0].content.contains("\n  var pdict = {};\n"));
            }
            ConvertOutput::Written(_) => panic!("expected a preview"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_snapshots_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = dir.path().join("debug");
        fs::write(dir.path().join("Home.xml"), HOME).unwrap();

        let report = convert(
            &[dir.path().join("Home.xml")],
            ConvertOptions {
                output_dir: dir.path(),
                dry_run: true,
                config: None,
                snapshot_dir: Some(&snapshots),
            },
        );

        assert!(!report.has_failures());
        assert!(snapshots.join("Home.parse.json").is_file());
        assert!(snapshots.join("Home.analyze.json").is_file());
    }
}
