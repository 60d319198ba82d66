//! Check operation - parse and analyze without generating code.

use std::path::{Path, PathBuf};

use rewire_codegen::Severity;

use super::{compile, describe_diagnostic, describe_error};
use crate::reports::{CheckReport, CheckedFile};

/// Execute the check operation.
///
/// Runs the pipeline on every input and collects its diagnostics. A document
/// that cannot be parsed is reported as an error for that input only.
pub fn check(inputs: &[PathBuf], config: Option<&Path>) -> CheckReport {
    CheckReport {
        files: inputs.iter().map(|input| check_file(input, config)).collect(),
    }
}

fn check_file(input: &Path, config: Option<&Path>) -> CheckedFile {
    let mut checked = CheckedFile {
        input: input.to_path_buf(),
        functions: Vec::new(),
        errors: Vec::new(),
        warnings: Vec::new(),
        infos: Vec::new(),
    };

    let ctx = match compile(input, config, None) {
        Ok(compiled) => compiled.ctx,
        Err(err) => {
            checked.errors.push(describe_error(err));
            return checked;
        }
    };

    for diag in &ctx.diagnostics {
        let msg = describe_diagnostic(diag);
        match diag.severity {
            Severity::Error => checked.errors.push(msg),
            Severity::Warning => checked.warnings.push(msg),
            Severity::Info => checked.infos.push(msg),
        }
    }

    if let Some(analysis) = &ctx.analysis {
        checked.functions = analysis.functions.iter().map(|f| f.name.clone()).collect();
    }
    checked
}
