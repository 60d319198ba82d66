//! Explain operation - control-flow explanation.

use std::path::Path;

use eyre::Result;
use rewire_codegen::{
    Pipeline,
    analysis::render_outline,
    pipeline::phases::ValidatePhase,
};
use rewire_ir::AnalyzedFunction;

use super::{compile, describe_diagnostic};
use crate::reports::{EntryPointInfo, ExplainReport, LintInfo, PhaseInfo};

/// Execute the explain operation.
///
/// Runs the pipeline on one document and returns the phases it went
/// through together with the reconstructed control flow.
pub fn explain(input: &Path, config: Option<&Path>) -> Result<ExplainReport> {
    let compiled = compile(input, config, None)?;
    let ctx = &compiled.ctx;
    let ir = ctx.ir()?;
    let analysis = ctx.analysis()?;

    let phases = Pipeline::new()
        .phase_info()
        .into_iter()
        .map(|p| PhaseInfo {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();

    let lints = ValidatePhase::new()
        .lint_info()
        .into_iter()
        .map(|l| LintInfo {
            name: l.name.to_string(),
            description: l.description.to_string(),
        })
        .collect();

    // Analyzer warnings are already part of the outline.
    let diagnostics = ctx
        .warnings()
        .filter(|d| d.phase != "analyze")
        .map(describe_diagnostic)
        .collect();

    Ok(ExplainReport {
        input: input.to_path_buf(),
        pipeline: ir.name.clone(),
        group: ir.group.clone(),
        node_count: ir.nodes.len(),
        entry_points: analysis.functions.iter().map(entry_point).collect(),
        phases,
        lints,
        diagnostics,
        outline: render_outline(ir, analysis),
    })
}

fn entry_point(function: &AnalyzedFunction) -> EntryPointInfo {
    let kind = if function.is_form_handler {
        "form handler"
    } else if function.is_public {
        "public"
    } else {
        "private"
    };
    EntryPointInfo {
        name: function.name.clone(),
        kind: kind.to_string(),
        secure: function.is_secure,
    }
}
