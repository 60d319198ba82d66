//! Explain command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from control-flow explanation.
#[derive(Debug)]
pub struct ExplainReport {
    /// Input document.
    pub input: PathBuf,
    /// Pipeline name.
    pub pipeline: String,
    /// Pipeline group, if declared.
    pub group: Option<String>,
    /// Number of graph nodes.
    pub node_count: usize,
    /// Analysed functions.
    pub entry_points: Vec<EntryPointInfo>,
    /// Pipeline phases.
    pub phases: Vec<PhaseInfo>,
    /// Validation lints.
    pub lints: Vec<LintInfo>,
    /// Validation diagnostics.
    pub diagnostics: Vec<String>,
    /// Indented block tree of every function.
    pub outline: String,
}

/// Information about an analysed function.
#[derive(Debug)]
pub struct EntryPointInfo {
    /// Function name.
    pub name: String,
    /// "public", "private" or "form handler".
    pub kind: String,
    /// Whether the entry point requires https.
    pub secure: bool,
}

/// Information about a pipeline phase.
#[derive(Debug)]
pub struct PhaseInfo {
    /// Phase name.
    pub name: String,
    /// Phase description.
    pub description: String,
}

/// Information about a validation lint.
#[derive(Debug)]
pub struct LintInfo {
    /// Lint name.
    pub name: String,
    /// Lint description.
    pub description: String,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Rewire Pipeline Explanation");
        out.newline();

        out.key_value("Input", &self.input.display().to_string());
        out.key_value_indented("Pipeline", &self.pipeline);
        if let Some(group) = &self.group {
            out.key_value_indented("Group", group);
        }
        out.key_value_indented("Nodes", &self.node_count.to_string());
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        if !self.diagnostics.is_empty() {
            for diagnostic in &self.diagnostics {
                out.warning(diagnostic);
            }
            out.newline();
        }

        out.section(&format!("Entry Points ({})", self.entry_points.len()));
        for entry in &self.entry_points {
            let secure = if entry.secure { ", https" } else { "" };
            out.list_item(&format!("{} ({}{})", entry.name, entry.kind, secure));
        }
        out.newline();

        out.section("Control Flow");
        out.preformatted(self.outline.trim_end());
    }
}
