//! Compilation context passed through pipeline phases.

use eyre::{Result, eyre};
use rewire_ir::{AnalysisResult, PipelineIR};

use super::diagnostic::{Diagnostic, Severity};

/// Context passed through all pipeline phases.
///
/// Carries the state of one document through each phase, accumulating
/// results and diagnostics along the way.
#[derive(Debug)]
pub struct CompilationContext {
    /// Pipeline name, usually the document's file stem.
    pub name: String,
    /// File name used when reporting parse errors.
    pub filename: String,
    /// The document being compiled.
    pub source: String,
    /// The parsed graph (populated by ParsePhase).
    pub ir: Option<PipelineIR>,
    /// Structured control flow (populated by AnalyzePhase).
    pub analysis: Option<AnalysisResult>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    /// Create a new compilation context for a document.
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            filename: format!("{}.xml", name),
            name,
            source: source.into(),
            ir: None,
            analysis: None,
            diagnostics: Vec::new(),
        }
    }

    /// Override the file name used in parse errors.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// The parsed graph.
    pub fn ir(&self) -> Result<&PipelineIR> {
        self.ir
            .as_ref()
            .ok_or_else(|| eyre!("pipeline IR not set - did ParsePhase run?"))
    }

    /// The analysis result.
    pub fn analysis(&self) -> Result<&AnalysisResult> {
        self.analysis
            .as_ref()
            .ok_or_else(|| eyre!("analysis not set - did AnalyzePhase run?"))
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Add an error diagnostic.
    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    /// Add a warning diagnostic.
    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    /// Add an info diagnostic.
    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }
}
