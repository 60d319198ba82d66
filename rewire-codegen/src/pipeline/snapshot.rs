//! Pipeline snapshot plugin for debugging.
//!
//! Captures the pipeline state after each phase so the parsed graph and the
//! reconstructed control flow can be inspected as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use eyre::Result;
use rewire_ir::{AnalysisResult, PipelineIR};
use serde::Serialize;

use super::{CompilationContext, Diagnostic, Plugin};

/// A snapshot of the pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// Pipeline the snapshot belongs to.
    pub pipeline: String,

    /// The phase that just completed.
    pub phase: String,

    /// The parsed graph (available after the "parse" phase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ir: Option<PipelineIR>,

    /// Structured control flow (available after the "analyze" phase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    /// File name the snapshot is written under.
    pub fn filename(&self) -> String {
        format!("{}.{}.json", self.pipeline, self.phase)
    }
}

/// A plugin that captures pipeline state after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".rewire/debug"));
/// let ctx = pipeline.run(&xml, "Account")?;
/// // .rewire/debug/Account.parse.json, Account.validate.json, Account.analyze.json
/// ```
pub struct SnapshotPlugin {
    snapshots: Mutex<Vec<PhaseSnapshot>>,
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin that keeps snapshots in memory.
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that also writes to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: Mutex::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.lock().clone()
    }

    /// Write all snapshots to `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        for snapshot in self.lock().iter() {
            write_snapshot(dir.as_ref(), snapshot)?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PhaseSnapshot>> {
        // snapshots stay readable after a panicking hook
        self.snapshots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = PhaseSnapshot {
            pipeline: ctx.name.clone(),
            phase: phase.to_string(),
            ir: ctx.ir.clone(),
            analysis: ctx.analysis.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };

        if let Some(dir) = &self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }
        self.lock().push(snapshot);
        Ok(())
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(dir.join(snapshot.filename()), json)?;
    Ok(())
}
