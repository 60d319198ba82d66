//! Pipeline orchestrator.

use eyre::Result;
use rewire_parser::PipelineFile;
use tracing::debug;

use super::{
    CompilationContext, Phase, PhaseInfo, Plugin,
    phases::{AnalyzePhase, ParsePhase, ValidatePhase},
};
use crate::analysis::SuccessConditions;

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (parse, validate, analyze) followed by any user
/// phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .success_conditions(config.success_conditions())
///     .plugin(SnapshotPlugin::with_output_dir(".rewire/debug"));
///
/// let ctx = pipeline.run(&xml, "Account")?;
/// ```
pub struct Pipeline {
    success: SuccessConditions,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with default built-in phases.
    pub fn new() -> Self {
        Self {
            success: SuccessConditions::default(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Replace the pipelet success-condition table used by the analyzer.
    pub fn success_conditions(mut self, success: SuccessConditions) -> Self {
        self.success = success;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on a document.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally. A malformed document
    /// fails with the boxed [`rewire_parser::Error`] as the report's cause.
    pub fn run(&self, source: &str, name: &str) -> Result<CompilationContext> {
        self.run_context(CompilationContext::new(source, name))
    }

    /// Run the pipeline on a document read from disk.
    pub fn run_file(&self, file: &PipelineFile) -> Result<CompilationContext> {
        let ctx = CompilationContext::new(file.content(), file.name())
            .with_filename(file.path().display().to_string());
        self.run_context(ctx)
    }

    /// Names and descriptions of every phase, in run order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        self.builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|p| p.info())
            .collect()
    }

    fn builtin_phases(&self) -> Vec<Box<dyn Phase>> {
        vec![
            Box::new(ParsePhase),
            Box::new(ValidatePhase::new()),
            Box::new(AnalyzePhase::new(self.success.clone())),
        ]
    }

    fn run_context(&self, mut ctx: CompilationContext) -> Result<CompilationContext> {
        let builtin_phases = self.builtin_phases();

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        debug!(phase = phase_name, pipeline = %ctx.name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    const SHOW: &str = r#"<pipeline>
  <branch basename="Show">
    <segment>
      <node><start-node name="Show" call-mode="public"/></node>
      <simple-transition/>
      <node><end-node/></node>
    </segment>
  </branch>
</pipeline>"#;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct MarkerPhase;

    impl Phase for MarkerPhase {
        fn name(&self) -> &'static str {
            "marker"
        }

        fn description(&self) -> &'static str {
            "Record that user phases run last"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            let functions = ctx.analysis()?.functions.len();
            ctx.add_info(self.name(), format!("{} function(s)", functions));
            Ok(())
        }
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::new().run(SHOW, "Home").expect("pipeline should succeed");
        assert!(ctx.ir.is_some());
        assert!(ctx.analysis.is_some());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_phase_info_lists_user_phases_last() {
        let names: Vec<_> = Pipeline::new()
            .phase(MarkerPhase)
            .phase_info()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["parse", "validate", "analyze", "marker"]);
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let plugin = CountingPlugin {
            before_count: before.clone(),
            after_count: after.clone(),
        };

        Pipeline::new()
            .plugin(plugin)
            .phase(MarkerPhase)
            .run(SHOW, "Home")
            .expect("pipeline should succeed");

        // 3 built-in phases + 1 user phase
        assert_eq!(before.load(Ordering::SeqCst), 4);
        assert_eq!(after.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_user_phase_sees_analysis() {
        let ctx = Pipeline::new()
            .phase(MarkerPhase)
            .run(SHOW, "Home")
            .expect("pipeline should succeed");
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].message, "1 function(s)");
    }

    #[test]
    fn test_parse_error_is_downcastable() {
        let err = Pipeline::new()
            .run("<pipeline><branch>", "Broken")
            .expect_err("malformed xml");
        assert!(err.downcast_ref::<Box<rewire_parser::Error>>().is_some());
    }
}
