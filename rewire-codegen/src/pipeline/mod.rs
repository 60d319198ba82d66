//! Compilation pipeline for pipeline conversion.
//!
//! This module provides a [`Pipeline`] orchestrator that manages the phases
//! from XML parsing to control-flow analysis. The pipeline provides:
//!
//! - Explicit phase boundaries (parse → validate → analyze)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Shared state via [`CompilationContext`]
//!
//! # Example
//!
//! ```
//! use rewire_codegen::pipeline::Pipeline;
//!
//! let xml = r#"<pipeline>
//!   <branch basename="Show">
//!     <segment>
//!       <node><start-node name="Show" call-mode="public"/></node>
//!       <simple-transition/>
//!       <node><end-node/></node>
//!     </segment>
//!   </branch>
//! </pipeline>"#;
//!
//! let ctx = Pipeline::new().run(xml, "Home")?;
//! assert_eq!(ctx.analysis()?.functions.len(), 1);
//! assert!(!ctx.has_warnings());
//! # Ok::<(), eyre::Report>(())
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
