//! Control-flow analysis and shared code generation utilities for rewire.
//!
//! This crate provides the language-agnostic middle of the converter:
//!
//! - [`analysis`] - Control-flow reconstruction over a [`rewire_ir::PipelineIR`]
//! - [`pipeline`] - Phase orchestration with plugins and diagnostics
//! - [`builder`] - Code building primitives ([`CodeBuilder`](builder::CodeBuilder), [`CodeFragment`](builder::CodeFragment))
//! - [`generation`] - Symbol table and require collection
//! - [`language`] - The [`LanguageCodegen`](language::LanguageCodegen) trait target generators implement
//! - [`config`] - `rewire.toml` loading

pub mod analysis;
pub mod builder;
pub mod config;
pub mod generation;
pub mod language;
pub mod pipeline;

pub use analysis::{Analyzer, SuccessConditions, analyze};
pub use config::RewireConfig;
pub use pipeline::{CompilationContext, Diagnostic, Pipeline, Severity};
