//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod convert;
mod explain;
mod output;

pub use check::{CheckReport, CheckedFile};
pub use convert::{ConvertOutput, ConvertReport, ConvertedFile, FailedFile, PreviewFile};
pub use explain::{EntryPointInfo, ExplainReport, LintInfo, PhaseInfo};
pub use output::{Report, TerminalOutput};
