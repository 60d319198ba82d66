//! Code generation outputs.
//!
//! - [`SymbolTable`] - External symbol to module path mapping
//! - [`RequireCollector`] - Require tracking and deduplication

mod requires;
mod symbols;

pub use requires::RequireCollector;
pub use symbols::SymbolTable;
