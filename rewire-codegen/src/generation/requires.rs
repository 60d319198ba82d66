//! Require collection.

use indexmap::IndexMap;

use super::SymbolTable;

/// Tracks `require` lines and deduplicates them.
///
/// Maintains insertion order for deterministic output.
///
/// # Example
///
/// ```
/// use rewire_codegen::generation::{RequireCollector, SymbolTable};
///
/// let symbols = SymbolTable::default();
/// let mut requires = RequireCollector::new();
/// requires.add_symbol(&symbols, "guard");
/// requires.add_symbol(&symbols, "ISML");
/// requires.add_symbol(&symbols, "guard");
///
/// let lines: Vec<String> = requires
///     .iter()
///     .map(|(name, path)| format!("var {} = require('{}');", name, path))
///     .collect();
/// assert_eq!(lines, [
///     "var guard = require('~/cartridge/scripts/guard');",
///     "var ISML = require('dw/template/ISML');",
/// ]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequireCollector {
    /// Local binding name -> module path
    requires: IndexMap<String, String>,
}

impl RequireCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding for an explicit module path. The first path wins.
    pub fn add(&mut self, name: &str, path: &str) {
        self.requires
            .entry(name.to_string())
            .or_insert_with(|| path.to_string());
    }

    /// Add a binding for a symbol, resolving its path through `symbols`.
    pub fn add_symbol(&mut self, symbols: &SymbolTable, name: &str) {
        self.add(name, symbols.resolve(name));
    }

    /// Add every symbol in order.
    pub fn extend<'a>(&mut self, symbols: &SymbolTable, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.add_symbol(symbols, name);
        }
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &RequireCollector) {
        for (name, path) in other.iter() {
            self.add(name, path);
        }
    }

    /// Check if a binding is already required.
    pub fn has(&self, name: &str) -> bool {
        self.requires.contains_key(name)
    }

    /// Iterate over all requires in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.requires.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.requires.is_empty()
    }

    /// Get the number of requires.
    pub fn len(&self) -> usize {
        self.requires.len()
    }
}
