//! External symbols and the module paths they are loaded from.

use indexmap::IndexMap;

use crate::analysis::symbol;

/// Symbol name -> module path mapping used to emit `require` lines.
///
/// # Example
///
/// ```
/// use rewire_codegen::generation::SymbolTable;
///
/// let table = SymbolTable::default()
///     .with_symbol("app", "app_storefront_controllers/cartridge/scripts/app");
/// assert_eq!(table.path("ISML"), Some("dw/template/ISML"));
/// assert_eq!(table.path("app"), Some("app_storefront_controllers/cartridge/scripts/app"));
/// ```
#[derive(Debug, Clone)]
pub struct SymbolTable {
    paths: IndexMap<String, String>,
}

impl SymbolTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            paths: IndexMap::new(),
        }
    }

    /// Register (or replace) the module path of a symbol.
    pub fn with_symbol(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(name, path);
        self
    }

    /// Register (or replace) the module path of a symbol.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.paths.insert(name.into(), path.into());
    }

    /// Module path registered for `name`.
    pub fn path(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    /// Module path for `name`, or the name itself when unknown.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.path(name).unwrap_or(name)
    }

    /// Iterate over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::empty()
            .with_symbol(symbol::ISML, "dw/template/ISML")
            .with_symbol(symbol::URL_UTILS, "dw/web/URLUtils")
            .with_symbol(symbol::APP, "~/cartridge/scripts/app")
            .with_symbol(symbol::GUARD, "~/cartridge/scripts/guard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let table = SymbolTable::default();
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["ISML", "URLUtils", "app", "guard"]);
        assert_eq!(table.path("guard"), Some("~/cartridge/scripts/guard"));
    }

    #[test]
    fn test_override_keeps_position() {
        let table = SymbolTable::default().with_symbol("ISML", "custom/ISML");
        assert_eq!(table.iter().next(), Some(("ISML", "custom/ISML")));
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_name() {
        let table = SymbolTable::empty();
        assert_eq!(table.resolve("Transaction"), "Transaction");
    }
}
