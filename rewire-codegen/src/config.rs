//! `rewire.toml` configuration.
//!
//! Every section is optional; missing values fall back to the built-in
//! success-condition table, symbol table and output settings.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use eyre::{Result, WrapErr};
use indexmap::IndexMap;
use rewire_core::Overwrite;
use serde::Deserialize;

use crate::{analysis::SuccessConditions, builder::Indent, generation::SymbolTable};

/// File name looked up next to the converted documents.
pub const CONFIG_FILE: &str = "rewire.toml";

/// Parsed `rewire.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewireConfig {
    pub output: OutputConfig,
    /// Pipelet name -> success condition, merged over the built-in table.
    pub success: IndexMap<String, String>,
    #[serde(rename = "success-keys")]
    pub success_keys: SuccessKeysConfig,
    /// Symbol -> module path, merged over the built-in table.
    pub symbols: IndexMap<String, String>,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Spaces per indentation level; 0 selects tabs.
    pub indent: u8,
    pub overwrite: Overwrite,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            overwrite: Overwrite::Always,
        }
    }
}

/// `[success-keys]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuccessKeysConfig {
    /// Replaces the built-in domain-object key list when present.
    pub domain: Option<Vec<String>>,
}

impl FromStr for RewireConfig {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).wrap_err("invalid rewire configuration")
    }
}

impl RewireConfig {
    /// Read a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        content
            .parse()
            .wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    /// Find `rewire.toml` in `dir` or one of its ancestors.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        dir.as_ref()
            .ancestors()
            .map(|d| d.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load the explicit file if given, otherwise the discovered one,
    /// otherwise the defaults.
    pub fn load(explicit: Option<&Path>, search_from: impl AsRef<Path>) -> Result<Self> {
        match explicit
            .map(Path::to_path_buf)
            .or_else(|| Self::discover(search_from))
        {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Success-condition table with this configuration applied.
    pub fn success_conditions(&self) -> SuccessConditions {
        let mut table = SuccessConditions::default();
        for (pipelet, expression) in &self.success {
            table = table.with_condition(pipelet, expression);
        }
        if let Some(domain) = &self.success_keys.domain {
            table = table.with_domain_keys(domain.iter().cloned());
        }
        table
    }

    /// Symbol table with this configuration applied.
    pub fn symbol_table(&self) -> SymbolTable {
        let mut table = SymbolTable::default();
        for (name, path) in &self.symbols {
            table.insert(name, path);
        }
        table
    }

    pub fn indent(&self) -> Indent {
        Indent::from_width(self.output.indent)
    }

    pub fn overwrite(&self) -> Overwrite {
        self.output.overwrite
    }
}
