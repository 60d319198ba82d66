//! Input discovery.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result, bail};
use tracing::debug;

/// Extension of exported pipeline documents.
const PIPELINE_EXTENSION: &str = "xml";

/// Expand the command-line inputs into pipeline documents.
///
/// Files are taken as given. A directory contributes the `*.xml` files
/// directly inside it, sorted by name.
pub fn collect(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = scan(input)?;
            debug!(dir = %input.display(), count = found.len(), "scanned input directory");
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }

    if files.is_empty() {
        bail!("no pipeline documents found");
    }
    Ok(files)
}

fn scan(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).wrap_err_with(|| format!("failed to read {}", dir.display()))?;

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == PIPELINE_EXTENSION))
        .collect();
    found.sort();
    Ok(found)
}
