//! Target-path resolution.
//!
//! Paths address segments and nodes of the document tree. Components are
//! joined with `.` and absolute paths start with `/`:
//!
//! ```text
//! /Show.1            segment 1 of top-level branch "Show"
//! /Show.1.3          node 3 of that segment
//! /Show.1.3.b2.1     segment 1 of branch "b2" nested in that node
//! ```
//!
//! Relative target paths are `/`-separated steps: `.` (no-op), `..` (pop
//! one component), `+N` (advance the trailing sequence number by N) or a
//! `.`-joined name to descend into.

/// Resolve `target` against `base`.
///
/// Returns `None` when the path cannot be applied, e.g. popping past the
/// root or advancing a component that is not a number.
///
/// # Example
///
/// ```
/// use rewire_parser::resolve_target_path;
///
/// assert_eq!(resolve_target_path("/Show.1.3", "../+1").as_deref(), Some("/Show.2"));
/// assert_eq!(resolve_target_path("/Show.1", "/Edit.1").as_deref(), Some("/Edit.1"));
/// ```
pub fn resolve_target_path(base: &str, target: &str) -> Option<String> {
    let (mut parts, steps) = match target.strip_prefix('/') {
        Some(absolute) => (Vec::new(), absolute),
        None => (components(base), target),
    };

    for step in steps.split('/') {
        match step {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            advance if advance.starts_with('+') => {
                let by: u32 = advance[1..].parse().ok()?;
                let last = parts.last_mut()?;
                let current: u32 = last.parse().ok()?;
                *last = current.checked_add(by)?.to_string();
            }
            name => parts.extend(
                name.split('.')
                    .filter(|c| !c.is_empty())
                    .map(str::to_string),
            ),
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("/{}", parts.join(".")))
    }
}

/// Path of child `index` (1-based) below `parent`.
pub(crate) fn child_path(parent: &str, index: impl std::fmt::Display) -> String {
    format!("{}.{}", parent, index)
}

fn components(path: &str) -> Vec<String> {
    path.trim_start_matches('/')
        .split('.')
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
