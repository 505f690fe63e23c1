//! Minimal glob expansion for artifact path patterns.
//!
//! Patterns may use `*` and `?` in the final path component only (e.g.
//! `target/release/simple*`), which is all artifact lists need.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Result, XiphosError};

/// Translate a single-component glob pattern into an anchored regex.
fn pattern_to_regex(pattern: &str) -> Result<Regex> {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            c => regex.push_str(&regex::escape(&c.to_string())),
        }
    }
    regex.push('$');
    Regex::new(&regex)
        .map_err(|e| XiphosError::bundle(format!("Bad artifact pattern {pattern:?}: {e}")))
}

/// Expand a pattern relative to `base` into matching file paths, sorted.
///
/// A pattern without wildcards must name an existing file, and a wildcard
/// pattern matching nothing is an error.
pub fn expand(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = base.join(pattern);
    let file_pattern = full
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| XiphosError::bundle(format!("Bad artifact pattern: {pattern:?}")))?;

    if !file_pattern.contains(['*', '?']) {
        if full.is_file() {
            return Ok(vec![full]);
        }
        return Err(XiphosError::bundle(format!(
            "Artifact not found: {}",
            full.display()
        )));
    }

    let dir = full.parent().unwrap_or(base);
    let regex = pattern_to_regex(file_pattern)?;
    let mut matches = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if regex.is_match(name) {
                matches.push(entry.path());
            }
        }
    }

    if matches.is_empty() {
        return Err(XiphosError::bundle(format!(
            "No artifacts match pattern: {}",
            full.display()
        )));
    }
    matches.sort();
    Ok(matches)
}
