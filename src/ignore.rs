//! File selection over the template tree.
//! Builds the exclusion glob set (defaults plus the optional `.sitebakerignore`
//! file) and splits the remaining files into text and binary selections.

use crate::constants::{BINARY_EXTENSIONS, DEFAULT_IGNORE_PATTERNS, TEMPLATE_IGNORE_FILE};
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Which half of the template tree a selection covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Rendered against the context
    Text,
    /// Copied byte-for-byte
    Binary,
}

impl FileKind {
    /// Classifies a path by its extension.
    pub fn of<P: AsRef<Path>>(path: P) -> Self {
        let is_binary = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| BINARY_EXTENSIONS.iter().any(|b| b.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);
        if is_binary {
            FileKind::Binary
        } else {
            FileKind::Text
        }
    }
}

/// Reads the template ignore file and combines it with the default patterns.
///
/// # Arguments
/// * `template_root` - Root of the template tree
///
/// # Returns
/// * `Result<GlobSet>` - Set of compiled glob patterns for path matching
///
/// # Notes
/// - A missing ignore file only yields the default patterns
/// - Empty lines and lines starting with `#` are skipped
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }

    let ignore_path = template_root.as_ref().join(TEMPLATE_IGNORE_FILE);
    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(line)?);
        }
    } else {
        debug!("{} does not exist", ignore_path.display());
    }

    Ok(builder.build()?)
}

/// Lists the files of `kind` under `template_root`, relative to it and sorted.
pub fn select_files<P: AsRef<Path>>(
    template_root: P,
    ignored: &GlobSet,
    kind: FileKind,
) -> Result<Vec<PathBuf>> {
    let template_root = template_root.as_ref();
    let mut selected = Vec::new();

    for entry in WalkDir::new(template_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(template_root) else {
            continue;
        };
        if ignored.is_match(relative) {
            debug!("Skipping ignored file {}", relative.display());
            continue;
        }
        if FileKind::of(relative) == kind {
            selected.push(relative.to_path_buf());
        }
    }

    selected.sort();
    Ok(selected)
}
