//! Source file discovery.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Whether `path` names a TypeScript source, declaration files included.
pub fn is_typescript(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("ts" | "tsx" | "mts" | "cts")
    )
}

/// Expands `paths` into a sorted, deduplicated list of TypeScript files.
///
/// Explicit file arguments are kept whatever their directory. Directory walks
/// skip `node_modules` and hidden directories below the starting point.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if is_typescript(path) {
                files.push(path.clone());
            }
            continue;
        }

        let walker = WalkDir::new(path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_typescript(entry.path()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => tracing::warn!("{err}"),
            }
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!(files = files.len(), "collected source files");
    files
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}
