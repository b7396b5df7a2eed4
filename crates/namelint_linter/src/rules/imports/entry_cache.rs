//! Memoised existence checks for component entry files.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Extensions tried after the extensionless entry path.
const ENTRY_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts"];

/// Answers whether an entry file exists.
pub trait EntryFileProbe: Send + Sync {
    /// `entry` is the extensionless path, e.g. `app/components/foo/foo-components`.
    fn exists(&self, entry: &Path) -> bool;
}

/// Looks for `<entry>.ts`, `<entry>.tsx` or `<entry>.d.ts` on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEntryProbe;

impl EntryFileProbe for FsEntryProbe {
    fn exists(&self, entry: &Path) -> bool {
        ENTRY_EXTENSIONS.iter().any(|extension| {
            let mut candidate = OsString::from(entry.as_os_str());
            candidate.push(".");
            candidate.push(extension);
            Path::new(&candidate).is_file()
        })
    }
}

/// Probe results keyed by entry path, kept for one run.
///
/// Files created or removed during the run are not noticed.
#[derive(Debug, Default)]
pub struct EntryFileCache {
    entries: Mutex<HashMap<PathBuf, bool>>,
}

impl EntryFileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_probe(&self, entry: &Path, probe: &dyn EntryFileProbe) -> bool {
        if let Some(&exists) = self.lock().get(entry) {
            tracing::trace!(entry = %entry.display(), exists, "entry file cache hit");
            return exists;
        }

        // Probe without holding the lock; a racing probe of the same path agrees.
        let exists = probe.exists(entry);
        tracing::debug!(entry = %entry.display(), exists, "entry file probed");
        self.lock().insert(entry.to_path_buf(), exists);
        exists
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, bool>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
