//! Component import path rules.

mod common;
mod entry_cache;
mod import_components;

pub use entry_cache::{EntryFileCache, EntryFileProbe, FsEntryProbe};
pub use import_components::{
    EntryFileImportInsideModule, ImportComponents, ImportNotFromEntryFile, ImportNotRelative, ReexportAll,
};
