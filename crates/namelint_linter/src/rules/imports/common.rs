//! Shared utilities for import rules.

use std::path::{Component, Path, PathBuf};

const SEPARATOR: char = '/';

/// Name suffix of a component module's entry file: `foo` -> `foo-components`.
pub(crate) const ENTRY_FILE_SUFFIX: &str = "-components";

/// A path split around the component root.
///
/// For `../../app/components/foo/bar/baz` with root `app/components`:
/// prefix `../../`, module `foo`, split path `[bar, baz]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathDetails {
    /// Everything before the root.
    pub(crate) prefix: String,
    pub(crate) module_name: String,
    /// `<module_name>-components`
    pub(crate) entry_name: String,
    /// Segments after the module directory.
    pub(crate) split_path: Vec<String>,
}

impl PathDetails {
    /// `None` when `path` does not pass through `root`.
    pub(crate) fn parse(path: &str, root: &str) -> Option<Self> {
        let path = path.replace('\\', "/");
        let splitter = format!("{root}{SEPARATOR}");
        let start = path.find(&splitter)?;
        let (prefix, rest) = path.split_at(start);
        let mut segments = rest[splitter.len()..].split(SEPARATOR);

        let module_name = segments.next().filter(|name| !name.is_empty())?;
        Some(Self {
            prefix: prefix.to_string(),
            module_name: module_name.to_string(),
            entry_name: format!("{module_name}{ENTRY_FILE_SUFFIX}"),
            split_path: segments.map(str::to_string).collect(),
        })
    }

    /// The last segment after the module directory.
    pub(crate) fn file_name(&self) -> Option<&str> {
        self.split_path.last().map(String::as_str)
    }

    /// `<prefix><root>/<module>`
    pub(crate) fn module_dir(&self, root: &str) -> String {
        format!("{}{root}{SEPARATOR}{}", self.prefix, self.module_name)
    }

    /// `<prefix><root>/<module>/<module>-components`
    pub(crate) fn entry_specifier(&self, root: &str) -> String {
        format!("{}{SEPARATOR}{}", self.module_dir(root), self.entry_name)
    }
}

/// Specifier leading from `source` to `target` when both live in the same module.
///
/// `None` if `target` names no file below the module directory.
pub(crate) fn relative_specifier(source: &PathDetails, target: &PathDetails) -> Option<String> {
    let file_name = target.file_name()?;
    let source_dirs = dirs(&source.split_path);
    let target_dirs = dirs(&target.split_path);

    let common = source_dirs
        .iter()
        .zip(target_dirs)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = vec![".."; source_dirs.len() - common];
    segments.extend(target_dirs[common..].iter().map(String::as_str));
    segments.push(file_name);

    let joined = segments.join("/");
    if joined.starts_with("../") {
        Some(joined)
    } else {
        Some(format!("./{joined}"))
    }
}

fn dirs(split_path: &[String]) -> &[String] {
    split_path.split_last().map_or(&[], |(_, dirs)| dirs)
}

/// Resolves `.` and `..` without touching the file system.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else {
                    normalized.push(component);
                }
            }
            _ => normalized.push(component),
        }
    }
    normalized
}
