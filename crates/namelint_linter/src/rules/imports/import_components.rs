//! ImportComponents rule implementation.
//!
//! Component modules live in `<components-root>/<module>/` and expose their
//! public surface through `<module>-components.ts`. Code outside a module
//! imports the entry file; code inside the module uses relative paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use namelint_ast::{ExportDeclaration, ModuleSpecifier, NodeKind, NodeRef, SyntaxKind};
use namelint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use namelint_text_size::Ranged;

use super::common::{PathDetails, normalize, relative_specifier};
use super::entry_cache::{EntryFileCache, EntryFileProbe, FsEntryProbe};
use crate::{CheckContext, FromConfig, OptionsError, Properties, Rule};

const RELEVANT_KINDS: &[SyntaxKind] = &[SyntaxKind::ImportDeclaration, SyntaxKind::ExportDeclaration];

pub struct ImportComponents {
    components_root: String,
    project_root: PathBuf,
    cache: Arc<EntryFileCache>,
    probe: Arc<dyn EntryFileProbe>,
}

impl ImportComponents {
    pub fn new(components_root: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self::with_probe(components_root, project_root, Arc::new(FsEntryProbe))
    }

    /// Uses `probe` instead of the file system to find entry files.
    pub fn with_probe(
        components_root: impl Into<String>,
        project_root: impl Into<PathBuf>,
        probe: Arc<dyn EntryFileProbe>,
    ) -> Self {
        Self {
            components_root: components_root.into(),
            project_root: project_root.into(),
            cache: Arc::new(EntryFileCache::new()),
            probe,
        }
    }

    pub fn cache(&self) -> &EntryFileCache {
        &self.cache
    }
}

impl FromConfig for ImportComponents {
    const MODULE_NAME: &'static str = "import-components";

    fn from_config(properties: &Properties) -> Result<Self, OptionsError> {
        let config = properties.config();
        Ok(Self::new(config.components_root(), config.project_root()))
    }
}

#[derive(Debug, Clone)]
pub struct ImportNotFromEntryFile {
    pub expected: String,
}

impl Violation for ImportNotFromEntryFile {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Always;

    fn message(&self) -> String {
        "Components should be imported from an entry file.".to_string()
    }

    fn fix_title(&self) -> Option<String> {
        Some(format!("Import from {}", self.expected))
    }
}

#[derive(Debug, Clone)]
pub struct ImportNotRelative;

impl Violation for ImportNotRelative {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Sometimes;

    fn message(&self) -> String {
        "A relative import should be used inside the components.".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct EntryFileImportInsideModule;

impl Violation for EntryFileImportInsideModule {
    fn message(&self) -> String {
        "An entry file import should not be used inside the components.".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct ReexportAll;

impl Violation for ReexportAll {
    fn message(&self) -> String {
        "Forbidden 'export * from', use named re-exports.".to_string()
    }
}

impl Rule for ImportComponents {
    fn name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn relevant_kinds(&self) -> &'static [SyntaxKind] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, node: NodeRef) -> Vec<Diagnostic> {
        let source_file = ctx.tree().file_name();
        let source = PathDetails::parse(source_file, &self.components_root);

        let specifier = match node.kind() {
            NodeKind::ImportDeclaration(Some(specifier)) => specifier,
            NodeKind::ExportDeclaration(ExportDeclaration {
                specifier: Some(specifier),
                is_star,
            }) => {
                if *is_star && source.is_some() {
                    return vec![Diagnostic::new(ReexportAll, node.range())];
                }
                specifier
            }
            _ => return vec![],
        };

        self.validate(source_file, source.as_ref(), specifier)
            .into_iter()
            .collect()
    }
}

impl ImportComponents {
    fn validate(
        &self,
        source_file: &str,
        source: Option<&PathDetails>,
        specifier: &ModuleSpecifier,
    ) -> Option<Diagnostic> {
        let root = self.components_root.as_str();
        let Some(target) = PathDetails::parse(&specifier.value, root) else {
            // An outside import can still point back at the module's own entry file.
            let source = source?;
            let imported_file = specifier.value.rsplit('/').next()?;
            return (imported_file == source.entry_name)
                .then(|| Diagnostic::new(EntryFileImportInsideModule, specifier.range));
        };

        if let Some(source) = source {
            if source.module_name == target.module_name {
                let mut diagnostic = Diagnostic::new(ImportNotRelative, specifier.range);
                if let Some(relative) = relative_specifier(source, &target) {
                    diagnostic.set_fix(self.replace_specifier(specifier, &relative));
                }
                return Some(diagnostic);
            }
        }

        let targets_entry = target.split_path.len() == 1 && target.file_name() == Some(target.entry_name.as_str());
        if targets_entry || !self.entry_exists(source_file, specifier, &target) {
            return None;
        }

        let expected = target.entry_specifier(root);
        let fix = self.replace_specifier(specifier, &expected);
        Some(Diagnostic::new(ImportNotFromEntryFile { expected }, specifier.range).with_fix(fix))
    }

    fn entry_exists(&self, source_file: &str, specifier: &ModuleSpecifier, target: &PathDetails) -> bool {
        let base = if specifier.value.starts_with('.') {
            Path::new(source_file)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        } else {
            self.project_root.clone()
        };
        let entry = normalize(
            &base
                .join(target.module_dir(&self.components_root))
                .join(&target.entry_name),
        );
        self.cache.get_or_probe(&entry, self.probe.as_ref())
    }

    fn replace_specifier(&self, specifier: &ModuleSpecifier, path: &str) -> Fix {
        let quote = specifier.quote;
        Fix::safe_edit(Edit::range_replacement(
            format!("{quote}{path}{quote}"),
            specifier.range,
        ))
    }
}
