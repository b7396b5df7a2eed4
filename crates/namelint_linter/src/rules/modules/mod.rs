//! Namespace and module declaration rules.

mod exported_namespace_members;

pub use exported_namespace_members::{ExportedNamespaceMembers, NamespaceMemberNotExported};
