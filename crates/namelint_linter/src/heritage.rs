//! Member lookup along `extends`/`implements` chains.

use std::collections::HashSet;

use namelint_ast::{DeclRef, FileId, NodeRef, TypeChecker};
use serde::Deserialize;

/// How far [`declares_member`] looks before concluding a name is not inherited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeritageSearch {
    /// The first class or interface declaration reached decides the answer.
    /// Later heritage entries and merged declarations are never visited.
    #[default]
    FirstDeclaration,
    /// Every declaration of every heritage entry is searched.
    Exhaustive,
}

/// Whether `name` is declared by an ancestor of the class or interface `decl`.
///
/// Unresolved references end the search on that branch. A declaration seen
/// twice is treated as not declaring the name, so cyclic heritage terminates.
pub fn declares_member(
    checker: &dyn TypeChecker,
    file: FileId,
    decl: NodeRef,
    name: &str,
    mode: HeritageSearch,
) -> bool {
    let mut visited = HashSet::from([DeclRef {
        file,
        node: decl.id(),
    }]);
    search(checker, file, decl, name, mode, &mut visited, 0)
}

fn search(
    checker: &dyn TypeChecker,
    file: FileId,
    decl: NodeRef,
    name: &str,
    mode: HeritageSearch,
    visited: &mut HashSet<DeclRef>,
    depth: usize,
) -> bool {
    let Some(declaration) = decl.kind().type_declaration() else {
        return false;
    };

    for reference in declaration.heritage.iter().flat_map(|clause| &clause.types) {
        for target in checker.resolve_type_reference(file, reference) {
            let Some(node) = checker.tree(target.file).and_then(|tree| tree.node(target.node)) else {
                continue;
            };
            if node.kind().type_declaration().is_none() {
                continue;
            }
            if !visited.insert(target) {
                tracing::trace!(reference = reference.name.as_str(), "heritage cycle");
                match mode {
                    HeritageSearch::FirstDeclaration => return false,
                    HeritageSearch::Exhaustive => continue,
                }
            }

            if declares_directly(node, name) {
                tracing::trace!(member = name, reference = reference.name.as_str(), depth, "inherited");
                return true;
            }

            let found = search(checker, target.file, node, name, mode, visited, depth + 1);
            match mode {
                HeritageSearch::FirstDeclaration => return found,
                HeritageSearch::Exhaustive if found => return true,
                HeritageSearch::Exhaustive => {}
            }
        }
    }
    false
}

fn declares_directly(decl: NodeRef, name: &str) -> bool {
    decl.children().any(|member| {
        member.kind().is_member() && member.kind().name().is_some_and(|n| n.text == name)
    })
}
