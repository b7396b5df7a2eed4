//! Arena-backed syntax tree with parent back-references.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`]. A node
//! owns the ids of its children; its `parent` is a plain index used only for
//! upward traversal.

use namelint_text_size::{Ranged, TextRange, TextSize};
use thiserror::Error;

use crate::node::{Modifiers, NodeId, NodeKind, SyntaxKind};

/// A host contract violation found while finishing a tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("source text of {len} bytes exceeds the 4 GiB limit")]
    TextTooLarge { len: usize },
    #[error("node {node:?} span {range:?} lies outside the {len}-byte source text")]
    RangeOutOfBounds {
        node: NodeId,
        range: TextRange,
        len: usize,
    },
    #[error("node {node:?} span {range:?} does not fall on character boundaries")]
    NotCharBoundary { node: NodeId, range: TextRange },
    #[error("{count} node(s) were started but never finished")]
    UnclosedNodes { count: usize },
    #[error("finish_node called with no open node")]
    UnbalancedFinish,
    #[error("tree has more nodes than can be indexed")]
    TooManyNodes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    kind: NodeKind,
    range: TextRange,
    modifiers: Modifiers,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    file_name: String,
    text: String,
    is_declaration_file: bool,
    nodes: Vec<NodeData>,
}

impl SourceTree {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Ambient `.d.ts` file without executable bodies.
    pub fn is_declaration_file(&self) -> bool {
        self.is_declaration_file
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn walk(&self) -> TreeWalker<'_> {
        TreeWalker::new(self.root())
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// A borrowed handle to one node of a [`SourceTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SourceTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn tree(self) -> &'a SourceTree {
        self.tree
    }

    pub fn kind(self) -> &'a NodeKind {
        &self.tree.data(self.id).kind
    }

    pub fn syntax_kind(self) -> SyntaxKind {
        self.kind().syntax_kind()
    }

    pub fn modifiers(self) -> &'a Modifiers {
        &self.tree.data(self.id).modifiers
    }

    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.tree
            .data(self.id)
            .parent
            .map(|id| NodeRef { tree: self.tree, id })
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Source text covered by the node.
    pub fn text(self) -> &'a str {
        &self.tree.text[self.range()]
    }
}

impl Ranged for NodeRef<'_> {
    fn range(&self) -> TextRange {
        self.tree.data(self.id).range
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{:?}", self.syntax_kind(), self.range())
    }
}

/// Pre-order iterator over a subtree.
pub struct TreeWalker<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(start: NodeRef<'a>) -> Self {
        Self { stack: vec![start] }
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().rev());
        Some(node)
    }
}

/// Builds a [`SourceTree`] top-down.
///
/// The root `SourceFile` node spanning the whole text is created up front;
/// every `start_node` becomes a child of the innermost open node.
pub struct SourceTreeBuilder {
    file_name: String,
    text: String,
    is_declaration_file: bool,
    nodes: Vec<NodeData>,
    open: Vec<NodeId>,
    overflow: bool,
}

impl SourceTreeBuilder {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let text = text.into();
        let end = TextSize::try_from(text.len()).unwrap_or(TextSize::new(u32::MAX));
        let is_declaration_file = is_declaration_file_name(&file_name);

        Self {
            file_name,
            text,
            is_declaration_file,
            nodes: vec![NodeData {
                kind: NodeKind::SourceFile,
                range: TextRange::new(TextSize::default(), end),
                modifiers: Modifiers::default(),
                parent: None,
                children: Vec::new(),
            }],
            open: vec![NodeId::ROOT],
            overflow: false,
        }
    }

    pub fn set_declaration_file(&mut self, is_declaration_file: bool) {
        self.is_declaration_file = is_declaration_file;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Opens a node as a child of the current node and makes it current.
    pub fn start_node(&mut self, kind: NodeKind, range: TextRange, modifiers: Modifiers) -> NodeId {
        let Some(id) = NodeId::from_index(self.nodes.len()) else {
            self.overflow = true;
            return NodeId::ROOT;
        };
        let parent = self.open.last().copied();
        self.nodes.push(NodeData {
            kind,
            range,
            modifiers,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.open.push(id);
        id
    }

    /// Closes the current node.
    pub fn finish_node(&mut self) {
        // The root stays open until `finish`; popping it is an error.
        if self.open.len() > 1 {
            self.open.pop();
        } else {
            self.overflow = true;
        }
    }

    /// Adds a childless node.
    pub fn leaf(&mut self, kind: NodeKind, range: TextRange, modifiers: Modifiers) -> NodeId {
        let id = self.start_node(kind, range, modifiers);
        self.finish_node();
        id
    }

    /// Validates spans and nesting, then freezes the tree.
    pub fn finish(self) -> Result<SourceTree, TreeError> {
        let len = self.text.len();
        if u32::try_from(len).is_err() {
            return Err(TreeError::TextTooLarge { len });
        }
        if self.overflow {
            return Err(if NodeId::from_index(self.nodes.len()).is_none() {
                TreeError::TooManyNodes
            } else {
                TreeError::UnbalancedFinish
            });
        }
        if self.open.len() > 1 {
            return Err(TreeError::UnclosedNodes {
                count: self.open.len() - 1,
            });
        }

        for (index, data) in self.nodes.iter().enumerate() {
            let node = NodeId::from_index(index).ok_or(TreeError::TooManyNodes)?;
            let ranges = std::iter::once(data.range).chain(data.kind.payload_ranges());
            for range in ranges {
                check_span(&self.text, node, range)?;
            }
        }

        Ok(SourceTree {
            file_name: self.file_name,
            text: self.text,
            is_declaration_file: self.is_declaration_file,
            nodes: self.nodes,
        })
    }
}

fn check_span(text: &str, node: NodeId, range: TextRange) -> Result<(), TreeError> {
    if range.end().to_usize() > text.len() {
        return Err(TreeError::RangeOutOfBounds {
            node,
            range,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(range.start().to_usize()) || !text.is_char_boundary(range.end().to_usize()) {
        return Err(TreeError::NotCharBoundary { node, range });
    }
    Ok(())
}

fn is_declaration_file_name(file_name: &str) -> bool {
    [".d.ts", ".d.mts", ".d.cts"]
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
}
