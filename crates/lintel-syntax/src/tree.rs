//! Arena-backed syntax tree with parent links.

use std::fmt;

use la_arena::{Arena, Idx};
use text_size::TextRange;

use crate::{NodeKind, Preorder, SourceLocation, Token};

/// Stable index of a node inside its [`SyntaxTree`].
pub type NodeId = Idx<Node>;

/// Anything that covers a half-open range of the source text.
pub trait Ranged {
    fn range(&self) -> TextRange;
}

impl Ranged for TextRange {
    #[inline]
    fn range(&self) -> TextRange {
        *self
    }
}

impl Ranged for Token {
    #[inline]
    fn range(&self) -> TextRange {
        self.range
    }
}

impl Ranged for Node {
    #[inline]
    fn range(&self) -> TextRange {
        self.range
    }
}

impl<T: Ranged + ?Sized> Ranged for &T {
    #[inline]
    fn range(&self) -> TextRange {
        (**self).range()
    }
}

/// Raw node stored in the tree arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: TextRange,
    pub loc: SourceLocation,
    /// Lookup link only; the parent owns this node through `children`.
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Elided elements with no node, as in `[, x]`.
    pub holes: u32,
}

/// Owned node storage for a single source text.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub(crate) nodes: Arena<Node>,
    pub(crate) root: NodeId,
}

impl SyntaxTree {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef { tree: self, id: self.root }
    }

    /// Returns a handle for `id`.
    ///
    /// Panics if `id` was allocated by a different tree.
    #[inline]
    #[track_caller]
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        let index = u32::from(id.into_raw()) as usize;
        assert!(index < self.nodes.len(), "node does not belong here");
        NodeRef { tree: self, id }
    }

    /// Returns the raw node data for `id`.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes in the tree.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a preorder walk starting at the root.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self, self.root)
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn go(
            tree: &SyntaxTree,
            id: NodeId,
            depth: usize,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            let node = tree.get(id);
            writeln!(f, "{:indent$}{}@{:?}", "", node.kind, node.range, indent = depth * 2)?;
            node.children.iter().try_for_each(|&child| go(tree, child, depth + 1, f))
        }
        go(self, self.root, 0, f)
    }
}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn data(self) -> &'a Node {
        &self.tree.nodes[self.id]
    }

    #[inline]
    pub fn kind(self) -> NodeKind {
        self.data().kind
    }

    #[inline]
    pub fn range(self) -> TextRange {
        self.data().range
    }

    #[inline]
    pub fn loc(self) -> SourceLocation {
        self.data().loc
    }

    #[inline]
    pub fn holes(self) -> u32 {
        self.data().holes
    }

    /// Returns the parent node if any.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        Some(Self { tree: self.tree, id: self.data().parent? })
    }

    /// Returns an iterator of ancestors starting from this node.
    #[inline]
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    /// Iterates child nodes in source order.
    #[inline]
    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| NodeRef { tree, id })
    }
}

impl Ranged for NodeRef<'_> {
    #[inline]
    fn range(&self) -> TextRange {
        NodeRef::range(*self)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.kind(), NodeRef::range(*self))
    }
}

/// What a parser hands over: the node tree plus its token and comment
/// sequences.
///
/// The sequences are optional because not every parser configuration
/// produces them; consumers decide whether their absence is an error.
#[derive(Debug, Clone)]
pub struct Ast {
    pub tree: SyntaxTree,
    pub tokens: Option<Vec<Token>>,
    pub comments: Option<Vec<Token>>,
}

impl Ast {
    pub fn new(tree: SyntaxTree, tokens: Option<Vec<Token>>, comments: Option<Vec<Token>>) -> Self {
        Self { tree, tokens, comments }
    }
}
