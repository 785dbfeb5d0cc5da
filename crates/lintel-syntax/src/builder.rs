//! Incremental builder for the arena syntax tree.

use la_arena::Arena;
use text_size::TextRange;

use crate::{Node, NodeId, NodeKind, SourceLocation, SyntaxTree};

const DEFAULT_TREE_DEPTH: usize = 64;

/// Builds a `SyntaxTree` from parser events.
///
/// Nodes must be started in preorder; each `start_node` is closed by a
/// matching `finish_node`.
#[derive(Default)]
pub struct TreeBuilder {
    nodes: Arena<Node>,
    opened: Vec<NodeId>,
    root: Option<NodeId>,
}

impl Drop for TreeBuilder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `TreeBuilder::finish_node()` for every started node");
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { nodes: Arena::new(), opened: Vec::with_capacity(DEFAULT_TREE_DEPTH), root: None }
    }

    /// Starts a new node of the given kind as a child of the innermost open
    /// node.
    pub fn start_node(&mut self, kind: NodeKind, range: TextRange, loc: SourceLocation) -> NodeId {
        let parent = self.opened.last().copied();
        let node =
            self.nodes.alloc(Node { kind, range, loc, parent, children: Vec::new(), holes: 0 });
        match parent {
            Some(parent) => self.nodes[parent].children.push(node),
            None => {
                assert!(self.root.is_none(), "the tree already has a root");
                self.root = Some(node);
            }
        }
        self.opened.push(node);
        node
    }

    /// Records `count` elided elements on the innermost open node.
    #[track_caller]
    pub fn add_holes(&mut self, count: u32) {
        let node = *self.opened.last().expect("no opened nodes?");
        self.nodes[node].holes += count;
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        self.opened.pop().expect("no opened nodes?");
    }

    /// Finishes the tree.
    #[track_caller]
    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.opened.is_empty(), "unfinished nodes: {}", self.opened.len());
        let root = self.root.expect("cannot finish an empty tree");
        SyntaxTree { nodes: std::mem::take(&mut self.nodes), root }
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn links_parents_and_children() {
        let loc = SourceLocation::default();
        let mut builder = TreeBuilder::new();
        let program = builder.start_node(NodeKind::Program, range(0, 6), loc);
        let statement = builder.start_node(NodeKind::ExpressionStatement, range(0, 6), loc);
        let call = builder.start_node(NodeKind::CallExpression, range(0, 5), loc);
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root().id(), program);
        assert_eq!(tree.get(statement).children, vec![call]);
        assert_eq!(tree.get(call).parent, Some(statement));
        let ancestors: Vec<_> = tree.node(call).ancestors().map(|it| it.kind()).collect();
        assert_eq!(
            ancestors,
            [NodeKind::CallExpression, NodeKind::ExpressionStatement, NodeKind::Program]
        );
    }

    #[test]
    fn counts_holes_on_the_open_node() {
        let loc = SourceLocation::default();
        let mut builder = TreeBuilder::new();
        builder.start_node(NodeKind::Program, range(0, 4), loc);
        let array = builder.start_node(NodeKind::ArrayExpression, range(0, 3), loc);
        builder.add_holes(2);
        builder.finish_node();
        builder.finish_node();
        let tree = builder.finish();

        assert_eq!(tree.node(array).holes(), 2);
        assert_eq!(tree.root().holes(), 0);
    }

    #[test]
    #[should_panic(expected = "the tree already has a root")]
    fn rejects_second_root() {
        let loc = SourceLocation::default();
        let mut builder = TreeBuilder::new();
        builder.start_node(NodeKind::Program, range(0, 1), loc);
        builder.finish_node();
        builder.start_node(NodeKind::Program, range(1, 2), loc);
    }
}
