//! Depth-first preorder traversal over an arena tree.

use crate::{NodeId, SyntaxTree};

/// Preorder walk event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEvent {
    /// A node is entered; `parent` is the node it was reached from.
    Enter { node: NodeId, parent: Option<NodeId> },
    /// All of the node's (unpruned) children have been visited.
    Leave(NodeId),
}

/// Preorder traversal over nodes.
///
/// Every `Enter` is matched by a `Leave`, including for pruned nodes. To stop
/// the walk early, stop pulling events.
#[derive(Clone)]
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    /// Entered nodes paired with the index of their next unvisited child.
    stack: Vec<(NodeId, usize)>,
    root: Option<NodeId>,
}

impl<'a> Preorder<'a> {
    #[inline]
    pub(crate) fn new(tree: &'a SyntaxTree, start: NodeId) -> Preorder<'a> {
        Preorder { tree, stack: Vec::with_capacity(64), root: Some(start) }
    }

    /// Skips the children of the most recently entered node.
    ///
    /// The node's `Leave` event is still produced.
    #[inline]
    pub fn skip_subtree(&mut self) {
        let (node, next_child) = self.stack.last_mut().expect("must have a subtree to skip");
        *next_child = self.tree.get(*node).children.len();
    }

    /// Returns the parent of the node currently on top of the walk.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        let len = self.stack.len();
        len.checked_sub(2).map(|idx| self.stack[idx].0)
    }
}

impl Iterator for Preorder<'_> {
    type Item = WalkEvent;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let Some((node, next_child)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root, 0));
            return Some(WalkEvent::Enter { node: root, parent: None });
        };
        let node = *node;
        match self.tree.get(node).children.get(*next_child) {
            Some(&child) => {
                *next_child += 1;
                self.stack.push((child, 0));
                Some(WalkEvent::Enter { node: child, parent: Some(node) })
            }
            None => {
                self.stack.pop();
                Some(WalkEvent::Leave(node))
            }
        }
    }
}
