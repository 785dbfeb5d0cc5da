//! Offset to innermost-node lookup.

use lintel_syntax::{NodeId, WalkEvent};
use text_size::TextSize;

use crate::SourceCode;

/// The innermost node covering an offset, with the node it was reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMatch {
    pub node: NodeId,
    pub parent: Option<NodeId>,
}

impl SourceCode {
    /// Returns the deepest node whose range contains `index`.
    ///
    /// Ranges are half-open, so a node never contains its own end offset.
    pub fn get_node_by_range_index(&self, index: TextSize) -> Option<NodeMatch> {
        let tree = self.ast();
        let mut found = None;
        let mut walk = tree.preorder();

        while let Some(event) = walk.next() {
            match event {
                WalkEvent::Enter { node, parent } => {
                    if tree.get(node).range.contains(index) {
                        found = Some(NodeMatch { node, parent });
                    } else {
                        walk.skip_subtree();
                    }
                }
                // No descendant of the match contains `index`.
                WalkEvent::Leave(node) if found.is_some_and(|it| it.node == node) => break,
                WalkEvent::Leave(_) => {}
            }
        }

        found
    }
}
