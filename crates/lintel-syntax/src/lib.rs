//! Read-only syntax tree handed over by an ESTree-style parser.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Children are owned
//! by index; the parent link is a plain lookup index, so the tree has no
//! reference cycles.

mod builder;
mod kind;
mod location;
mod token;
mod tree;
mod walk;

/// Incremental builder for constructing a `SyntaxTree`.
pub use builder::TreeBuilder;
/// Node kinds and compact kind sets.
pub use kind::{KindSet, NodeKind, UnknownNodeKind};
/// Line/column positions.
pub use location::{Position, SourceLocation};
/// Code tokens and comments.
pub use token::{Token, TokenKind};
/// Arena tree, node handles and the parser output envelope.
pub use tree::{Ast, Node, NodeId, NodeRef, Ranged, SyntaxTree};
/// Preorder traversal with subtree pruning.
pub use walk::{Preorder, WalkEvent};
