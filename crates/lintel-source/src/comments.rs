//! Leading and trailing comment attribution.

use std::ops::Range;

use lintel_syntax::{NodeKind, NodeRef, Token};
use lintel_tokens::TokenStore;

/// Comments adjacent to a node, each sequence in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments<'a> {
    pub leading: Vec<&'a Token>,
    pub trailing: Vec<&'a Token>,
}

/// Cached association: positions in the merged token-and-comment stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CommentIds {
    leading: Box<[usize]>,
    trailing: Box<[usize]>,
}

impl CommentIds {
    pub(crate) fn resolve<'a>(&self, stream: &'a TokenStore) -> Comments<'a> {
        let tokens = stream.as_slice();
        Comments {
            leading: self.leading.iter().map(|&index| &tokens[index]).collect(),
            trailing: self.trailing.iter().map(|&index| &tokens[index]).collect(),
        }
    }
}

/// Returns `true` for containers that hold no members.
///
/// An elided array element counts as a member.
fn is_empty_container(node: NodeRef<'_>) -> bool {
    match node.kind() {
        NodeKind::SwitchStatement => {
            !node.children().any(|child| child.kind() == NodeKind::SwitchCase)
        }
        kind => kind.is_container() && node.children().len() == 0 && node.holes() == 0,
    }
}

fn comment_positions(tokens: &[Token], range: Range<usize>) -> Box<[usize]> {
    range.filter(|&index| tokens[index].is_comment()).collect()
}

/// Computes the comments attached to `node`.
///
/// `stream` is the merged token-and-comment stream.
pub(crate) fn associate(node: NodeRef<'_>, stream: &TokenStore) -> CommentIds {
    let tokens = stream.as_slice();

    // Nothing follows in a program without statements.
    if node.kind() == NodeKind::Program && node.children().len() == 0 {
        let leading = comment_positions(tokens, 0..tokens.len());
        return CommentIds { leading, trailing: Box::default() };
    }

    // Nothing inside an empty container can lead.
    if is_empty_container(node) {
        let trailing = comment_positions(tokens, stream.enclosed_indices(node));
        return CommentIds { leading: Box::default(), trailing };
    }

    // Comments outside the parent belong to the parent or one of its ancestors.
    let bounds = node.parent().map(|parent| parent.range());

    let mut leading = Vec::new();
    let mut cursor = stream.index_before(node);
    while let Some(index) = cursor {
        let token = &tokens[index];
        if !token.is_comment() || bounds.is_some_and(|it| token.range.start() < it.start()) {
            break;
        }
        leading.push(index);
        cursor = stream.index_before(token);
    }
    leading.reverse();

    let mut trailing = Vec::new();
    let mut cursor = stream.index_after(node);
    while let Some(index) = cursor {
        let token = &tokens[index];
        if !token.is_comment() || bounds.is_some_and(|it| token.range.end() > it.end()) {
            break;
        }
        trailing.push(index);
        cursor = stream.index_after(token);
    }

    CommentIds { leading: leading.into(), trailing: trailing.into() }
}
