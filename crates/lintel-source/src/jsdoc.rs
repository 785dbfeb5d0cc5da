//! Documentation comment lookup for declarations.

use lintel_syntax::{NodeId, NodeKind, NodeRef, Token, TokenKind};

use crate::SourceCode;

/// First character of a documentation comment's value (`/** ... */`).
const DOC_MARKER: char = '*';

/// Picks the last documentation-style comment in `comments` if it ends at
/// most one line above `line`.
///
/// Only the last candidate is considered; an earlier one is never used in its
/// place.
fn find_doc_comment<'a>(comments: &[&'a Token], line: u32) -> Option<&'a Token> {
    let candidate = comments
        .iter()
        .rev()
        .find(|comment| comment.kind == TokenKind::Block && comment.value.starts_with(DOC_MARKER))?;
    (i64::from(line) - i64::from(candidate.loc.end.line) <= 1).then_some(*candidate)
}

impl SourceCode {
    /// Returns the documentation comment of a function or class.
    pub fn get_jsdoc_comment(&self, node: NodeId) -> Option<&Token> {
        let node = self.ast().node(node);
        let parent = node.parent();

        match node.kind() {
            NodeKind::FunctionDeclaration | NodeKind::ClassDeclaration => {
                let target = parent.filter(|parent| parent.kind().is_export()).unwrap_or(node);
                self.doc_comment_above(target)
            }
            // `var Foo = class {}`: the comment sits above the declaration.
            NodeKind::ClassExpression => self.doc_comment_above(parent?.parent()?),
            NodeKind::FunctionExpression | NodeKind::ArrowFunctionExpression => {
                let parent = parent?;
                if parent.kind().is_call() {
                    return self.doc_comment_above(node);
                }

                let mut ancestor = Some(parent);
                while let Some(current) = ancestor {
                    if !self.get_comments(current.id()).leading.is_empty()
                        || current.kind().is_function()
                        || matches!(current.kind(), NodeKind::MethodDefinition | NodeKind::Property)
                    {
                        break;
                    }
                    ancestor = current.parent();
                }

                ancestor
                    .filter(|ancestor| ancestor.kind() != NodeKind::FunctionDeclaration)
                    .and_then(|ancestor| self.doc_comment_above(ancestor))
            }
            _ => None,
        }
    }

    fn doc_comment_above(&self, node: NodeRef<'_>) -> Option<&Token> {
        let comments = self.get_comments(node.id());
        find_doc_comment(&comments.leading, node.loc().start.line)
    }
}
