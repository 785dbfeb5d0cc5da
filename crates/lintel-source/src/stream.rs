//! Merging code tokens and comments into one position-ordered stream.

use lintel_syntax::Token;

/// Concatenates `tokens` and `comments` and stably sorts them by start offset.
pub(crate) fn merge(tokens: &[Token], comments: &[Token]) -> Vec<Token> {
    let mut merged: Vec<Token> = tokens.iter().chain(comments).cloned().collect();
    merged.sort_by_key(|token| token.range.start());
    merged
}
