//! Position-ordered navigation over a token sequence.
//!
//! A [`TokenStore`] answers "what comes before/after/inside this range"
//! questions purely from range ordering. The same store type serves code
//! tokens alone and the merged token-and-comment stream.

use std::ops::Range;

use lintel_syntax::{Ranged, Token};
use text_size::TextSize;

/// Ordered, non-overlapping tokens addressed by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStore {
    tokens: Box<[Token]>,
}

impl TokenStore {
    /// Wraps `tokens`, which must be sorted by start offset.
    pub fn new(tokens: impl Into<Box<[Token]>>) -> Self {
        let tokens = tokens.into();
        debug_assert!(tokens.windows(2).all(|pair| pair[0].range.start() <= pair[1].range.start()));
        Self { tokens }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Number of tokens ending at or before `offset`.
    #[inline]
    fn ending_by(&self, offset: TextSize) -> usize {
        self.tokens.partition_point(|token| token.range.end() <= offset)
    }

    /// Number of tokens starting before `offset`.
    #[inline]
    fn starting_before(&self, offset: TextSize) -> usize {
        self.tokens.partition_point(|token| token.range.start() < offset)
    }

    /// Index of the last token that ends at or before `target` starts.
    pub fn index_before(&self, target: impl Ranged) -> Option<usize> {
        self.ending_by(target.range().start()).checked_sub(1)
    }

    /// Index of the first token that starts at or after `target` ends.
    pub fn index_after(&self, target: impl Ranged) -> Option<usize> {
        let index = self.starting_before(target.range().end());
        (index < self.tokens.len()).then_some(index)
    }

    /// The last token that ends at or before `target` starts.
    pub fn before(&self, target: impl Ranged) -> Option<&Token> {
        self.index_before(target).map(|index| &self.tokens[index])
    }

    /// The first token that starts at or after `target` ends.
    pub fn after(&self, target: impl Ranged) -> Option<&Token> {
        self.index_after(target).map(|index| &self.tokens[index])
    }

    /// Indices of the tokens lying entirely inside `target`.
    pub fn enclosed_indices(&self, target: impl Ranged) -> Range<usize> {
        let range = target.range();
        let start = self.starting_before(range.start());
        let end = self.ending_by(range.end()).max(start);
        start..end
    }

    /// Tokens lying entirely inside `target`.
    pub fn enclosed(&self, target: impl Ranged) -> &[Token] {
        &self.tokens[self.enclosed_indices(target)]
    }

    /// The first token inside `target`.
    pub fn first(&self, target: impl Ranged) -> Option<&Token> {
        self.enclosed(target).first()
    }

    /// The last token inside `target`.
    pub fn last(&self, target: impl Ranged) -> Option<&Token> {
        self.enclosed(target).last()
    }

    /// Tokens strictly between the end of `left` and the start of `right`.
    pub fn between(&self, left: impl Ranged, right: impl Ranged) -> &[Token] {
        let start = self.starting_before(left.range().end());
        let end = self.ending_by(right.range().start()).max(start);
        &self.tokens[start..end]
    }
}

#[cfg(test)]
mod tests {
    use lintel_syntax::{SourceLocation, TokenKind};
    use text_size::TextRange;

    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    fn token(kind: TokenKind, value: &str, start: u32, end: u32) -> Token {
        Token::new(kind, value, range(start, end), SourceLocation::default())
    }

    // foo ( /* a */ bar ) ;
    // 0   4 6       14  18 20
    fn store() -> TokenStore {
        TokenStore::new(vec![
            token(TokenKind::Identifier, "foo", 0, 3),
            token(TokenKind::Punctuator, "(", 4, 5),
            token(TokenKind::Block, " a ", 6, 13),
            token(TokenKind::Identifier, "bar", 14, 17),
            token(TokenKind::Punctuator, ")", 18, 19),
            token(TokenKind::Punctuator, ";", 20, 21),
        ])
    }

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|token| &*token.value).collect()
    }

    #[test]
    fn before_and_after_a_range() {
        let store = store();
        let bar = range(14, 17);

        assert_eq!(store.before(bar).map(|t| &*t.value), Some(" a "));
        assert_eq!(store.after(bar).map(|t| &*t.value), Some(")"));
        assert_eq!(store.before(range(0, 3)), None);
        assert_eq!(store.after(range(20, 21)), None);
    }

    #[test]
    fn before_and_after_a_token() {
        let store = store();
        let comment = store.get(2).unwrap().clone();

        assert_eq!(store.index_before(&comment), Some(1));
        assert_eq!(store.index_after(&comment), Some(3));
    }

    #[test]
    fn enclosed_tokens() {
        let store = store();

        assert_eq!(values(store.enclosed(range(4, 19))), ["(", " a ", "bar", ")"]);
        assert_eq!(store.enclosed_indices(range(4, 19)), 1..5);
        assert_eq!(store.first(range(4, 19)).map(|t| &*t.value), Some("("));
        assert_eq!(store.last(range(4, 19)).map(|t| &*t.value), Some(")"));
        assert!(store.enclosed(range(3, 4)).is_empty());
    }

    #[test]
    fn tokens_between() {
        let store = store();

        assert_eq!(values(store.between(range(0, 3), range(18, 19))), ["(", " a ", "bar"]);
        assert!(store.between(range(14, 17), range(14, 17)).is_empty());
    }
}
