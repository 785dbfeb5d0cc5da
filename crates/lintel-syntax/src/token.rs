//! Code tokens and comments.

use serde::{Deserialize, Serialize};
use text_size::TextRange;

use crate::SourceLocation;

/// Lexical category of a token.
///
/// `Line`, `Block` and `Shebang` are comment categories; everything else is
/// code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    Boolean,
    Identifier,
    PrivateIdentifier,
    Keyword,
    Null,
    Numeric,
    Punctuator,
    RegularExpression,
    String,
    Template,
    #[serde(rename = "JSXIdentifier")]
    JsxIdentifier,
    #[serde(rename = "JSXText")]
    JsxText,

    Line,
    Block,
    Shebang,
}

impl TokenKind {
    /// Returns `true` for line, block and shebang comments.
    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(self, TokenKind::Line | TokenKind::Block | TokenKind::Shebang)
    }
}

/// A range-tagged lexical unit.
///
/// For comments `value` holds the text without its delimiters.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: Box<str>,
    pub range: TextRange,
    pub loc: SourceLocation,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        value: impl Into<Box<str>>,
        range: TextRange,
        loc: SourceLocation,
    ) -> Self {
        Self { kind, value: value.into(), range, loc }
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }
}
