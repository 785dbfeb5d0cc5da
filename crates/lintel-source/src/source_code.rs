//! The immutable source facade consumed by analysis rules.

use std::fmt;
use std::sync::OnceLock;

use dashmap::DashMap;
use lintel_syntax::{Ast, NodeId, Position, Ranged, SyntaxTree, Token, TokenKind};
use lintel_tokens::TokenStore;
use regex::Regex;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use crate::comments::{self, CommentIds, Comments};
use crate::text::{self, TextModel};
use crate::{LocationError, SourceCodeError, stream};

/// Matches a single-line `/* ... */` span.
fn block_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"/\*[^\n\r\x{2028}\x{2029}]*?\*/").expect("Invalid block comment regex pattern")
    })
}

/// ECMAScript `\s`.
fn is_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Source text, syntax tree and token streams of one parsed unit.
///
/// Built once and never mutated afterwards; the only interior state is the
/// per-node comment cache, whose entries are deterministic.
pub struct SourceCode {
    text: TextModel,
    ast: SyntaxTree,
    comments: Box<[Token]>,
    tokens: TokenStore,
    tokens_and_comments: TokenStore,
    comment_cache: DashMap<NodeId, CommentIds, FxBuildHasher>,
}

impl fmt::Debug for SourceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceCode")
            .field("text_len", &self.text.text().len())
            .field("has_bom", &self.text.has_bom())
            .field("nodes", &self.ast.len())
            .field("tokens", &self.tokens.len())
            .field("comments", &self.comments.len())
            .finish_non_exhaustive()
    }
}

/// Takes the token and comment sequences out of `ast`, failing if either is
/// absent.
fn validate(ast: Ast) -> Result<(SyntaxTree, Vec<Token>, Vec<Token>), SourceCodeError> {
    let Ast { tree, tokens, comments } = ast;
    let tokens = tokens.ok_or(SourceCodeError::MissingData { field: "tokens" })?;
    let comments = comments.ok_or(SourceCodeError::MissingData { field: "comments" })?;
    Ok((tree, tokens, comments))
}

impl SourceCode {
    /// Builds the facade for `text` and the tree parsed from it.
    ///
    /// A leading byte-order mark is stripped; the tree's ranges are offsets
    /// into the stripped text.
    pub fn new(text: &str, ast: Ast) -> Result<Self, SourceCodeError> {
        let (ast, tokens, mut comments) = validate(ast)?;
        let text = TextModel::new(text);

        if let Some(payload) = text::shebang(text.text())
            && let Some(first) = comments.first_mut()
            && first.kind == TokenKind::Line
            && *first.value == *payload
        {
            trace!(payload, "reclassifying leading comment as shebang");
            first.kind = TokenKind::Shebang;
        }

        let merged = stream::merge(&tokens, &comments);
        debug!(
            has_bom = text.has_bom(),
            lines = text.line_count(),
            nodes = ast.len(),
            tokens = tokens.len(),
            comments = comments.len(),
            "built source code"
        );

        Ok(Self {
            text,
            ast,
            comments: comments.into(),
            tokens: TokenStore::new(tokens),
            tokens_and_comments: TokenStore::new(merged),
            comment_cache: DashMap::default(),
        })
    }

    /// The BOM-stripped source text.
    #[inline]
    pub fn text(&self) -> &str {
        self.text.text()
    }

    /// Whether the raw text started with a byte-order mark.
    #[inline]
    pub fn has_bom(&self) -> bool {
        self.text.has_bom()
    }

    #[inline]
    pub fn ast(&self) -> &SyntaxTree {
        &self.ast
    }

    /// Source lines without their terminators.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &str> + Clone {
        self.text.lines()
    }

    /// Code tokens and comments in source order.
    #[inline]
    pub fn tokens_and_comments(&self) -> &[Token] {
        self.tokens_and_comments.as_slice()
    }

    /// Returns the whole source text.
    #[inline]
    pub fn get_text(&self) -> &str {
        self.text.text()
    }

    /// Returns the text covered by `node`.
    pub fn get_node_text(&self, node: impl Ranged) -> &str {
        self.get_text_around(node, 0, 0)
    }

    /// Returns the text covered by `node`, widened by `before` bytes on the
    /// left and `after` bytes on the right.
    pub fn get_text_around(&self, node: impl Ranged, before: usize, after: usize) -> &str {
        let range = node.range();
        let start = usize::from(range.start()).saturating_sub(before);
        let end = usize::from(range.end()).saturating_add(after);
        text::slice(self.text.text(), start, end)
    }

    pub fn get_lines(&self) -> Vec<&str> {
        self.lines().collect()
    }

    /// Every comment the parser reported, in parser order.
    #[inline]
    pub fn get_all_comments(&self) -> &[Token] {
        &self.comments
    }

    /// Returns the comments directly before and after `node`.
    ///
    /// The first call for a node computes and caches the result; later calls
    /// return the same association.
    pub fn get_comments(&self, node: NodeId) -> Comments<'_> {
        if let Some(ids) = self.comment_cache.get(&node) {
            return ids.resolve(&self.tokens_and_comments);
        }

        trace!(?node, "computing comment association");
        let ids = comments::associate(self.ast.node(node), &self.tokens_and_comments);
        let comments = ids.resolve(&self.tokens_and_comments);
        self.comment_cache.insert(node, ids);
        comments
    }

    /// Whether whitespace separates `first` and `second`.
    ///
    /// Single-line block comments between them are ignored; line comments
    /// are not.
    pub fn is_space_between_tokens(&self, first: impl Ranged, second: impl Ranged) -> bool {
        let start = usize::from(first.range().end());
        let end = usize::from(second.range().start());
        let between = text::slice(self.text.text(), start, end);
        block_comment_re().replace_all(between, "").chars().any(is_whitespace)
    }

    /// Converts a byte offset into a line/column position.
    pub fn get_loc_from_index(&self, index: usize) -> Result<Position, LocationError> {
        self.text.loc_from_index(index)
    }

    /// Converts a line/column position into a byte offset.
    pub fn get_index_from_loc(&self, position: Position) -> Result<usize, LocationError> {
        self.text.index_from_loc(position)
    }
}

/// Pass-throughs to the code-token and merged-stream stores.
impl SourceCode {
    /// The code token directly before `target`.
    pub fn get_token_before(&self, target: impl Ranged) -> Option<&Token> {
        self.tokens.before(target)
    }

    /// The code token directly after `target`.
    pub fn get_token_after(&self, target: impl Ranged) -> Option<&Token> {
        self.tokens.after(target)
    }

    /// The token or comment directly before `target`.
    pub fn get_token_or_comment_before(&self, target: impl Ranged) -> Option<&Token> {
        self.tokens_and_comments.before(target)
    }

    /// The token or comment directly after `target`.
    pub fn get_token_or_comment_after(&self, target: impl Ranged) -> Option<&Token> {
        self.tokens_and_comments.after(target)
    }

    /// The first code token inside `node`.
    pub fn get_first_token(&self, node: impl Ranged) -> Option<&Token> {
        self.tokens.first(node)
    }

    /// The last code token inside `node`.
    pub fn get_last_token(&self, node: impl Ranged) -> Option<&Token> {
        self.tokens.last(node)
    }

    /// Code tokens inside `node`.
    pub fn get_tokens(&self, node: impl Ranged) -> &[Token] {
        self.tokens.enclosed(node)
    }

    /// Code tokens and comments inside `node`.
    pub fn get_tokens_and_comments(&self, node: impl Ranged) -> &[Token] {
        self.tokens_and_comments.enclosed(node)
    }

    /// Code tokens between `left` and `right`.
    pub fn get_tokens_between(&self, left: impl Ranged, right: impl Ranged) -> &[Token] {
        self.tokens.between(left, right)
    }

    /// Whether any comment lies between `left` and `right`.
    pub fn comments_exist_between(&self, left: impl Ranged, right: impl Ranged) -> bool {
        self.tokens_and_comments.between(left, right).iter().any(Token::is_comment)
    }
}
