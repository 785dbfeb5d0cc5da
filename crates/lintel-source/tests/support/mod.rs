#![allow(dead_code)]

//! Test fixtures: a lexer for a small JavaScript subset and a tree builder
//! that places nodes by the source snippet they cover.

use std::str::Chars;

use lintel_source::SourceCode;
use lintel_syntax::{
    Ast, NodeId, NodeKind, Position, SourceLocation, Token, TokenKind, TreeBuilder, WalkEvent,
};
use text_size::{TextRange, TextSize};

const KEYWORDS: &[&str] = &[
    "class", "const", "export", "function", "let", "new", "return", "switch", "case", "this",
    "var", "default",
];

const PUNCTUATORS: &[&str] = &[
    "===", "!==", "...", "=>", "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=",
];

struct Cursor<'a> {
    chars: Chars<'a>,
    len: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { chars: text.chars(), len: text.len() }
    }

    fn offset(&self) -> usize {
        self.len - self.chars.as_str().len()
    }

    fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn bump(&mut self, bytes: usize) {
        let target = self.offset() + bytes;
        while self.offset() < target {
            self.chars.next();
        }
    }

    fn advance_while(&mut self, f: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&f) {
            self.chars.next();
        }
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Line/column lookup for fixture text.
pub struct Lines {
    starts: Vec<usize>,
}

impl Lines {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        let mut chars = text.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            if !is_terminator(c) {
                continue;
            }
            let mut next = offset + c.len_utf8();
            if c == '\r' && chars.next_if(|&(_, c)| c == '\n').is_some() {
                next += 1;
            }
            starts.push(next);
        }
        Self { starts }
    }

    pub fn position(&self, offset: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= offset);
        Position::new(line as u32, (offset - self.starts[line - 1]) as u32)
    }

    pub fn loc(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(self.position(start), self.position(end))
    }
}

pub fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::new(start as u32), TextSize::new(end as u32))
}

/// Splits BOM-stripped `text` into code tokens and comments.
///
/// A leading `#!` line is reported as a line comment, the way ESTree parsers
/// hand it over.
pub fn lex(text: &str) -> (Vec<Token>, Vec<Token>) {
    let lines = Lines::new(text);
    let mut cursor = Cursor::new(text);
    let mut tokens = Vec::new();
    let mut comments = Vec::new();

    while let Some(c) = cursor.peek() {
        let start = cursor.offset();
        let rest = cursor.rest();

        if c.is_whitespace() || c == '\u{feff}' {
            cursor.bump(c.len_utf8());
            continue;
        }

        let (kind, value) = if (start == 0 && rest.starts_with("#!")) || rest.starts_with("//") {
            cursor.bump(2);
            cursor.advance_while(|c| !is_terminator(c));
            (TokenKind::Line, &text[start + 2..cursor.offset()])
        } else if rest.starts_with("/*") {
            let end = rest[2..].find("*/").map_or(rest.len(), |end| end + 4);
            cursor.bump(end);
            let value_end = cursor.offset().saturating_sub(2).max(start + 2);
            (TokenKind::Block, &text[start + 2..value_end])
        } else if is_ident_start(c) {
            cursor.advance_while(is_ident_continue);
            let word = &text[start..cursor.offset()];
            let kind = match word {
                "true" | "false" => TokenKind::Boolean,
                "null" => TokenKind::Null,
                word if KEYWORDS.contains(&word) => TokenKind::Keyword,
                _ => TokenKind::Identifier,
            };
            (kind, word)
        } else if c.is_ascii_digit() {
            cursor.advance_while(|c| c.is_ascii_alphanumeric() || c == '.');
            (TokenKind::Numeric, &text[start..cursor.offset()])
        } else if c == '"' || c == '\'' {
            cursor.bump(1);
            let mut escaped = false;
            while let Some(next) = cursor.peek() {
                cursor.bump(next.len_utf8());
                if next == c && !escaped {
                    break;
                }
                escaped = next == '\\' && !escaped;
            }
            (TokenKind::String, &text[start..cursor.offset()])
        } else {
            let len = PUNCTUATORS
                .iter()
                .find(|punct| rest.starts_with(*punct))
                .map_or(c.len_utf8(), |punct| punct.len());
            cursor.bump(len);
            (TokenKind::Punctuator, &text[start..cursor.offset()])
        };

        let end = cursor.offset();
        let token = Token::new(kind, value, range(start, end), lines.loc(start, end));
        if kind.is_comment() {
            comments.push(token);
        } else {
            tokens.push(token);
        }
    }

    (tokens, comments)
}

/// First occurrence of `snippet` in `haystack` that does not split a word.
fn locate(haystack: &str, snippet: &str) -> Option<usize> {
    let word_start = snippet.starts_with(is_ident_continue);
    let word_end = snippet.ends_with(is_ident_continue);
    haystack.match_indices(snippet).map(|(start, _)| start).find(|&start| {
        let before = haystack[..start].chars().next_back().is_some_and(is_ident_continue);
        let after = haystack[start + snippet.len()..].chars().next().is_some_and(is_ident_continue);
        !(word_start && before) && !(word_end && after)
    })
}

/// Places child nodes inside the node currently being built.
pub struct Scope<'a> {
    text: &'a str,
    lines: &'a Lines,
    builder: &'a mut TreeBuilder,
    cursor: usize,
    end: usize,
}

impl Scope<'_> {
    /// Adds a node covering the first occurrence of `snippet` after the
    /// previous sibling.
    #[track_caller]
    pub fn node(
        &mut self,
        kind: NodeKind,
        snippet: &str,
        children: impl FnOnce(&mut Scope<'_>),
    ) -> &mut Self {
        let found = locate(&self.text[self.cursor..self.end], snippet)
            .unwrap_or_else(|| panic!("`{snippet}` not found after offset {}", self.cursor));
        let start = self.cursor + found;
        let end = start + snippet.len();

        self.builder.start_node(kind, range(start, end), self.lines.loc(start, end));
        let mut scope =
            Scope { text: self.text, lines: self.lines, builder: self.builder, cursor: start, end };
        children(&mut scope);
        self.builder.finish_node();

        self.cursor = end;
        self
    }

    /// Records an elided array element in the enclosing node.
    pub fn hole(&mut self) -> &mut Self {
        self.builder.add_holes(1);
        self
    }

    /// Adds a node without children.
    #[track_caller]
    pub fn leaf(&mut self, kind: NodeKind, snippet: &str) -> &mut Self {
        self.node(kind, snippet, |_| {})
    }
}

/// Lexes `raw` and builds a `Program` spanning all of it, populated by
/// `body`.
pub fn parse(raw: &str, body: impl FnOnce(&mut Scope<'_>)) -> Ast {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let lines = Lines::new(text);
    let (tokens, comments) = lex(text);

    let mut builder = TreeBuilder::new();
    builder.start_node(NodeKind::Program, range(0, text.len()), lines.loc(0, text.len()));
    let mut scope =
        Scope { text, lines: &lines, builder: &mut builder, cursor: 0, end: text.len() };
    body(&mut scope);
    builder.finish_node();

    Ast::new(builder.finish(), Some(tokens), Some(comments))
}

#[track_caller]
pub fn source(raw: &str, body: impl FnOnce(&mut Scope<'_>)) -> SourceCode {
    match SourceCode::new(raw, parse(raw, body)) {
        Ok(source) => source,
        Err(error) => panic!("fixture failed to build: {error}"),
    }
}

/// Finds the first node of `kind` whose text is exactly `snippet`.
#[track_caller]
pub fn find(source: &SourceCode, kind: NodeKind, snippet: &str) -> NodeId {
    source
        .ast()
        .preorder()
        .find_map(|event| match event {
            WalkEvent::Enter { node, .. }
                if source.ast().get(node).kind == kind
                    && source.get_node_text(source.ast().get(node)) == snippet =>
            {
                Some(node)
            }
            _ => None,
        })
        .unwrap_or_else(|| panic!("no {kind} node with text `{snippet}`"))
}

pub fn values<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Vec<&'a str> {
    tokens.into_iter().map(|token| &*token.value).collect()
}
