use thiserror::Error;

/// Failure to build a [`SourceCode`](crate::SourceCode).
#[derive(Error, Debug)]
pub enum SourceCodeError {
    /// Required parser output is absent from the tree root.
    #[error("missing required AST data: {field}")]
    MissingData { field: &'static str },

    #[error("malformed ESTree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown ESTree node type `{tag}`")]
    UnknownNodeType { tag: Box<str> },
}

/// Out-of-range offset or line/column conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("index out of range (requested index {index}, but source text has length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("line number out of range (line {line} requested, but only {count} lines present)")]
    LineOutOfRange { line: u32, count: usize },

    #[error(
        "column number out of range (column {column} requested, but the length of line {line} is {len})"
    )]
    ColumnOutOfRange { line: u32, column: u32, len: usize },
}
