//! Read-only view over a parsed JavaScript source unit.
//!
//! [`SourceCode`] bundles the text, the syntax tree and the token and comment
//! streams, and answers the questions analysis rules ask of them: node text,
//! lines, neighbouring tokens, attached comments, documentation comments and
//! the node at an offset.

mod comments;
mod error;
mod estree;
mod jsdoc;
mod locate;
mod source_code;
mod stream;
mod text;

pub use comments::Comments;
pub use error::{LocationError, SourceCodeError};
pub use locate::NodeMatch;
pub use source_code::SourceCode;
pub use text::split_lines;
