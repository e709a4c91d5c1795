//! Text renderings of token streams and trees
//!
//! The canonical tag form lives on [`Node`](crate::delphi::ast::Node) itself;
//! this module holds the human oriented renderings.

pub mod tokens;
pub mod treeviz;

pub use tokens::to_simple_str;
pub use treeviz::{to_treeviz_str, DEFAULT_MAX_LABEL_CHARS};
