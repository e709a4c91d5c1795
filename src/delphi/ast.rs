//! Concrete syntax tree model
//!
//! The tree a parse returns, its rule names, and the source position types
//! shared by the lexer and parser.

pub mod node;
pub mod position;
pub mod rule;

pub use node::{Descendants, Leaf, Node, RuleNode};
pub use position::{Position, SourceLocation};
pub use rule::{Rule, UnknownRule};
