//! # pitonisa
//!
//! A parser for Delphi / Object Pascal units that produces a concrete syntax
//! tree: every matched rule becomes a node and every matched token a leaf, in
//! source order.
//!
//! ```text
//! let tree = pitonisa::parse_unit("UNIT Unit001;\n.\n")?;
//! assert_eq!(tree.to_string(), "(goal (unit UNIT (ident Unit001) ; .))");
//! let unit = pitonisa::xpath(&tree, "/goal/unit")?;
//! ```

pub mod config;
pub mod delphi;

pub use delphi::ast::{Leaf, Node, Rule, RuleNode};
pub use delphi::error::{LexError, LexErrorKind, ParseError, SyntaxError};
pub use delphi::parser::parse_unit;
pub use delphi::query::{xpath, Path, XPathError};
