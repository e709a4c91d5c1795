//! Delphi unit parsing
//!
//! Text flows through [`lexer`] into [`parser`], which returns an [`ast::Node`]
//! rooted at `goal`. [`query`] navigates finished trees, and [`processor`]
//! ties the stages to the output [`formats`].

pub mod ast;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod query;
