//! Lexer module for Delphi units
//!
//! This module contains the tokenization logic, including token definitions
//! and the lexer implementation.
//!
//! Whitespace and both comment styles are discarded here, so the parser only
//! ever sees significant tokens. The stream always ends with a single
//! `Token::EndOfInput`.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with_spans, Lexeme};
pub use tokens::{Token, RESERVED_WORDS};
