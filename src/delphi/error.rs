//! Error types for lexing and parsing
//!
//! Every failure is returned to the caller as a value. Nothing in the library
//! writes to stderr or any other shared channel.

use std::ops::Range;
use thiserror::Error;

use crate::delphi::ast::Position;
use crate::delphi::lexer::Token;

/// What went wrong while tokenizing. Doubles as the logos error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated comment")]
    UnterminatedComment,
}

// logos builds this value for input no pattern accepts; the lexer fills in
// the actual character from the token slice.
impl Default for LexErrorKind {
    fn default() -> Self {
        LexErrorKind::UnexpectedCharacter('\0')
    }
}

/// A lexical error with its source location
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte range of the offending input (the opener for unterminated forms)
    pub span: Range<usize>,
    pub position: Position,
}

/// An unexpected token at a grammar position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected {} at {position}, expected {}", .found.describe(), describe_expected(.expected))]
pub struct SyntaxError {
    pub span: Range<usize>,
    pub position: Position,
    /// The token that was found; `Token::EndOfInput` when input ran out
    pub found: Token,
    /// Token kinds that would have been accepted, sorted and deduplicated
    pub expected: Vec<Token>,
}

fn describe_expected(expected: &[Token]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [single] => single.describe(),
        _ => {
            let names: Vec<String> = expected.iter().map(Token::describe).collect();
            format!("one of {}", names.join(", "))
        }
    }
}

/// The error returned by a parse: either stage may fail, never both
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position,
            ParseError::Syntax(e) => e.position,
        }
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::Lex(e) => e.span.clone(),
            ParseError::Syntax(e) => e.span.clone(),
        }
    }
}
