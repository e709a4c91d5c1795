//! Implementation of the lexer
//!
//! Tokenization itself is handled entirely by logos; this layer attaches
//! source text and positions, turns the first logos error into a [`LexError`]
//! and appends the end-of-input marker.

use serde::Serialize;
use std::ops::Range;

use logos::Logos;

use crate::delphi::ast::{Position, SourceLocation};
use crate::delphi::error::{LexError, LexErrorKind};
use crate::delphi::lexer::tokens::Token;

/// A token together with its verbatim text and location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexeme {
    pub token: Token,
    pub text: String,
    pub span: Range<usize>,
    pub position: Position,
}

/// Tokenize a buffer into lexemes, ending with a `Token::EndOfInput` lexeme.
///
/// Stops at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Lexeme>, LexError> {
    let location = SourceLocation::new(source);
    let lexemes = tokenize_with_spans(source)?
        .into_iter()
        .map(|(token, span)| Lexeme {
            token,
            text: source[span.clone()].to_string(),
            position: location.byte_to_position(span.start),
            span,
        })
        .collect();
    Ok(lexemes)
}

/// Tokenize a buffer into tokens with their byte spans, ending with
/// `Token::EndOfInput` at the empty range past the last byte.
pub fn tokenize_with_spans(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(kind) => {
                let span = lexer.span();
                let kind = match kind {
                    LexErrorKind::UnexpectedCharacter(_) => LexErrorKind::UnexpectedCharacter(
                        lexer.slice().chars().next().unwrap_or('\0'),
                    ),
                    other => other,
                };
                return Err(LexError {
                    kind,
                    position: SourceLocation::new(source).byte_to_position(span.start),
                    span,
                });
            }
        }
    }

    tokens.push((Token::EndOfInput, source.len()..source.len()));
    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
