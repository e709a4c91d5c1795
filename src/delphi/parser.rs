//! Parser module for Delphi units
//!
//! This module turns the token stream into a concrete syntax tree rooted at
//! a `goal` node. Any unexpected token aborts the parse; no partial tree is
//! ever returned and no recovery is attempted.

pub(crate) mod combinators;
pub(crate) mod grammar;
#[cfg(test)]
mod tests;

use chumsky::{Parser, Stream};
use std::ops::Range;

use crate::delphi::ast::{Node, SourceLocation};
use crate::delphi::error::{ParseError, SyntaxError};
use crate::delphi::lexer::{tokenize_with_spans, Token};
use combinators::ParserError;
use grammar::Grammar;

/// Parse one unit from source text.
///
/// This is the primary entry point: it lexes `source` and parses the tokens
/// into a tree whose root is the `goal` rule.
pub fn parse_unit(source: &str) -> Result<Node, ParseError> {
    let tokens = tokenize_with_spans(source)?;
    tracing::debug!(tokens = tokens.len(), "parsing unit");
    let tree = parse_tokens(tokens, source)?;
    Ok(tree)
}

/// Parse an already tokenized unit.
///
/// `source` must be the buffer the spans point into; leaf text is sliced out
/// of it. A trailing `Token::EndOfInput` is optional.
pub fn parse_tokens(
    tokens: Vec<(Token, Range<usize>)>,
    source: &str,
) -> Result<Node, SyntaxError> {
    let eoi = source.len()..source.len();
    let stream = Stream::from_iter(
        eoi,
        tokens
            .into_iter()
            .filter(|(token, _)| *token != Token::EndOfInput),
    );

    Grammar::new(source)
        .goal()
        .parse(stream)
        .map_err(|errors| furthest_error(errors, source))
}

fn furthest_error(errors: Vec<ParserError>, source: &str) -> SyntaxError {
    let location = SourceLocation::new(source);
    let eoi = source.len()..source.len();

    let Some(error) = errors.into_iter().max_by_key(|error| error.span().start) else {
        return SyntaxError {
            position: location.byte_to_position(eoi.start),
            span: eoi,
            found: Token::EndOfInput,
            expected: Vec::new(),
        };
    };

    let mut expected: Vec<Token> = error
        .expected()
        .map(|expected| expected.unwrap_or(Token::EndOfInput))
        .collect();
    expected.sort();
    expected.dedup();

    let span = error.span();
    tracing::debug!(start = span.start, "syntax error");
    SyntaxError {
        position: location.byte_to_position(span.start),
        found: error.found().copied().unwrap_or(Token::EndOfInput),
        expected,
        span,
    }
}
