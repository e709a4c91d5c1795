//! Token definitions for Delphi units
//!
//! This module defines all the tokens that can be produced by the lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//!
//! Reserved words are matched ignoring ASCII case. Built-in type names are only
//! recognized in their canonical upper-case spelling: any other spelling
//! (`string`, `Byte`) is an identifier naming a type.
//!
//! Comments (`{ ... }` and `(* ... *)`) and whitespace never reach the token
//! stream. The callbacks below consume them and report unterminated forms.
use logos::{FilterResult, Lexer, Logos};
use serde::Serialize;
use std::fmt;

use crate::delphi::error::LexErrorKind;

/// All possible tokens of a Delphi unit
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Reserved words
    #[token("unit", ignore(ascii_case))]
    Unit,
    #[token("interface", ignore(ascii_case))]
    Interface,
    #[token("implementation", ignore(ascii_case))]
    Implementation,
    #[token("uses", ignore(ascii_case))]
    Uses,
    #[token("const", ignore(ascii_case))]
    Const,
    #[token("var", ignore(ascii_case))]
    Var,
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("procedure", ignore(ascii_case))]
    Procedure,
    #[token("begin", ignore(ascii_case))]
    Begin,
    #[token("end", ignore(ascii_case))]
    End,
    #[token("array", ignore(ascii_case))]
    Array,
    #[token("of", ignore(ascii_case))]
    Of,
    #[token("absolute", ignore(ascii_case))]
    Absolute,
    #[token("inherited", ignore(ascii_case))]
    Inherited,

    // Built-in type names
    #[token("STRING")]
    String,
    #[token("SHORTINT")]
    ShortInt,
    #[token("SMALLINT")]
    SmallInt,
    #[token("INTEGER")]
    Integer,
    #[token("BYTE")]
    Byte,
    #[token("LONGINT")]
    LongInt,
    #[token("INT64")]
    Int64,
    #[token("WORD")]
    Word,
    #[token("BOOLEAN")]
    Boolean,
    #[token("CHAR")]
    Char,
    #[token("WIDECHAR")]
    WideChar,
    #[token("LONGWORD")]
    LongWord,
    #[token("PCHAR")]
    PChar,
    #[token("REAL48")]
    Real48,
    #[token("REAL")]
    Real,
    #[token("SINGLE")]
    Single,
    #[token("DOUBLE")]
    Double,
    #[token("EXTENDED")]
    Extended,
    #[token("CURRENCY")]
    Currency,
    #[token("COMP")]
    Comp,

    // Words and literals
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+")]
    Number,
    #[token("'", lex_string_literal)]
    StringLiteral,

    // Never emitted: both comment styles are skipped by their callbacks
    #[token("{", skip_brace_comment)]
    #[token("(*", skip_paren_comment)]
    Comment,

    // Punctuation
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,
    #[token("..")]
    Range,
    #[token(".")]
    Period,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,

    // Synthetic marker appended after the last real token
    EndOfInput,
}

/// Reserved words in declaration order
pub const RESERVED_WORDS: [Token; 14] = [
    Token::Unit,
    Token::Interface,
    Token::Implementation,
    Token::Uses,
    Token::Const,
    Token::Var,
    Token::Function,
    Token::Procedure,
    Token::Begin,
    Token::End,
    Token::Array,
    Token::Of,
    Token::Absolute,
    Token::Inherited,
];

/// Consume a `'...'` literal. A doubled quote is an escaped quote; a line
/// break or end of input before the closing quote is an error.
fn lex_string_literal(lex: &mut Lexer<Token>) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\'' => {
                if let Some(&(_, '\'')) = chars.peek() {
                    chars.next();
                    continue;
                }
                lex.bump(offset + 1);
                return Ok(());
            }
            '\n' | '\r' => break,
            _ => {}
        }
    }

    Err(LexErrorKind::UnterminatedString)
}

fn skip_brace_comment(lex: &mut Lexer<Token>) -> FilterResult<(), LexErrorKind> {
    skip_until(lex, "}")
}

fn skip_paren_comment(lex: &mut Lexer<Token>) -> FilterResult<(), LexErrorKind> {
    skip_until(lex, "*)")
}

fn skip_until(lex: &mut Lexer<Token>, terminator: &str) -> FilterResult<(), LexErrorKind> {
    match lex.remainder().find(terminator) {
        Some(offset) => {
            lex.bump(offset + terminator.len());
            FilterResult::Skip
        }
        None => FilterResult::Error(LexErrorKind::UnterminatedComment),
    }
}

impl Token {
    /// The canonical spelling of tokens whose text is fixed by the grammar.
    ///
    /// Identifiers and literals carry their source text instead and return `None`.
    pub fn fixed_text(&self) -> Option<&'static str> {
        let text = match self {
            Token::Unit => "UNIT",
            Token::Interface => "INTERFACE",
            Token::Implementation => "IMPLEMENTATION",
            Token::Uses => "USES",
            Token::Const => "CONST",
            Token::Var => "VAR",
            Token::Function => "FUNCTION",
            Token::Procedure => "PROCEDURE",
            Token::Begin => "BEGIN",
            Token::End => "END",
            Token::Array => "ARRAY",
            Token::Of => "OF",
            Token::Absolute => "ABSOLUTE",
            Token::Inherited => "INHERITED",
            Token::String => "STRING",
            Token::ShortInt => "SHORTINT",
            Token::SmallInt => "SMALLINT",
            Token::Integer => "INTEGER",
            Token::Byte => "BYTE",
            Token::LongInt => "LONGINT",
            Token::Int64 => "INT64",
            Token::Word => "WORD",
            Token::Boolean => "BOOLEAN",
            Token::Char => "CHAR",
            Token::WideChar => "WIDECHAR",
            Token::LongWord => "LONGWORD",
            Token::PChar => "PCHAR",
            Token::Real48 => "REAL48",
            Token::Real => "REAL",
            Token::Single => "SINGLE",
            Token::Double => "DOUBLE",
            Token::Extended => "EXTENDED",
            Token::Currency => "CURRENCY",
            Token::Comp => "COMP",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Equals => "=",
            Token::Range => "..",
            Token::Period => ".",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::Ident
            | Token::Number
            | Token::StringLiteral
            | Token::Comment
            | Token::EndOfInput => return None,
        };
        Some(text)
    }

    /// Check if this token is a case-insensitive reserved word
    pub fn is_reserved_word(&self) -> bool {
        RESERVED_WORDS.contains(self)
    }

    /// Check if this token names an ordinal type (`ordIdent`)
    pub fn is_ordinal_type(&self) -> bool {
        matches!(
            self,
            Token::ShortInt
                | Token::SmallInt
                | Token::Integer
                | Token::Byte
                | Token::LongInt
                | Token::Int64
                | Token::Word
                | Token::Boolean
                | Token::Char
                | Token::WideChar
                | Token::LongWord
                | Token::PChar
        )
    }

    /// Check if this token names a real type (`realType`)
    pub fn is_real_type(&self) -> bool {
        matches!(
            self,
            Token::Real48
                | Token::Real
                | Token::Single
                | Token::Double
                | Token::Extended
                | Token::Currency
                | Token::Comp
        )
    }

    /// Check if this token carries its text from the source
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Ident | Token::Number | Token::StringLiteral)
    }

    /// Human readable description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Ident => "identifier".to_string(),
            Token::Number => "number".to_string(),
            Token::StringLiteral => "string literal".to_string(),
            Token::Comment => "comment".to_string(),
            Token::EndOfInput => "end of input".to_string(),
            other => format!("'{}'", other.fixed_text().unwrap_or_default()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::Ident => "ident",
            Token::Number => "number",
            Token::StringLiteral => "string-literal",
            Token::Comment => "comment",
            Token::EndOfInput => "end-of-input",
            Token::Semicolon => "semicolon",
            Token::Comma => "comma",
            Token::Colon => "colon",
            Token::Equals => "equals",
            Token::Range => "range",
            Token::Period => "period",
            Token::OpenParen => "open-paren",
            Token::CloseParen => "close-paren",
            Token::OpenBracket => "open-bracket",
            Token::CloseBracket => "close-bracket",
            keyword => {
                let text = keyword.fixed_text().unwrap_or_default().to_ascii_lowercase();
                return write!(f, "<{}>", text);
            }
        };
        write!(f, "<{}>", name)
    }
}
