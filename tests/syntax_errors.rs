//! Malformed units must fail with a located error and no tree

use pitonisa::delphi::ast::Position;
use pitonisa::delphi::lexer::Token;
use pitonisa::{parse_unit, LexErrorKind, ParseError, SyntaxError};
use rstest::rstest;

fn syntax_error(source: &str) -> SyntaxError {
    match parse_unit(source) {
        Err(ParseError::Syntax(error)) => error,
        other => panic!("expected a syntax error for {:?}, got {:?}", source, other),
    }
}

#[test]
fn test_unit_header_without_identifier() {
    let error = syntax_error("UNIT ;\n.\n");
    assert_eq!(error.found, Token::Semicolon);
    assert_eq!(error.expected, vec![Token::Ident]);
    assert_eq!(error.position, Position::new(1, 6));
    assert_eq!(error.span, 5..6);
}

#[test]
fn test_missing_final_period() {
    let error = syntax_error("UNIT u;\n");
    assert_eq!(error.found, Token::EndOfInput);
    assert!(error.expected.contains(&Token::Period));
    assert_eq!(error.position, Position::new(2, 1));
}

#[rstest]
#[case::const_without_value("UNIT u; INTERFACE CONST a = ; .", Token::Semicolon, 1, 29)]
#[case::var_without_type("UNIT u;\nINTERFACE\nVAR a : ;\n.", Token::Semicolon, 3, 9)]
#[case::missing_separator("UNIT u;\nINTERFACE\nVAR a : x b : y;\n.", Token::Ident, 3, 11)]
#[case::trailing_parameter_separator(
    "UNIT u; INTERFACE PROCEDURE p (a : x;); .",
    Token::CloseParen,
    1,
    38
)]
#[case::statement_outside_block("UNIT u; IMPLEMENTATION INHERITED; .", Token::Inherited, 1, 24)]
fn test_syntax_error_location(
    #[case] source: &str,
    #[case] found: Token,
    #[case] line: usize,
    #[case] column: usize,
) {
    let error = syntax_error(source);
    assert_eq!(error.found, found, "{}", error);
    assert_eq!(error.position, Position::new(line, column), "{}", error);
}

#[test]
fn test_const_error_lists_literals() {
    let error = syntax_error("UNIT u; INTERFACE CONST a = ; .");
    assert_eq!(error.expected, vec![Token::Number, Token::StringLiteral]);
    assert_eq!(
        error.to_string(),
        "unexpected ';' at 1:29, expected one of number, string literal"
    );
}

#[rstest]
#[case::unterminated_string(
    "UNIT u; INTERFACE CONST a = 'abc\n; .",
    LexErrorKind::UnterminatedString,
    1,
    29
)]
#[case::unterminated_brace_comment(
    "UNIT u; { never closed\n.",
    LexErrorKind::UnterminatedComment,
    1,
    9
)]
#[case::unterminated_paren_comment(
    "UNIT u;\n(* never closed",
    LexErrorKind::UnterminatedComment,
    2,
    1
)]
fn test_lex_error_location(
    #[case] source: &str,
    #[case] kind: LexErrorKind,
    #[case] line: usize,
    #[case] column: usize,
) {
    match parse_unit(source) {
        Err(ParseError::Lex(error)) => {
            assert_eq!(error.kind, kind);
            assert_eq!(error.position, Position::new(line, column));
        }
        other => panic!("expected a lex error, got {:?}", other),
    }
}

#[test]
fn test_unknown_character() {
    match parse_unit("UNIT u; @ .") {
        Err(ParseError::Lex(error)) => {
            assert_eq!(error.kind, LexErrorKind::UnexpectedCharacter('@'));
            assert_eq!(error.span, 8..9);
            assert_eq!(error.to_string(), "unexpected character '@' at 1:9");
        }
        other => panic!("expected a lex error, got {:?}", other),
    }
}

#[test]
fn test_lex_error_wins_over_earlier_syntax_error() {
    // `UNIT ;` alone is a syntax error at 1:6, but the whole unit is lexed first
    match parse_unit("UNIT ;\n@") {
        Err(ParseError::Lex(error)) => {
            assert_eq!(error.kind, LexErrorKind::UnexpectedCharacter('@'));
            assert_eq!(error.position, Position::new(2, 1));
        }
        other => panic!("expected a lex error, got {:?}", other),
    }
}
