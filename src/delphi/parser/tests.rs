use chumsky::prelude::*;
use chumsky::Stream;

use crate::delphi::ast::Node;
use crate::delphi::error::ParseError;
use crate::delphi::lexer::{tokenize_with_spans, Token};
use crate::delphi::parser::combinators::{ParserError, RuleParser};
use crate::delphi::parser::grammar::Grammar;
use crate::delphi::parser::parse_unit;

/// Run a single grammar rule over the whole of `source`
fn parse_rule<F>(source: &str, build: F) -> Result<String, Vec<ParserError>>
where
    F: Fn(&Grammar) -> RuleParser,
{
    let tokens = tokenize_with_spans(source).expect("source to tokenize");
    let eoi = source.len()..source.len();
    let stream = Stream::from_iter(
        eoi,
        tokens
            .into_iter()
            .filter(|(token, _)| *token != Token::EndOfInput),
    );
    let grammar = Grammar::new(source);
    build(&grammar)
        .then_ignore(end())
        .parse(stream)
        .map(|fragment| {
            fragment
                .iter()
                .map(Node::to_string_tree)
                .collect::<Vec<_>>()
                .join(" ")
        })
}

fn assert_rule<F>(source: &str, build: F, expected: &str)
where
    F: Fn(&Grammar) -> RuleParser,
{
    match parse_rule(source, build) {
        Ok(tree) => assert_eq!(tree, expected, "source: {:?}", source),
        Err(errors) => panic!("failed to parse {:?}: {:?}", source, errors),
    }
}

#[test]
fn test_ident_list() {
    assert_rule(
        "a, b ,c",
        Grammar::ident_list,
        "(identList (ident a) , (ident b) , (ident c))",
    );
}

#[test]
fn test_uses_clause() {
    assert_rule(
        "USES uses0, uses1;",
        Grammar::uses_clause,
        "(usesClause USES (identList (ident uses0) , (ident uses1)) ;)",
    );
}

#[test]
fn test_const_expr_forms() {
    assert_rule("10", Grammar::const_expr, "(constExpr (number 10))");
    assert_rule("'value'", Grammar::const_expr, "(constExpr (string 'value'))");
    assert_rule("''''", Grammar::const_expr, "(constExpr (string ''''))");
}

#[test]
fn test_type_alternatives() {
    assert_rule(
        "INTEGER",
        Grammar::type_,
        "(type (simpleType (ordinalType (ordIdent INTEGER))))",
    );
    assert_rule(
        "DOUBLE",
        Grammar::type_,
        "(type (simpleType (realType DOUBLE)))",
    );
    assert_rule("STRING", Grammar::type_, "(type (stringType STRING))");
    assert_rule("string", Grammar::type_, "(type (typeId (ident string)))");
    assert_rule("TIniFile", Grammar::type_, "(type (typeId (ident TIniFile)))");
}

#[test]
fn test_parameter_and_return_types() {
    assert_rule("STRING", Grammar::parameter_type, "(parameterType STRING)");
    assert_rule(
        "TDatetime",
        Grammar::parameter_type,
        "(parameterType (qualId (ident TDatetime)))",
    );
    assert_rule(
        "BOOLEAN",
        Grammar::return_type,
        "(returnType (simpleType (ordinalType (ordIdent BOOLEAN))))",
    );
}

#[test]
fn test_const_decl_forms() {
    assert_rule(
        "const0 = 10",
        Grammar::const_decl,
        "(constDecl (ident const0) = (constExpr (number 10)))",
    );
    assert_rule(
        "iconst2 : INTEGER = 10",
        Grammar::const_decl,
        "(constDecl (ident iconst2) : (type (simpleType (ordinalType (ordIdent INTEGER)))) = (typedConstant (constExpr (number 10))))",
    );
}

#[test]
fn test_var_decl_forms() {
    assert_rule(
        "var0, var1: INTEGER = 10",
        Grammar::var_decl,
        "(varDecl (identList (ident var0) , (ident var1)) : (type (simpleType (ordinalType (ordIdent INTEGER)))) = (constExpr (number 10)))",
    );
    assert_rule(
        "var3: Byte ABSOLUTE var2",
        Grammar::var_decl,
        "(varDecl (identList (ident var3)) : (type (typeId (ident Byte))) ABSOLUTE (ident var2))",
    );
    assert_rule(
        "var1 : ARRAY OF STRING",
        Grammar::var_decl,
        "(varDecl (identList (ident var1)) : ARRAY OF (type (stringType STRING)))",
    );
    assert_rule(
        "var2 : ARRAY[1..5] OF STRING",
        Grammar::var_decl,
        "(varDecl (identList (ident var2)) : ARRAY [ (subrangeType 1 .. 5) ] OF (type (stringType STRING)))",
    );
}

#[test]
fn test_var_section_keeps_separators() {
    assert_rule(
        "VAR a: x; b: y;",
        Grammar::var_section,
        "(varSection VAR (varDecl (identList (ident a)) : (type (typeId (ident x)))) ; (varDecl (identList (ident b)) : (type (typeId (ident y)))) ;)",
    );
}

#[test]
fn test_parameter_forms() {
    assert_rule(
        "parm0, parm1 : STRING",
        Grammar::parameter,
        "(parameter (identList (ident parm0) , (ident parm1)) : (parameterType STRING))",
    );
    assert_rule(
        "dt:TDatetime=0",
        Grammar::parameter,
        "(parameter (ident dt) : (parameterType (qualId (ident TDatetime))) = (constExpr (number 0)))",
    );
    assert_rule(
        "parm0: ARRAY OF STRING",
        Grammar::parameter,
        "(parameter (identList (ident parm0)) : ARRAY OF (parameterType STRING))",
    );
    assert_rule(
        "a, b: INTEGER = 1",
        Grammar::parameter,
        "(parameter (identList (ident a) , (ident b)) : (parameterType (simpleType (ordinalType (ordIdent INTEGER)))) = (constExpr (number 1)))",
    );
}

#[test]
fn test_formal_parms() {
    assert_rule("()", Grammar::formal_parms, "(formalParms ( ))");
    assert_rule(
        "(a: x; b: y)",
        Grammar::formal_parms,
        "(formalParms ( (formalParm (parameter (identList (ident a)) : (parameterType (qualId (ident x))))) ; (formalParm (parameter (identList (ident b)) : (parameterType (qualId (ident y))))) ))",
    );
    assert!(parse_rule("(a: x;)", Grammar::formal_parms).is_err());
}

#[test]
fn test_headings() {
    assert_rule(
        "FUNCTION function1 () : STRING",
        Grammar::function_heading,
        "(functionHeading FUNCTION (ident function1) (formalParms ( )) : (returnType STRING))",
    );
    assert_rule(
        "PROCEDURE procedure1()",
        Grammar::procedure_heading,
        "(procedureHeading PROCEDURE (ident procedure1) (formalParms ( )))",
    );
}

#[test]
fn test_procedure_decl_section() {
    assert_rule(
        "PROCEDURE p (); BEGIN INHERITED; END;",
        Grammar::procedure_decl_section,
        "(procedureDeclSection (procedureDecl (procedureHeading PROCEDURE (ident p) (formalParms ( ))) ; (block BEGIN (statement INHERITED ;) END) ;))",
    );
    assert_rule(
        "FUNCTION f () : STRING; BEGIN END;",
        Grammar::procedure_decl_section,
        "(procedureDeclSection (functionDecl (functionHeading FUNCTION (ident f) (formalParms ( )) : (returnType STRING)) ; (block BEGIN END) ;))",
    );
}

#[test]
fn test_reserved_word_leaves_are_canonical() {
    assert_rule(
        "function f () : STRING",
        Grammar::function_heading,
        "(functionHeading FUNCTION (ident f) (formalParms ( )) : (returnType STRING))",
    );
}

#[test]
fn test_parse_unit_minimal() {
    let tree = parse_unit("UNIT Unit001;\n.\n").expect("unit to parse");
    assert_eq!(tree.to_string_tree(), "(goal (unit UNIT (ident Unit001) ; .))");
}

#[test]
fn test_parse_unit_rejects_trailing_tokens() {
    let error = parse_unit("UNIT a; . b").unwrap_err();
    match error {
        ParseError::Syntax(error) => {
            assert_eq!(error.found, Token::Ident);
            assert_eq!(error.expected, vec![Token::EndOfInput]);
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_parse_unit_reports_lex_errors() {
    assert!(matches!(
        parse_unit("UNIT a; { never closed"),
        Err(ParseError::Lex(_))
    ));
}
