//! The unit grammar
//!
//! One method per production; each returns a parser producing exactly one
//! rule node. Alternatives that share a prefix are tried in order and the
//! input is rewound between them.
//!
//! ```text
//! goal                  := unit <eof>
//! unit                  := UNIT ident ';' interfaceSection? implementationSection? '.'
//! interfaceSection      := INTERFACE usesClause? interfaceDecl*
//! interfaceDecl         := constSection | varSection | exportedHeading
//! exportedHeading       := (functionHeading | procedureHeading) ';'
//! implementationSection := IMPLEMENTATION usesClause? declSection*
//! declSection           := constSection | varSection | procedureDeclSection
//! procedureDeclSection  := procedureDecl | functionDecl
//! ```

use chumsky::prelude::*;
use std::sync::Arc;

use crate::delphi::ast::{Node, Rule};
use crate::delphi::lexer::Token;
use crate::delphi::parser::combinators::{
    any_of, many, many1, opt, rule, sequence, token, Fragment, ParserError, RuleParser,
};

const ORDINAL_TYPES: [Token; 12] = [
    Token::ShortInt,
    Token::SmallInt,
    Token::Integer,
    Token::Byte,
    Token::LongInt,
    Token::Int64,
    Token::Word,
    Token::Boolean,
    Token::Char,
    Token::WideChar,
    Token::LongWord,
    Token::PChar,
];

const REAL_TYPES: [Token; 7] = [
    Token::Real48,
    Token::Real,
    Token::Single,
    Token::Double,
    Token::Extended,
    Token::Currency,
    Token::Comp,
];

/// Builds rule parsers whose leaves slice their text out of `source`
pub(crate) struct Grammar {
    source: Arc<str>,
}

impl Grammar {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            source: Arc::from(source),
        }
    }

    fn tok(&self, expected: Token) -> impl Parser<Token, Fragment, Error = ParserError> + Clone {
        token(expected, &self.source)
    }

    /// The root rule: a unit followed by nothing else
    pub(crate) fn goal(&self) -> BoxedParser<'static, Token, Node, ParserError> {
        self.unit()
            .then_ignore(end())
            .map(|children| Node::rule(Rule::Goal, children))
            .boxed()
    }

    pub(crate) fn unit(&self) -> RuleParser {
        rule(
            Rule::Unit,
            sequence!(
                self.tok(Token::Unit),
                self.ident(),
                self.tok(Token::Semicolon),
                opt(self.interface_section()),
                opt(self.implementation_section()),
                self.tok(Token::Period)
            ),
        )
    }

    // Interface part

    pub(crate) fn interface_section(&self) -> RuleParser {
        rule(
            Rule::InterfaceSection,
            sequence!(
                self.tok(Token::Interface),
                opt(self.uses_clause()),
                many(self.interface_decl())
            ),
        )
    }

    pub(crate) fn interface_decl(&self) -> RuleParser {
        rule(
            Rule::InterfaceDecl,
            choice((
                self.const_section(),
                self.var_section(),
                self.exported_heading(),
            )),
        )
    }

    pub(crate) fn exported_heading(&self) -> RuleParser {
        rule(
            Rule::ExportedHeading,
            sequence!(
                choice((self.function_heading(), self.procedure_heading())),
                self.tok(Token::Semicolon)
            ),
        )
    }

    pub(crate) fn function_heading(&self) -> RuleParser {
        rule(
            Rule::FunctionHeading,
            sequence!(
                self.tok(Token::Function),
                self.ident(),
                self.formal_parms(),
                self.tok(Token::Colon),
                self.return_type()
            ),
        )
    }

    pub(crate) fn procedure_heading(&self) -> RuleParser {
        rule(
            Rule::ProcedureHeading,
            sequence!(
                self.tok(Token::Procedure),
                self.ident(),
                self.formal_parms()
            ),
        )
    }

    pub(crate) fn formal_parms(&self) -> RuleParser {
        let more = many(sequence!(self.tok(Token::Semicolon), self.formal_parm()));
        rule(
            Rule::FormalParms,
            sequence!(
                self.tok(Token::OpenParen),
                opt(sequence!(self.formal_parm(), more)),
                self.tok(Token::CloseParen)
            ),
        )
    }

    pub(crate) fn formal_parm(&self) -> RuleParser {
        rule(Rule::FormalParm, self.parameter())
    }

    /// A single name with a default value is the `ident` form; every other
    /// parameter names its targets through an `identList`.
    pub(crate) fn parameter(&self) -> RuleParser {
        let open_array = sequence!(
            self.ident_list(),
            self.tok(Token::Colon),
            self.tok(Token::Array),
            self.tok(Token::Of),
            self.parameter_type()
        );
        let with_default = sequence!(
            self.ident(),
            self.tok(Token::Colon),
            self.parameter_type(),
            self.tok(Token::Equals),
            self.const_expr()
        );
        let plain = sequence!(
            self.ident_list(),
            self.tok(Token::Colon),
            self.parameter_type(),
            opt(sequence!(self.tok(Token::Equals), self.const_expr()))
        );
        rule(Rule::Parameter, choice((open_array, with_default, plain)))
    }

    pub(crate) fn parameter_type(&self) -> RuleParser {
        rule(
            Rule::ParameterType,
            choice((
                self.simple_type(),
                self.tok(Token::String).boxed(),
                self.qual_id(),
            )),
        )
    }

    pub(crate) fn return_type(&self) -> RuleParser {
        rule(
            Rule::ReturnType,
            choice((
                self.simple_type(),
                self.tok(Token::String).boxed(),
                self.qual_id(),
            )),
        )
    }

    // Implementation part

    pub(crate) fn implementation_section(&self) -> RuleParser {
        rule(
            Rule::ImplementationSection,
            sequence!(
                self.tok(Token::Implementation),
                opt(self.uses_clause()),
                many(self.decl_section())
            ),
        )
    }

    pub(crate) fn decl_section(&self) -> RuleParser {
        rule(
            Rule::DeclSection,
            choice((
                self.const_section(),
                self.var_section(),
                self.procedure_decl_section(),
            )),
        )
    }

    pub(crate) fn procedure_decl_section(&self) -> RuleParser {
        rule(
            Rule::ProcedureDeclSection,
            choice((self.procedure_decl(), self.function_decl())),
        )
    }

    pub(crate) fn procedure_decl(&self) -> RuleParser {
        rule(
            Rule::ProcedureDecl,
            sequence!(
                self.procedure_heading(),
                self.tok(Token::Semicolon),
                self.block(),
                self.tok(Token::Semicolon)
            ),
        )
    }

    pub(crate) fn function_decl(&self) -> RuleParser {
        rule(
            Rule::FunctionDecl,
            sequence!(
                self.function_heading(),
                self.tok(Token::Semicolon),
                self.block(),
                self.tok(Token::Semicolon)
            ),
        )
    }

    pub(crate) fn block(&self) -> RuleParser {
        rule(
            Rule::Block,
            sequence!(
                self.tok(Token::Begin),
                many(self.statement()),
                self.tok(Token::End)
            ),
        )
    }

    // TODO: assignments, calls and control flow once a statement grammar is settled
    pub(crate) fn statement(&self) -> RuleParser {
        rule(
            Rule::Statement,
            sequence!(self.tok(Token::Inherited), self.tok(Token::Semicolon)),
        )
    }

    // Declarations shared by both parts

    pub(crate) fn uses_clause(&self) -> RuleParser {
        rule(
            Rule::UsesClause,
            sequence!(
                self.tok(Token::Uses),
                self.ident_list(),
                self.tok(Token::Semicolon)
            ),
        )
    }

    pub(crate) fn const_section(&self) -> RuleParser {
        rule(
            Rule::ConstSection,
            sequence!(
                self.tok(Token::Const),
                many1(sequence!(self.const_decl(), self.tok(Token::Semicolon)))
            ),
        )
    }

    pub(crate) fn const_decl(&self) -> RuleParser {
        let untyped = sequence!(self.tok(Token::Equals), self.const_expr());
        let typed = sequence!(
            self.tok(Token::Colon),
            self.type_(),
            self.tok(Token::Equals),
            self.typed_constant()
        );
        rule(Rule::ConstDecl, sequence!(self.ident(), choice((untyped, typed))))
    }

    pub(crate) fn typed_constant(&self) -> RuleParser {
        rule(Rule::TypedConstant, self.const_expr())
    }

    pub(crate) fn const_expr(&self) -> RuleParser {
        rule(Rule::ConstExpr, choice((self.number(), self.string())))
    }

    pub(crate) fn number(&self) -> RuleParser {
        rule(Rule::Number, self.tok(Token::Number))
    }

    pub(crate) fn string(&self) -> RuleParser {
        rule(Rule::String, self.tok(Token::StringLiteral))
    }

    pub(crate) fn var_section(&self) -> RuleParser {
        rule(
            Rule::VarSection,
            sequence!(
                self.tok(Token::Var),
                many1(sequence!(self.var_decl(), self.tok(Token::Semicolon)))
            ),
        )
    }

    /// The four declaration shapes share `identList ':'` and split on the
    /// next token: `ARRAY` picks an array form, anything else is a type
    /// optionally followed by an initializer or `ABSOLUTE`.
    pub(crate) fn var_decl(&self) -> RuleParser {
        let dynamic_array = sequence!(self.tok(Token::Of), self.type_());
        let static_array = sequence!(
            self.tok(Token::OpenBracket),
            self.subrange_type(),
            self.tok(Token::CloseBracket),
            self.tok(Token::Of),
            self.type_()
        );
        let array = sequence!(
            self.tok(Token::Array),
            choice((dynamic_array.boxed(), static_array.boxed()))
        );

        let initializer = sequence!(self.tok(Token::Equals), self.const_expr());
        let absolute = sequence!(self.tok(Token::Absolute), self.ident());
        let typed = sequence!(
            self.type_(),
            opt(choice((initializer.boxed(), absolute.boxed())))
        );

        rule(
            Rule::VarDecl,
            sequence!(
                self.ident_list(),
                self.tok(Token::Colon),
                choice((array.boxed(), typed.boxed()))
            ),
        )
    }

    /// Bounds are kept as bare leaves
    pub(crate) fn subrange_type(&self) -> RuleParser {
        let bound = || choice((self.tok(Token::Number), self.tok(Token::Ident)));
        rule(
            Rule::SubrangeType,
            sequence!(bound(), self.tok(Token::Range), bound()),
        )
    }

    // Types

    pub(crate) fn type_(&self) -> RuleParser {
        rule(
            Rule::Type,
            choice((self.simple_type(), self.type_id(), self.string_type())),
        )
    }

    pub(crate) fn simple_type(&self) -> RuleParser {
        rule(
            Rule::SimpleType,
            choice((self.ordinal_type(), self.real_type())),
        )
    }

    pub(crate) fn ordinal_type(&self) -> RuleParser {
        rule(Rule::OrdinalType, self.ord_ident())
    }

    pub(crate) fn ord_ident(&self) -> RuleParser {
        rule(Rule::OrdIdent, any_of(&ORDINAL_TYPES, &self.source))
    }

    pub(crate) fn real_type(&self) -> RuleParser {
        rule(Rule::RealType, any_of(&REAL_TYPES, &self.source))
    }

    pub(crate) fn string_type(&self) -> RuleParser {
        rule(Rule::StringType, self.tok(Token::String))
    }

    pub(crate) fn type_id(&self) -> RuleParser {
        rule(Rule::TypeId, self.ident())
    }

    pub(crate) fn qual_id(&self) -> RuleParser {
        rule(Rule::QualId, self.ident())
    }

    // Names

    pub(crate) fn ident_list(&self) -> RuleParser {
        rule(
            Rule::IdentList,
            sequence!(
                self.ident(),
                many(sequence!(self.tok(Token::Comma), self.ident()))
            ),
        )
    }

    pub(crate) fn ident(&self) -> RuleParser {
        rule(Rule::Ident, self.tok(Token::Ident))
    }
}
