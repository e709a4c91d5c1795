//! Grammar rule names
//!
//! Every rule node in the tree is tagged with one of these. The camelCase
//! name is what serialization prints and what path queries match against.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A grammar production of the unit grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    Goal,
    Unit,
    InterfaceSection,
    InterfaceDecl,
    ExportedHeading,
    FunctionHeading,
    ProcedureHeading,
    FormalParms,
    FormalParm,
    Parameter,
    ParameterType,
    ReturnType,
    ImplementationSection,
    DeclSection,
    ProcedureDeclSection,
    ProcedureDecl,
    FunctionDecl,
    Block,
    Statement,
    UsesClause,
    ConstSection,
    ConstDecl,
    TypedConstant,
    ConstExpr,
    Number,
    String,
    VarSection,
    VarDecl,
    SubrangeType,
    Type,
    SimpleType,
    OrdinalType,
    OrdIdent,
    RealType,
    StringType,
    TypeId,
    QualId,
    IdentList,
    Ident,
}

impl Rule {
    pub const ALL: [Rule; 39] = [
        Rule::Goal,
        Rule::Unit,
        Rule::InterfaceSection,
        Rule::InterfaceDecl,
        Rule::ExportedHeading,
        Rule::FunctionHeading,
        Rule::ProcedureHeading,
        Rule::FormalParms,
        Rule::FormalParm,
        Rule::Parameter,
        Rule::ParameterType,
        Rule::ReturnType,
        Rule::ImplementationSection,
        Rule::DeclSection,
        Rule::ProcedureDeclSection,
        Rule::ProcedureDecl,
        Rule::FunctionDecl,
        Rule::Block,
        Rule::Statement,
        Rule::UsesClause,
        Rule::ConstSection,
        Rule::ConstDecl,
        Rule::TypedConstant,
        Rule::ConstExpr,
        Rule::Number,
        Rule::String,
        Rule::VarSection,
        Rule::VarDecl,
        Rule::SubrangeType,
        Rule::Type,
        Rule::SimpleType,
        Rule::OrdinalType,
        Rule::OrdIdent,
        Rule::RealType,
        Rule::StringType,
        Rule::TypeId,
        Rule::QualId,
        Rule::IdentList,
        Rule::Ident,
    ];

    /// The production name as it appears in serialized trees
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Goal => "goal",
            Rule::Unit => "unit",
            Rule::InterfaceSection => "interfaceSection",
            Rule::InterfaceDecl => "interfaceDecl",
            Rule::ExportedHeading => "exportedHeading",
            Rule::FunctionHeading => "functionHeading",
            Rule::ProcedureHeading => "procedureHeading",
            Rule::FormalParms => "formalParms",
            Rule::FormalParm => "formalParm",
            Rule::Parameter => "parameter",
            Rule::ParameterType => "parameterType",
            Rule::ReturnType => "returnType",
            Rule::ImplementationSection => "implementationSection",
            Rule::DeclSection => "declSection",
            Rule::ProcedureDeclSection => "procedureDeclSection",
            Rule::ProcedureDecl => "procedureDecl",
            Rule::FunctionDecl => "functionDecl",
            Rule::Block => "block",
            Rule::Statement => "statement",
            Rule::UsesClause => "usesClause",
            Rule::ConstSection => "constSection",
            Rule::ConstDecl => "constDecl",
            Rule::TypedConstant => "typedConstant",
            Rule::ConstExpr => "constExpr",
            Rule::Number => "number",
            Rule::String => "string",
            Rule::VarSection => "varSection",
            Rule::VarDecl => "varDecl",
            Rule::SubrangeType => "subrangeType",
            Rule::Type => "type",
            Rule::SimpleType => "simpleType",
            Rule::OrdinalType => "ordinalType",
            Rule::OrdIdent => "ordIdent",
            Rule::RealType => "realType",
            Rule::StringType => "stringType",
            Rule::TypeId => "typeId",
            Rule::QualId => "qualId",
            Rule::IdentList => "identList",
            Rule::Ident => "ident",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name matches no grammar rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule name '{0}'")]
pub struct UnknownRule(pub String);

impl FromStr for Rule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .copied()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}
