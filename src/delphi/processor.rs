//! Processing API for Delphi units
//!
//! A processing spec names a stage (what data to extract) and a format (how
//! to print it), written `<stage>-<format>`:
//!
//! - `token-simple`, `token-json`: the lexeme stream
//! - `ast-tag`, `ast-treeviz`, `ast-json`: the syntax tree, optionally
//!   narrowed to one node by a path query first

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::delphi::ast::Node;
use crate::delphi::error::ParseError;
use crate::delphi::formats::{to_simple_str, to_treeviz_str, DEFAULT_MAX_LABEL_CHARS};
use crate::delphi::lexer::tokenize;
use crate::delphi::parser::parse_unit;
use crate::delphi::query::{xpath, XPathError};

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Tag,
    Treeviz,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-tag"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "tag" => OutputFormat::Tag,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Tag | OutputFormat::Treeviz) => {
                Err(ProcessingError::InvalidFormatType(format!(
                    "'{}' only works with the ast stage",
                    format_str
                )))
            }
            (ProcessingStage::Ast, OutputFormat::Simple) => Err(
                ProcessingError::InvalidFormatType(format!(
                    "'{}' only works with the token stage",
                    format_str
                )),
            ),
            _ => Ok(ProcessingSpec { stage, format }),
        }
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        use OutputFormat::*;
        use ProcessingStage::*;
        [
            (Token, Simple),
            (Token, Json),
            (Ast, Tag),
            (Ast, Treeviz),
            (Ast, Json),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Tag => "tag",
            OutputFormat::Treeviz => "treeviz",
        };
        write!(f, "{}-{}", stage, format)
    }
}

/// Knobs that do not select the output format itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOptions {
    /// Path query narrowing the tree before it is printed
    pub query: Option<String>,
    pub max_label_chars: usize,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            query: None,
            max_label_chars: DEFAULT_MAX_LABEL_CHARS,
        }
    }
}

impl ProcessingOptions {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// Errors that can occur during processing
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("Queries only apply to the ast stage")]
    QueryOnTokens,
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Query(#[from] XPathError),
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Process unit source text according to the given specification
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    options: &ProcessingOptions,
) -> Result<String, ProcessingError> {
    tracing::debug!(spec = %spec, query = ?options.query, "processing unit");

    match spec.stage {
        ProcessingStage::Token => {
            if options.query.is_some() {
                return Err(ProcessingError::QueryOnTokens);
            }
            let lexemes = tokenize(source).map_err(ParseError::from)?;
            match spec.format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&lexemes)?),
                _ => Ok(to_simple_str(&lexemes)),
            }
        }
        ProcessingStage::Ast => {
            let tree = parse_unit(source)?;
            let node = match &options.query {
                Some(query) => xpath(&tree, query)?,
                None => &tree,
            };
            format_node(node, spec.format, options)
        }
    }
}

/// Read a unit from disk and process it
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    options: &ProcessingOptions,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|source| ProcessingError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;
    process_source(&content, spec, options)
}

fn format_node(
    node: &Node,
    format: OutputFormat,
    options: &ProcessingOptions,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(node)?),
        OutputFormat::Treeviz => Ok(to_treeviz_str(node, options.max_label_chars)),
        _ => Ok(node.to_string_tree()),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ToString::to_string)
        .collect()
}
