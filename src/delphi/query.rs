//! Path queries over a parsed tree
//!
//! A path is `/` followed by `/`-separated segments, each a rule name with an
//! optional 0-based index: `/goal/unit/interfaceSection/interfaceDecl[2]`.
//! The first segment names the root itself. Each later segment picks, among
//! the current node's children produced by that rule, the one at the given
//! index (0 when omitted).
//!
//! Queries never mutate the tree and keep no state between calls.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::delphi::ast::{Node, Rule};

static SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<name>[^\[\]]*)(?:\[(?P<index>[^\[\]]*)\])?$").unwrap());

static RULE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Errors raised while parsing a path expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path must start with '/': {path:?}")]
    MissingLeadingSlash { path: String },
    #[error("empty segment at depth {depth}")]
    EmptySegment { depth: usize },
    #[error("invalid rule name {name:?} at depth {depth}")]
    InvalidName { name: String, depth: usize },
    #[error("unknown rule '{name}' at depth {depth}")]
    UnknownRule { name: String, depth: usize },
    #[error("malformed index in segment {segment:?} at depth {depth}")]
    MalformedIndex { segment: String, depth: usize },
}

/// Errors raised while walking a tree along a path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("segment '{segment}' does not name the root rule '{root}'")]
    RootMismatch {
        segment: Segment,
        depth: usize,
        root: String,
    },
    #[error("no '{}' child for segment '{segment}' at depth {depth}", .segment.rule)]
    NoMatch { segment: Segment, depth: usize },
    #[error("segment '{segment}' at depth {depth} asks for index {index} but only {available} match")]
    IndexOutOfRange {
        segment: Segment,
        depth: usize,
        index: usize,
        available: usize,
    },
    #[error("segment '{segment}' at depth {depth} reached a leaf")]
    LeafReached { segment: Segment, depth: usize },
}

impl QueryError {
    /// Position of the failing segment, the root segment being 0
    pub fn depth(&self) -> usize {
        match self {
            QueryError::RootMismatch { depth, .. }
            | QueryError::NoMatch { depth, .. }
            | QueryError::IndexOutOfRange { depth, .. }
            | QueryError::LeafReached { depth, .. } => *depth,
        }
    }

    pub fn segment(&self) -> &Segment {
        match self {
            QueryError::RootMismatch { segment, .. }
            | QueryError::NoMatch { segment, .. }
            | QueryError::IndexOutOfRange { segment, .. }
            | QueryError::LeafReached { segment, .. } => segment,
        }
    }
}

/// Either half of [`xpath`] failing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XPathError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// One step of a path: a rule name and the index among matching siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub rule: Rule,
    pub index: Option<usize>,
}

impl Segment {
    pub fn new(rule: Rule, index: Option<usize>) -> Self {
        Self { rule, index }
    }

    /// The sibling index this segment selects
    pub fn position(&self) -> usize {
        self.index.unwrap_or(0)
    }

    fn parse(text: &str, depth: usize) -> Result<Self, PathError> {
        if text.is_empty() {
            return Err(PathError::EmptySegment { depth });
        }

        let captures = SEGMENT
            .captures(text)
            .ok_or_else(|| PathError::MalformedIndex {
                segment: text.to_string(),
                depth,
            })?;

        let name = captures.name("name").map_or("", |m| m.as_str());
        if !RULE_NAME.is_match(name) {
            return Err(PathError::InvalidName {
                name: name.to_string(),
                depth,
            });
        }
        let rule = name.parse::<Rule>().map_err(|_| PathError::UnknownRule {
            name: name.to_string(),
            depth,
        })?;

        let index = match captures.name("index") {
            Some(index) => Some(index.as_str().parse::<usize>().map_err(|_| {
                PathError::MalformedIndex {
                    segment: text.to_string(),
                    depth,
                }
            })?),
            None => None,
        };

        Ok(Self { rule, index })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.rule, index),
            None => write!(f, "{}", self.rule),
        }
    }
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let Some(rest) = path.strip_prefix('/') else {
            return Err(PathError::MissingLeadingSlash {
                path: path.to_string(),
            });
        };

        let segments = rest
            .split('/')
            .enumerate()
            .map(|(depth, text)| Segment::parse(text, depth))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walk `root` along this path and return the node it ends on
    pub fn evaluate<'a>(&self, root: &'a Node) -> Result<&'a Node, QueryError> {
        tracing::trace!(path = %self, "evaluating path");

        let mut current = root;
        for (depth, segment) in self.segments.iter().enumerate() {
            let Some(node) = current.as_rule() else {
                return Err(QueryError::LeafReached {
                    segment: *segment,
                    depth,
                });
            };

            if depth == 0 {
                if node.rule != segment.rule {
                    return Err(QueryError::RootMismatch {
                        segment: *segment,
                        depth,
                        root: node.rule.name().to_string(),
                    });
                }
                if segment.position() > 0 {
                    return Err(QueryError::IndexOutOfRange {
                        segment: *segment,
                        depth,
                        index: segment.position(),
                        available: 1,
                    });
                }
                continue;
            }

            let mut matching = node
                .children
                .iter()
                .filter(|child| child.is_rule(segment.rule));
            let mut skipped = 0;
            current = loop {
                match matching.next() {
                    Some(child) if skipped == segment.position() => break child,
                    Some(_) => skipped += 1,
                    None if skipped == 0 => {
                        return Err(QueryError::NoMatch {
                            segment: *segment,
                            depth,
                        })
                    }
                    None => {
                        return Err(QueryError::IndexOutOfRange {
                            segment: *segment,
                            depth,
                            index: segment.position(),
                            available: skipped,
                        })
                    }
                }
            };
        }

        Ok(current)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

/// Parse `path` and evaluate it against `root`
pub fn xpath<'a>(root: &'a Node, path: &str) -> Result<&'a Node, XPathError> {
    let path = Path::parse(path)?;
    Ok(path.evaluate(root)?)
}
