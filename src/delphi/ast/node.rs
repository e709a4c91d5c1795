//! Concrete syntax tree nodes
//!
//! A tree is made of rule nodes, one per grammar rule the parser matched, and
//! leaves, one per matched token. Children keep match order and nothing is
//! elided, so the tree can be addressed by rule name and sibling index.

use serde::Serialize;
use std::fmt::{self, Write};

use super::rule::Rule;

/// A node of the concrete syntax tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Rule(RuleNode),
    Leaf(Leaf),
}

/// A matched grammar rule and everything it matched, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleNode {
    pub rule: Rule,
    pub children: Vec<Node>,
}

/// The text of one matched token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    pub text: String,
}

impl Node {
    pub fn rule(rule: Rule, children: Vec<Node>) -> Self {
        Node::Rule(RuleNode { rule, children })
    }

    pub fn leaf(text: impl Into<String>) -> Self {
        Node::Leaf(Leaf { text: text.into() })
    }

    pub fn as_rule(&self) -> Option<&RuleNode> {
        match self {
            Node::Rule(node) => Some(node),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Rule(_) => None,
            Node::Leaf(leaf) => Some(leaf),
        }
    }

    /// The rule this node was produced by, `None` for leaves
    pub fn rule_name(&self) -> Option<Rule> {
        self.as_rule().map(|node| node.rule)
    }

    pub fn is_rule(&self, rule: Rule) -> bool {
        self.rule_name() == Some(rule)
    }

    /// Children in match order; leaves have none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Rule(node) => &node.children,
            Node::Leaf(_) => &[],
        }
    }

    /// Canonical parenthesized serialization
    pub fn to_string_tree(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = write_tree(self, &mut out);
        out
    }

    /// Source text of every leaf under this node, space separated
    pub fn text(&self) -> String {
        let mut words = Vec::new();
        self.walk(&mut |node, _| {
            if let Node::Leaf(leaf) = node {
                words.push(leaf.text.as_str());
            }
        });
        words.join(" ")
    }

    /// Visit this node and all its descendants in pre-order, with their depth
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a Node, usize),
    {
        fn go<'a, F>(node: &'a Node, depth: usize, visit: &mut F)
        where
            F: FnMut(&'a Node, usize),
        {
            visit(node, depth);
            for child in node.children() {
                go(child, depth + 1, visit);
            }
        }
        go(self, 0, visit);
    }

    /// Pre-order iterator over this node and all its descendants
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

impl RuleNode {
    /// Rule-node children produced by `rule`, in document order
    pub fn children_of(&self, rule: Rule) -> impl Iterator<Item = &RuleNode> + '_ {
        self.children
            .iter()
            .filter_map(Node::as_rule)
            .filter(move |child| child.rule == rule)
    }

    /// The `index`-th child produced by `rule`
    pub fn child(&self, rule: Rule, index: usize) -> Option<&RuleNode> {
        self.children_of(rule).nth(index)
    }

    /// The first child produced by `rule`
    pub fn first(&self, rule: Rule) -> Option<&RuleNode> {
        self.child(rule, 0)
    }

    /// Direct leaf children
    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> + '_ {
        self.children.iter().filter_map(Node::as_leaf)
    }

    pub fn to_string_tree(&self) -> String {
        let mut out = String::new();
        let _ = write_rule(self, &mut out);
        out
    }
}

impl Leaf {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

fn write_tree<W: Write>(node: &Node, out: &mut W) -> fmt::Result {
    match node {
        Node::Rule(rule) => write_rule(rule, out),
        Node::Leaf(leaf) => out.write_str(&leaf.text),
    }
}

fn write_rule<W: Write>(node: &RuleNode, out: &mut W) -> fmt::Result {
    out.write_char('(')?;
    out.write_str(node.rule.name())?;
    for child in &node.children {
        out.write_char(' ')?;
        write_tree(child, out)?;
    }
    out.write_char(')')
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(self, f)
    }
}

impl fmt::Display for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rule(self, f)
    }
}

/// Iterator returned by [`Node::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
