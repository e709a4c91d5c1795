//! Treeviz formatter for syntax trees

use crate::delphi::ast::Node;

/// Label width used when no configuration says otherwise
pub const DEFAULT_MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Draw `root` and everything below it with box-drawing connectors.
///
/// Rule nodes print as `rule: text`, the text being their leaves joined and
/// cut to `max_label_chars`. Leaves print their own text.
pub fn to_treeviz_str(root: &Node, max_label_chars: usize) -> String {
    let mut result = String::new();
    append_node(&mut result, root, "", true, max_label_chars);
    result
}

fn append_node(result: &mut String, node: &Node, prefix: &str, is_last: bool, max: usize) {
    let connector = if is_last { "└─" } else { "├─" };

    match node {
        Node::Rule(rule) => {
            let label = truncate(&node.text(), max);
            result.push_str(&format!("{}{} {}: {}\n", prefix, connector, rule.rule, label));

            let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
            for (i, child) in rule.children.iter().enumerate() {
                let is_last = i == rule.children.len() - 1;
                append_node(result, child, &new_prefix, is_last, max);
            }
        }
        Node::Leaf(leaf) => {
            result.push_str(&format!("{}{} {}\n", prefix, connector, truncate(&leaf.text, max)));
        }
    }
}
