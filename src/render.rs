//! Human-readable tree rendering for diagnostics and test output. Not part
//! of the wire exchange.

use std::fmt::Write;

use crate::node::{Node, NodeContent};

/// Renders a node as an indented XML-like string, children two spaces
/// deeper per level. Deterministic for the same input.
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    render_at(node, 0, &mut out);
    out
}

fn render_at(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    write!(out, "{indent}<{}", node.tag).unwrap();
    for (key, value) in &node.attrs {
        write!(out, " {key}={value:?}").unwrap();
    }

    match &node.content {
        NodeContent::None => out.push_str(" />"),
        NodeContent::Nodes(children) if children.is_empty() => out.push_str(" />"),
        NodeContent::Text(text) => {
            write!(out, ">{text}</{}>", node.tag).unwrap();
        }
        NodeContent::Bytes(payload) => {
            let preview_len = payload.len().min(8);
            let ellipsis = if payload.len() > preview_len { ".." } else { "" };
            write!(
                out,
                ">[{} bytes: {}{ellipsis}]</{}>",
                payload.len(),
                hex::encode(&payload[..preview_len]),
                node.tag
            )
            .unwrap();
        }
        NodeContent::Nodes(children) => {
            out.push('>');
            for child in children {
                out.push('\n');
                render_at(child, depth + 1, out);
            }
            write!(out, "\n{indent}</{}>", node.tag).unwrap();
        }
    }
}
