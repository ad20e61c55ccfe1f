//! Debug rendering of a parsed tree.

use std::fmt::Write;

use sift_dom::{Document, NodeId};

/// Render the subtree under `id` as an indented outline, one element per
/// line, with aggregated text shown on leaf elements.
#[must_use]
pub fn format_tree(document: &Document, id: NodeId) -> String {
    let mut out = String::new();
    let mut stack = vec![(id, 0_usize)];

    while let Some((current, depth)) = stack.pop() {
        let Some(node) = document.node(current) else {
            continue;
        };
        let prefix = "  ".repeat(depth);

        let mut attrs: Vec<String> = node
            .attributes()
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    k.clone()
                } else {
                    format!("{k}=\"{v}\"")
                }
            })
            .collect();
        attrs.sort();

        let _ = if attrs.is_empty() {
            writeln!(out, "{prefix}<{}>", node.tag_name())
        } else {
            writeln!(out, "{prefix}<{} {}>", node.tag_name(), attrs.join(" "))
        };

        let children = document.children(current);
        if children.is_empty() && !node.text_content().is_empty() {
            let _ = writeln!(out, "{prefix}  \"{}\"", node.text_content());
        }
        stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
    }

    out
}

/// Print a tree for debugging.
pub fn print_tree(document: &Document, id: NodeId) {
    print!("{}", format_tree(document, id));
}

#[cfg(test)]
mod tests {
    use super::format_tree;
    use crate::parse;

    #[test]
    fn outline_is_indented_in_document_order() {
        let doc = parse("<ul class=nav><li>A</li><li hidden>B</li></ul>");
        let outline = format_tree(&doc, doc.root());
        let expected = concat!(
            "<root>\n",
            "  <ul class=\"nav\">\n",
            "    <li>\n",
            "      \"A\"\n",
            "    <li hidden>\n",
            "      \"B\"\n",
        );
        assert_eq!(outline, expected);
    }
}
