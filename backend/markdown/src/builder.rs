//! Node construction for converted blocks.

use telegraphcl_core::{Node, NodeElement, Tag};

/// Join buffered paragraph lines into a single `p` node.
///
/// Returns `None` when the joined text is blank.
pub fn paragraph(lines: &[&str]) -> Option<Node> {
    if lines.is_empty() {
        return None;
    }
    let joined = lines.join(" ");
    let text = joined.trim();
    if text.is_empty() {
        return None;
    }
    Some(Node::element_with_text(Tag::P, text))
}

/// `h3`/`h4` with the trimmed heading text.
pub fn heading(tag: Tag, text: &str) -> Node {
    Node::element_with_text(tag, text.trim())
}

pub fn list_item(text: &str) -> Node {
    Node::element_with_text(Tag::Li, text.trim())
}

/// Append a list item. While `in_run` is set, the item extends the trailing
/// `ul` instead of starting a new one.
pub fn push_list_item(nodes: &mut Vec<Node>, item: Node, in_run: bool) {
    if in_run {
        if let Some(list) = nodes
            .last_mut()
            .and_then(Node::as_element_mut)
            .filter(|element| element.tag == Tag::Ul)
        {
            list.children.push(item);
            return;
        }
    }
    nodes.push(NodeElement::new(Tag::Ul).with_child(item).into());
}
