//! Fenced code block accumulation.
//!
//! Telegraph only keeps `href` and `src` attributes, so the fence's language
//! annotation cannot be carried into the output. It is kept for diagnostics.

use telegraphcl_core::{Node, NodeElement, Tag};

pub const FENCE: &str = "```";

#[derive(Debug, Default)]
pub struct CodeBlock<'a> {
    language: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> CodeBlock<'a> {
    /// Start a block from the opening fence line.
    pub fn open(fence_line: &'a str) -> Self {
        let language = fence_line.strip_prefix(FENCE).unwrap_or(fence_line).trim();
        Self {
            language,
            lines: Vec::new(),
        }
    }

    pub fn language(&self) -> &str {
        self.language
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn push(&mut self, line: &'a str) {
        self.lines.push(line);
    }

    /// `pre` > `code` > text, with lines joined by newlines.
    pub fn into_node(self) -> Node {
        let code = NodeElement::new(Tag::Code).with_child(self.lines.join("\n"));
        NodeElement::new(Tag::Pre).with_child(code).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_is_trimmed() {
        assert_eq!(CodeBlock::open("```  rust ").language(), "rust");
        assert_eq!(CodeBlock::open("```").language(), "");
    }

    #[test]
    fn test_lines_kept_verbatim() {
        let mut block = CodeBlock::open("```py");
        block.push("def f():");
        block.push("    return 1");
        block.push("");
        let node = block.into_node();

        let pre = node.as_element().unwrap();
        assert_eq!(pre.tag, Tag::Pre);
        assert!(pre.attrs.is_empty());
        let code = pre.children[0].as_element().unwrap();
        assert_eq!(code.tag, Tag::Code);
        assert_eq!(code.children, vec![Node::text("def f():\n    return 1\n")]);
    }

    #[test]
    fn test_empty_block() {
        let node = CodeBlock::open("```").into_node();
        assert_eq!(node.plain_text(), "");
    }
}
