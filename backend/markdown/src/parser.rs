//! Line-oriented Markdown to Telegraph converter.
//!
//! Each line is classified once, in priority order, and either closes the
//! pending paragraph and emits a node or is buffered into the paragraph.
//! Fenced code is collected verbatim until the closing fence.

use std::path::Path;

use telegraphcl_core::{Node, Tag};
use tracing::{debug, warn};

use crate::builder;
use crate::code_block::{CodeBlock, FENCE};
use crate::error::MarkdownError;
use crate::front_matter;

/// What a line outside a code block means, once fences are ruled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Heading(Tag, &'a str),
    ListItem(&'a str),
    Blank,
    Text,
}

fn classify(line: &str) -> LineKind<'_> {
    // Telegraph has no h1/h2: `#` maps to h3, both `##` and `###` to h4.
    // `### ` must be checked before `## `.
    if let Some(rest) = line.strip_prefix("# ") {
        return LineKind::Heading(Tag::H3, rest);
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return LineKind::Heading(Tag::H4, rest);
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return LineKind::Heading(Tag::H4, rest);
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return LineKind::ListItem(rest);
    }
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    LineKind::Text
}

#[derive(Debug, Default)]
struct Converter<'a> {
    nodes: Vec<Node>,
    paragraph: Vec<&'a str>,
    code: Option<CodeBlock<'a>>,
    /// Set while consecutive list-item lines are being read.
    list_open: bool,
}

impl<'a> Converter<'a> {
    fn flush_paragraph(&mut self) {
        if let Some(node) = builder::paragraph(&self.paragraph) {
            self.nodes.push(node);
        }
        self.paragraph.clear();
    }

    fn line(&mut self, raw: &'a str) {
        let in_run = std::mem::take(&mut self.list_open);

        if raw.starts_with(FENCE) {
            match self.code.take() {
                Some(block) => {
                    debug!(
                        language = block.language(),
                        lines = block.line_count(),
                        "Closed code block"
                    );
                    self.nodes.push(block.into_node());
                }
                None => {
                    self.flush_paragraph();
                    self.code = Some(CodeBlock::open(raw));
                }
            }
            return;
        }

        if let Some(block) = self.code.as_mut() {
            block.push(raw);
            return;
        }

        let line = raw.strip_suffix('\r').unwrap_or(raw);
        match classify(line) {
            LineKind::Heading(tag, text) => {
                self.flush_paragraph();
                self.nodes.push(builder::heading(tag, text));
            }
            LineKind::ListItem(text) => {
                self.flush_paragraph();
                builder::push_list_item(&mut self.nodes, builder::list_item(text), in_run);
                self.list_open = true;
            }
            LineKind::Blank => self.flush_paragraph(),
            LineKind::Text => self.paragraph.push(line),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush_paragraph();
        if let Some(block) = self.code.take() {
            warn!(
                language = block.language(),
                lines = block.line_count(),
                "Unterminated code block at end of input; discarding it"
            );
        }
        self.nodes
    }
}

/// Convert Markdown body text (without front matter) into content nodes.
pub fn markdown_to_nodes(content: &str) -> Vec<Node> {
    let mut converter = Converter::default();
    for line in content.split('\n') {
        converter.line(line);
    }
    converter.finish()
}

/// Strip front matter and convert the remaining Markdown.
pub fn parse_str(content: &str) -> Vec<Node> {
    markdown_to_nodes(front_matter::strip(content))
}

/// Read a Markdown file and convert it into content nodes.
pub async fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Node>, MarkdownError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|source| MarkdownError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);
    let nodes = parse_str(&content);
    debug!(path = %path.display(), nodes = nodes.len(), "Parsed markdown file");
    Ok(nodes)
}
