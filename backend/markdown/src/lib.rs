//! Converts Markdown files into Telegraph content nodes.
//!
//! Only the subset Telegraph can represent is recognised: `#`/`##`/`###`
//! headings, `-`/`*` bullet lists, fenced code blocks and plain paragraphs.
//! Everything else is kept as paragraph text.

pub mod builder;
pub mod code_block;
pub mod error;
pub mod front_matter;
pub mod parser;

pub use error::{FrontMatterError, MarkdownError};
pub use front_matter::read_title;
pub use parser::{markdown_to_nodes, parse_file, parse_str};
