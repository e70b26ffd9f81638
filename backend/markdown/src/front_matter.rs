//! Leading `---` metadata blocks.
//!
//! A front-matter block is only recognised when the file starts with the
//! exact line `---` and a later line is exactly `---` again. Anything else is
//! treated as document body.

use serde::Deserialize;

use crate::error::FrontMatterError;

const MARKER: &str = "---\n";

/// Split `content` into the raw front-matter text and the body after it.
///
/// Returns `None` if there is no opening marker or no closing marker line.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix(MARKER)?;
    let close = rest
        .match_indices(MARKER)
        .map(|(idx, _)| idx)
        .find(|&idx| idx == 0 || rest[..idx].ends_with('\n'))?;
    Some((&rest[..close], &rest[close + MARKER.len()..]))
}

/// Remove a well-formed front-matter block, or return `content` unchanged.
pub fn strip(content: &str) -> &str {
    split(content).map_or(content, |(_, body)| body)
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    title: Option<String>,
}

/// Read the `title` key from the front-matter block.
pub fn read_title(content: &str) -> Result<String, FrontMatterError> {
    if !content.starts_with(MARKER) {
        return Err(FrontMatterError::Missing);
    }
    let (yaml, _) = split(content).ok_or(FrontMatterError::Unterminated)?;

    // An empty block is valid YAML for "no keys".
    let front: FrontMatter = if yaml.trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    match front.title.map(|t| t.trim().to_string()) {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(FrontMatterError::NoTitle),
    }
}
