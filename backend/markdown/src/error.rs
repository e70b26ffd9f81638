use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce content nodes for a file.
#[derive(Debug, Error)]
pub enum MarkdownError {
    #[error("failed to read markdown file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to read the title out of a front-matter block.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("no front matter found")]
    Missing,

    #[error("invalid front matter format: missing closing '---' line")]
    Unterminated,

    #[error("failed to parse front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no title found in front matter")]
    NoTitle,
}
