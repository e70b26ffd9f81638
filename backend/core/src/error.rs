use thiserror::Error;

/// Top-level error type for Telegraph content and API operations.
#[derive(Debug, Error)]
pub enum TelegraphError {
    #[error("unsupported tag: {0}")]
    UnsupportedTag(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("telegraph API error: {0}")]
    Api(String),

    #[error("telegraph returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl TelegraphError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            TelegraphError::Transport(_) => true,
            TelegraphError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TelegraphError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = TelegraphError> = std::result::Result<T, E>;
