//! Access token redaction.
//!
//! Scrubs Telegraph access tokens from strings prior to logging or printing.

use regex::Regex;
use std::sync::LazyLock;

static ACCESS_TOKEN_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(access_token"?\s*[:=]\s*"?)[^\s"&,}]+"#).unwrap()
});
static RAW_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[0-9a-f]{60}\b").unwrap());

/// Number of leading characters kept by [`mask_token`].
const VISIBLE_PREFIX: usize = 10;

/// Redacts access tokens in a string, both as `access_token` parameters and bare.
pub fn redact_tokens(input: &str) -> String {
    let redacted = ACCESS_TOKEN_PARAM_RE.replace_all(input, "${1}[REDACTED_TOKEN]");
    RAW_TOKEN_RE
        .replace_all(&redacted, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Shortens a token for display, keeping only a recognisable prefix.
pub fn mask_token(token: &str) -> String {
    match token.char_indices().nth(VISIBLE_PREFIX) {
        Some((idx, _)) => format!("{}...", &token[..idx]),
        None => "...".to_string(),
    }
}
