//! Logging setup for telegraphcl.
//!
//! Handles console and rolling-file subscriber setup and access token redaction.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::{mask_token, redact_tokens};
