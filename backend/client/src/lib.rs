//! Telegraph API client: HTTP transport, retry with backoff, and the
//! `TelegraphApi` implementation used by the CLI.

pub mod client;
pub mod http;
pub mod retry;

pub use client::TelegraphClient;
pub use http::build_http_client;
pub use retry::{retry, RetryPolicy};
