use std::time::Duration;

use reqwest::Client;
use telegraphcl_core::TelegraphError;

/// Idle pooled connections kept per host.
const MAX_IDLE_PER_HOST: usize = 10;

/// How long an idle pooled connection is kept open.
const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by every API call of a process.
pub fn build_http_client(timeout: Duration, user_agent: &str) -> Result<Client, TelegraphError> {
    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(IDLE_TIMEOUT)
        .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
        .user_agent(user_agent)
        .build()
        .map_err(|e| TelegraphError::Transport(Box::new(e)))
}
