use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use telegraphcl_core::{
    Account, ApiMethod, CreateAccount, CreatePage, EditAccountInfo, EditPage, GetAccountInfo,
    GetPage, GetPageList, GetViews, Page, PageList, PageViews, Result, RevokeAccessToken,
    TelegraphApi, TelegraphError,
};
use telegraphcl_logging::redact_tokens;

use crate::retry::{retry, RetryPolicy};

pub const DEFAULT_BASE_URL: &str = "https://api.telegra.ph";

/// Longest error body kept in a `Status` error.
const MAX_ERROR_BODY: usize = 512;

/// Telegraph API client.
///
/// Owns the process-wide HTTP client; every call goes through [`retry`].
pub struct TelegraphClient {
    http: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl TelegraphClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn call<M: ApiMethod>(&self, request: &M) -> Result<M::Output> {
        request.validate()?;
        let method = request.method();
        let url = format!("{}/{}", self.base_url, method);
        retry(&self.retry, &method, || self.send_once::<M>(&url, request)).await
    }

    async fn send_once<M: ApiMethod>(&self, url: &str, request: &M) -> Result<M::Output> {
        debug!(url = %url, "Sending request to Telegraph");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| TelegraphError::Transport(Box::new(e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TelegraphError::Transport(Box::new(e)))?;

        debug!(status, bytes = body.len(), "Received Telegraph response");
        decode_response(status, &body)
    }
}

/// Every Telegraph response is wrapped in `{"ok": ..., "result"|"error": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    result: Option<T>,
    error: Option<String>,
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(Envelope { ok: true, result: Some(result), .. }) => Ok(result),
        Ok(Envelope { ok: true, result: None, .. }) => {
            Err(TelegraphError::Decode("response has no result".to_string()))
        }
        Ok(Envelope { ok: false, error, .. }) => Err(TelegraphError::Api(
            error.unwrap_or_else(|| "unknown error".to_string()),
        )),
        Err(_) if !(200..300).contains(&status) => Err(TelegraphError::Status {
            status,
            body: truncate(&redact_tokens(body)),
        }),
        Err(e) => Err(TelegraphError::Decode(e.to_string())),
    }
}

#[async_trait]
impl TelegraphApi for TelegraphClient {
    async fn create_account(&self, request: &CreateAccount) -> Result<Account> {
        self.call(request).await
    }

    async fn edit_account_info(&self, request: &EditAccountInfo) -> Result<Account> {
        self.call(request).await
    }

    async fn get_account_info(&self, request: &GetAccountInfo) -> Result<Account> {
        self.call(request).await
    }

    async fn revoke_access_token(&self, request: &RevokeAccessToken) -> Result<Account> {
        self.call(request).await
    }

    async fn create_page(&self, request: &CreatePage) -> Result<Page> {
        self.call(request).await
    }

    async fn edit_page(&self, request: &EditPage) -> Result<Page> {
        self.call(request).await
    }

    async fn get_page(&self, request: &GetPage) -> Result<Page> {
        self.call(request).await
    }

    async fn get_page_list(&self, request: &GetPageList) -> Result<PageList> {
        self.call(request).await
    }

    async fn get_views(&self, request: &GetViews) -> Result<PageViews> {
        self.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use telegraphcl_core::{Node, Tag, Title};

    #[test]
    fn test_decode_ok() {
        let views: PageViews = decode_response(200, r#"{"ok":true,"result":{"views":7}}"#).unwrap();
        assert_eq!(views.views, 7);
    }

    #[test]
    fn test_decode_api_error() {
        let err = decode_response::<Page>(200, r#"{"ok":false,"error":"PAGE_NOT_FOUND"}"#).unwrap_err();
        assert!(matches!(err, TelegraphError::Api(ref msg) if msg == "PAGE_NOT_FOUND"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_decode_http_error_without_envelope() {
        let err = decode_response::<Page>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, TelegraphError::Status { status: 502, .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn test_decode_garbage_on_success() {
        let err = decode_response::<Page>(200, "not json").unwrap_err();
        assert!(matches!(err, TelegraphError::Decode(_)));
        let err = decode_response::<Page>(200, r#"{"ok":true}"#).unwrap_err();
        assert!(matches!(err, TelegraphError::Decode(_)));
    }

    #[test]
    fn test_error_body_truncated() {
        let body = "x".repeat(2000);
        match decode_response::<Page>(500, &body).unwrap_err() {
            TelegraphError::Status { body, .. } => assert_eq!(body.len(), MAX_ERROR_BODY + 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    async fn create_page_handler(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({
            "ok": true,
            "result": {
                "path": "Test-01-01",
                "url": "https://telegra.ph/Test-01-01",
                "title": body["title"],
                "description": "",
                "views": 0,
                "content": body["content"],
            }
        }))
    }

    async fn flaky_handler(State(hits): State<Arc<AtomicUsize>>) -> Response {
        if hits.fetch_add(1, Ordering::SeqCst) < 2 {
            return (StatusCode::SERVICE_UNAVAILABLE, "try later").into_response();
        }
        Json(json!({ "ok": true, "result": { "views": 3 } })).into_response()
    }

    async fn rejecting_handler(State(hits): State<Arc<AtomicUsize>>) -> Json<Value> {
        hits.fetch_add(1, Ordering::SeqCst);
        Json(json!({ "ok": false, "error": "ACCESS_TOKEN_INVALID" }))
    }

    async fn spawn_server(hits: Arc<AtomicUsize>) -> String {
        let app = Router::new()
            .route("/createPage", post(create_page_handler))
            .route("/getViews/Flaky-01-01", post(flaky_handler))
            .route("/getAccountInfo", post(rejecting_handler))
            .with_state(hits);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: String) -> TelegraphClient {
        let http = crate::http::build_http_client(Duration::from_secs(5), "telegraphcl-test").unwrap();
        TelegraphClient::new(http)
            .with_base_url(base_url)
            .with_retry(RetryPolicy {
                base_delay: Duration::from_millis(1),
                jitter: false,
                ..Default::default()
            })
    }

    #[tokio::test]
    async fn test_create_page_round_trip() {
        let base = spawn_server(Arc::new(AtomicUsize::new(0))).await;
        let content = vec![
            Node::element_with_text(Tag::H3, "Hello"),
            Node::element_with_text(Tag::P, "World"),
        ];
        let page = client(base)
            .create_page(&CreatePage {
                access_token: "token".into(),
                title: Title::new("Hello").unwrap(),
                content: content.clone(),
                author_name: None,
                author_url: None,
                return_content: true,
            })
            .await
            .unwrap();
        assert_eq!(page.title, "Hello");
        assert_eq!(page.content, Some(content));
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_server(hits.clone()).await;
        let views = client(base)
            .get_views(&GetViews { path: "Flaky-01-01".into(), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(views.views, 3);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_api_errors_are_not_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_server(hits.clone()).await;
        let err = client(base)
            .get_account_info(&GetAccountInfo { access_token: "bad".into(), fields: vec![] })
            .await
            .unwrap_err();
        assert!(matches!(err, TelegraphError::Api(ref msg) if msg == "ACCESS_TOKEN_INVALID"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_request_never_sent() {
        let err = client("http://127.0.0.1:9".into())
            .get_page(&GetPage { path: "".into(), return_content: false })
            .await
            .unwrap_err();
        assert!(matches!(err, TelegraphError::InvalidField { field: "path", .. }));
    }
}
