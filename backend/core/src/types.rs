use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TelegraphError};
use crate::node::Node;

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min {
        return Err(TelegraphError::invalid(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(TelegraphError::invalid(
            field,
            format!("must be at most {max} characters, got {len}"),
        ));
    }
    Ok(())
}

/// Account name shown to the user only, 1-32 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShortName(String);

impl ShortName {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_length("short name", &value, 1, 32)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Default author name for new pages, 0-128 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_length("author name", &value, 0, 128)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Profile link opened when the author name is clicked, 0-512 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthorUrl(String);

impl AuthorUrl {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_length("author URL", &value, 0, 512)?;
        if !value.is_empty() {
            let parsed = url::Url::parse(&value)
                .map_err(|e| TelegraphError::invalid("author URL", e.to_string()))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(TelegraphError::invalid(
                    "author URL",
                    format!("unsupported scheme '{}'", parsed.scheme()),
                ));
            }
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Page title, 1-256 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check_length("title", &value, 1, 256)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        })*
    };
}

impl_display!(ShortName, AuthorName, AuthorUrl, Title);

/// A Telegraph account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_url: String,
    /// Only returned by `createAccount` and `revokeAccessToken`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

/// Fields that can be requested from `getAccountInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountField {
    ShortName,
    AuthorName,
    AuthorUrl,
    AuthUrl,
    PageCount,
}

/// A Telegraph page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub path: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
    #[serde(default)]
    pub views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
}

/// A page of results from `getPageList`, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageList {
    pub total_count: u64,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViews {
    pub views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lengths() {
        assert!(ShortName::new("").is_err());
        assert!(ShortName::new("a".repeat(32)).is_ok());
        assert!(ShortName::new("a".repeat(33)).is_err());
        assert!(AuthorName::new("").is_ok());
        assert!(Title::new("").is_err());
        assert!(Title::new("Привет").is_ok());
        // Limits count characters, not bytes.
        assert!(Title::new("é".repeat(256)).is_ok());
    }

    #[test]
    fn test_author_url_validation() {
        assert!(AuthorUrl::new("").is_ok());
        assert!(AuthorUrl::new("https://t.me/someone").is_ok());
        assert!(AuthorUrl::new("not a url").is_err());
        let err = AuthorUrl::new("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_page_deserialize_without_content() {
        let page: Page = serde_json::from_value(serde_json::json!({
            "path": "Sample-Page-12-15",
            "url": "https://telegra.ph/Sample-Page-12-15",
            "title": "Sample Page",
            "description": "Hello, world!",
            "author_name": "Anonymous",
            "views": 42,
            "can_edit": true
        }))
        .unwrap();
        assert_eq!(page.views, 42);
        assert!(page.content.is_none());
        assert_eq!(page.author_name.as_deref(), Some("Anonymous"));
    }

    #[test]
    fn test_account_field_names() {
        let fields = vec![AccountField::AuthorUrl, AccountField::PageCount];
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            serde_json::json!(["author_url", "page_count"])
        );
    }
}
