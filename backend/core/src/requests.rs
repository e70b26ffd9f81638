//! Request bodies for the Telegraph API methods.
//!
//! Each request knows its method name and response type. Requests that address
//! a page carry the path in the URL, not in the JSON body.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, TelegraphError};
use crate::node::Node;
use crate::types::{
    Account, AccountField, AuthorName, AuthorUrl, Page, PageList, PageViews, ShortName, Title,
};

/// A Telegraph API method invocation.
pub trait ApiMethod: Serialize + Send + Sync {
    type Output: DeserializeOwned + Send;

    /// Method name, including the path segment where the method takes one.
    fn method(&self) -> Cow<'_, str>;

    /// Checks that cannot be expressed by the field types alone.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

fn check_path(path: &str) -> Result<()> {
    if path.is_empty() || path.contains('/') {
        return Err(TelegraphError::invalid(
            "path",
            format!("'{path}' is not a page path"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAccount {
    pub short_name: ShortName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<AuthorName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<AuthorUrl>,
}

impl ApiMethod for CreateAccount {
    type Output = Account;

    fn method(&self) -> Cow<'_, str> {
        Cow::Borrowed("createAccount")
    }
}

/// Only the fields that are `Some` are changed.
#[derive(Debug, Clone, Serialize)]
pub struct EditAccountInfo {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<ShortName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<AuthorName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<AuthorUrl>,
}

impl ApiMethod for EditAccountInfo {
    type Output = Account;

    fn method(&self) -> Cow<'_, str> {
        Cow::Borrowed("editAccountInfo")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAccountInfo {
    pub access_token: String,
    pub fields: Vec<AccountField>,
}

impl ApiMethod for GetAccountInfo {
    type Output = Account;

    fn method(&self) -> Cow<'_, str> {
        Cow::Borrowed("getAccountInfo")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RevokeAccessToken {
    pub access_token: String,
}

impl ApiMethod for RevokeAccessToken {
    type Output = Account;

    fn method(&self) -> Cow<'_, str> {
        Cow::Borrowed("revokeAccessToken")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePage {
    pub access_token: String,
    pub title: Title,
    pub content: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<AuthorName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<AuthorUrl>,
    pub return_content: bool,
}

impl ApiMethod for CreatePage {
    type Output = Page;

    fn method(&self) -> Cow<'_, str> {
        Cow::Borrowed("createPage")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EditPage {
    #[serde(skip)]
    pub path: String,
    pub access_token: String,
    pub title: Title,
    pub content: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<AuthorName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<AuthorUrl>,
    pub return_content: bool,
}

impl ApiMethod for EditPage {
    type Output = Page;

    fn method(&self) -> Cow<'_, str> {
        Cow::Owned(format!("editPage/{}", self.path))
    }

    fn validate(&self) -> Result<()> {
        check_path(&self.path)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetPage {
    #[serde(skip)]
    pub path: String,
    pub return_content: bool,
}

impl ApiMethod for GetPage {
    type Output = Page;

    fn method(&self) -> Cow<'_, str> {
        Cow::Owned(format!("getPage/{}", self.path))
    }

    fn validate(&self) -> Result<()> {
        check_path(&self.path)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetPageList {
    pub access_token: String,
    pub offset: u32,
    pub limit: u32,
}

impl GetPageList {
    pub const MAX_LIMIT: u32 = 200;
}

impl ApiMethod for GetPageList {
    type Output = PageList;

    fn method(&self) -> Cow<'_, str> {
        Cow::Borrowed("getPageList")
    }

    fn validate(&self) -> Result<()> {
        if self.limit > Self::MAX_LIMIT {
            return Err(TelegraphError::invalid(
                "limit",
                format!("must be between 0 and {}, got {}", Self::MAX_LIMIT, self.limit),
            ));
        }
        Ok(())
    }
}

/// View counts for a page, optionally narrowed to a year, month, day or hour.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetViews {
    #[serde(skip)]
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
}

impl ApiMethod for GetViews {
    type Output = PageViews;

    fn method(&self) -> Cow<'_, str> {
        Cow::Owned(format!("getViews/{}", self.path))
    }

    fn validate(&self) -> Result<()> {
        check_path(&self.path)?;
        if let Some(year) = self.year {
            if !(2000..=2100).contains(&year) {
                return Err(TelegraphError::invalid("year", "must be between 2000 and 2100"));
            }
        }
        match self.month {
            Some(month) if !(1..=12).contains(&month) => {
                return Err(TelegraphError::invalid("month", "must be between 1 and 12"));
            }
            Some(_) if self.year.is_none() => {
                return Err(TelegraphError::invalid("month", "requires a year"));
            }
            _ => {}
        }
        match self.day {
            Some(day) if !(1..=31).contains(&day) => {
                return Err(TelegraphError::invalid("day", "must be between 1 and 31"));
            }
            Some(_) if self.month.is_none() => {
                return Err(TelegraphError::invalid("day", "requires a month"));
            }
            _ => {}
        }
        match self.hour {
            Some(hour) if hour > 24 => {
                return Err(TelegraphError::invalid("hour", "must be between 0 and 24"));
            }
            Some(_) if self.day.is_none() => {
                return Err(TelegraphError::invalid("hour", "requires a day"));
            }
            _ => {}
        }
        Ok(())
    }
}
