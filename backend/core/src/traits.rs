use async_trait::async_trait;

use crate::error::Result;
use crate::requests::{
    CreateAccount, CreatePage, EditAccountInfo, EditPage, GetAccountInfo, GetPage, GetPageList,
    GetViews, RevokeAccessToken,
};
use crate::types::{Account, Page, PageList, PageViews};

/// Operations offered by the Telegraph API.
///
/// The HTTP client implements this; command handlers only see the trait so
/// they can be exercised against an in-memory implementation.
#[async_trait]
pub trait TelegraphApi: Send + Sync {
    async fn create_account(&self, request: &CreateAccount) -> Result<Account>;

    async fn edit_account_info(&self, request: &EditAccountInfo) -> Result<Account>;

    async fn get_account_info(&self, request: &GetAccountInfo) -> Result<Account>;

    /// Invalidates the current token and returns the account with a new one.
    async fn revoke_access_token(&self, request: &RevokeAccessToken) -> Result<Account>;

    async fn create_page(&self, request: &CreatePage) -> Result<Page>;

    async fn edit_page(&self, request: &EditPage) -> Result<Page>;

    async fn get_page(&self, request: &GetPage) -> Result<Page>;

    async fn get_page_list(&self, request: &GetPageList) -> Result<PageList>;

    async fn get_views(&self, request: &GetViews) -> Result<PageViews>;
}
