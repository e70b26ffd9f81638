//! In-memory `TelegraphApi` used by the command tests.

use std::sync::Mutex;

use async_trait::async_trait;
use telegraphcl_core::{
    Account, CreateAccount, CreatePage, EditAccountInfo, EditPage, GetAccountInfo, GetPage,
    GetPageList, GetViews, Page, PageList, PageViews, Result, RevokeAccessToken, TelegraphApi,
    TelegraphError,
};

/// Returns canned responses and records every request it receives.
#[derive(Default)]
pub struct MockApi {
    /// `None` makes `getAccountInfo` fail.
    pub account: Option<Account>,
    pub page: Page,
    pub page_list: PageList,
    pub views: u64,
    pub created_accounts: Mutex<Vec<CreateAccount>>,
    pub account_edits: Mutex<Vec<EditAccountInfo>>,
    pub created_pages: Mutex<Vec<CreatePage>>,
    pub edited_pages: Mutex<Vec<EditPage>>,
    pub fetched_pages: Mutex<Vec<GetPage>>,
    pub list_requests: Mutex<Vec<GetPageList>>,
    pub view_requests: Mutex<Vec<GetViews>>,
}

impl MockApi {
    pub fn with_account(account: Account) -> Self {
        Self {
            account: Some(account),
            ..Default::default()
        }
    }

    fn page_titled(&self, title: &str) -> Page {
        Page {
            title: title.to_string(),
            ..self.page.clone()
        }
    }
}

fn no_account() -> TelegraphError {
    TelegraphError::Api("ACCESS_TOKEN_INVALID".to_string())
}

#[async_trait]
impl TelegraphApi for MockApi {
    async fn create_account(&self, request: &CreateAccount) -> Result<Account> {
        self.created_accounts.lock().unwrap().push(request.clone());
        Ok(Account {
            short_name: request.short_name.to_string(),
            author_name: request
                .author_name
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            access_token: Some("fresh-token".to_string()),
            ..Default::default()
        })
    }

    async fn edit_account_info(&self, request: &EditAccountInfo) -> Result<Account> {
        self.account_edits.lock().unwrap().push(request.clone());
        let current = self.account.clone().ok_or_else(no_account)?;
        Ok(Account {
            short_name: request
                .short_name
                .as_ref()
                .map_or(current.short_name, ToString::to_string),
            author_name: request
                .author_name
                .as_ref()
                .map_or(current.author_name, ToString::to_string),
            ..Default::default()
        })
    }

    async fn get_account_info(&self, _request: &GetAccountInfo) -> Result<Account> {
        self.account.clone().ok_or_else(no_account)
    }

    async fn revoke_access_token(&self, _request: &RevokeAccessToken) -> Result<Account> {
        let current = self.account.clone().ok_or_else(no_account)?;
        Ok(Account {
            access_token: Some("revoked-new-token".to_string()),
            auth_url: Some("https://edit.telegra.ph/auth/abc".to_string()),
            ..current
        })
    }

    async fn create_page(&self, request: &CreatePage) -> Result<Page> {
        self.created_pages.lock().unwrap().push(request.clone());
        Ok(self.page_titled(request.title.as_str()))
    }

    async fn edit_page(&self, request: &EditPage) -> Result<Page> {
        self.edited_pages.lock().unwrap().push(request.clone());
        Ok(self.page_titled(request.title.as_str()))
    }

    async fn get_page(&self, request: &GetPage) -> Result<Page> {
        self.fetched_pages.lock().unwrap().push(request.clone());
        Ok(self.page.clone())
    }

    async fn get_page_list(&self, request: &GetPageList) -> Result<PageList> {
        self.list_requests.lock().unwrap().push(request.clone());
        Ok(self.page_list.clone())
    }

    async fn get_views(&self, request: &GetViews) -> Result<PageViews> {
        self.view_requests.lock().unwrap().push(request.clone());
        Ok(PageViews { views: self.views })
    }
}
