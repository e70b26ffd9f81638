//! Telegraph content model, API types, and the client trait shared by the
//! telegraphcl crates.

pub mod error;
pub mod node;
pub mod requests;
pub mod traits;
pub mod types;

pub use error::{Result, TelegraphError};
pub use node::{Node, NodeAttrs, NodeElement, Tag};
pub use requests::{
    ApiMethod, CreateAccount, CreatePage, EditAccountInfo, EditPage, GetAccountInfo, GetPage,
    GetPageList, GetViews, RevokeAccessToken,
};
pub use traits::TelegraphApi;
pub use types::{
    Account, AccountField, AuthorName, AuthorUrl, Page, PageList, PageViews, ShortName, Title,
};
