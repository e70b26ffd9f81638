//! CLI Page Subcommands
//!
//! Publishing, editing, and inspecting Telegraph pages.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::{debug, info, warn};

use telegraphcl_config::TokenStore;
use telegraphcl_core::{
    AccountField, AuthorName, AuthorUrl, CreatePage, EditPage, GetAccountInfo, GetPage,
    GetPageList, GetViews, Node, Page, Tag, TelegraphApi, Title,
};
use telegraphcl_logging::mask_token;
use telegraphcl_markdown::{parse_file, read_title};

use crate::terminal_output::{field, note_success};

const DELETED_TITLE: &str = "Deleted";
const DELETED_TEXT: &str = "[deleted]";

#[derive(Subcommand)]
pub enum PageCommands {
    /// Create a page from a Markdown file
    Create {
        /// Markdown file to publish
        markdown_path: PathBuf,
        /// Page title, read from the front matter when omitted
        title: Option<String>,
    },
    /// List the pages of the current account
    List {
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },
    /// Show a page
    Get { path: String },
    /// Replace the content of a page with a Markdown file
    Edit {
        path: String,
        markdown_path: PathBuf,
        /// New title, keeps the current one when omitted
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Delete a page by overwriting its title and content
    Delete { path: String },
    /// Count views on a page; 0 leaves a field unfiltered
    Views {
        path: String,
        #[arg(short, long, default_value_t = 0)]
        year: u16,
        #[arg(short, long, default_value_t = 0)]
        month: u8,
        #[arg(short, long, default_value_t = 0)]
        day: u8,
        #[arg(short = 'H', long, default_value_t = 0)]
        hour: u8,
    },
}

pub async fn run(
    cmd: PageCommands,
    api: &dyn TelegraphApi,
    tokens: &TokenStore,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        PageCommands::Create { markdown_path, title } => {
            create(api, tokens, out, &markdown_path, title).await
        }
        PageCommands::List { limit, offset } => list(api, tokens, out, limit, offset).await,
        PageCommands::Get { path } => get(api, out, path).await,
        PageCommands::Edit { path, markdown_path, title } => {
            edit(api, tokens, out, path, &markdown_path, title).await
        }
        PageCommands::Delete { path } => delete(api, tokens, out, path).await,
        PageCommands::Views { path, year, month, day, hour } => {
            let request = GetViews {
                path,
                year: non_zero(year),
                month: non_zero(month),
                day: non_zero(day),
                hour: non_zero(hour),
            };
            views(api, out, request).await
        }
    }
}

fn non_zero<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

async fn load_token(tokens: &TokenStore) -> Result<String> {
    tokens.load().await.context("Failed to get token")
}

async fn create(
    api: &dyn TelegraphApi,
    tokens: &TokenStore,
    out: &mut dyn Write,
    markdown_path: &Path,
    title: Option<String>,
) -> Result<()> {
    let access_token = load_token(tokens).await?;
    let title = match title {
        Some(title) => title,
        None => title_from_front_matter(markdown_path).await?,
    };
    let title = Title::new(title)?;

    debug!(path = %markdown_path.display(), "Parsing markdown file");
    let content = parse_file(markdown_path).await?;
    debug!(nodes = content.len(), "Parsed markdown file");

    let (author_name, author_url) = author_details(api, &access_token).await;

    debug!(title = %title, token = %mask_token(&access_token), "Creating page");
    let page = api
        .create_page(&CreatePage {
            access_token,
            title,
            content,
            author_name,
            author_url,
            return_content: false,
        })
        .await
        .context("Failed to create page")?;

    info!(path = %page.path, "Page created");
    note_success(out, "Page created successfully!")?;
    print_page_location(out, &page)
}

async fn title_from_front_matter(markdown_path: &Path) -> Result<String> {
    let raw = tokio::fs::read(markdown_path)
        .await
        .with_context(|| format!("Failed to read markdown file: {}", markdown_path.display()))?;
    read_title(&String::from_utf8_lossy(&raw)).with_context(|| {
        format!(
            "No title given and none found in the front matter of {}",
            markdown_path.display()
        )
    })
}

/// Author details for a new page. A failed lookup only drops them.
async fn author_details(
    api: &dyn TelegraphApi,
    access_token: &str,
) -> (Option<AuthorName>, Option<AuthorUrl>) {
    let request = GetAccountInfo {
        access_token: access_token.to_string(),
        fields: vec![AccountField::AuthorName, AccountField::AuthorUrl],
    };
    let account = match api.get_account_info(&request).await {
        Ok(account) => account,
        Err(e) => {
            warn!(error = %e, "Failed to get account info; page will be created without author info");
            return (None, None);
        }
    };

    let author_name = match AuthorName::new(account.author_name) {
        Ok(name) if !name.as_str().is_empty() => Some(name),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "Ignoring invalid author name");
            None
        }
    };
    let author_url = match AuthorUrl::new(account.author_url) {
        Ok(url) if !url.as_str().is_empty() => Some(url),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "Ignoring invalid author URL");
            None
        }
    };
    debug!(?author_name, ?author_url, "Fetched author details");
    (author_name, author_url)
}

async fn list(
    api: &dyn TelegraphApi,
    tokens: &TokenStore,
    out: &mut dyn Write,
    limit: u32,
    offset: u32,
) -> Result<()> {
    let access_token = load_token(tokens).await?;
    let list = api
        .get_page_list(&GetPageList { access_token, offset, limit })
        .await
        .context("Failed to get page list")?;

    field(out, "Total pages", list.total_count)?;
    writeln!(out, "Pages:")?;
    for (i, page) in list.pages.iter().enumerate() {
        writeln!(out, "{}. {} ({})", offset as usize + i + 1, page.title, page.url)?;
    }
    Ok(())
}

async fn get(api: &dyn TelegraphApi, out: &mut dyn Write, path: String) -> Result<()> {
    let page = api
        .get_page(&GetPage { path, return_content: false })
        .await
        .context("Failed to get page")?;

    field(out, "Title", &page.title)?;
    field(out, "Author", page.author_name.as_deref().unwrap_or_default())?;
    field(out, "URL", &page.url)?;
    field(out, "Views", page.views)?;
    Ok(())
}

async fn edit(
    api: &dyn TelegraphApi,
    tokens: &TokenStore,
    out: &mut dyn Write,
    path: String,
    markdown_path: &Path,
    title: Option<String>,
) -> Result<()> {
    let access_token = load_token(tokens).await?;
    let content = parse_file(markdown_path).await?;

    let title = match title {
        Some(title) => title,
        None => match title_from_front_matter(markdown_path).await {
            Ok(title) => title,
            Err(e) => {
                debug!(error = %e, "Keeping the current page title");
                api.get_page(&GetPage { path: path.clone(), return_content: false })
                    .await
                    .context("Failed to get current page")?
                    .title
            }
        },
    };
    let title = Title::new(title)?;

    let page = api
        .edit_page(&EditPage {
            path,
            access_token,
            title,
            content,
            author_name: None,
            author_url: None,
            return_content: false,
        })
        .await
        .context("Failed to edit page")?;

    info!(path = %page.path, "Page edited");
    note_success(out, "Page edited successfully!")?;
    print_page_location(out, &page)
}

/// Content left behind on a deleted page.
fn deleted_content() -> Vec<Node> {
    vec![Node::element_with_text(Tag::P, DELETED_TEXT)]
}

async fn delete(
    api: &dyn TelegraphApi,
    tokens: &TokenStore,
    out: &mut dyn Write,
    path: String,
) -> Result<()> {
    let access_token = load_token(tokens).await?;
    debug!(path = %path, "Deleting page");

    api.edit_page(&EditPage {
        path: path.clone(),
        access_token,
        title: Title::new(DELETED_TITLE)?,
        content: deleted_content(),
        author_name: Some(AuthorName::new("")?),
        author_url: Some(AuthorUrl::new("")?),
        return_content: false,
    })
    .await
    .with_context(|| format!("Failed to delete page at path '{path}'"))?;

    info!(path = %path, "Page deleted");
    note_success(out, &format!("Page at path '{path}' has been deleted (content cleared)."))?;
    Ok(())
}

async fn views(api: &dyn TelegraphApi, out: &mut dyn Write, request: GetViews) -> Result<()> {
    let views = api
        .get_views(&request)
        .await
        .context("Failed to get page views")?;
    field(out, "Views", views.views)?;
    Ok(())
}

fn print_page_location(out: &mut dyn Write, page: &Page) -> Result<()> {
    field(out, "Title", &page.title)?;
    field(out, "URL", &page.url)?;
    field(out, "Path", &page.path)?;
    Ok(())
}
