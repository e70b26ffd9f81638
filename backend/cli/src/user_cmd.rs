//! CLI User Subcommands
//!
//! Account management. Reads answers from `input` so prompts can be scripted.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use telegraphcl_config::TokenStore;
use telegraphcl_core::{
    AccountField, AuthorName, CreateAccount, EditAccountInfo, GetAccountInfo, RevokeAccessToken,
    ShortName, TelegraphApi,
};

use crate::terminal_output::{field, note_success, prompt};

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a Telegraph account and save its access token
    Create,
    /// Change the short name or author name of the account
    Edit,
    /// Revoke the access token and save a new one
    Revoke,
    /// Show account information
    View,
}

pub async fn run(
    cmd: UserCommands,
    api: &dyn TelegraphApi,
    tokens: &TokenStore,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    match cmd {
        UserCommands::Create => create(api, tokens, input, out).await,
        UserCommands::Edit => edit(api, tokens, input, out).await,
        UserCommands::Revoke => revoke(api, tokens, out).await,
        UserCommands::View => view(api, tokens, out).await,
    }
}

fn optional_author(name: &str) -> Result<Option<AuthorName>> {
    if name.is_empty() {
        return Ok(None);
    }
    Ok(Some(AuthorName::new(name)?))
}

async fn create(
    api: &dyn TelegraphApi,
    tokens: &TokenStore,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let short_name = prompt(input, out, "Enter short name")?;
    let author_name = prompt(input, out, "Enter author name")?;

    let request = CreateAccount {
        short_name: ShortName::new(short_name.trim())?,
        author_name: optional_author(author_name.trim())?,
        author_url: None,
    };
    let account = api
        .create_account(&request)
        .await
        .context("Failed to create account")?;

    let access_token = account
        .access_token
        .as_deref()
        .context("Telegraph returned no access token for the new account")?;
    tokens.save(access_token).await.context("Failed to save token")?;
    info!(short_name = %account.short_name, "Account created");

    note_success(out, "Account created successfully!")?;
    field(out, "Short Name", &account.short_name)?;
    field(out, "Author Name", &account.author_name)?;
    field(out, "Access Token", access_token)?;
    Ok(())
}

async fn edit(
    api: &dyn TelegraphApi,
    tokens: &TokenStore,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let access_token = tokens.load().await.context("Failed to get token")?;
    let current = api
        .get_account_info(&GetAccountInfo {
            access_token: access_token.clone(),
            fields: vec![AccountField::ShortName, AccountField::AuthorName],
        })
        .await
        .context("Failed to get account info")?;

    field(out, "Current Short Name", &current.short_name)?;
    field(out, "Current Author Name", &current.author_name)?;

    let short_name = prompt(input, out, "Enter new short name (leave blank to keep current)")?;
    let author_name = prompt(input, out, "Enter new author name (leave blank to keep current)")?;

    // Blank answers resend the current values.
    let short_name = match short_name.trim() {
        "" => current.short_name,
        name => name.to_string(),
    };
    let author_name = match author_name.trim() {
        "" => current.author_name,
        name => name.to_string(),
    };

    let updated = api
        .edit_account_info(&EditAccountInfo {
            access_token,
            short_name: Some(ShortName::new(short_name)?),
            author_name: Some(AuthorName::new(author_name)?),
            author_url: None,
        })
        .await
        .context("Failed to edit account info")?;
    info!(short_name = %updated.short_name, "Account updated");

    note_success(out, "Account updated successfully!")?;
    field(out, "Short Name", &updated.short_name)?;
    field(out, "Author Name", &updated.author_name)?;
    Ok(())
}

async fn revoke(api: &dyn TelegraphApi, tokens: &TokenStore, out: &mut dyn Write) -> Result<()> {
    let access_token = tokens.load().await.context("Failed to get token")?;
    let account = api
        .revoke_access_token(&RevokeAccessToken { access_token })
        .await
        .context("Failed to revoke access token")?;

    let new_token = account
        .access_token
        .as_deref()
        .context("Telegraph returned no replacement access token")?;
    tokens.save(new_token).await.context("Failed to save new token")?;
    info!("Access token revoked");

    note_success(out, "Access token revoked and new token generated successfully!")?;
    field(out, "New Access Token", new_token)?;
    field(out, "New Auth URL", account.auth_url.as_deref().unwrap_or_default())?;
    Ok(())
}

async fn view(api: &dyn TelegraphApi, tokens: &TokenStore, out: &mut dyn Write) -> Result<()> {
    let access_token = tokens.load().await.context("Failed to get token")?;
    let account = api
        .get_account_info(&GetAccountInfo {
            access_token,
            fields: vec![
                AccountField::ShortName,
                AccountField::AuthorName,
                AccountField::AuthorUrl,
                AccountField::AuthUrl,
                AccountField::PageCount,
            ],
        })
        .await
        .context("Failed to get account info")?;

    writeln!(out, "Account Information:")?;
    field(out, "Short Name", &account.short_name)?;
    field(out, "Author Name", &account.author_name)?;
    field(out, "Page Count", account.page_count.unwrap_or_default())?;
    field(out, "Auth URL", account.auth_url.as_deref().unwrap_or_default())?;
    Ok(())
}
