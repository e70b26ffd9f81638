mod page_cmd;
mod terminal_output;
mod user_cmd;

#[cfg(test)]
mod mock;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use telegraphcl_client::{build_http_client, RetryPolicy, TelegraphClient};
use telegraphcl_config::{config_dir, load_settings, Settings, TokenStore};
use telegraphcl_logging::init_logger;

use page_cmd::PageCommands;
use user_cmd::UserCommands;

#[derive(Parser)]
#[command(name = "telegraphcl")]
#[command(about = "Publish Markdown files to Telegra.ph")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the Telegraph account
    #[command(subcommand)]
    User(UserCommands),
    /// Create and manage pages
    #[command(subcommand)]
    Page(PageCommands),
    /// Print the telegraphcl version
    Version,
}

/// Everything a command needs to talk to Telegraph.
struct App {
    client: TelegraphClient,
    tokens: TokenStore,
}

impl App {
    async fn init(verbose: bool) -> Result<Self> {
        let settings = load_settings(&config_dir()).await?;

        let level = if verbose { "debug" } else { settings.log_level.as_str() };
        init_logger(level, settings.log_dir.as_deref());
        debug!(config_dir = %settings.config_dir.display(), "Starting telegraphcl");

        let http = build_http_client(settings.timeout, &settings.user_agent)
            .context("Failed to build HTTP client")?;
        let client = TelegraphClient::new(http)
            .with_base_url(settings.api_url.clone())
            .with_retry(retry_policy(&settings));

        Ok(Self {
            client,
            tokens: TokenStore::in_dir(&settings.config_dir),
        })
    }
}

fn retry_policy(settings: &Settings) -> RetryPolicy {
    let retry = &settings.retry;
    RetryPolicy {
        max_attempts: retry.max_attempts,
        base_delay: retry.base_delay,
        backoff_factor: retry.backoff_factor,
        max_delay: retry.max_delay,
        max_elapsed: retry.max_elapsed,
        jitter: true,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Version => {
            println!("telegraphcl version {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::User(cmd) => {
            let app = App::init(cli.verbose).await?;
            let mut stdin = std::io::stdin().lock();
            user_cmd::run(cmd, &app.client, &app.tokens, &mut stdin, &mut stdout).await?;
        }
        Commands::Page(cmd) => {
            let app = App::init(cli.verbose).await?;
            page_cmd::run(cmd, &app.client, &app.tokens, &mut stdout).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;
    use std::time::Duration;
    use telegraphcl_config::TelegraphConfig;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_page_views_flags() {
        let cli = Cli::parse_from(["telegraphcl", "page", "views", "Hello-10-14", "-y", "2026", "-H", "5", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Page(PageCommands::Views { path, year, month, hour, .. }) => {
                assert_eq!(path, "Hello-10-14");
                assert_eq!(year, 2026);
                assert_eq!(month, 0);
                assert_eq!(hour, 5);
            }
            _ => panic!("expected page views"),
        }
    }

    #[test]
    fn test_parse_page_list_defaults() {
        let cli = Cli::parse_from(["telegraphcl", "page", "list"]);
        assert!(matches!(
            cli.command,
            Commands::Page(PageCommands::List { limit: 10, offset: 0 })
        ));
    }

    #[test]
    fn test_retry_policy_from_settings() {
        let settings = Settings::resolve(&TelegraphConfig::default(), PathBuf::from("/tmp/t"));
        let policy = retry_policy(&settings);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.max_elapsed, Duration::from_secs(60));
    }
}
