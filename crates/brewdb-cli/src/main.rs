mod browse;
mod commands;
mod output;

use anyhow::Context;
use brewdb_catalog::{BrowserConfig, CatalogBrowser, CatalogRepository};
use brewdb_client::OpenBreweryClient;
use brewdb_core::AppConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub(crate) type Browser = CatalogBrowser<OpenBreweryClient>;

#[derive(Debug, Parser)]
#[command(name = "brewdb-cli")]
#[command(about = "Browse the Open Brewery DB catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print one page of breweries
    List {
        /// Page number; values below 1 load page 1
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
        /// Page size, clamped to 1..=200 (defaults to `BREWDB_PER_PAGE`)
        #[arg(long)]
        per_page: Option<i64>,
    },
    /// Print autocomplete suggestions for a query
    Search {
        /// Text to search for
        query: String,
    },
    /// Print details for one brewery
    Show {
        /// Brewery id
        id: String,
    },
    /// Page and search interactively, one command per stdin line
    Browse,
}

/// Wires config, HTTP client, repository and browser together.
///
/// # Errors
///
/// Returns an error if the API client cannot be built from `config`.
fn build_browser(config: &AppConfig) -> anyhow::Result<Browser> {
    let client = OpenBreweryClient::from_config(config).context("failed to build API client")?;
    Ok(CatalogBrowser::new(
        CatalogRepository::new(client),
        BrowserConfig::from_app_config(config),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = brewdb_core::load_app_config().context("failed to load configuration")?;
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("brewdb-cli ready; try `list`, `search <QUERY>`, `show <ID>` or `browse`");
        return Ok(());
    };

    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "starting");
    let mut browser = build_browser(&config)?;

    match command {
        Commands::List { page, per_page } => {
            let per_page = per_page.unwrap_or_else(|| i64::from(config.per_page));
            commands::run_list(&browser, page, per_page).await
        }
        Commands::Search { query } => commands::run_search(&mut browser, &query).await,
        Commands::Show { id } => commands::run_show(&mut browser, &id).await,
        Commands::Browse => browse::run_browse(&mut browser).await,
    }
}
