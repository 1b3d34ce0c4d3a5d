//! moviedb - TMDB movie search and discovery CLI.

/// Application configuration (TOML).
mod config;
/// Text rendering of results and failures.
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TmdbConfig, resolve_config_path};
use moviedb_api::tmdb::{
    ApiResult, LocalTmdbApi, MovieSummary, SearchQuery, TmdbClient, TmdbError,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies by title.
    Search(SearchArgs),
    /// List popular movies.
    Popular(PageArgs),
    /// List top rated movies.
    TopRated(PageArgs),
    /// Show movie details with cast, trailer and similar movies.
    Details(DetailsArgs),
    /// Write a config file template.
    Init(InitArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search text (e.g. "The Matrix").
    #[arg(long)]
    query: String,
    /// Result page (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the listing subcommands.
#[derive(clap::Args)]
struct PageArgs {
    /// Result page (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// TMDB movie ID.
    #[arg(long)]
    id: u64,
}

/// Arguments for the `init` subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// v3 API key to store.
    #[arg(long)]
    api_key: Option<String>,
    /// Response language.
    #[arg(long, default_value = "en-US")]
    language: String,
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

/// Builds a `TmdbClient` from config, with the credential resolved once.
///
/// A missing credential is not an error here; the client reports it on
/// the first operation.
///
/// # Errors
///
/// Returns an error if the base URL override is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &TmdbConfig) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder()
        .language(&config.language)
        .search_timeout(Duration::from_millis(config.search_timeout_ms))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

    if let Some(ms) = config.listing_timeout_ms {
        builder = builder.listing_timeout(Duration::from_millis(ms));
    }
    if let Some(base_url) = config.normalized_base_url() {
        let url = Url::parse(&base_url)
            .with_context(|| format!("invalid tmdb.base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(credential) = config.credential_with(|name| std::env::var(name).ok()) {
        builder = builder.credential(credential);
    }

    builder.build().context("failed to build TMDB client")
}

/// Logs the user-facing text for a failure and wraps it for `main`.
fn report_failure(error: TmdbError) -> anyhow::Error {
    let text = render::describe_failure(&error);
    tracing::error!("{text}");
    anyhow::Error::new(error).context(text)
}

/// Logs one page of results.
fn print_results(results: &ApiResult<MovieSummary>) {
    if results.is_empty() {
        tracing::info!("No results. Try a different search term.");
        return;
    }

    tracing::info!(
        "Page {}/{} ({} results)",
        results.page,
        results.total_pages,
        results.total_results
    );
    for movie in &results.results {
        tracing::info!("{}", render::summary_line(movie));
        tracing::info!("{}", render::overview_line(movie));
    }
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config: &TmdbConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let results = client
        .search_movies(&SearchQuery::new(&args.query).page(args.page))
        .await
        .map_err(report_failure)?;

    print_results(&results);
    Ok(())
}

/// Runs the `popular` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_popular(args: &PageArgs, config: &TmdbConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let results = client
        .list_popular_movies(args.page)
        .await
        .map_err(report_failure)?;

    print_results(&results);
    Ok(())
}

/// Runs the `top-rated` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_top_rated(args: &PageArgs, config: &TmdbConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let results = client
        .list_top_rated(args.page)
        .await
        .map_err(report_failure)?;

    print_results(&results);
    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, config: &TmdbConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let details = client
        .movie_details(args.id)
        .await
        .map_err(report_failure)?;

    for line in render::details_lines(&details) {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Runs the `init` subcommand.
///
/// # Errors
///
/// Returns an error if the config exists (without `--force`) or cannot be written.
fn run_init(args: &InitArgs, path: &std::path::Path) -> Result<()> {
    if path.exists() && !args.force {
        bail!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    let config = AppConfig {
        tmdb: TmdbConfig {
            api_key: args.api_key.clone(),
            language: args.language.clone(),
            ..TmdbConfig::default()
        },
    };
    config.save(path)?;

    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.dir.as_ref())?;

    if let Commands::Init(args) = &cli.command {
        return run_init(args, &config_path);
    }

    let config = AppConfig::load(&config_path)?;
    match cli.command {
        Commands::Search(args) => run_search(&args, &config.tmdb).await,
        Commands::Popular(args) => run_popular(&args, &config.tmdb).await,
        Commands::TopRated(args) => run_top_rated(&args, &config.tmdb).await,
        Commands::Details(args) => run_details(&args, &config.tmdb).await,
        Commands::Init(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_build_client_without_credential_succeeds() {
        // Arrange
        let config = TmdbConfig::default();

        // Act
        let result = build_tmdb_client(&config);

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_client_rejects_invalid_base_url() {
        // Arrange
        let config = TmdbConfig {
            base_url: Some(String::from("not a url")),
            ..TmdbConfig::default()
        };

        // Act
        let result = build_tmdb_client(&config);

        // Assert
        assert!(result.unwrap_err().to_string().contains("invalid tmdb.base_url"));
    }

    #[test]
    fn test_report_failure_keeps_user_text_and_cause() {
        // Arrange
        let error = TmdbError::RateLimited { message: None };

        // Act
        let wrapped = report_failure(error);

        // Assert
        assert_eq!(
            wrapped.to_string(),
            "Too many requests - try again in a few minutes"
        );
        assert!(wrapped.downcast_ref::<TmdbError>().is_some());
    }

    #[test]
    fn test_cli_parses_search() {
        // Arrange & Act
        let cli = Cli::try_parse_from(["moviedb", "search", "--query", "Matrix", "--page", "2"])
            .unwrap();

        // Assert
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "Matrix");
                assert_eq!(args.page, 2);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_cli_requires_query_and_id() {
        // Arrange & Act
        let search = Cli::try_parse_from(["moviedb", "search"]);
        let details = Cli::try_parse_from(["moviedb", "details"]);

        // Assert
        assert_eq!(
            search.err().map(|e| e.kind()),
            Some(clap::error::ErrorKind::MissingRequiredArgument)
        );
        assert_eq!(
            details.err().map(|e| e.kind()),
            Some(clap::error::ErrorKind::MissingRequiredArgument)
        );
    }

    #[test]
    fn test_cli_rejects_page_zero() {
        // Arrange & Act
        let result = Cli::try_parse_from(["moviedb", "popular", "--page", "0"]);

        // Assert
        assert!(result.is_err());
    }
}
