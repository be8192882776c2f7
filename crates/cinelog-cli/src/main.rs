//! cinelog - TMDB-backed movie watch log CLI.

/// Application configuration (TOML).
mod config;
/// Japanese date display helpers.
mod date;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, TMDB_TOKEN_ENV, resolve_config_path};
use crate::date::{format_date, split_date};
use cinelog_api::movie_info::{
    LoadingSignal, MovieDetail, MovieSummary, fetch_detail, fetch_list, poster_url, search_movies,
};
use cinelog_api::tmdb::TmdbClient;
use cinelog_db::{WatchLogEntry, WatchLogRepository, WatchLogStore, WatchType, open_repository};

/// Default list endpoint for `movie list` (the home listing).
const DEFAULT_LIST_PATH: &str = "movie/now_playing";

/// Poster size used in detail output.
const POSTER_SIZE: &str = "w500";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse movies on TMDB.
    Movie(MovieCommand),
    /// Record and review watched movies.
    Log(LogCommand),
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieCommand {
    /// Movie subcommand to run.
    #[command(subcommand)]
    command: MovieSubcommands,
}

/// Available movie subcommands.
#[derive(Subcommand)]
enum MovieSubcommands {
    /// List movies from a TMDB list endpoint (default: now playing).
    List(MovieListArgs),
    /// Search movies by title.
    Search(MovieSearchArgs),
    /// Show movie details with the leading cast.
    Show(MovieShowArgs),
}

/// Arguments for the `movie list` subcommand.
#[derive(clap::Args)]
struct MovieListArgs {
    /// TMDB list path (e.g. "movie/popular", "discover/movie").
    #[arg(long, default_value = DEFAULT_LIST_PATH)]
    path: String,
    /// Extra query parameter as key=value (repeatable).
    #[arg(long = "param", value_parser = parse_key_val)]
    params: Vec<(String, String)>,
    /// Result page (ignored when `--param page=N` is given).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `movie search` subcommand.
#[derive(clap::Args)]
struct MovieSearchArgs {
    /// Search query (e.g. "すずめの戸締まり").
    #[arg(long, required = true)]
    query: String,
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `movie show` subcommand.
#[derive(clap::Args)]
struct MovieShowArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `log` subcommand.
#[derive(clap::Args)]
struct LogCommand {
    /// Log subcommand to run.
    #[command(subcommand)]
    command: LogSubcommands,
}

/// Available log subcommands.
#[derive(Subcommand)]
enum LogSubcommands {
    /// List logged movies in the order they were added.
    List,
    /// Record a watched movie.
    Add(LogAddArgs),
}

/// Arguments for the `log add` subcommand.
#[derive(clap::Args)]
struct LogAddArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
    /// Movie title. Fetched from TMDB when omitted.
    #[arg(long)]
    title: Option<String>,
    /// Poster path (e.g. "/abc.jpg"). Taken from TMDB when omitted.
    #[arg(long)]
    poster_path: Option<String>,
    /// Date watched, YYYY-MM-DD (default: today).
    #[arg(long)]
    watched_date: Option<String>,
    /// How the movie was watched (theater, streaming).
    #[arg(long)]
    watch_type: Option<WatchType>,
    /// Free-text memo.
    #[arg(long)]
    memo: Option<String>,
}

/// Parses a `key=value` query parameter.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((String::from(key), String::from(value)))
}

/// Builds list query params, adding `page` unless the caller already set it.
fn list_params(params: &[(String, String)], page: u32) -> Vec<(String, String)> {
    let mut query = params.to_vec();
    if !query.iter().any(|(key, _)| key == "page") {
        query.push((String::from("page"), page.to_string()));
    }
    query
}

/// Loads `config.toml` from `dir` (or the default location).
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TmdbClient` from config and the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if no token is available or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = config.api_token(std::env::var(TMDB_TOKEN_ENV).ok())?;

    TmdbClient::builder()
        .api_token(api_token)
        .language(&config.tmdb.language)
        .region(&config.tmdb.region)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Opens the watch log store with the configured backend.
fn open_store(
    config: &AppConfig,
    dir: Option<&PathBuf>,
) -> Result<WatchLogStore<Box<dyn WatchLogRepository>>> {
    let repo = open_repository(config.storage.backend, dir)
        .context("failed to open watch log storage")?;
    WatchLogStore::open(repo)
}

/// Logs one line per movie summary.
fn print_movies(movies: &[MovieSummary]) {
    tracing::info!("ID\tReleaseDate\tTitle");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}",
            movie.id,
            if movie.release_date.is_empty() {
                "-"
            } else {
                movie.release_date.as_str()
            },
            movie.title,
        );
    }
    tracing::info!("Total: {} movies", movies.len());
}

/// Logs a movie detail block.
fn print_detail(detail: &MovieDetail) {
    tracing::info!("{} (ID: {})", detail.title, detail.id);
    tracing::info!("公開日: {}", format_date(&detail.release_date));
    tracing::info!("ジャンル: {}", join_or_dash(detail.genres.iter().map(|g| g.name.as_str())));
    tracing::info!(
        "製作国: {}",
        join_or_dash(detail.production_countries.iter().map(|c| c.name.as_str()))
    );
    tracing::info!(
        "出演: {}",
        join_or_dash(detail.cast.iter().map(|c| c.name.as_str()))
    );
    tracing::info!(
        "ホームページ: {}",
        if detail.homepage.is_empty() {
            "-"
        } else {
            detail.homepage.as_str()
        }
    );
    tracing::info!(
        "ポスター: {}",
        detail
            .poster_path
            .as_deref()
            .map_or_else(|| String::from("-"), |p| poster_url(p, POSTER_SIZE))
    );
    tracing::info!("あらすじ: {}", detail.overview.as_deref().unwrap_or("-"));
}

/// Joins names with `, `, or `-` when there are none.
fn join_or_dash<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        String::from("-")
    } else {
        joined
    }
}

/// Formats one watch log line: `<year> <month>. <day>  <title>  [<method>]  <memo>`.
fn format_log_line(entry: &WatchLogEntry) -> String {
    let date = split_date(&entry.watched_date);
    let mut line = format!("{} {}\t{}", date.year, date.month_day, entry.title);
    if let Some(watch_type) = entry.watch_type {
        line.push_str(&format!("\t[{}]", watch_type.label()));
    }
    if let Some(memo) = entry.memo.as_deref().filter(|m| !m.is_empty()) {
        line.push_str(&format!("\t{memo}"));
    }
    line
}

/// Logs every watch log entry in insertion order.
fn print_log(entries: &[WatchLogEntry]) {
    for entry in entries {
        tracing::info!("{}", format_log_line(entry));
    }
    tracing::info!("Total: {} logs", entries.len());
}

/// Runs the `movie list` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the fetch fails.
#[instrument(skip_all)]
async fn run_movie_list(args: &MovieListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let params = list_params(&args.params, args.page);

    let loading = LoadingSignal::new();
    let movies = fetch_list(&client, &args.path, &params, &loading)
        .await
        .with_context(|| format!("failed to fetch {}", args.path))?;

    print_movies(&movies);
    Ok(())
}

/// Runs the `movie search` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the search fails.
#[instrument(skip_all)]
async fn run_movie_search(args: &MovieSearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let loading = LoadingSignal::new();
    let movies = search_movies(&client, &args.query, args.page, &loading)
        .await
        .context("movie search failed")?;

    print_movies(&movies);
    Ok(())
}

/// Runs the `movie show` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the fetch fails.
#[instrument(skip_all)]
async fn run_movie_show(args: &MovieShowArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let loading = LoadingSignal::new();
    let detail = fetch_detail(&client, args.id, &loading)
        .await
        .with_context(|| format!("failed to fetch movie {}", args.id))?;

    print_detail(&detail);
    Ok(())
}

/// Runs the `log list` subcommand.
///
/// # Errors
///
/// Returns an error if config or storage cannot be read.
#[instrument(skip_all)]
fn run_log_list(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let store = open_store(&config, dir)?;

    if store.is_empty() {
        tracing::info!("No movie logs yet. Run `log add` to record one.");
        return Ok(());
    }

    print_log(store.all());
    Ok(())
}

/// Runs the `log add` subcommand.
///
/// Without `--title`, the title and poster are snapshotted from TMDB.
///
/// # Errors
///
/// Returns an error if storage cannot be opened or written, or if the
/// TMDB lookup is needed and fails.
#[instrument(skip_all)]
async fn run_log_add(args: &LogAddArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let mut store = open_store(&config, dir)?;

    let (title, poster_path) = if let Some(title) = &args.title {
        (title.clone(), args.poster_path.clone().unwrap_or_default())
    } else {
        let client = build_tmdb_client(&config)?;
        let loading = LoadingSignal::new();
        let detail = fetch_detail(&client, args.id, &loading)
            .await
            .with_context(|| format!("failed to fetch movie {}", args.id))?;
        let poster_path = args
            .poster_path
            .clone()
            .or(detail.poster_path)
            .unwrap_or_default();
        (detail.title, poster_path)
    };

    let watched_date = args
        .watched_date
        .clone()
        .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());

    let entry = WatchLogEntry {
        id: args.id,
        title,
        poster_path,
        watched_date,
        watch_type: args.watch_type,
        memo: args.memo.clone(),
    };
    let line = format_log_line(&entry);
    store.add_movie_log(entry)?;

    tracing::info!("Logged: {}", line);
    tracing::info!("Total: {} logs", store.len());
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
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Movie(movie) => match movie.command {
            MovieSubcommands::List(args) => run_movie_list(&args, dir).await,
            MovieSubcommands::Search(args) => run_movie_search(&args, dir).await,
            MovieSubcommands::Show(args) => run_movie_show(&args, dir).await,
        },
        Commands::Log(log) => match log.command {
            LogSubcommands::List => run_log_list(dir),
            LogSubcommands::Add(args) => run_log_add(&args, dir).await,
        },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    fn entry(watch_type: Option<WatchType>, memo: Option<&str>) -> WatchLogEntry {
        WatchLogEntry {
            id: 916_224,
            title: String::from("すずめの戸締まり"),
            poster_path: String::from("/suzume.jpg"),
            watched_date: String::from("2022-11-11"),
            watch_type,
            memo: memo.map(String::from),
        }
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("with_genres=16").unwrap(),
            (String::from("with_genres"), String::from("16"))
        );
        assert_eq!(
            parse_key_val("query=a=b").unwrap(),
            (String::from("query"), String::from("a=b"))
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_list_params_appends_page() {
        // Arrange
        let params = vec![(String::from("with_genres"), String::from("16"))];

        // Act
        let query = list_params(&params, 2);

        // Assert
        assert_eq!(
            query,
            vec![
                (String::from("with_genres"), String::from("16")),
                (String::from("page"), String::from("2")),
            ]
        );
    }

    #[test]
    fn test_list_params_keeps_explicit_page() {
        // Arrange
        let params = vec![(String::from("page"), String::from("3"))];

        // Act
        let query = list_params(&params, 1);

        // Assert
        assert_eq!(query, vec![(String::from("page"), String::from("3"))]);
    }

    #[test]
    fn test_format_log_line_full() {
        // Arrange
        let e = entry(Some(WatchType::Theater), Some("IMAXで鑑賞"));

        // Act
        let line = format_log_line(&e);

        // Assert
        assert_eq!(line, "2022 11. 11\tすずめの戸締まり\t[映画館]\tIMAXで鑑賞");
    }

    #[test]
    fn test_format_log_line_minimal() {
        // Arrange
        let e = entry(None, Some(""));

        // Act
        let line = format_log_line(&e);

        // Assert
        assert_eq!(line, "2022 11. 11\tすずめの戸締まり");
    }

    #[test]
    fn test_join_or_dash() {
        assert_eq!(join_or_dash(["A", "B"].into_iter()), "A, B");
        assert_eq!(join_or_dash(std::iter::empty()), "-");
    }

    #[test]
    fn test_print_log_emits_lines_in_order() {
        // Arrange
        let entries = vec![
            entry(Some(WatchType::Streaming), None),
            WatchLogEntry {
                id: 1,
                title: String::from("A"),
                poster_path: String::from("/a.jpg"),
                watched_date: String::from("2021-05-05"),
                watch_type: None,
                memo: None,
            },
        ];
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg(
                "2022 11. 11\tすずめの戸締まり\t[配信]",
            )))
            .event(expect::event().with_fields(expect::msg("2021 5. 5\tA")))
            .event(expect::event().with_fields(expect::msg("Total: 2 logs")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            print_log(&entries);
        });

        // Assert
        handle.assert_finished();
    }
}
