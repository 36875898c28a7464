//! Command-line host for the CourseFinder explore view.

mod render;
mod shell;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell as CompletionShell};
use coursefinder_core::models::Course;
use coursefinder_core::{Catalog, Config, ExploreController, ExploreOptions, MemoryHistory};
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "coursefinder", about = "CourseFinder catalog explorer", version)]
struct Cli {
    /// Catalog JSON file (defaults to CATALOG_PATH or ~/.cache/coursefinder/catalog.json)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Catalog server URL (can also be set via CF_SERVER env var)
    #[arg(short, long, env = "CF_SERVER", global = true)]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Results per page (defaults to PAGE_SIZE or 9)
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "30", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
    /// Render the explore view for a query string
    Explore {
        /// Query string such as "?category=Data+Science&page=2"
        query: Option<String>,
    },
    /// Interactive explore session with back/forward history
    Shell {
        /// Initial location, as if opened from a shared link
        query: Option<String>,
    },
    /// Show a single course
    Course { slug: String },
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CatalogSource {
    File(PathBuf),
    Server(String),
}

fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

fn api_url(server: &str, segments: &[&str]) -> Result<reqwest::Url, String> {
    let mut url = reqwest::Url::parse(server)
        .map_err(|err| format!("Invalid server URL '{}': {}", server, err))?;
    let mut path = url
        .path_segments_mut()
        .map_err(|_| "Server URL cannot be used as an API base".to_string())?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment);
    }
    drop(path);
    Ok(url)
}

fn normalize_server(server: String) -> String {
    if let Ok(mut url) = reqwest::Url::parse(&server) {
        let should_normalize_localhost =
            url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
        if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
            return server;
        }
        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        return normalized;
    }
    server
}

fn explicit_server_override(server: Option<String>) -> Option<String> {
    server.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// An explicit `--catalog` file wins, then a server, then the configured path.
fn resolve_catalog_source(
    catalog: Option<PathBuf>,
    server: Option<String>,
    config: &Config,
) -> CatalogSource {
    if let Some(path) = catalog {
        return CatalogSource::File(path);
    }
    match explicit_server_override(server) {
        Some(server) => CatalogSource::Server(normalize_server(server)),
        None => CatalogSource::File(PathBuf::from(&config.catalog_path)),
    }
}

fn explore_options(config: &Config, page_size: Option<usize>) -> ExploreOptions {
    let mut options = ExploreOptions::from_config(config);
    if let Some(page_size) = page_size.filter(|size| *size > 0) {
        options.page_size = page_size;
    }
    options
}

async fn fetch_catalog(client: &reqwest::Client, server: &str) -> anyhow::Result<Catalog> {
    let endpoint = api_url(server, &["api", "courses"]).map_err(anyhow::Error::msg)?;
    let request_start = Instant::now();
    let res = client
        .get(endpoint)
        .send()
        .await
        .with_context(|| format!("Failed to reach catalog server at {}", server))?;
    let status = res.status();
    if !status.is_success() {
        let body = match res.text().await {
            Ok(body) => body,
            Err(err) => format!("failed to read error response body: {}", err),
        };
        anyhow::bail!(
            "Fetching catalog failed ({}): {}",
            status,
            error_message_for_response(status, &body)
        );
    }
    let courses: Vec<Course> = res.json().await.context("Catalog response was not valid")?;
    tracing::debug!(
        courses = courses.len(),
        elapsed_ms = request_start.elapsed().as_millis() as u64,
        "fetched catalog"
    );
    Ok(Catalog::from_courses(courses)?)
}

async fn load_catalog(source: &CatalogSource, timeout: u64) -> anyhow::Result<Catalog> {
    match source {
        CatalogSource::File(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        CatalogSource::Server(server) => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout))
                .build()?;
            fetch_catalog(&client, server).await
        }
    }
}

fn explore_controller(
    catalog: Catalog,
    query: Option<String>,
    options: ExploreOptions,
) -> ExploreController<MemoryHistory> {
    let history = MemoryHistory::new(query.as_deref().unwrap_or_default());
    ExploreController::new(Some(Arc::new(catalog)), history, options)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursefinder=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let Cli {
        catalog,
        server,
        json,
        page_size,
        timeout,
        command,
    } = Cli::parse();

    let config = Config::from_env();
    let source = resolve_catalog_source(catalog, server, &config);
    let options = explore_options(&config, page_size);

    match command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        Commands::Explore { query } => {
            let catalog = load_catalog(&source, timeout).await?;
            let controller = explore_controller(catalog, query, options);
            let output = render::render_view(&controller, json).map_err(anyhow::Error::msg)?;
            println!("{}", output);
        }
        Commands::Shell { query } => {
            let catalog = load_catalog(&source, timeout).await?;
            let controller = explore_controller(catalog, query, options);
            let mut explore_shell = shell::Shell::new(controller, json);
            if !json {
                println!("Type 'help' for commands.");
            }
            // The shell reads stdin and sleeps out the search debounce.
            let entries = tokio::task::spawn_blocking(move || -> anyhow::Result<usize> {
                let stdin = io::stdin();
                let mut stdout = io::stdout();
                explore_shell.run(stdin.lock(), &mut stdout)?;
                stdout.flush()?;
                Ok(explore_shell.controller().navigator().len())
            })
            .await
            .context("Explore shell task failed")??;
            tracing::debug!(entries, "shell closed");
        }
        Commands::Course { slug } => {
            let catalog = load_catalog(&source, timeout).await?;
            let Some(course) = catalog.get(slug.trim()) else {
                anyhow::bail!("Course '{}' not found", slug);
            };
            let output = render::format_course_detail(course, json).map_err(anyhow::Error::msg)?;
            println!("{}", output);
        }
    }

    Ok(())
}
