//! Search proxy entry point.

use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use search_proxy::api::{create_router, AppState};
use search_proxy::config::{Config, USDA_API_KEY_VAR, YOUTUBE_API_KEY_VAR};
use search_proxy::food::{self, FoodSearchRequest, UsdaClient};
use search_proxy::metrics;
use search_proxy::upstream::build_http_client;
use search_proxy::utils::shutdown_signal;
use search_proxy::video::{self, VideoSearchRequest, YouTubeClient};

/// Stateless search proxy for USDA FoodData Central and YouTube.
#[derive(Parser, Debug)]
#[command(name = "search-proxy")]
#[command(about = "Key-holding search proxy for USDA FoodData Central and YouTube")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search FoodData Central and print nutrients.
    Food {
        /// Search term, e.g. "banana".
        #[arg(short, long)]
        query: String,

        /// How many results to fetch.
        #[arg(short, long, default_value_t = food::DEFAULT_LIMIT,
              value_parser = clap::value_parser!(u64).range(1..))]
        limit: u64,

        /// Comma-separated data type filter, e.g. "Branded,SR Legacy".
        #[arg(long)]
        data_type: Option<String>,

        /// Skip per-item detail lookups and use the nutrients in the search hits.
        #[arg(long)]
        no_details: bool,
    },

    /// Search YouTube and print video statistics.
    Video {
        /// Search term.
        #[arg(short, long)]
        query: String,

        /// Number of results to retrieve.
        #[arg(short, long, default_value_t = video::DEFAULT_LIMIT,
              value_parser = clap::value_parser!(u64).range(1..))]
        limit: u64,

        /// Sort order: date, rating, relevance, title, videoCount, viewCount.
        #[arg(short, long, default_value = video::DEFAULT_ORDER)]
        order: String,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("search_proxy=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        Some(Command::Food {
            query,
            limit,
            data_type,
            no_details,
        }) => cmd_food(query, limit, data_type, no_details).await,
        Some(Command::Video {
            query,
            limit,
            order,
        }) => cmd_video(query, limit, order).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        None => cmd_serve(args.port).await,
    }
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(port: Option<u16>) -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let port = port.unwrap_or(config.port);
    info!(port, "Starting search proxy");

    if config.usda_key().is_none() {
        warn!("{} not set, food searches will fail", USDA_API_KEY_VAR);
    }
    if config.youtube_key().is_none() {
        warn!("{} not set, video searches will fail", YOUTUBE_API_KEY_VAR);
    }

    let mut state = AppState::from_config(&config, build_http_client()?);
    match metrics::install_prometheus() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!(error = %e, "Prometheus recorder not installed, /metrics disabled"),
    }
    metrics::init_metrics();

    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Search proxy stopped");
    Ok(())
}

/// Run one food search and print it.
async fn cmd_food(
    query: String,
    limit: u64,
    data_type: Option<String>,
    no_details: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;
    let key = config
        .usda_key()
        .with_context(|| format!("{USDA_API_KEY_VAR} not configured"))?;

    let client = UsdaClient::new(build_http_client()?, &config.usda_base_url, key);
    let request = FoodSearchRequest::new(query)
        .with_limit(limit)
        .with_data_types(data_type.as_deref())
        .with_details(!no_details);

    let results = food::search(&client, &request).await?;
    if results.is_empty() {
        println!("No foods found.");
        return Ok(());
    }

    for (idx, item) in results.iter().enumerate() {
        let fdc_id = item
            .fdc_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "\n[{}] {} (FDC ID: {}, type: {})",
            idx + 1,
            item.description,
            fdc_id,
            item.data_type
        );
        if let Some(brand) = &item.brand_owner {
            println!("  Brand: {}", brand);
        }

        if item.nutrients.is_empty() {
            println!("  (No nutrients found)");
            continue;
        }
        println!("  Nutrients:");
        for (name, value) in &item.nutrients {
            println!("    - {}: {}", name, value);
        }
    }

    println!("\nDone.");
    Ok(())
}

/// Run one video search and print it.
async fn cmd_video(query: String, limit: u64, order: String) -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;
    let key = config
        .youtube_key()
        .with_context(|| format!("{YOUTUBE_API_KEY_VAR} not configured"))?;

    let client = YouTubeClient::new(build_http_client()?, &config.youtube_base_url, key);
    let request = VideoSearchRequest::new(query)
        .with_limit(limit)
        .with_order(Some(&order));

    let results = video::search(&client, &request).await?;
    if results.is_empty() {
        println!("No videos found.");
        return Ok(());
    }

    for (idx, item) in results.iter().enumerate() {
        println!("\n[{}] {}", idx + 1, item.title);
        println!("    Video ID:   {}", item.video_id);
        println!("    Channel:    {}", item.channel_title);
        println!("    Published:  {}", item.published_at);
        if item.view_count.is_empty() && item.like_count.is_empty() {
            println!("    (No additional stats found)");
        } else {
            println!("    Views:      {}", item.view_count);
            println!("    Likes:      {}", item.like_count);
        }
        println!("    Thumbnail:  {}", item.thumbnail_url);
    }

    println!("\nDone.");
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SEARCH PROXY - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    let status = |key: Option<&str>| if key.is_some() { "set" } else { "MISSING" };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  {}: {}", USDA_API_KEY_VAR, status(config.usda_key()));
    println!("  {}: {}", YOUTUBE_API_KEY_VAR, status(config.youtube_key()));
    println!("  USDA Base URL: {}", config.usda_base_url);
    println!("  YouTube Base URL: {}", config.youtube_base_url);
    println!("  Port: {}", config.port);
    println!("======================================================================");
    if config.usda_key().is_none() || config.youtube_key().is_none() {
        println!("CONFIGURATION CHECK PASSED (endpoints without a key will return 500)");
    } else {
        println!("CONFIGURATION CHECK PASSED");
    }
    println!("======================================================================");

    Ok(())
}
