use anyhow::Context;
use cinerank_api::{AppState, DataSources, RestApi};
use cinerank_core::{EngineConfig, ModelKind, RecommendationRequest, DEFAULT_CANDIDATE_POOL, DEFAULT_DENSE_LIMIT};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Movie recommendations from three liked titles
#[derive(Parser, Debug)]
#[command(name = "cinerank")]
#[command(about = "Content-based and collaborative movie recommender", long_about = None)]
struct Args {
    /// Movie catalog CSV (movieId,title,genres)
    #[arg(short, long, default_value = "resources/data/movies.csv")]
    catalog: PathBuf,

    /// Ratings CSV (userId,movieId,rating,timestamp); enables the collaborative model
    #[arg(short, long)]
    ratings: Option<PathBuf>,

    /// HTTP API port
    #[arg(long, default_value_t = 8501)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Merged-ranking entries kept before seeds are removed
    #[arg(long, default_value_t = DEFAULT_CANDIDATE_POOL)]
    candidate_pool: usize,

    /// Only use the first N catalog rows
    #[arg(long)]
    subset_size: Option<usize>,

    /// Largest catalog for which the full similarity matrix is kept in memory
    #[arg(long, default_value_t = DEFAULT_DENSE_LIMIT)]
    dense_limit: usize,

    /// Liked title; pass exactly three to print recommendations and exit
    #[arg(long = "seed", value_name = "TITLE")]
    seeds: Vec<String>,

    /// Number of recommendations in one-shot mode
    #[arg(long, default_value_t = 10)]
    top_n: usize,

    /// Model for one-shot mode: content or collaborative
    #[arg(long, default_value = "content")]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sources = DataSources {
        catalog: args.catalog.clone(),
        ratings: args.ratings.clone(),
        config: EngineConfig {
            candidate_pool: args.candidate_pool,
            dense_limit: args.dense_limit,
            subset_size: args.subset_size,
            ..Default::default()
        },
    };

    if !args.seeds.is_empty() {
        return recommend_once(&args, &sources);
    }

    info!("Starting CineRank v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);
    if let Some(ratings) = &args.ratings {
        info!("Ratings: {:?}", ratings);
    }

    let state = Arc::new(
        AppState::from_sources(sources).context("failed to build recommendation engines")?,
    );

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn recommend_once(args: &Args, sources: &DataSources) -> anyhow::Result<()> {
    let model: ModelKind = args.model.parse()?;
    let request = RecommendationRequest::new(args.seeds.as_slice(), args.top_n)?;
    let engines = sources.load().context("failed to build recommendation engines")?;
    let recommender = engines.recommender(model)?;

    let titles = recommender.recommend(&request)?;
    println!("We think you'll like:");
    for (rank, title) in titles.iter().enumerate() {
        println!("{}. {}", rank + 1, title);
    }
    Ok(())
}
