use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use kataru_api::mal::MalClient;
use kataru_api::suggest::SuggestClient;
use kataru_core::alias::AliasDataset;
use kataru_core::config::AppConfig;
use kataru_core::pipeline::Pipeline;
use kataru_core::resolver::Resolver;
use serde_json::json;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Find the MyAnimeList discussion thread for an anime episode.
#[derive(Debug, Parser)]
#[command(name = "kataru", version, about)]
struct Args {
    /// Anime title, as loosely as you remember it.
    anime: String,

    /// Episode number.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    episode: u32,

    /// Season number.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    season: u32,

    /// Path to a config file, instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kataru=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let timeout = Duration::from_secs(config.http.timeout_secs);
    let mal = match MalClient::new(&config.catalog.client_id, timeout) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "failed to build MAL client");
            return ExitCode::FAILURE;
        }
    };
    let suggest = match SuggestClient::new(&config.suggest, timeout) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "failed to build suggestion client");
            return ExitCode::FAILURE;
        }
    };

    let resolver = Resolver::new(mal.clone(), suggest, AliasDataset::builtin());
    let pipeline = Pipeline::new(resolver, mal.clone(), mal);

    match pipeline
        .discussion(&args.anime, args.season, args.episode)
        .await
    {
        Ok(discussion) => {
            println!("{}", json!({ "message": discussion.posts }));
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "lookup failed");
            println!("{}", json!({ "message": "Anime not found" }));
            ExitCode::FAILURE
        }
    }
}
