use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use client_core::{PendingSearch, PoetryClient, SearchController, SpawnedSearch};
use futures::future::join_all;
use shared::domain::{PoemQuery, SearchMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, normalize_base_url, DEFAULT_CONFIG_FILE};
use render::render_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Author,
    Title,
    Both,
}

#[derive(Parser, Debug)]
#[command(name = "poet", about = "Search PoetryDB by author, title, or both")]
struct Args {
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    title: Option<String>,
    /// Run only one kind of search instead of every one the inputs allow.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Overrides the API base URL from the config file and environment.
    #[arg(long)]
    base_url: Option<String>,
    /// Print every line of each poem found.
    #[arg(long)]
    full: bool,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

/// Queries to run for the given inputs. With both inputs and no explicit mode,
/// all three searches run side by side.
fn planned_queries(
    author: Option<&str>,
    title: Option<&str>,
    mode: Option<ModeArg>,
) -> Vec<PoemQuery> {
    let author_input = author.unwrap_or_default();
    let title_input = title.unwrap_or_default();

    match (mode, author, title) {
        (Some(ModeArg::Author), _, _) | (None, Some(_), None) => {
            vec![PoemQuery::by_author(author_input)]
        }
        (Some(ModeArg::Title), _, _) | (None, None, Some(_)) => {
            vec![PoemQuery::by_title(title_input)]
        }
        (Some(ModeArg::Both), _, _) => {
            vec![PoemQuery::by_author_and_title(author_input, title_input)]
        }
        (None, _, _) => vec![
            PoemQuery::by_author(author_input),
            PoemQuery::by_title(title_input),
            PoemQuery::by_author_and_title(author_input, title_input),
        ],
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    if let Some(base_url) = &args.base_url {
        settings.base_url = normalize_base_url(base_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let queries = planned_queries(args.author.as_deref(), args.title.as_deref(), args.mode);
    let modes: Vec<SearchMode> = queries.iter().map(PoemQuery::mode).collect();
    info!(base_url = %settings.base_url, searches = queries.len(), "starting poetry search");

    let mut controller = SearchController::new(Arc::new(PoetryClient::new(settings.base_url)));
    let in_flight: Vec<SpawnedSearch> = queries
        .into_iter()
        .filter_map(|query| controller.begin(query))
        .map(PendingSearch::spawn)
        .collect();

    for outcome in join_all(in_flight.into_iter().map(SpawnedSearch::outcome)).await {
        controller.complete(outcome);
    }

    for mode in modes {
        print!("{}", render_state(mode, controller.state(mode), args.full));
    }

    Ok(())
}
