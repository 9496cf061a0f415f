#[macro_use]
extern crate log;

mod data;
mod generate;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use coloredmanga::{ColoredManga, Config};

#[derive(Parser)]
#[clap(version, about = "Run the ColoredManga source against the live site")]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
    #[clap(subcommand)]
    subcmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the details of a manga
    Detail { manga_id: String },
    /// Print the chapters of a manga
    Chapters { manga_id: String },
    /// Print the page images of a chapter
    Pages { manga_id: String, chapter_id: String },
    /// Print search results
    Search { query: Option<String> },
    /// Search, then fetch the first result down to its newest chapter
    Smoke { query: String },
    /// Write the repository index
    GenerateJson {
        #[clap(short, long, default_value = "repo")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var("RUST_LOG").is_err() {
        if let Ok(level) = std::env::var("COLOREDMANGA_LOG") {
            logger.parse_filters(&format!("coloredmanga={level},coloredmanga_util={level}"));
        }
    }
    logger.init();

    let opts: Opts = Opts::parse();
    let config = Config::open(opts.config)?;
    debug!("config: {:?}", config);

    let source = ColoredManga::new(config)?;

    match opts.subcmd {
        Command::Detail { manga_id } => run::detail(&source, &manga_id).await?,
        Command::Chapters { manga_id } => run::chapters(&source, &manga_id).await?,
        Command::Pages {
            manga_id,
            chapter_id,
        } => run::pages(&source, &manga_id, &chapter_id).await?,
        Command::Search { query } => run::search(&source, query.as_deref()).await?,
        Command::Smoke { query } => run::smoke(&source, &query).await?,
        Command::GenerateJson { path } => generate::generate_json(&source, &path)?,
    }

    Ok(())
}
