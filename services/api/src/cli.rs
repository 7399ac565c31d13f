use crate::demo::{run_catalog_validate, run_demo, run_recommend, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use eco_board::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "eco-board-api",
    about = "Score and rank motherboard candidates for the eco vehicle build",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank a catalog file against optional filters and weights
    Recommend(RecommendArgs),
    /// Inspect catalog files without ranking them
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Rank the built-in sample catalog and walk through the reference comparison
    Demo,
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Parse and validate a catalog, reporting the record count
    Validate {
        /// Catalog file (.json or .csv)
        path: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Catalog to load at startup (overrides ECO_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Catalog {
            command: CatalogCommand::Validate { path },
        } => run_catalog_validate(path),
        Command::Demo => run_demo(),
    }
}
