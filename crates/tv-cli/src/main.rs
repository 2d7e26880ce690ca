//! CLI frontend for the Tavern dice engine.

mod commands;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::session::TableOptions;

#[derive(Parser)]
#[command(
    name = "tavern",
    about = "Tavern: a Call of Cthulhu 7th edition dice table",
    version,
    propagate_version = true
)]
struct Cli {
    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file holding the investigator's sheet (created on first write)
    #[arg(long, global = true)]
    sheet: Option<PathBuf>,

    /// Id of the investigator at the table
    #[arg(long, global = true, default_value = "1")]
    role: i64,

    /// Display name of the investigator
    #[arg(long, global = true, default_value = "调查员")]
    name: String,

    /// Largest number of bonus or penalty dice accepted
    #[arg(long, global = true, default_value = "10")]
    max_bias: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run chat lines in order, then exit
    Run {
        /// Lines such as ".st 力量70" or ".rc 力量"
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Start an interactive table
    Repl,

    /// List the commands of the ruleset
    List,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = TableOptions {
        seed: cli.seed,
        sheet: cli.sheet,
        role: cli.role,
        name: cli.name,
        max_bias: cli.max_bias,
    };

    match cli.command {
        Commands::Run { lines } => commands::run::run(options, &lines).await,
        Commands::Repl => commands::repl::run(options).await,
        Commands::List => commands::list::run(),
    }
}
