//! stockload CLI - daily stock price loader.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod config;
mod display;

use config::ConfigArgs;
use display::Format;

#[derive(Parser)]
#[command(name = "stockload")]
#[command(about = "Load the most recent daily stock prices into a warehouse table", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory for run history and locks
    #[arg(long, env = "STOCKLOAD_STATE_DIR", global = true)]
    state_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, window and replace the table contents for one symbol
    Run {
        /// Ticker symbol (e.g., IBM, FIVE)
        symbol: String,

        /// SQLite database file
        #[arg(short, long, env = "STOCKLOAD_DATABASE", default_value = "stockload.db")]
        database: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Fetch and window a symbol without loading it
    Window {
        /// Ticker symbol
        symbol: String,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show rows of the target table
    Show {
        /// Only rows of this symbol
        symbol: Option<String>,

        /// SQLite database file
        #[arg(short, long, env = "STOCKLOAD_DATABASE", default_value = "stockload.db")]
        database: PathBuf,

        /// Target table
        #[arg(short, long, default_value = "stock_prices")]
        table: String,

        /// Maximum rows to print
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show run history
    Runs {
        /// Specific run ID to show
        run_id: Option<String>,

        /// Only runs of this symbol
        #[arg(short, long)]
        symbol: Option<String>,

        /// Remove finished runs from history
        #[arg(long)]
        clean: bool,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,stockload={level},stockload_lib={level},stockload_fetch={level},\
             stockload_window={level},stockload_warehouse={level},stockload_runs={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Run {
            symbol,
            database,
            config,
        } => {
            commands::run::run(
                &symbol,
                &database,
                &config,
                cli.state_dir.as_deref(),
                cli.quiet,
            )
            .await
        }
        Commands::Window {
            symbol,
            output,
            format,
            config,
        } => commands::window::window(&symbol, output.as_deref(), format, &config).await,
        Commands::Show {
            symbol,
            database,
            table,
            limit,
        } => commands::show::show(symbol.as_deref(), &database, &table, limit),
        Commands::Runs {
            run_id,
            symbol,
            clean,
        } => commands::runs::runs(
            run_id.as_deref(),
            symbol.as_deref(),
            clean,
            cli.state_dir.as_deref(),
        ),
    }
}
