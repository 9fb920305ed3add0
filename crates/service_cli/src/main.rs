//! Neutryx CCR CLI entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_cli::commands;
use service_cli::config::{build_config, CliArgs};
use service_cli::output::OutputFormat;
use service_cli::synthetic::DEFAULT_COUNTERPARTIES;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Neutryx counterparty credit risk pipeline
#[derive(Parser, Debug)]
#[command(name = "ccr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// CVA rate applied to total PFE
    #[arg(long, global = true)]
    cva_rate: Option<f64>,

    /// Maximum concurrent engine calls
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Trades per worker batch
    #[arg(long, global = true)]
    batch_size: Option<usize>,

    /// Engine call attempts per trade
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    /// Delay before the first retry, in milliseconds
    #[arg(long, global = true)]
    retry_backoff_ms: Option<u64>,

    /// Monte Carlo paths per trade
    #[arg(long, global = true)]
    num_paths: Option<usize>,

    /// Monte Carlo base seed
    #[arg(long, global = true)]
    engine_seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a synthetic option book through the pipeline
    Simulate {
        /// Number of trades to generate
        #[arg(short, long, default_value = "100")]
        trades: usize,

        /// Counterparties to book against (comma-separated)
        #[arg(long, value_delimiter = ',')]
        counterparties: Vec<String>,

        /// Seed for book generation
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run trades from a CSV or JSON file through the pipeline
    Run {
        /// Path to trade file (.csv or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    Check,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            cva_rate: cli.cva_rate,
            concurrency: cli.concurrency,
            batch_size: cli.batch_size,
            max_attempts: cli.max_attempts,
            retry_backoff_ms: cli.retry_backoff_ms,
            num_paths: cli.num_paths,
            engine_seed: cli.engine_seed,
            log_level: cli.log_level.clone(),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli))?;

    init_tracing(config.log_level.as_filter_str());
    tracing::debug!(version = service_cli::VERSION, "Configuration loaded");

    match cli.command {
        Commands::Simulate {
            trades,
            counterparties,
            seed,
            format,
            output,
        } => {
            let counterparties = if counterparties.is_empty() {
                DEFAULT_COUNTERPARTIES.iter().map(|s| s.to_string()).collect()
            } else {
                counterparties
            };
            commands::simulate::run(
                trades,
                &counterparties,
                seed,
                &config,
                format,
                output.as_deref(),
            )?;
        }
        Commands::Run {
            input,
            format,
            output,
        } => {
            commands::run::run(&input, &config, format, output.as_deref())?;
        }
        Commands::Check => commands::check::run(&config)?,
    }

    Ok(())
}
