//! BankApp CLI - demonstration flow and bank reports
//!
//! Usage:
//! ```bash
//! bankapp demo
//! bankapp --config bank.json demo
//! bankapp report --format markdown --output report.md
//! bankapp config > bank.json
//! ```

use anyhow::{Context, Result};
use bankapp_business::BankConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{demo, report};

/// BankApp - clients, accounts and transfers in memory
#[derive(Parser)]
#[command(name = "bankapp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON configuration with the clients to seed (built-in seed if omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the demonstration: existing clients, new client, reports
    Demo,

    /// Print the bank summary report for the seeded clients
    Report {
        /// Report format
        #[arg(long, default_value = "markdown")]
        format: ReportFormat,
        /// Output file path (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
    Markdown,
}

/// Load the configuration file, or the built-in seed
fn load_config(path: Option<&Path>) -> Result<BankConfig> {
    match path {
        Some(path) => BankConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(BankConfig::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bankapp_cli=info,bankapp_business=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo => demo::run(&config)?,

        Commands::Report { format, output } => {
            report::generate(&config, format, output.as_deref())?;
        }

        Commands::Config => {
            let json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize configuration")?;
            println!("{}", json);
        }
    }

    Ok(())
}
