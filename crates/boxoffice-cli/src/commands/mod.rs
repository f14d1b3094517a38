//! CLI command definitions and dispatch.

pub mod migrate;
pub mod race;
pub mod seats;
pub mod seed;

use clap::{Parser, Subcommand};

use boxoffice_core::config::AppConfig;
use boxoffice_core::error::AppError;
use boxoffice_database::connection::DatabasePool;

use crate::output::OutputFormat;

/// Box Office: seat reservation engine operations
#[derive(Debug, Parser)]
#[command(name = "boxoffice", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load from `config/{env}.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a block of available seats
    Seed(seed::SeedArgs),
    /// List seats and their status
    Seats,
    /// Fire concurrent reservations at one seat and report the outcomes
    Race(race::RaceArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        let db = DatabasePool::connect(&config.database).await?;

        match &self.command {
            Commands::Migrate => migrate::execute(&db).await,
            Commands::Seed(args) => seed::execute(args, &db).await,
            Commands::Seats => seats::execute(&db, self.format).await,
            Commands::Race(args) => race::execute(args, &config, &db, self.format).await,
        }
    }
}
