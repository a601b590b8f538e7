//! Command-line interface for the cricsaga stats store.

use clap::{Parser, Subcommand};

/// CricSaga stats - maintenance CLI for the scorecard store
#[derive(Parser, Debug)]
#[command(name = "cricsaga_stats")]
#[command(about = "Scorecard store and player statistics maintenance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the SQLite database (falls back to the CRICSAGA_DB env var)
    #[arg(long)]
    pub db: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply pending schema migrations
    Migrate,

    /// Register a player (provisions their statistics row)
    Register {
        /// Telegram account id
        telegram_id: i64,

        /// Telegram username
        #[arg(long)]
        username: Option<String>,

        /// Display first name
        #[arg(long)]
        first_name: Option<String>,
    },

    /// Show a player's statistics rollup
    Stats {
        /// Telegram account id
        telegram_id: i64,
    },

    /// Show the top players by total runs
    Leaderboard {
        /// Number of players to show
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },

    /// Show a player's recent match performances
    History {
        /// Telegram account id
        telegram_id: i64,

        /// Number of performances to show
        #[arg(short, long, default_value = "5")]
        limit: i64,
    },
}
