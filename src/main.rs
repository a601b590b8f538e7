//! CricSaga stats - maintenance CLI for the scorecard store.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use cricsaga_stats::{ScorecardRepository, StatsService, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match cli.db {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::from_env()?,
    };

    let repository = ScorecardRepository::new(config.db_path().clone())?;
    let service = StatsService::new(repository);

    match cli.command {
        Command::Migrate => run_migrate(&service),
        Command::Register {
            telegram_id,
            username,
            first_name,
        } => run_register(&service, telegram_id, username, first_name),
        Command::Stats { telegram_id } => run_stats(&service, telegram_id),
        Command::Leaderboard { limit } => run_leaderboard(&service, limit),
        Command::History { telegram_id, limit } => run_history(&service, telegram_id, limit),
    }
}

/// Apply pending schema migrations.
fn run_migrate(service: &StatsService) -> Result<()> {
    service.repository().run_migrations()?;
    info!("Migrations complete");
    println!("Database schema is up to date.");
    Ok(())
}

/// Register a player, provisioning their statistics row.
fn run_register(
    service: &StatsService,
    telegram_id: i64,
    username: Option<String>,
    first_name: Option<String>,
) -> Result<()> {
    let user = service.register_player(telegram_id, username, first_name)?;
    println!(
        "Registered player {} ({})",
        user.telegram_id(),
        user.first_name().as_deref().unwrap_or("unnamed"),
    );
    Ok(())
}

/// Print a player's statistics rollup.
fn run_stats(service: &StatsService, telegram_id: i64) -> Result<()> {
    let Some(stats) = service.get_stats(telegram_id)? else {
        println!("No stats for player {telegram_id}. Register first.");
        return Ok(());
    };

    println!("Player {} statistics", telegram_id);
    println!("  Batting");
    println!("    Total runs: {}", stats.total_runs());
    println!("    Boundaries: {}", stats.total_boundaries());
    println!("    Sixes:      {}", stats.total_sixes());
    println!("    Fifties:    {}", stats.fifties());
    println!("    Hundreds:   {}", stats.hundreds());
    println!("    Best score: {}", stats.best_score());
    println!("  Bowling");
    println!("    Wickets:      {}", stats.total_wickets());
    println!("    Best bowling: {}", stats.best_wickets());
    println!("  Overall");
    println!("    Matches:  {}", stats.total_matches());
    println!("    Wins:     {}", stats.total_wins());
    println!("    Win rate: {:.1}%", stats.win_rate());
    Ok(())
}

/// Print the leaderboard.
fn run_leaderboard(service: &StatsService, limit: i64) -> Result<()> {
    let leaders = service.leaderboard(limit)?;

    if leaders.is_empty() {
        println!("Leaderboard is empty. No matches recorded yet.");
        return Ok(());
    }

    println!("Cricket leaderboard (top {} by runs)", limit);
    for (rank, entry) in leaders.iter().enumerate() {
        println!(
            "  {}. {} - runs {}, wickets {}, wins {}",
            rank + 1,
            entry.first_name().as_deref().unwrap_or("unnamed"),
            entry.total_runs(),
            entry.total_wickets(),
            entry.total_wins(),
        );
    }
    Ok(())
}

/// Print a player's recent performances.
fn run_history(service: &StatsService, telegram_id: i64, limit: i64) -> Result<()> {
    let history = service.get_history(telegram_id, limit)?;

    if history.is_empty() {
        println!("No match history for player {telegram_id}.");
        return Ok(());
    }

    println!("Recent matches for player {telegram_id}");
    for (performance, scorecard) in &history {
        println!(
            "  {} ({}) - runs {}, wickets {}, 4s {}, 6s {}",
            scorecard.match_id(),
            scorecard.created_at().format("%d/%m/%Y"),
            performance.runs_scored(),
            performance.wickets_taken(),
            performance.boundaries(),
            performance.sixes(),
        );
    }
    Ok(())
}
