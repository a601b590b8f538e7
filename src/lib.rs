//! CricSaga statistics store.
//!
//! Persistence layer and incremental statistics aggregator for recorded
//! cricket match scorecards.
//!
//! # Architecture
//!
//! - **Store**: normalized entities (users, scorecards, per-match
//!   performances, groups, admins) in SQLite via diesel.
//! - **Aggregator**: the denormalized `player_stats` rollup, maintained
//!   inline in the transaction that records each performance. Recording a
//!   performance and folding it into the rollup is one atomic unit of work.
//! - **Service**: [`StatsService`] wraps the repository with match id
//!   generation and the register-before-record contract.
//!
//! # Example
//!
//! ```no_run
//! use cricsaga_stats::{ScorecardRepository, StatsService};
//!
//! # fn example() -> Result<(), cricsaga_stats::DbError> {
//! let repository = ScorecardRepository::new("cricsaga.db".to_string())?;
//! repository.run_migrations()?;
//! let service = StatsService::new(repository);
//!
//! service.register_player(42, None, Some("Asha".to_string()))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod service;

// Crate-level exports - Configuration
pub use config::{ConfigError, StoreConfig};

// Crate-level exports - Persistence layer
pub use db::{
    DbError, DbErrorKind, LeaderboardEntry, MatchOutcome, MatchPerformance, MilestoneBand,
    NewMatchPerformance, NewScorecard, NewUser, PlayerStats, Scorecard, ScorecardRepository, User,
};

// Crate-level exports - Service layer
pub use service::StatsService;
