//! Database persistence layer for scorecards and player statistics.

mod error;
mod models;
mod repository;
mod rollup;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{
    LeaderboardEntry, MatchOutcome, MatchPerformance, NewMatchPerformance, NewScorecard, NewUser,
    PlayerStats, Scorecard, User,
};
pub use repository::ScorecardRepository;
pub use rollup::MilestoneBand;
