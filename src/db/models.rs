//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;
use tracing::instrument;

use crate::db::{DbError, DbErrorKind, schema};

/// Registered user database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::users)]
#[diesel(primary_key(telegram_id))]
pub struct User {
    telegram_id: i64,
    username: Option<String>,
    first_name: Option<String>,
    registered_at: NaiveDateTime,
    last_active: NaiveDateTime,
}

/// Insertable user model for registration.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    telegram_id: i64,
    username: Option<String>,
    first_name: Option<String>,
}

/// Saved match record with its opaque scorecard payload.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::scorecards)]
#[diesel(belongs_to(User, foreign_key = telegram_id))]
pub struct Scorecard {
    id: i32,
    match_id: String,
    telegram_id: i64,
    match_name: Option<String>,
    game_mode: Option<String>,
    match_data: String,
    created_at: NaiveDateTime,
    deleted: bool,
}

impl Scorecard {
    /// Parses the stored match payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored payload is not valid JSON.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub fn payload(&self) -> Result<serde_json::Value, DbError> {
        serde_json::from_str(&self.match_data).map_err(|e| {
            DbError::new(
                DbErrorKind::Other,
                format!("Invalid match payload for '{}': {}", self.match_id, e),
            )
        })
    }
}

/// Insertable scorecard model for saving a match.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::scorecards)]
pub struct NewScorecard {
    match_id: String,
    telegram_id: i64,
    match_name: Option<String>,
    game_mode: Option<String>,
    match_data: String,
}

impl NewScorecard {
    /// Builds a scorecard from a structured JSON payload.
    #[instrument(skip(payload), fields(match_id = %match_id))]
    pub fn from_payload(
        match_id: String,
        telegram_id: i64,
        match_name: Option<String>,
        game_mode: Option<String>,
        payload: &serde_json::Value,
    ) -> Self {
        Self::new(
            match_id,
            telegram_id,
            match_name,
            game_mode,
            payload.to_string(),
        )
    }
}

/// One player's contribution to one match. Append-only.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::match_performances)]
#[diesel(belongs_to(User, foreign_key = telegram_id))]
pub struct MatchPerformance {
    id: i32,
    match_id: String,
    telegram_id: i64,
    runs_scored: i32,
    wickets_taken: i32,
    boundaries: i32,
    sixes: i32,
    created_at: NaiveDateTime,
}

/// Insertable performance model for recording a player's innings.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::match_performances)]
pub struct NewMatchPerformance {
    match_id: String,
    telegram_id: i64,
    runs_scored: i32,
    wickets_taken: i32,
    boundaries: i32,
    sixes: i32,
}

/// Denormalized cumulative statistics rollup, one row per player.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::player_stats)]
#[diesel(primary_key(telegram_id))]
#[diesel(belongs_to(User, foreign_key = telegram_id))]
pub struct PlayerStats {
    telegram_id: i64,
    total_runs: i32,
    total_wickets: i32,
    total_matches: i32,
    total_wins: i32,
    total_boundaries: i32,
    total_sixes: i32,
    fifties: i32,
    hundreds: i32,
    best_score: i32,
    best_wickets: i32,
    updated_at: NaiveDateTime,
}

impl PlayerStats {
    /// Calculates win rate as a percentage (0.0-100.0).
    ///
    /// Players with no finalized matches have a win rate of zero.
    #[instrument(skip(self))]
    pub fn win_rate(&self) -> f64 {
        if self.total_matches == 0 {
            0.0
        } else {
            (self.total_wins as f64 / self.total_matches as f64) * 100.0
        }
    }
}

/// Outcome of a finalized match from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    /// Player won the match.
    Won,
    /// Player lost the match.
    Lost,
    /// Match ended in a tie.
    Tied,
}

impl MatchOutcome {
    /// Whether this outcome counts toward the win total.
    pub fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// One leaderboard row: display name joined with career totals.
#[derive(Debug, Clone, Queryable, Getters, Serialize)]
pub struct LeaderboardEntry {
    first_name: Option<String>,
    total_runs: i32,
    total_wickets: i32,
    total_wins: i32,
}
