//! Statistics business logic layer.

use tracing::{debug, info, instrument};

use crate::{
    DbError, LeaderboardEntry, MatchOutcome, MatchPerformance, NewMatchPerformance, NewScorecard,
    PlayerStats, Scorecard, ScorecardRepository, User,
};

/// Service layer for scorecard and statistics operations.
///
/// Wraps [`ScorecardRepository`] with higher-level logic such as match id
/// generation and the register-before-record contract: players must be
/// registered (which provisions their statistics row) before any
/// performance is accepted for them.
#[derive(Debug, Clone)]
pub struct StatsService {
    repository: ScorecardRepository,
}

impl StatsService {
    /// Creates a new service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: ScorecardRepository) -> Self {
        info!("Creating StatsService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &ScorecardRepository {
        &self.repository
    }

    /// Registers a player, provisioning their statistics row. Idempotent.
    #[instrument(skip(self))]
    pub fn register_player(
        &self,
        telegram_id: i64,
        username: Option<String>,
        first_name: Option<String>,
    ) -> Result<User, DbError> {
        debug!(telegram_id = %telegram_id, "Registering player");
        self.repository
            .register_user(telegram_id, username, first_name)
    }

    /// Saves a match scorecard with a freshly generated match id.
    #[instrument(skip(self, payload))]
    pub fn save_scorecard(
        &self,
        telegram_id: i64,
        match_name: Option<String>,
        game_mode: Option<String>,
        payload: &serde_json::Value,
    ) -> Result<Scorecard, DbError> {
        let match_id = generate_match_id();
        debug!(match_id = %match_id, "Saving scorecard");

        self.repository.save_match(NewScorecard::from_payload(
            match_id,
            telegram_id,
            match_name,
            game_mode,
            payload,
        ))
    }

    /// Soft-deletes one of the player's saved matches.
    #[instrument(skip(self))]
    pub fn delete_scorecard(&self, match_id: &str, telegram_id: i64) -> Result<bool, DbError> {
        debug!(match_id = %match_id, "Deleting scorecard");
        self.repository.soft_delete_match(match_id, telegram_id)
    }

    /// Records one player's innings for a match and updates their rollup,
    /// atomically.
    #[instrument(skip(self))]
    pub fn record_performance(
        &self,
        match_id: String,
        telegram_id: i64,
        runs_scored: i32,
        wickets_taken: i32,
        boundaries: i32,
        sixes: i32,
    ) -> Result<MatchPerformance, DbError> {
        debug!(
            match_id = %match_id,
            telegram_id = %telegram_id,
            runs = %runs_scored,
            "Recording performance"
        );

        let performance = NewMatchPerformance::new(
            match_id,
            telegram_id,
            runs_scored,
            wickets_taken,
            boundaries,
            sixes,
        );

        let recorded = self.repository.record_performance(performance)?;
        info!(performance_id = recorded.id(), "Performance recorded");
        Ok(recorded)
    }

    /// Records a finalized match outcome for a player.
    #[instrument(skip(self))]
    pub fn finalize_match(&self, telegram_id: i64, outcome: MatchOutcome) -> Result<(), DbError> {
        debug!(telegram_id = %telegram_id, outcome = ?outcome, "Finalizing match");
        self.repository.record_match_result(telegram_id, outcome)
    }

    /// Returns a player's statistics rollup, if registered.
    #[instrument(skip(self))]
    pub fn get_stats(&self, telegram_id: i64) -> Result<Option<PlayerStats>, DbError> {
        debug!(telegram_id = %telegram_id, "Getting player stats");
        self.repository.get_player_stats(telegram_id)
    }

    /// Returns the top players by total runs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, DbError> {
        debug!(limit = %limit, "Getting leaderboard");
        self.repository.leaderboard(limit)
    }

    /// Returns a player's recent performances with their scorecards,
    /// newest first.
    #[instrument(skip(self))]
    pub fn get_history(
        &self,
        telegram_id: i64,
        limit: i64,
    ) -> Result<Vec<(MatchPerformance, Scorecard)>, DbError> {
        debug!(telegram_id = %telegram_id, "Getting match history");
        self.repository.match_history(telegram_id, limit)
    }

    /// Returns a player's live saved matches, newest first.
    #[instrument(skip(self))]
    pub fn get_matches(&self, telegram_id: i64, limit: i64) -> Result<Vec<Scorecard>, DbError> {
        debug!(telegram_id = %telegram_id, "Getting saved matches");
        self.repository.get_user_matches(telegram_id, limit)
    }
}

/// Generates a unique match id in the `M<unix-seconds>_<suffix>` form the
/// scorecard store has always used.
fn generate_match_id() -> String {
    let now = chrono::Utc::now();
    format!(
        "M{}_{:04}",
        now.timestamp(),
        now.timestamp_subsec_nanos() % 10_000
    )
}
