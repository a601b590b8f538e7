//! Database repository for scorecards, performances, and player statistics.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::rollup::MilestoneBand;
use crate::db::{
    DbError, DbErrorKind, LeaderboardEntry, MatchOutcome, MatchPerformance, NewMatchPerformance,
    NewScorecard, NewUser, PlayerStats, Scorecard, User, schema,
};

/// Embedded schema migrations, applied via [`ScorecardRepository::run_migrations`].
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

diesel::define_sql_function! {
    /// SQLite scalar `max(x, y)`, used for the running best-score maxima.
    #[sql_name = "max"]
    fn scalar_max(a: diesel::sql_types::Integer, b: diesel::sql_types::Integer) -> diesel::sql_types::Integer;
}

/// Database repository for the cricket scorecard store.
///
/// Every operation opens its own connection; writes that must be atomic run
/// inside an immediate transaction so the write lock is taken up front.
#[derive(Debug, Clone)]
pub struct ScorecardRepository {
    db_path: String,
}

impl ScorecardRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// Use `":memory:"` for an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating ScorecardRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection with foreign keys enforced and a
    /// busy timeout so concurrent writers queue instead of failing.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })?;
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
        Ok(conn)
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        debug!("Running pending migrations");
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Other, format!("Migration error: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Registers a user, provisioning their zeroed statistics row in the
    /// same transaction.
    ///
    /// Re-registering an existing user updates the display fields and
    /// refreshes `last_active`; the statistics row is left untouched. This
    /// guarantees a `player_stats` row exists before any performance can be
    /// recorded for the user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn register_user(
        &self,
        telegram_id: i64,
        username: Option<String>,
        first_name: Option<String>,
    ) -> Result<User, DbError> {
        debug!(telegram_id = %telegram_id, "Registering user");
        let mut conn = self.connection()?;

        let user = conn.immediate_transaction::<_, DbError, _>(|conn| {
            let user = diesel::insert_into(schema::users::table)
                .values(&NewUser::new(telegram_id, username, first_name))
                .on_conflict(schema::users::telegram_id)
                .do_update()
                .set((
                    schema::users::username.eq(excluded(schema::users::username)),
                    schema::users::first_name.eq(excluded(schema::users::first_name)),
                    schema::users::last_active.eq(diesel::dsl::now),
                ))
                .returning(User::as_returning())
                .get_result(conn)?;

            diesel::insert_into(schema::player_stats::table)
                .values(schema::player_stats::telegram_id.eq(telegram_id))
                .on_conflict_do_nothing()
                .execute(conn)?;

            Ok(user)
        })?;

        info!(telegram_id = user.telegram_id(), "User registered");
        Ok(user)
    }

    /// Gets a user by Telegram id. Returns `None` if not registered.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user(&self, telegram_id: i64) -> Result<Option<User>, DbError> {
        debug!(telegram_id = %telegram_id, "Looking up user");
        let mut conn = self.connection()?;

        let user = schema::users::table
            .find(telegram_id)
            .first::<User>(&mut conn)
            .optional()?;

        Ok(user)
    }

    /// Saves a match record, updating the payload, name, and mode if the
    /// match id already exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the owning user does not exist or a database
    /// error occurs.
    #[instrument(skip(self, scorecard), fields(match_id = %scorecard.match_id(), telegram_id = scorecard.telegram_id()))]
    pub fn save_match(&self, scorecard: NewScorecard) -> Result<Scorecard, DbError> {
        debug!("Saving match");
        let mut conn = self.connection()?;

        let saved = diesel::insert_into(schema::scorecards::table)
            .values(&scorecard)
            .on_conflict(schema::scorecards::match_id)
            .do_update()
            .set((
                schema::scorecards::match_data.eq(excluded(schema::scorecards::match_data)),
                schema::scorecards::match_name.eq(excluded(schema::scorecards::match_name)),
                schema::scorecards::game_mode.eq(excluded(schema::scorecards::game_mode)),
            ))
            .returning(Scorecard::as_returning())
            .get_result(&mut conn)?;

        info!(match_id = %saved.match_id(), "Match saved");
        Ok(saved)
    }

    /// Soft-deletes a match owned by the given user.
    ///
    /// Returns `true` if a match was marked deleted, `false` if no live
    /// match with that id belongs to the user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn soft_delete_match(&self, match_id: &str, telegram_id: i64) -> Result<bool, DbError> {
        debug!(match_id = %match_id, telegram_id = %telegram_id, "Soft-deleting match");
        let mut conn = self.connection()?;

        let affected = diesel::update(
            schema::scorecards::table
                .filter(schema::scorecards::match_id.eq(match_id))
                .filter(schema::scorecards::telegram_id.eq(telegram_id))
                .filter(schema::scorecards::deleted.eq(false)),
        )
        .set(schema::scorecards::deleted.eq(true))
        .execute(&mut conn)?;

        info!(match_id = %match_id, deleted = affected > 0, "Soft delete finished");
        Ok(affected > 0)
    }

    /// Gets a user's live (non-deleted) matches, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_matches(&self, telegram_id: i64, limit: i64) -> Result<Vec<Scorecard>, DbError> {
        debug!(telegram_id = %telegram_id, limit = %limit, "Loading user matches");
        let mut conn = self.connection()?;

        let matches = schema::scorecards::table
            .filter(schema::scorecards::telegram_id.eq(telegram_id))
            .filter(schema::scorecards::deleted.eq(false))
            .order(schema::scorecards::created_at.desc())
            .limit(limit)
            .load::<Scorecard>(&mut conn)?;

        info!(telegram_id = %telegram_id, count = matches.len(), "User matches loaded");
        Ok(matches)
    }

    /// Records a performance and folds it into the player's statistics
    /// rollup, atomically.
    ///
    /// The insert and the aggregation run in one immediate transaction: both
    /// commit or both roll back, so no partial state is observable. The
    /// rollup update is a single statement with column arithmetic, so
    /// concurrent inserts for the same player serialize on the row write and
    /// lose no increments.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] with kind [`DbErrorKind::Integrity`] if the match
    /// or user does not exist, and kind [`DbErrorKind::MissingStats`] if the
    /// player has no statistics row; in both cases nothing is committed.
    #[instrument(
        skip(self, performance),
        fields(
            match_id = %performance.match_id(),
            telegram_id = performance.telegram_id(),
            runs = performance.runs_scored(),
            wickets = performance.wickets_taken(),
        )
    )]
    pub fn record_performance(
        &self,
        performance: NewMatchPerformance,
    ) -> Result<MatchPerformance, DbError> {
        debug!("Recording performance");
        let mut conn = self.connection()?;

        let player = *performance.telegram_id();
        let runs = *performance.runs_scored();
        let wickets = *performance.wickets_taken();
        let boundaries = *performance.boundaries();
        let sixes = *performance.sixes();
        let band = MilestoneBand::classify(runs);

        let recorded = conn.immediate_transaction::<_, DbError, _>(|conn| {
            let recorded = diesel::insert_into(schema::match_performances::table)
                .values(&performance)
                .returning(MatchPerformance::as_returning())
                .get_result(conn)?;

            let affected = diesel::update(schema::player_stats::table.find(player))
                .set((
                    schema::player_stats::total_runs
                        .eq(schema::player_stats::total_runs + runs),
                    schema::player_stats::total_wickets
                        .eq(schema::player_stats::total_wickets + wickets),
                    schema::player_stats::total_boundaries
                        .eq(schema::player_stats::total_boundaries + boundaries),
                    schema::player_stats::total_sixes
                        .eq(schema::player_stats::total_sixes + sixes),
                    schema::player_stats::fifties
                        .eq(schema::player_stats::fifties + band.fifty_increment()),
                    schema::player_stats::hundreds
                        .eq(schema::player_stats::hundreds + band.hundred_increment()),
                    schema::player_stats::best_score
                        .eq(scalar_max(schema::player_stats::best_score, runs)),
                    schema::player_stats::best_wickets
                        .eq(scalar_max(schema::player_stats::best_wickets, wickets)),
                    schema::player_stats::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;

            // A zero-row update would silently desynchronize the rollup;
            // fail the whole transaction instead.
            if affected == 0 {
                return Err(DbError::missing_stats(player));
            }

            Ok(recorded)
        })?;

        info!(
            performance_id = recorded.id(),
            telegram_id = %player,
            band = ?band,
            "Performance recorded and stats updated"
        );
        Ok(recorded)
    }

    /// Folds a finalized match result into the player's statistics.
    ///
    /// This is the match-level aggregation step, separate from performance
    /// recording: `total_matches` always increments, `total_wins` only on a
    /// win.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] with kind [`DbErrorKind::MissingStats`] if the
    /// player has no statistics row.
    #[instrument(skip(self))]
    pub fn record_match_result(
        &self,
        telegram_id: i64,
        outcome: MatchOutcome,
    ) -> Result<(), DbError> {
        debug!(telegram_id = %telegram_id, outcome = ?outcome, "Recording match result");
        let mut conn = self.connection()?;

        let wins_increment: i32 = if outcome.is_win() { 1 } else { 0 };

        let affected = diesel::update(schema::player_stats::table.find(telegram_id))
            .set((
                schema::player_stats::total_matches
                    .eq(schema::player_stats::total_matches + 1),
                schema::player_stats::total_wins
                    .eq(schema::player_stats::total_wins + wins_increment),
                schema::player_stats::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(DbError::missing_stats(telegram_id));
        }

        info!(telegram_id = %telegram_id, outcome = ?outcome, "Match result recorded");
        Ok(())
    }

    /// Gets a player's statistics rollup. Returns `None` for unregistered
    /// players.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_player_stats(&self, telegram_id: i64) -> Result<Option<PlayerStats>, DbError> {
        debug!(telegram_id = %telegram_id, "Loading player stats");
        let mut conn = self.connection()?;

        let stats = schema::player_stats::table
            .find(telegram_id)
            .first::<PlayerStats>(&mut conn)
            .optional()?;

        Ok(stats)
    }

    /// Gets the top players by total runs, with display names.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, limit: i64) -> Result<Vec<LeaderboardEntry>, DbError> {
        debug!(limit = %limit, "Loading leaderboard");
        let mut conn = self.connection()?;

        let leaders = schema::player_stats::table
            .inner_join(schema::users::table)
            .order(schema::player_stats::total_runs.desc())
            .limit(limit)
            .select((
                schema::users::first_name,
                schema::player_stats::total_runs,
                schema::player_stats::total_wickets,
                schema::player_stats::total_wins,
            ))
            .load::<LeaderboardEntry>(&mut conn)?;

        info!(count = leaders.len(), "Leaderboard loaded");
        Ok(leaders)
    }

    /// Gets a player's recent performances joined to their live scorecards,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn match_history(
        &self,
        telegram_id: i64,
        limit: i64,
    ) -> Result<Vec<(MatchPerformance, Scorecard)>, DbError> {
        debug!(telegram_id = %telegram_id, limit = %limit, "Loading match history");
        let mut conn = self.connection()?;

        let history = schema::match_performances::table
            .inner_join(
                schema::scorecards::table
                    .on(schema::match_performances::match_id.eq(schema::scorecards::match_id)),
            )
            .filter(schema::match_performances::telegram_id.eq(telegram_id))
            .filter(schema::scorecards::deleted.eq(false))
            .order(schema::scorecards::created_at.desc())
            .limit(limit)
            .select((MatchPerformance::as_select(), Scorecard::as_select()))
            .load::<(MatchPerformance, Scorecard)>(&mut conn)?;

        info!(telegram_id = %telegram_id, count = history.len(), "Match history loaded");
        Ok(history)
    }

    /// Authorizes a group chat. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn authorize_group(&self, chat_id: i64) -> Result<(), DbError> {
        debug!(chat_id = %chat_id, "Authorizing group");
        let mut conn = self.connection()?;

        diesel::insert_into(schema::authorized_groups::table)
            .values(schema::authorized_groups::chat_id.eq(chat_id))
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        info!(chat_id = %chat_id, "Group authorized");
        Ok(())
    }

    /// Revokes a group's authorization. Returns `true` if the group was
    /// authorized.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn revoke_group(&self, chat_id: i64) -> Result<bool, DbError> {
        debug!(chat_id = %chat_id, "Revoking group");
        let mut conn = self.connection()?;

        let affected = diesel::delete(schema::authorized_groups::table.find(chat_id))
            .execute(&mut conn)?;

        info!(chat_id = %chat_id, revoked = affected > 0, "Group revocation finished");
        Ok(affected > 0)
    }

    /// Whether a group chat is authorized.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn is_group_authorized(&self, chat_id: i64) -> Result<bool, DbError> {
        let mut conn = self.connection()?;

        let count: i64 = schema::authorized_groups::table
            .find(chat_id)
            .count()
            .get_result(&mut conn)?;

        Ok(count > 0)
    }

    /// Grants admin rights to a user. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn add_admin(&self, telegram_id: i64) -> Result<(), DbError> {
        debug!(telegram_id = %telegram_id, "Adding admin");
        let mut conn = self.connection()?;

        diesel::insert_into(schema::admins::table)
            .values(schema::admins::telegram_id.eq(telegram_id))
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        info!(telegram_id = %telegram_id, "Admin added");
        Ok(())
    }

    /// Whether a user has admin rights.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn is_admin(&self, telegram_id: i64) -> Result<bool, DbError> {
        let mut conn = self.connection()?;

        let count: i64 = schema::admins::table
            .find(telegram_id)
            .count()
            .get_result(&mut conn)?;

        Ok(count > 0)
    }
}
