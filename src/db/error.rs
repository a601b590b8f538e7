//! Database error types.

use derive_more::{Display, Error};
use diesel::result::DatabaseErrorKind;

/// Classification of database failures.
///
/// Integrity violations abort the surrounding transaction, missing-stats
/// conditions indicate a player whose statistics row was never provisioned,
/// and everything else is surfaced as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DbErrorKind {
    /// Failed to establish or configure a connection.
    #[display("connection")]
    Connection,
    /// Referential-integrity or uniqueness violation.
    #[display("integrity")]
    Integrity,
    /// No `player_stats` row exists for the player being updated.
    #[display("missing stats")]
    MissingStats,
    /// Any other database failure.
    #[display("database")]
    Other,
}

/// Database error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Error classification.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new database error with caller location tracking.
    #[track_caller]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates a missing-stats error for the given player.
    #[track_caller]
    pub fn missing_stats(telegram_id: i64) -> Self {
        Self::new(
            DbErrorKind::MissingStats,
            format!("No player_stats row for player {telegram_id}"),
        )
    }

    /// Returns the error classification.
    pub fn kind(&self) -> DbErrorKind {
        self.kind
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        let kind = match &err {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::UniqueViolation,
                _,
            ) => DbErrorKind::Integrity,
            _ => DbErrorKind::Other,
        };
        Self::new(kind, format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, format!("Connection error: {}", err))
    }
}
