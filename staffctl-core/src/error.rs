/// Structured error types for staffctl-core.
///
/// Uses `thiserror` so the CLI can classify failures (connection vs.
/// statement) while still wrapping them in `anyhow` for display.
use thiserror::Error;

/// Main error type for connector and query operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection settings could not be resolved
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Connection URL names a backend we cannot talk to
    #[error("Unsupported database URL scheme '{scheme}' (expected postgres:// or sqlite:)")]
    UnsupportedScheme { scheme: String },

    /// Driver-level failure (connect, statement, decode)
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A result row lacked a column the caller relies on
    #[error("Missing column '{column}' in result")]
    MissingColumn { column: String },

    /// A column held a value of an unexpected kind
    #[error("Unexpected value for column '{column}': expected {expected}, found {found}")]
    UnexpectedValue {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// A statement that must return a row returned none
    #[error("Statement returned no rows: {context}")]
    EmptyResult { context: String },
}

/// Result type alias for staffctl-core operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create an empty result error
    pub fn empty_result(context: impl Into<String>) -> Self {
        Self::EmptyResult {
            context: context.into(),
        }
    }

    /// True when the failure means the connection itself is gone or was
    /// never established. Statement failures (constraint violations, bad
    /// references, type mismatches) return false.
    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::Config { .. } | Self::UnsupportedScheme { .. } => true,
            Self::Database(sqlx::Error::Database(db)) => {
                db.code().is_some_and(|code| ends_session(&code))
            }
            Self::Database(err) => matches!(
                err,
                sqlx::Error::Configuration(_)
                    | sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::Protocol(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
            _ => false,
        }
    }
}

/// SQLSTATEs the server sends with the FATAL response that closes a session:
/// class 08 (connection exception) and 57P0x (admin shutdown, crash shutdown,
/// cannot connect now, database dropped, idle session timeout).
fn ends_session(sqlstate: &str) -> bool {
    sqlstate.starts_with("08") || sqlstate.starts_with("57P0")
}
