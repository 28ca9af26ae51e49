//! Test support: in-memory SQLite stores with the fixture schema applied, and
//! server error responses for exercising error classification.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

use sqlx::error::{DatabaseError, ErrorKind};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::ConnectOptions;

use crate::error::{Result, StoreError};
use crate::store::Store;

/// Department / role / employee tables in the SQLite dialect
pub const SCHEMA: &str = include_str!("../tests/fixtures/schema.sql");

/// Fresh private in-memory database with [`SCHEMA`] applied
pub async fn memory_store() -> Result<Store> {
    let mut conn = SqliteConnectOptions::from_str("sqlite::memory:")?
        .foreign_keys(true)
        .connect()
        .await?;
    sqlx::raw_sql(SCHEMA).execute(&mut conn).await?;
    Ok(Store::Sqlite(conn))
}

/// Error response carrying only a code and a message
#[derive(Debug)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl StdError for ErrorResponse {}

impl DatabaseError for ErrorResponse {
    fn message(&self) -> &str {
        self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// What the driver returns when the server answers with `code`
pub fn database_error(code: &'static str, message: &'static str) -> StoreError {
    StoreError::Database(sqlx::Error::Database(Box::new(ErrorResponse { code, message })))
}
