//! Data store connector: one long-lived connection, no pool.
//!
//! The program issues one statement at a time from a single logical thread of
//! control, so a bare sqlx connection is enough. PostgreSQL is the production
//! backend; SQLite serves local files and the test-suite.

use std::str::FromStr;

use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection, PgRow, Postgres};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row, TypeInfo, ValueRef};
use tracing::debug;

use crate::config::{ConnectTarget, PgParams};
use crate::error::{Result, StoreError};
use crate::value::{ResultSet, Value};

/// Single database connection handle
pub enum Store {
    Postgres(PgConnection),
    Sqlite(SqliteConnection),
}

impl Store {
    /// Open the connection described by `target`.
    pub async fn connect(target: &ConnectTarget) -> Result<Self> {
        match target {
            ConnectTarget::Url(url) => Self::connect_url(url).await,
            ConnectTarget::Postgres(params) => {
                let conn = pg_options(params).connect().await?;
                Ok(Self::Postgres(conn))
            }
        }
    }

    /// Open a connection from a URL; the scheme picks the backend.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::connect_url("sqlite::memory:").await?;
    /// ```
    pub async fn connect_url(url: &str) -> Result<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => {
                let conn = PgConnectOptions::from_str(url)?.connect().await?;
                Ok(Self::Postgres(conn))
            }
            "sqlite" => {
                let conn = SqliteConnectOptions::from_str(url)?
                    .foreign_keys(true)
                    .connect()
                    .await?;
                Ok(Self::Sqlite(conn))
            }
            other => Err(StoreError::UnsupportedScheme {
                scheme: other.to_owned(),
            }),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Sqlite(_) => "sqlite",
        }
    }

    /// Run one statement with positional `$n` parameters and collect every
    /// returned row.
    pub async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ResultSet> {
        let set = match self {
            Self::Postgres(conn) => {
                let rows = bind_pg(sqlx::query(sql), params)
                    .fetch_all(&mut *conn)
                    .await?;
                collect_rows(&rows, decode_pg)?
            }
            Self::Sqlite(conn) => {
                let rows = bind_sqlite(sqlx::query(sql), params)
                    .fetch_all(&mut *conn)
                    .await?;
                collect_rows(&rows, decode_sqlite)?
            }
        };

        debug!(backend = self.backend(), rows = set.len(), "statement executed");
        Ok(set)
    }

    /// Gracefully terminate the connection.
    pub async fn close(self) -> Result<()> {
        match self {
            Self::Postgres(conn) => conn.close().await?,
            Self::Sqlite(conn) => conn.close().await?,
        }
        debug!("connection closed");
        Ok(())
    }
}

fn pg_options(params: &PgParams) -> PgConnectOptions {
    let mut options = PgConnectOptions::new()
        .host(&params.host)
        .port(params.port);
    if let Some(user) = &params.user {
        options = options.username(user);
    }
    if let Some(password) = &params.password {
        options = options.password(password);
    }
    if let Some(database) = &params.database {
        options = options.database(database);
    }
    options
}

fn bind_pg<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [Value],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<i64>),
            Value::Bool(b) => query.bind(*b),
            Value::Int(v) => query.bind(*v),
            Value::Float(v) => query.bind(*v),
            Value::Decimal(d) => query.bind(*d),
            Value::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

fn bind_sqlite<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<i64>),
            Value::Bool(b) => query.bind(*b),
            Value::Int(v) => query.bind(*v),
            Value::Float(v) => query.bind(*v),
            // Canonical text; NUMERIC affinity stores it as an exact number
            Value::Decimal(d) => query.bind(d.to_string()),
            Value::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

fn collect_rows<R: Row>(
    rows: &[R],
    decode: fn(&R, usize) -> std::result::Result<Value, sqlx::Error>,
) -> Result<ResultSet> {
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.columns().iter().map(|c| c.name().to_owned()).collect())
        .unwrap_or_default();

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let values = (0..row.len())
            .map(|idx| decode(row, idx))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        out.push(values);
    }

    Ok(ResultSet { columns, rows: out })
}

fn decode_pg(row: &PgRow, idx: usize) -> std::result::Result<Value, sqlx::Error> {
    let type_name = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_owned()
    };

    let value = match type_name.as_str() {
        "INT2" => Value::Int(row.try_get::<i16, _>(idx)?.into()),
        "INT4" => Value::Int(row.try_get::<i32, _>(idx)?.into()),
        "INT8" => Value::Int(row.try_get(idx)?),
        "FLOAT4" => Value::Float(row.try_get::<f32, _>(idx)?.into()),
        "FLOAT8" => Value::Float(row.try_get(idx)?),
        "NUMERIC" => Value::Decimal(row.try_get(idx)?),
        "BOOL" => Value::Bool(row.try_get(idx)?),
        _ => Value::Text(row.try_get(idx)?),
    };
    Ok(value)
}

// SQLite reports the storage class of each value, not the declared column type
fn decode_sqlite(row: &SqliteRow, idx: usize) -> std::result::Result<Value, sqlx::Error> {
    let type_name = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    let value = match type_name.as_str() {
        "INTEGER" | "BIGINT" | "INT8" | "BOOLEAN" => Value::Int(row.try_get_unchecked(idx)?),
        "REAL" | "FLOAT" | "DOUBLE" => Value::Float(row.try_get_unchecked(idx)?),
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get_unchecked(idx)?;
            Value::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => Value::Text(row.try_get_unchecked(idx)?),
    };
    Ok(value)
}
