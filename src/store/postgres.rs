//! PostgreSQL implementation of the guestbook store.
//!
//! The backing table is created lazily: when a statement fails because the
//! table does not exist (SQLSTATE `42P01`), the store creates it and reports
//! [`StoreOutcome::SchemaProvisioned`]. The original statement is not
//! retried; the caller tells the client to try again.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{GuestbookStore, StoreBackend, StoreOutcome};
use crate::config::GuestbookConfig;
use crate::domain::{EntryId, GuestbookEntry, NewEntry};
use crate::error::GuestbookError;

/// Default table name.
pub const DEFAULT_TABLE: &str = "guestbook_entries";

/// Default number of entries returned by [`PostgresStore::list`].
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

/// Column list shared by every read. `created_at` is normalized so tables
/// created with a plain, nullable `TIMESTAMP` column decode as well.
const ENTRY_COLUMNS: &str =
    "id::BIGINT, name::TEXT, message, COALESCE(created_at::TIMESTAMPTZ, NOW())";

type EntryRow = (i64, String, String, DateTime<Utc>);

/// PostgreSQL-backed guestbook store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    table: String,
    list_limit: i64,
}

impl PostgresStore {
    /// Creates a store on the default table with the default listing cap.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: DEFAULT_TABLE.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    /// Creates a store on a named table.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Internal`] if `table` is not a plain
    /// identifier (ASCII letters, digits, underscores, not starting with a
    /// digit).
    pub fn with_table(pool: PgPool, table: &str, list_limit: i64) -> Result<Self, GuestbookError> {
        if !is_identifier(table) {
            return Err(GuestbookError::Internal(format!(
                "invalid table name: {table:?}"
            )));
        }
        Ok(Self {
            pool,
            table: table.to_string(),
            list_limit: list_limit.max(1),
        })
    }

    /// Builds a lazily-connecting pool from configuration.
    ///
    /// No connection is opened until the first query, so the service starts
    /// even while the database is still coming up.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Storage`] if the database URL cannot be
    /// parsed, or [`GuestbookError::Internal`] for an invalid table name.
    pub fn connect_lazy(config: &GuestbookConfig) -> Result<Self, GuestbookError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect_lazy(&config.database_url)?;
        Self::with_table(pool, &config.table, config.list_limit)
    }

    /// Table this store reads and writes.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Creates the backing table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::SchemaSetup`] if the statement fails.
    pub async fn provision_schema(&self) -> Result<(), GuestbookError> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (\
                id SERIAL PRIMARY KEY, \
                name VARCHAR(50) NOT NULL, \
                message TEXT NOT NULL, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()\
             )",
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await.map_err(|e| {
            tracing::error!(table = %self.table, error = %e, "failed to create guestbook table");
            GuestbookError::SchemaSetup(e.to_string())
        })?;
        tracing::info!(table = %self.table, "guestbook table created");
        Ok(())
    }

    async fn fetch_recent(&self) -> Result<Vec<EntryRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM {} \
             ORDER BY created_at DESC NULLS LAST, id DESC LIMIT $1",
            self.table
        );
        sqlx::query_as::<_, EntryRow>(&sql)
            .bind(self.list_limit)
            .fetch_all(&self.pool)
            .await
    }

    async fn insert(&self, name: &str, message: &str) -> Result<EntryRow, sqlx::Error> {
        let sql = format!(
            "INSERT INTO {} (name, message, created_at) VALUES ($1, $2, NOW()) \
             RETURNING {ENTRY_COLUMNS}",
            self.table
        );
        sqlx::query_as::<_, EntryRow>(&sql)
            .bind(name)
            .bind(message)
            .fetch_one(&self.pool)
            .await
    }

    /// Maps a failed statement to an outcome, provisioning the schema if the
    /// table was missing.
    async fn recover<T>(&self, err: sqlx::Error) -> Result<StoreOutcome<T>, GuestbookError> {
        if is_undefined_table(&err) {
            tracing::warn!(table = %self.table, "guestbook table missing; creating it");
            self.provision_schema().await?;
            return Ok(StoreOutcome::SchemaProvisioned);
        }
        Err(err.into())
    }
}

#[async_trait]
impl GuestbookStore for PostgresStore {
    async fn list(&self) -> Result<StoreOutcome<Vec<GuestbookEntry>>, GuestbookError> {
        match self.fetch_recent().await {
            Ok(rows) => Ok(StoreOutcome::Ready(rows.into_iter().map(into_entry).collect())),
            Err(err) => self.recover(err).await,
        }
    }

    async fn create(&self, entry: NewEntry) -> Result<StoreOutcome<GuestbookEntry>, GuestbookError> {
        match self.insert(entry.name(), entry.message()).await {
            Ok(row) => Ok(StoreOutcome::Ready(into_entry(row))),
            Err(err) => self.recover(err).await,
        }
    }

    async fn ping(&self) -> Result<(), GuestbookError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Postgres
    }
}

fn into_entry((id, name, message, created_at): EntryRow) -> GuestbookEntry {
    GuestbookEntry {
        id: EntryId::new(id),
        name,
        message,
        created_at,
    }
}

fn is_undefined_table(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_error) if db_error.code().as_deref() == Some(UNDEFINED_TABLE)
    )
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name.len() <= 63
}
