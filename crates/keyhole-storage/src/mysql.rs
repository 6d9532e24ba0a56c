use async_trait::async_trait;
use jiff::Timestamp;
use keyhole_core::store::Result;
use keyhole_core::{InsertOutcome, LinkMapping, LinkStore, ShortCode, StoreError};
use sqlx::{MySqlPool, Row};

/// MySQL implementation of the `LinkStore` contract.
///
/// Short-code uniqueness is enforced by the unique index on
/// `links.short_code` (see `ddl/mysql/links.sql`); a unique violation on
/// insert is reported as [`InsertOutcome::Conflict`] rather than an
/// error. Rows are never updated or deleted.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_created_at(seconds: i64) -> Result<Timestamp> {
    Timestamp::from_second(seconds).map_err(|e| {
        StoreError::InvalidData(format!("invalid created_at timestamp '{}': {e}", seconds))
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StoreError::InvalidData(message),
        _ => StoreError::Query(message),
    }
}

fn row_to_mapping(row: &sqlx::mysql::MySqlRow) -> Result<LinkMapping> {
    let short_code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
    let long_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(LinkMapping {
        short_code: ShortCode::new_unchecked(short_code),
        long_url,
        created_at: parse_created_at(created_at_raw)?,
    })
}

#[async_trait]
impl LinkStore for MySqlStore {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<LinkMapping>> {
        let row = sqlx::query(
            r#"
            SELECT short_code, long_url, created_at
            FROM links
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_mapping).transpose()
    }

    async fn find_by_url(&self, long_url: &str) -> Result<Option<LinkMapping>> {
        let row = sqlx::query(
            r#"
            SELECT short_code, long_url, created_at
            FROM links
            WHERE long_url = ?
            ORDER BY created_at ASC, short_code ASC
            LIMIT 1
            "#,
        )
        .bind(long_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_mapping).transpose()
    }

    async fn insert_if_absent(&self, code: &ShortCode, long_url: &str) -> Result<InsertOutcome> {
        // Second-resolution timestamps, matching the column type.
        let created_at_secs = Timestamp::now().as_second();

        let result = sqlx::query(
            r#"
            INSERT INTO links (short_code, long_url, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(long_url)
        .bind(created_at_secs)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Created(LinkMapping {
                short_code: code.clone(),
                long_url: long_url.to_owned(),
                created_at: parse_created_at(created_at_secs)?,
            })),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
