//! PostgreSQL implementation of the record store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::RecordStore;
use crate::config::DatabaseConfig;
use crate::domain::{NewQrRecord, QrRecord, RecordId, UserId};
use crate::error::LedgerError;

/// Columns selected for every record read, in [`RecordRow`] order.
///
/// Tables created by older deployments allow NULL in the text and
/// timestamp columns, so those are coalesced on the way out.
const RECORD_COLUMNS: &str = r#"id,
    COALESCE(created_at, to_timestamp(0)),
    COALESCE(updated_at, to_timestamp(0)),
    deleted_at,
    COALESCE(user_id, ''),
    COALESCE(url, ''),
    COALESCE("date", ''),
    COALESCE(image, '')"#;

/// Predicate shared by every read and by the soft-delete update.
const ACTIVE_ONLY: &str = "deleted_at IS NULL";

/// Idempotent statements run at every startup to bring `qr_codes` in
/// line with [`QrRecord`].
const SCHEMA_STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS qr_codes (
        id BIGSERIAL PRIMARY KEY,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        deleted_at TIMESTAMPTZ,
        user_id TEXT NOT NULL DEFAULT '',
        url TEXT NOT NULL DEFAULT '',
        "date" TEXT NOT NULL DEFAULT '',
        image TEXT NOT NULL DEFAULT ''
    )"#,
    "ALTER TABLE qr_codes ALTER COLUMN id TYPE BIGINT",
    "ALTER SEQUENCE IF EXISTS qr_codes_id_seq AS BIGINT",
    "ALTER TABLE qr_codes ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE qr_codes ADD COLUMN IF NOT EXISTS updated_at TIMESTAMPTZ NOT NULL DEFAULT now()",
    "ALTER TABLE qr_codes ADD COLUMN IF NOT EXISTS deleted_at TIMESTAMPTZ",
    "ALTER TABLE qr_codes ADD COLUMN IF NOT EXISTS user_id TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE qr_codes ADD COLUMN IF NOT EXISTS url TEXT NOT NULL DEFAULT ''",
    r#"ALTER TABLE qr_codes ADD COLUMN IF NOT EXISTS "date" TEXT NOT NULL DEFAULT ''"#,
    "ALTER TABLE qr_codes ADD COLUMN IF NOT EXISTS image TEXT NOT NULL DEFAULT ''",
    "CREATE INDEX IF NOT EXISTS idx_qr_codes_deleted_at ON qr_codes (deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_qr_codes_user_id ON qr_codes (user_id)",
];

type RecordRow = (
    i64,
    DateTime<Utc>,
    DateTime<Utc>,
    Option<DateTime<Utc>>,
    String,
    String,
    String,
    String,
);

fn into_record(
    (id, created_at, updated_at, deleted_at, user_id, url, date, image): RecordRow,
) -> QrRecord {
    QrRecord {
        id: RecordId::new(id),
        created_at,
        updated_at,
        deleted_at,
        user_id: UserId::from(user_id),
        url,
        date,
        image,
    }
}

/// PostgreSQL-backed record store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wraps an existing connection pool. Does not touch the schema.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from `config` and ensures the schema.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the database is
    /// unreachable, rejects the credentials, or the schema statements
    /// fail.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, LedgerError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(config.connect_options())
            .await?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Creates or extends the `qr_codes` table and its indexes.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), LedgerError> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!("qr_codes schema ensured");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn insert(
        &self,
        record: NewQrRecord,
        now: DateTime<Utc>,
    ) -> Result<QrRecord, LedgerError> {
        let sql = format!(
            r#"INSERT INTO qr_codes (created_at, updated_at, user_id, url, "date", image)
               VALUES ($1, $1, $2, $3, $4, $5) RETURNING {RECORD_COLUMNS}"#
        );
        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(now)
            .bind(record.user_id.as_str())
            .bind(&record.url)
            .bind(&record.date)
            .bind(&record.image)
            .fetch_one(&self.pool)
            .await?;

        Ok(into_record(row))
    }

    async fn list_active(&self, user_id: &UserId) -> Result<Vec<QrRecord>, LedgerError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM qr_codes \
             WHERE user_id = $1 AND {ACTIVE_ONLY} ORDER BY id ASC"
        );
        let rows = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn find_active(
        &self,
        user_id: &UserId,
        id: RecordId,
    ) -> Result<Option<QrRecord>, LedgerError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM qr_codes \
             WHERE user_id = $1 AND id = $2 AND {ACTIVE_ONLY} LIMIT 1"
        );
        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(user_id.as_str())
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(into_record))
    }

    async fn soft_delete(&self, id: RecordId, now: DateTime<Utc>) -> Result<bool, LedgerError> {
        let sql = format!("UPDATE qr_codes SET deleted_at = $2 WHERE id = $1 AND {ACTIVE_ONLY}");
        let result = sqlx::query(&sql)
            .bind(id.get())
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
