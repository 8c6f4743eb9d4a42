// File: nyuxstore-core/src/repositories/sqlite/redemption_keys.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use nyuxstore_common::error::Error;
use nyuxstore_common::models::RedemptionKey;
use nyuxstore_common::traits::repository_traits::RedemptionKeyRepository;

#[derive(Clone)]
pub struct SqliteRedemptionKeyRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRedemptionKeyRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

fn row_to_key(r: &SqliteRow) -> Result<RedemptionKey, Error> {
    let id_str: String = r.try_get("key_id")?;
    Ok(RedemptionKey {
        key_id: Uuid::parse_str(&id_str).map_err(|e| Error::Parse(e.to_string()))?,
        key_code: r.try_get("key_code")?,
        duration: r.try_get("duration")?,
        role_name: r.try_get("role_name")?,
        issued_by: r.try_get("issued_by")?,
        created_at: r.try_get("created_at")?,
        redeemed_by: r.try_get("redeemed_by")?,
        redeemed_at: r.try_get("redeemed_at")?,
        is_active: r.try_get("is_active")?,
    })
}

#[async_trait]
impl RedemptionKeyRepository for SqliteRedemptionKeyRepository {
    async fn create_key(&self, key: &RedemptionKey) -> Result<(), Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO redemption_keys (
                key_id,
                key_code,
                duration,
                role_name,
                issued_by,
                created_at,
                redeemed_by,
                redeemed_at,
                is_active
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
            .bind(key.key_id.to_string())
            .bind(&key.key_code)
            .bind(&key.duration)
            .bind(&key.role_name)
            .bind(&key.issued_by)
            .bind(key.created_at)
            .bind(&key.redeemed_by)
            .bind(key.redeemed_at)
            .bind(key.is_active)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::DuplicateKeyCode(key.key_code.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_code(&self, key_code: &str) -> Result<Option<RedemptionKey>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT
                key_id,
                key_code,
                duration,
                role_name,
                issued_by,
                created_at,
                redeemed_by,
                redeemed_at,
                is_active
            FROM redemption_keys
            WHERE key_code = ?
            "#,
        )
            .bind(key_code)
            .fetch_optional(&self.pool)
            .await?;

        row_opt.map(|r| row_to_key(&r)).transpose()
    }

    async fn claim(
        &self,
        key_code: &str,
        user_id: &str,
        redeemed_at: DateTime<Utc>,
    ) -> Result<Option<RedemptionKey>, Error> {
        // The check-and-set must be one statement: the WHERE clause only
        // matches a still-unclaimed active key, so of two concurrent claims
        // exactly one sees rows_affected == 1.
        let updated = sqlx::query(
            r#"
            UPDATE redemption_keys
            SET redeemed_by = ?, redeemed_at = ?
            WHERE key_code = ? AND is_active = 1 AND redeemed_by IS NULL
            "#,
        )
            .bind(user_id)
            .bind(redeemed_at)
            .bind(key_code)
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_code(key_code).await
    }

    async fn count_active(&self) -> Result<i64, Error> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM redemption_keys WHERE is_active = 1 AND redeemed_by IS NULL",
        )
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}
