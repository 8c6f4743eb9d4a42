// File: nyuxstore-core/src/repositories/sqlite/bot_config.rs

use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};

use nyuxstore_common::error::Error;
use nyuxstore_common::traits::repository_traits::BotConfigRepository;

#[derive(Clone)]
pub struct SqliteBotConfigRepository {
    pool: Pool<Sqlite>,
}

impl SqliteBotConfigRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BotConfigRepository for SqliteBotConfigRepository {
    async fn set_value(&self, config_key: &str, config_value: &str) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO bot_config (config_key, config_value)
            VALUES (?, ?)
            ON CONFLICT (config_key)
            DO UPDATE SET config_value = excluded.config_value
            "#,
        )
            .bind(config_key)
            .bind(config_value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_value(&self, config_key: &str) -> Result<Option<String>, Error> {
        let row = sqlx::query(
            r#"
            SELECT config_value
            FROM bot_config
            WHERE config_key = ?
            "#,
        )
            .bind(config_key)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row {
            Ok(r.try_get("config_value")?)
        } else {
            Ok(None)
        }
    }

    async fn list_all(&self) -> Result<Vec<(String, String)>, Error> {
        let rows = sqlx::query(r#"SELECT config_key, config_value FROM bot_config"#)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let k: String = row.try_get("config_key")?;
            let v: Option<String> = row.try_get("config_value")?;
            out.push((k, v.unwrap_or_default()));
        }
        Ok(out)
    }

    async fn delete_value(&self, config_key: &str) -> Result<(), Error> {
        sqlx::query(
            r#"
            DELETE FROM bot_config
            WHERE config_key = ?
            "#,
        )
            .bind(config_key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
