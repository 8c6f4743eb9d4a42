// File: nyuxstore-core/src/repositories/sqlite/accounts.rs

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use nyuxstore_common::error::Error;
use nyuxstore_common::models::{Account, AccountStatus};
use nyuxstore_common::traits::repository_traits::AccountRepository;

#[derive(Clone)]
pub struct SqliteAccountRepository {
    pool: Pool<Sqlite>,
}

impl SqliteAccountRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

fn row_to_account(r: &SqliteRow) -> Result<Account, Error> {
    let id_str: String = r.try_get("account_id")?;
    let status_str: String = r.try_get("status")?;
    Ok(Account {
        account_id: Uuid::parse_str(&id_str).map_err(|e| Error::Parse(e.to_string()))?,
        game: r.try_get("game")?,
        category: r.try_get("category")?,
        login: r.try_get("login")?,
        password: r.try_get("password")?,
        created_at: r.try_get("created_at")?,
        used_by: r.try_get("used_by")?,
        used_at: r.try_get("used_at")?,
        status: AccountStatus::from_str(&status_str).map_err(Error::Parse)?,
    })
}

#[async_trait]
impl AccountRepository for SqliteAccountRepository {
    async fn insert_account(&self, account: &Account) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                game,
                category,
                login,
                password,
                created_at,
                used_by,
                used_at,
                status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
            .bind(account.account_id.to_string())
            .bind(&account.game)
            .bind(&account.category)
            .bind(&account.login)
            .bind(&account.password)
            .bind(account.created_at)
            .bind(&account.used_by)
            .bind(account.used_at)
            .bind(account.status.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_account(&self, account_id: Uuid) -> Result<Option<Account>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT
                account_id,
                game,
                category,
                login,
                password,
                created_at,
                used_by,
                used_at,
                status
            FROM accounts
            WHERE account_id = ?
            "#,
        )
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row_opt.map(|r| row_to_account(&r)).transpose()
    }

    async fn find_available_by_game(&self, fragment: &str) -> Result<Option<Account>, Error> {
        let row_opt = sqlx::query(
            r#"
            SELECT
                account_id,
                game,
                category,
                login,
                password,
                created_at,
                used_by,
                used_at,
                status
            FROM accounts
            WHERE LOWER(game) LIKE '%' || LOWER(?) || '%'
              AND status = 'available'
            LIMIT 1
            "#,
        )
            .bind(fragment)
            .fetch_optional(&self.pool)
            .await?;

        row_opt.map(|r| row_to_account(&r)).transpose()
    }

    async fn mark_used(
        &self,
        account_id: Uuid,
        user_id: &str,
        used_at: DateTime<Utc>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET status = 'used', used_by = ?, used_at = ?
            WHERE account_id = ?
            "#,
        )
            .bind(user_id)
            .bind(used_at)
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_available(&self) -> Result<Vec<Account>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT
                account_id,
                game,
                category,
                login,
                password,
                created_at,
                used_by,
                used_at,
                status
            FROM accounts
            WHERE status = 'available'
            ORDER BY category ASC, game ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        let mut list = Vec::with_capacity(rows.len());
        for r in rows {
            list.push(row_to_account(&r)?);
        }
        Ok(list)
    }

    async fn count_available(&self) -> Result<i64, Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM accounts WHERE status = 'available'")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    async fn count_total(&self) -> Result<i64, Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM accounts")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    async fn count_used(&self) -> Result<i64, Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM accounts WHERE status = 'used'")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    async fn count_distinct_categories(&self) -> Result<i64, Error> {
        let row = sqlx::query("SELECT COUNT(DISTINCT category) AS n FROM accounts")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}
