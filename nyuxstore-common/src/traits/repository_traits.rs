// File: nyuxstore-common/src/traits/repository_traits.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::models::{Account, RedemptionKey};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn insert_account(&self, account: &Account) -> Result<(), Error>;

    async fn get_account(&self, account_id: Uuid) -> Result<Option<Account>, Error>;

    /// Case-insensitive substring match on the game name, restricted to
    /// `available` rows. Returns at most one row in implicit storage order;
    /// a miss is `Ok(None)`, not an error.
    async fn find_available_by_game(&self, fragment: &str) -> Result<Option<Account>, Error>;

    /// Single-row update flipping the row to `used`. A second call on an
    /// already-used row still succeeds and overwrites consumer and
    /// timestamp (last writer wins) — a known gap kept for parity with the
    /// original store, pinned by tests rather than silently fixed.
    async fn mark_used(
        &self,
        account_id: Uuid,
        user_id: &str,
        used_at: DateTime<Utc>,
    ) -> Result<(), Error>;

    /// All available rows, ordered by category then game.
    async fn list_available(&self) -> Result<Vec<Account>, Error>;

    async fn count_available(&self) -> Result<i64, Error>;
    async fn count_total(&self) -> Result<i64, Error>;
    async fn count_used(&self) -> Result<i64, Error>;
    async fn count_distinct_categories(&self) -> Result<i64, Error>;
}

#[async_trait]
pub trait RedemptionKeyRepository: Send + Sync {
    /// Inserts a freshly generated key. A `key_code` unique-constraint
    /// violation surfaces as [`Error::DuplicateKeyCode`] so callers can
    /// regenerate and retry.
    async fn create_key(&self, key: &RedemptionKey) -> Result<(), Error>;

    async fn get_by_code(&self, key_code: &str) -> Result<Option<RedemptionKey>, Error>;

    /// Atomically claims the key for `user_id` if it is still active and
    /// unclaimed — the check-and-set is a single conditional update, so two
    /// concurrent attempts on the same code cannot both win. `Ok(None)`
    /// covers unknown, inactive and already-consumed codes alike; callers
    /// cannot tell which.
    async fn claim(
        &self,
        key_code: &str,
        user_id: &str,
        redeemed_at: DateTime<Utc>,
    ) -> Result<Option<RedemptionKey>, Error>;

    /// Active keys that have not been redeemed yet.
    async fn count_active(&self) -> Result<i64, Error>;
}

#[async_trait]
pub trait BotConfigRepository: Send + Sync {
    async fn set_value(&self, config_key: &str, config_value: &str) -> Result<(), Error>;
    async fn get_value(&self, config_key: &str) -> Result<Option<String>, Error>;
    async fn list_all(&self) -> Result<Vec<(String, String)>, Error>;
    async fn delete_value(&self, config_key: &str) -> Result<(), Error>;
}
