// File: nyuxstore-core/src/services/store_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use nyuxstore_common::error::Error;
use nyuxstore_common::models::{Account, AccountStatus, StoreStats};
use nyuxstore_common::traits::repository_traits::{AccountRepository, RedemptionKeyRepository};

use crate::utils::text::title_case;

/// Store operations over the account inventory. Normalizes incoming data
/// before it reaches the repository and composes the aggregate counters.
pub struct StoreService {
    accounts: Arc<dyn AccountRepository>,
    keys: Arc<dyn RedemptionKeyRepository>,
}

impl StoreService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        keys: Arc<dyn RedemptionKeyRepository>,
    ) -> Self {
        Self { accounts, keys }
    }

    /// Inserts a new available account. Game and category casing is
    /// normalized so "forza horizon 5" and "FORZA HORIZON 5" land under
    /// the same inventory name.
    pub async fn add_account(
        &self,
        game: &str,
        category: &str,
        login: &str,
        password: &str,
    ) -> Result<Account, Error> {
        let account = Account {
            account_id: Uuid::new_v4(),
            game: title_case(game),
            category: title_case(category),
            login: login.trim().to_string(),
            password: password.trim().to_string(),
            created_at: Utc::now(),
            used_by: None,
            used_at: None,
            status: AccountStatus::Available,
        };
        self.accounts.insert_account(&account).await?;
        Ok(account)
    }

    /// Finds the first available account whose game name contains
    /// `fragment` (case-insensitive) and marks it used for `user_id`.
    /// `Ok(None)` when nothing matches — a miss, not an error.
    pub async fn find_and_claim(
        &self,
        fragment: &str,
        user_id: &str,
    ) -> Result<Option<Account>, Error> {
        let Some(account) = self.accounts.find_available_by_game(fragment).await? else {
            return Ok(None);
        };
        self.accounts
            .mark_used(account.account_id, user_id, Utc::now())
            .await?;
        Ok(Some(account))
    }

    /// Available accounts grouped by category. The repository returns rows
    /// ordered by category then game, so grouping is a single pass.
    pub async fn list_available_by_category(
        &self,
    ) -> Result<Vec<(String, Vec<Account>)>, Error> {
        let mut groups: Vec<(String, Vec<Account>)> = Vec::new();
        for account in self.accounts.list_available().await? {
            if let Some((category, members)) = groups.last_mut() {
                if *category == account.category {
                    members.push(account);
                    continue;
                }
            }
            let category = account.category.clone();
            groups.push((category, vec![account]));
        }
        Ok(groups)
    }

    pub async fn store_stats(&self) -> Result<StoreStats, Error> {
        Ok(StoreStats {
            available: self.accounts.count_available().await?,
            total: self.accounts.count_total().await?,
            used: self.accounts.count_used().await?,
            active_keys: self.keys.count_active().await?,
            distinct_categories: self.accounts.count_distinct_categories().await?,
        })
    }
}
