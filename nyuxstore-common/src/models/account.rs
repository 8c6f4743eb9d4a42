// File: nyuxstore-common/src/models/account.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a stored credential pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Available,
    Used,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Available => write!(f, "available"),
            AccountStatus::Used => write!(f, "used"),
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(AccountStatus::Available),
            "used" => Ok(AccountStatus::Used),
            _ => Err(format!("Unknown account status: {}", s)),
        }
    }
}

/// A Steam game credential pair offered for redemption.
///
/// Once `status` flips to `Used`, `used_by` and `used_at` are set and never
/// cleared again. Rows are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: Uuid,
    pub game: String,
    pub category: String,
    pub login: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    /// Opaque external identifier of the member the account was handed to.
    pub used_by: Option<String>,
    pub used_at: Option<DateTime<Utc>>,
    pub status: AccountStatus,
}

/// Aggregate counters shown on the admin stats panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoreStats {
    pub available: i64,
    pub total: i64,
    pub used: i64,
    pub active_keys: i64,
    pub distinct_categories: i64,
}
