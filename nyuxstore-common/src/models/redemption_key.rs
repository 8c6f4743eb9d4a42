// File: nyuxstore-common/src/models/redemption_key.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single-use code that grants a named role when claimed.
///
/// The first successful claim wins: `redeemed_by`/`redeemed_at` are written
/// by exactly one conditional update and never overwritten afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedemptionKey {
    pub key_id: Uuid,
    pub key_code: String,
    /// Free-form duration label, e.g. "7d" or "lifetime". The bot does not
    /// schedule expirations; the label travels with the grant message.
    pub duration: String,
    pub role_name: String,
    pub issued_by: String,
    pub created_at: DateTime<Utc>,
    pub redeemed_by: Option<String>,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}
