// File: nyuxstore-core/src/services/key_service.rs

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::warn;
use uuid::Uuid;

use nyuxstore_common::error::Error;
use nyuxstore_common::models::RedemptionKey;
use nyuxstore_common::traits::repository_traits::RedemptionKeyRepository;

/// Fixed prefix of every key code.
pub const KEY_PREFIX: &str = "NYUX-STORE-";
/// Random characters after the prefix.
pub const KEY_SUFFIX_LEN: usize = 10;

const KEY_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MAX_KEY_ATTEMPTS: u32 = 5;

/// Issues and redeems single-use keys.
pub struct KeyService {
    keys: Arc<dyn RedemptionKeyRepository>,
}

impl KeyService {
    pub fn new(keys: Arc<dyn RedemptionKeyRepository>) -> Self {
        Self { keys }
    }

    /// Issues a fresh single-use key. A collision with a stored code is
    /// retried with a new code up to a fixed attempt cap; exhaustion is an
    /// explicit error, not an unbounded retry.
    pub async fn issue_key(
        &self,
        duration: &str,
        role_name: &str,
        issued_by: &str,
    ) -> Result<RedemptionKey, Error> {
        for attempt in 1..=MAX_KEY_ATTEMPTS {
            let key = RedemptionKey {
                key_id: Uuid::new_v4(),
                key_code: generate_key_code(),
                duration: duration.trim().to_string(),
                role_name: role_name.trim().to_string(),
                issued_by: issued_by.to_string(),
                created_at: Utc::now(),
                redeemed_by: None,
                redeemed_at: None,
                is_active: true,
            };
            match self.keys.create_key(&key).await {
                Ok(()) => return Ok(key),
                Err(Error::DuplicateKeyCode(code)) => {
                    warn!(
                        "Key code collision on {} (attempt {}/{}); regenerating",
                        code, attempt, MAX_KEY_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::KeyGeneration(format!(
            "no unique key code after {} attempts",
            MAX_KEY_ATTEMPTS
        )))
    }

    /// Claims `code` for `user_id`. Input is normalized (trimmed and
    /// upper-cased) the way members paste codes from chat. The repository
    /// does the check-and-set in one conditional update; `Ok(None)` covers
    /// unknown, inactive and already-consumed codes alike.
    pub async fn redeem(
        &self,
        code: &str,
        user_id: &str,
    ) -> Result<Option<RedemptionKey>, Error> {
        let normalized = code.trim().to_uppercase();
        self.keys.claim(&normalized, user_id, Utc::now()).await
    }
}

/// `NYUX-STORE-` plus ten random characters from `[A-Z0-9]`.
pub fn generate_key_code() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..KEY_SUFFIX_LEN)
        .map(|_| KEY_CHARSET[rng.random_range(0..KEY_CHARSET.len())] as char)
        .collect();
    format!("{KEY_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_have_prefix_and_length() {
        for _ in 0..50 {
            let code = generate_key_code();
            let suffix = code.strip_prefix(KEY_PREFIX).expect("prefix present");
            assert_eq!(suffix.len(), KEY_SUFFIX_LEN);
            assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}
