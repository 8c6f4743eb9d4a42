// tests/redemption_tests.rs

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

use nyuxstore_common::error::Error;
use nyuxstore_common::models::RedemptionKey;
use nyuxstore_common::traits::repository_traits::RedemptionKeyRepository;
use nyuxstore_core::repositories::SqliteRedemptionKeyRepository;
use nyuxstore_core::services::KeyService;
use nyuxstore_core::Database;

async fn setup() -> (Database, KeyService, SqliteRedemptionKeyRepository) {
    let db = Database::new(":memory:").await.unwrap();
    db.migrate().await.unwrap();
    let repo = SqliteRedemptionKeyRepository::new(db.pool().clone());
    let service = KeyService::new(Arc::new(SqliteRedemptionKeyRepository::new(db.pool().clone())));
    (db, service, repo)
}

#[tokio::test]
async fn test_key_codes_match_format_and_are_unique() -> Result<(), Error> {
    let (_db, service, repo) = setup().await;
    let pattern = Regex::new(r"^NYUX-STORE-[A-Z0-9]{10}$").unwrap();

    let mut codes = HashSet::new();
    for _ in 0..20 {
        let key = service.issue_key("7d", "Vip Pack", "admin-1").await?;
        assert!(pattern.is_match(&key.key_code), "bad code: {}", key.key_code);
        assert!(codes.insert(key.key_code.clone()), "duplicate code stored");
        assert!(repo.get_by_code(&key.key_code).await?.is_some());
    }
    Ok(())
}

#[tokio::test]
async fn test_redeem_claims_once_and_never_overwrites() -> Result<(), Error> {
    let (_db, service, repo) = setup().await;
    let key = service.issue_key("lifetime", "Vip Pack", "admin-1").await?;

    let won = service.redeem(&key.key_code, "user-1").await?.expect("first claim wins");
    assert_eq!(won.redeemed_by.as_deref(), Some("user-1"));
    assert!(won.redeemed_at.is_some());

    // Second attempt: uniform failure, winner untouched.
    assert!(service.redeem(&key.key_code, "user-2").await?.is_none());

    let row = repo.get_by_code(&key.key_code).await?.expect("key exists");
    assert_eq!(row.redeemed_by.as_deref(), Some("user-1"));
    assert_eq!(row.redeemed_at, won.redeemed_at);
    Ok(())
}

#[tokio::test]
async fn test_redeem_normalizes_pasted_codes() -> Result<(), Error> {
    let (_db, service, _repo) = setup().await;
    let key = service.issue_key("7d", "Vip Pack", "admin-1").await?;

    let pasted = format!("  {}  ", key.key_code.to_lowercase());
    assert!(service.redeem(&pasted, "user-1").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_redeem_unknown_or_inactive_is_uniform_miss() -> Result<(), Error> {
    let (_db, service, repo) = setup().await;

    assert!(service.redeem("NYUX-STORE-AAAAAAAAAA", "user-1").await?.is_none());

    // An inactive key is indistinguishable from a wrong code.
    let inactive = RedemptionKey {
        key_id: Uuid::new_v4(),
        key_code: "NYUX-STORE-BBBBBBBBBB".to_string(),
        duration: "7d".to_string(),
        role_name: "Vip Pack".to_string(),
        issued_by: "admin-1".to_string(),
        created_at: Utc::now(),
        redeemed_by: None,
        redeemed_at: None,
        is_active: false,
    };
    repo.create_key(&inactive).await?;
    assert!(service.redeem("NYUX-STORE-BBBBBBBBBB", "user-1").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_code_maps_to_typed_error() -> Result<(), Error> {
    let (_db, _service, repo) = setup().await;

    let mut key = RedemptionKey {
        key_id: Uuid::new_v4(),
        key_code: "NYUX-STORE-CCCCCCCCCC".to_string(),
        duration: "7d".to_string(),
        role_name: "Vip Pack".to_string(),
        issued_by: "admin-1".to_string(),
        created_at: Utc::now(),
        redeemed_by: None,
        redeemed_at: None,
        is_active: true,
    };
    repo.create_key(&key).await?;

    key.key_id = Uuid::new_v4();
    let result = repo.create_key(&key).await;
    assert!(matches!(result, Err(Error::DuplicateKeyCode(_))));
    Ok(())
}

/// Repository stub whose inserts always collide; drives the retry loop to
/// exhaustion.
struct CollidingKeyRepository;

#[async_trait]
impl RedemptionKeyRepository for CollidingKeyRepository {
    async fn create_key(&self, key: &RedemptionKey) -> Result<(), Error> {
        Err(Error::DuplicateKeyCode(key.key_code.clone()))
    }

    async fn get_by_code(&self, _key_code: &str) -> Result<Option<RedemptionKey>, Error> {
        Ok(None)
    }

    async fn claim(
        &self,
        _key_code: &str,
        _user_id: &str,
        _redeemed_at: DateTime<Utc>,
    ) -> Result<Option<RedemptionKey>, Error> {
        Ok(None)
    }

    async fn count_active(&self) -> Result<i64, Error> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_issue_key_retry_is_bounded() {
    let service = KeyService::new(Arc::new(CollidingKeyRepository));
    let result = service.issue_key("7d", "Vip Pack", "admin-1").await;
    assert!(matches!(result, Err(Error::KeyGeneration(_))));
}
