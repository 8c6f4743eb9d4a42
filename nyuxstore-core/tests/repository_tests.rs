// tests/repository_tests.rs

use std::sync::Arc;

use chrono::Utc;

use nyuxstore_common::models::AccountStatus;
use nyuxstore_core::repositories::{
    AccountRepository, BotConfigRepository, SqliteAccountRepository, SqliteBotConfigRepository,
    SqliteRedemptionKeyRepository,
};
use nyuxstore_core::services::StoreService;
use nyuxstore_core::{Database, Error};

async fn setup_test_db() -> Database {
    let db = Database::new(":memory:").await.unwrap();
    db.migrate().await.unwrap();
    db
}

fn store_service(db: &Database) -> StoreService {
    StoreService::new(
        Arc::new(SqliteAccountRepository::new(db.pool().clone())),
        Arc::new(SqliteRedemptionKeyRepository::new(db.pool().clone())),
    )
}

#[tokio::test]
async fn test_add_account_normalizes_casing() -> Result<(), Error> {
    let db = setup_test_db().await;
    let store = store_service(&db);

    let account = store
        .add_account("  forza horizon 5 ", "corrida", " fulano123 ", " abc456 ")
        .await?;
    assert_eq!(account.game, "Forza Horizon 5");
    assert_eq!(account.category, "Corrida");
    assert_eq!(account.login, "fulano123");
    assert_eq!(account.password, "abc456");
    assert_eq!(account.status, AccountStatus::Available);
    Ok(())
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() -> Result<(), Error> {
    let db = setup_test_db().await;
    let store = store_service(&db);
    let repo = SqliteAccountRepository::new(db.pool().clone());

    store.add_account("Forza Horizon 5", "Corrida", "fulano123", "abc456").await?;

    let found = repo.find_available_by_game("FORZA").await?.expect("substring should match");
    assert_eq!(found.game, "Forza Horizon 5");

    let found = repo.find_available_by_game("horizon").await?;
    assert!(found.is_some());

    assert!(repo.find_available_by_game("zelda").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_claimed_account_leaves_search_results() -> Result<(), Error> {
    let db = setup_test_db().await;
    let store = store_service(&db);

    store.add_account("Forza Horizon 5", "Corrida", "fulano123", "abc456").await?;

    let claimed = store.find_and_claim("forza", "user-1").await?.expect("available account");
    assert_eq!(claimed.game, "Forza Horizon 5");

    // The only copy is now used; the same search must come back empty.
    assert!(store.find_and_claim("forza", "user-2").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_mark_used_twice_is_last_writer_wins() -> Result<(), Error> {
    // Documented gap: a second mark_used call succeeds and overwrites the
    // consumer. This pins the behavior so any change is deliberate.
    let db = setup_test_db().await;
    let store = store_service(&db);
    let repo = SqliteAccountRepository::new(db.pool().clone());

    let account = store.add_account("Dirt Rally", "Corrida", "fulano123", "abc456").await?;
    repo.mark_used(account.account_id, "user-1", Utc::now()).await?;
    repo.mark_used(account.account_id, "user-2", Utc::now()).await?;

    let row = repo.get_account(account.account_id).await?.expect("account exists");
    assert_eq!(row.status, AccountStatus::Used);
    assert_eq!(row.used_by.as_deref(), Some("user-2"));
    assert!(row.used_at.is_some());
    Ok(())
}

#[tokio::test]
async fn test_list_available_groups_by_category() -> Result<(), Error> {
    let db = setup_test_db().await;
    let store = store_service(&db);

    store.add_account("Forza Horizon 5", "Corrida", "login1", "senha1").await?;
    store.add_account("Dirt Rally", "Corrida", "login2", "senha2").await?;
    store.add_account("Doom Eternal", "Tiro", "login3", "senha3").await?;
    let claimed = store.add_account("Outlast", "Terror", "login4", "senha4").await?;
    store.find_and_claim(&claimed.game, "user-1").await?;

    let groups = store.list_available_by_category().await?;
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "Corrida");
    assert_eq!(groups[0].1.len(), 2);
    // Games sorted inside the category.
    assert_eq!(groups[0].1[0].game, "Dirt Rally");
    assert_eq!(groups[1].0, "Tiro");
    assert_eq!(groups[1].1.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_store_stats() -> Result<(), Error> {
    let db = setup_test_db().await;
    let store = store_service(&db);
    let keys_repo = SqliteRedemptionKeyRepository::new(db.pool().clone());

    store.add_account("Forza Horizon 5", "Corrida", "login1", "senha1").await?;
    store.add_account("Doom Eternal", "Tiro", "login2", "senha2").await?;
    store.add_account("Outlast", "Terror", "login3", "senha3").await?;
    store.find_and_claim("outlast", "user-1").await?;

    let key_service =
        nyuxstore_core::services::KeyService::new(Arc::new(keys_repo));
    key_service.issue_key("7d", "Vip Pack", "admin-1").await?;

    let stats = store.store_stats().await?;
    assert_eq!(stats.available, 2);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.used, 1);
    assert_eq!(stats.active_keys, 1);
    assert_eq!(stats.distinct_categories, 3);
    Ok(())
}

#[tokio::test]
async fn test_config_upsert_overwrites() -> Result<(), Error> {
    let db = setup_test_db().await;
    let repo = SqliteBotConfigRepository::new(db.pool().clone());

    assert!(repo.get_value("vip_role_name").await?.is_none());

    repo.set_value("vip_role_name", "Vip Pack").await?;
    assert_eq!(repo.get_value("vip_role_name").await?.as_deref(), Some("Vip Pack"));

    // Upsert: no history, the new value replaces the old one.
    repo.set_value("vip_role_name", "Premium").await?;
    assert_eq!(repo.get_value("vip_role_name").await?.as_deref(), Some("Premium"));

    repo.set_value("panel_channel", "123456").await?;
    let mut all = repo.list_all().await?;
    all.sort();
    assert_eq!(
        all,
        vec![
            ("panel_channel".to_string(), "123456".to_string()),
            ("vip_role_name".to_string(), "Premium".to_string()),
        ]
    );

    repo.delete_value("panel_channel").await?;
    assert!(repo.get_value("panel_channel").await?.is_none());
    Ok(())
}
