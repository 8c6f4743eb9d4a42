// tests/import_tests.rs

use std::sync::Arc;

use nyuxstore_core::repositories::{
    AccountRepository, SqliteAccountRepository, SqliteRedemptionKeyRepository,
};
use nyuxstore_core::services::{ImportService, StoreService};
use nyuxstore_core::{Database, Error};

const TWO_SECTION_SAMPLE: &str = "\
==================== CONTA 1
🎮 Jogo: Forza Horizon 5
Login: fulano123 Senha: abc456
==================== CONTA 2
Jogo: Call of Duty Modern Warfare
Login:
beltrano789
Senha:
xyz999
";

async fn setup() -> (Database, ImportService) {
    let db = Database::new(":memory:").await.unwrap();
    db.migrate().await.unwrap();
    let store = Arc::new(StoreService::new(
        Arc::new(SqliteAccountRepository::new(db.pool().clone())),
        Arc::new(SqliteRedemptionKeyRepository::new(db.pool().clone())),
    ));
    (db, ImportService::new(store))
}

#[tokio::test]
async fn test_import_two_well_formed_sections() -> Result<(), Error> {
    let (db, importer) = setup().await;

    let report = importer.import_text(TWO_SECTION_SAMPLE).await?;
    assert_eq!(report.inserted, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.distinct_games, 2);
    let total: usize = report.category_counts.iter().map(|(_, n)| n).sum();
    assert_eq!(total, 2);

    let repo = SqliteAccountRepository::new(db.pool().clone());
    let forza = repo.find_available_by_game("forza").await?.expect("imported");
    assert_eq!(forza.login, "fulano123");
    assert_eq!(forza.category, "Corrida");

    let cod = repo.find_available_by_game("call of duty").await?.expect("imported");
    assert_eq!(cod.login, "beltrano789");
    assert_eq!(cod.category, "Tiro");
    Ok(())
}

#[tokio::test]
async fn test_import_excludes_placeholder_logins() -> Result<(), Error> {
    let (db, importer) = setup().await;

    let text = "\
========== CONTA 1
Jogo: Elden Ring
Login: exemplo123 Senha: senha123
User: real_login Pass: real_pass
";
    let report = importer.import_text(text).await?;
    assert_eq!(report.inserted, 1);

    let repo = SqliteAccountRepository::new(db.pool().clone());
    let account = repo.find_available_by_game("elden").await?.expect("imported");
    assert_eq!(account.login, "real_login");
    Ok(())
}

#[tokio::test]
async fn test_import_deduplicates_across_sections() -> Result<(), Error> {
    let (_db, importer) = setup().await;

    let text = "\
========== CONTA 1
Jogo: Forza Horizon 5
Login: alice1 Senha: secret1
========== CONTA 2
Jogo: Forza Horizon 5
Login: alice1 Senha: secret1
";
    let report = importer.import_text(text).await?;
    assert_eq!(report.inserted, 1);
    assert_eq!(report.distinct_games, 1);
    Ok(())
}

#[tokio::test]
async fn test_import_category_counts_sort_descending() -> Result<(), Error> {
    let (_db, importer) = setup().await;

    let text = "\
========== CONTA 1
Jogo: Forza Horizon 5
Login: alice1 Senha: secret1
========== CONTA 2
Jogo: Dirt Rally
Login: bob22 Senha: secret2
========== CONTA 3
Jogo: Doom Eternal
Login: carol3 Senha: secret3
";
    let report = importer.import_text(text).await?;
    assert_eq!(report.inserted, 3);
    assert_eq!(report.distinct_games, 3);
    assert_eq!(report.distinct_categories(), 2);
    assert_eq!(report.category_counts[0].0, "Corrida");
    assert_eq!(report.category_counts[0].1, 2);
    assert_eq!(report.category_counts[1].1, 1);
    Ok(())
}

#[tokio::test]
async fn test_import_of_unstructured_text_inserts_nothing() -> Result<(), Error> {
    let (_db, importer) = setup().await;

    let report = importer.import_text("just some prose, no sections at all").await?;
    assert_eq!(report.inserted, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(report.distinct_games, 0);
    assert!(report.category_counts.is_empty());
    Ok(())
}
