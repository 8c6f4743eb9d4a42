// src/repositories/mod.rs

pub mod sqlite;

pub use nyuxstore_common::traits::repository_traits::{
    AccountRepository, BotConfigRepository, RedemptionKeyRepository,
};

pub use sqlite::accounts::SqliteAccountRepository;
pub use sqlite::bot_config::SqliteBotConfigRepository;
pub use sqlite::redemption_keys::SqliteRedemptionKeyRepository;
