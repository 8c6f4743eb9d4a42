// File: nyuxstore-common/src/models/mod.rs
pub mod account;
pub mod redemption_key;

pub use account::{Account, AccountStatus, StoreStats};
pub use redemption_key::RedemptionKey;
