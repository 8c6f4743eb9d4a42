// File: nyuxstore-core/src/services/mod.rs

pub mod discord;
pub mod import;
pub mod key_service;
pub mod store_service;

pub use import::{ImportReport, ImportService};
pub use key_service::KeyService;
pub use store_service::StoreService;
