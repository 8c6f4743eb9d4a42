// File: nyuxstore-core/src/services/discord/mod.rs

pub mod interaction_service;
pub mod modals;
pub mod panels;
pub mod registry;
pub mod slashcommands;

pub use interaction_service::{InteractionService, PanelConfig};
