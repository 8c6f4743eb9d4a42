// File: nyuxstore-server/src/config.rs

use nyuxstore_common::error::Error;

/// Environment-derived startup configuration. Both values are required:
/// without a token the bot cannot connect, and without an admin id every
/// privileged panel would be unreachable.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_token: String,
    pub admin_id: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Error> {
        let discord_token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| Error::Auth("DISCORD_TOKEN not set".into()))?;
        let admin_raw =
            std::env::var("ADMIN_ID").map_err(|_| Error::Auth("ADMIN_ID not set".into()))?;
        let admin_id = admin_raw
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::Parse(format!("ADMIN_ID is not a valid user id: {admin_raw}")))?;

        Ok(Self { discord_token, admin_id })
    }
}
