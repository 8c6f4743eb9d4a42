// File: nyuxstore-server/src/main.rs

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use nyuxstore_core::platforms::discord::DiscordPlatform;
use nyuxstore_core::platforms::{PlatformAuth, PlatformIntegration};
use nyuxstore_core::repositories::{
    BotConfigRepository, SqliteAccountRepository, SqliteBotConfigRepository,
    SqliteRedemptionKeyRepository,
};
use nyuxstore_core::services::discord::{InteractionService, PanelConfig};
use nyuxstore_core::services::{ImportService, KeyService, StoreService};
use nyuxstore_core::{Database, Error};

mod config;
use config::AppConfig;

/// Config key holding the VIP role name; the default is written back on
/// first boot so operators can edit the row in place.
const VIP_ROLE_CONFIG_KEY: &str = "vip_role_name";
const DEFAULT_VIP_ROLE: &str = "Vip Pack";

#[derive(Parser, Debug, Clone)]
#[command(name = "nyuxstore")]
#[command(author, version, about = "NyuxStore - Discord storefront for Steam game accounts")]
struct Args {
    /// Path to the SQLite database file.
    #[arg(long, default_value = "nyux_store.db")]
    db_path: String,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("nyuxstore_core=info".parse().unwrap_or_default())
        .add_directive("nyuxstore_server=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub).expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run_server(args).await {
        error!("Server error: {e}");
        return Err(Box::new(e) as Box<dyn std::error::Error>);
    }
    Ok(())
}

async fn run_server(args: Args) -> Result<(), Error> {
    // Missing credentials halt startup before anything else happens.
    let config = AppConfig::from_env()?;
    info!("NyuxStore starting. admin_id={}, db_path={}", config.admin_id, args.db_path);

    let db = Database::new(&args.db_path).await?;
    db.migrate().await?;

    let accounts = Arc::new(SqliteAccountRepository::new(db.pool().clone()));
    let keys_repo = Arc::new(SqliteRedemptionKeyRepository::new(db.pool().clone()));
    let config_repo = Arc::new(SqliteBotConfigRepository::new(db.pool().clone()));

    let vip_role_name = match config_repo.get_value(VIP_ROLE_CONFIG_KEY).await? {
        Some(name) => name,
        None => {
            config_repo.set_value(VIP_ROLE_CONFIG_KEY, DEFAULT_VIP_ROLE).await?;
            DEFAULT_VIP_ROLE.to_string()
        }
    };
    info!("VIP role: {vip_role_name}");

    let store = Arc::new(StoreService::new(accounts.clone(), keys_repo.clone()));
    let key_service = Arc::new(KeyService::new(keys_repo));
    let importer = Arc::new(ImportService::new(store.clone()));

    let interactions = Arc::new(InteractionService::new(
        store,
        key_service,
        importer,
        PanelConfig { admin_id: config.admin_id, vip_role_name },
    ));

    let mut discord = DiscordPlatform::new(config.discord_token, interactions);
    discord.authenticate().await?;
    discord.connect().await?;
    info!("NyuxStore online.");

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C detected; shutting down...");

    discord.disconnect().await?;
    info!("Main finished. Goodbye!");
    Ok(())
}
