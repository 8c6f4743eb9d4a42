// File: nyuxstore-core/src/services/discord/slashcommands.rs

use std::sync::Arc;

use twilight_http::Client as HttpClient;
use twilight_model::application::command::CommandType;
use twilight_model::id::marker::ApplicationMarker;
use twilight_model::id::Id;
use twilight_util::builder::command::{AttachmentBuilder, CommandBuilder};

use nyuxstore_common::error::Error;

use super::registry::{CMD_ADMIN_PANEL, CMD_IMPORT, CMD_SETUP, CMD_STOCK, CMD_VIP_PANEL};

/// Name of the required attachment option on the import command.
pub const IMPORT_FILE_OPTION: &str = "arquivo";

fn create_admin_panel_command() -> CommandBuilder {
    CommandBuilder::new(
        CMD_ADMIN_PANEL,
        "[ADMIN] Painel administrativo da loja",
        CommandType::ChatInput,
    )
    .dm_permission(false)
}

fn create_vip_panel_command() -> CommandBuilder {
    CommandBuilder::new(CMD_VIP_PANEL, "[VIP] Acesse seus jogos", CommandType::ChatInput)
        .dm_permission(false)
}

fn create_setup_command() -> CommandBuilder {
    CommandBuilder::new(
        CMD_SETUP,
        "[ADMIN] Publica o painel público de resgate",
        CommandType::ChatInput,
    )
    .dm_permission(false)
}

fn create_import_command() -> CommandBuilder {
    CommandBuilder::new(
        CMD_IMPORT,
        "[ADMIN] Importa contas de um arquivo .txt",
        CommandType::ChatInput,
    )
    .dm_permission(false)
    .option(AttachmentBuilder::new(IMPORT_FILE_OPTION, "Arquivo .txt com as contas").required(true))
}

fn create_stock_command() -> CommandBuilder {
    CommandBuilder::new(
        CMD_STOCK,
        "[ADMIN] Lista as contas disponíveis por categoria",
        CommandType::ChatInput,
    )
    .dm_permission(false)
}

/// Registers the storefront's global slash commands.
pub async fn register_global_slash_commands(
    http: &Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
) -> Result<(), Error> {
    let commands = &[
        create_admin_panel_command().build(),
        create_vip_panel_command().build(),
        create_setup_command().build(),
        create_import_command().build(),
        create_stock_command().build(),
    ];

    http.interaction(application_id)
        .set_global_commands(commands)
        .await
        .map_err(|e| Error::Platform(format!("Failed to register global slash commands: {e}")))?;

    Ok(())
}
