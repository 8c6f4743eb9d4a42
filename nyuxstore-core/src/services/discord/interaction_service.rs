// File: nyuxstore-core/src/services/discord/interaction_service.rs

use std::sync::Arc;

use tracing::{info, warn};
use twilight_http::Client as HttpClient;
use twilight_model::application::interaction::application_command::{
    CommandData, CommandOptionValue,
};
use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::application::interaction::modal::ModalInteractionData;
use twilight_model::application::interaction::{Interaction, InteractionData};
use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::{Embed, MessageFlags};
use twilight_model::http::interaction::{
    InteractionResponse, InteractionResponseData, InteractionResponseType,
};
use twilight_model::id::marker::ApplicationMarker;
use twilight_model::id::Id;

use nyuxstore_common::error::Error;

use crate::services::import::ImportService;
use crate::services::key_service::KeyService;
use crate::services::store_service::StoreService;

use super::modals;
use super::panels;
use super::registry::{ComponentAction, InteractionRegistry, ModalAction, SlashCommand};
use super::slashcommands::IMPORT_FILE_OPTION;

/// Static permission configuration for the panels.
pub struct PanelConfig {
    /// The one allow-listed administrator.
    pub admin_id: u64,
    /// Guild role required for VIP-gated actions.
    pub vip_role_name: String,
}

/// Handles every interaction the gateway delivers: slash commands, panel
/// buttons and modal submissions. One instance is shared by all shard
/// runners; each interaction runs on its own task.
pub struct InteractionService {
    registry: InteractionRegistry,
    store: Arc<StoreService>,
    keys: Arc<KeyService>,
    importer: Arc<ImportService>,
    config: PanelConfig,
    downloader: reqwest::Client,
}

impl InteractionService {
    pub fn new(
        store: Arc<StoreService>,
        keys: Arc<KeyService>,
        importer: Arc<ImportService>,
        config: PanelConfig,
    ) -> Self {
        Self {
            registry: InteractionRegistry::new(),
            store,
            keys,
            importer,
            config,
            downloader: reqwest::Client::new(),
        }
    }

    pub async fn handle_interaction(
        &self,
        http: Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
    ) -> Result<(), Error> {
        match &interaction.data {
            Some(InteractionData::ApplicationCommand(data)) => {
                self.handle_command(&http, application_id, interaction, data).await
            }
            Some(InteractionData::MessageComponent(data)) => {
                self.handle_component(&http, application_id, interaction, data).await
            }
            Some(InteractionData::ModalSubmit(data)) => {
                self.handle_modal(&http, application_id, interaction, data).await
            }
            _ => Ok(()),
        }
    }

    async fn handle_command(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        data: &CommandData,
    ) -> Result<(), Error> {
        let Some(command) = self.registry.command(&data.name) else {
            let content = format!("Comando não reconhecido: {}", data.name);
            return self.reply_text(http, application_id, interaction, &content).await;
        };

        match command {
            SlashCommand::AdminPanel => {
                if !self.is_admin(interaction) {
                    return self.reply_text(http, application_id, interaction, "❌ Apenas dono!").await;
                }
                self.reply_panel(
                    http,
                    application_id,
                    interaction,
                    panels::admin_panel_embed(),
                    panels::admin_panel_components(),
                )
                .await
            }
            SlashCommand::VipPanel => {
                if !self.has_vip_access(http, interaction).await? {
                    return self.reply_vip_denied(http, application_id, interaction).await;
                }
                let user_id = interaction.author_id().map(|id| id.get()).unwrap_or_default();
                self.reply_panel(
                    http,
                    application_id,
                    interaction,
                    panels::vip_panel_embed(user_id),
                    panels::vip_panel_components(),
                )
                .await
            }
            SlashCommand::Setup => {
                if !self.is_admin(interaction) {
                    return self.reply_text(http, application_id, interaction, "❌ Sem permissão!").await;
                }
                let Some(channel_id) = interaction.channel.as_ref().map(|c| c.id) else {
                    return self
                        .reply_text(http, application_id, interaction, "⚠️ Canal não identificado.")
                        .await;
                };
                http.create_message(channel_id)
                    .embeds(&[panels::public_panel_embed()])
                    .components(&panels::public_panel_components())
                    .await
                    .map_err(|e| Error::Platform(format!("Error publishing public panel: {e}")))?;
                self.reply_text(http, application_id, interaction, "✅ Painel enviado!").await
            }
            SlashCommand::Import => {
                if !self.is_admin(interaction) {
                    return self.reply_text(http, application_id, interaction, "❌ Sem permissão!").await;
                }
                self.handle_import(http, application_id, interaction, data).await
            }
            SlashCommand::Stock => {
                if !self.is_admin(interaction) {
                    return self.reply_text(http, application_id, interaction, "❌ Sem permissão!").await;
                }
                let groups = self.store.list_available_by_category().await?;
                self.reply_embed(http, application_id, interaction, panels::stock_embed(&groups)).await
            }
        }
    }

    async fn handle_import(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        data: &CommandData,
    ) -> Result<(), Error> {
        let attachment = data
            .options
            .iter()
            .find(|opt| opt.name == IMPORT_FILE_OPTION)
            .and_then(|opt| match &opt.value {
                CommandOptionValue::Attachment(id) => Some(*id),
                _ => None,
            })
            .and_then(|id| {
                data.resolved.as_ref().and_then(|resolved| resolved.attachments.get(&id))
            });

        let Some(attachment) = attachment else {
            return self
                .reply_text(http, application_id, interaction, "⚠️ Nenhum arquivo recebido.")
                .await;
        };
        if !attachment.filename.to_lowercase().ends_with(".txt") {
            return self
                .reply_text(http, application_id, interaction, "❌ Envie um arquivo .txt!")
                .await;
        }

        // Downloading and inserting can outlive the response window, so
        // acknowledge first and edit the response once the batch is done.
        self.defer(http, application_id, interaction).await?;

        let downloaded = async {
            self.downloader.get(&attachment.url).send().await?.bytes().await
        }
        .await;
        let bytes = match downloaded {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to download import attachment {}: {e}", attachment.filename);
                http.interaction(application_id)
                    .update_response(&interaction.token)
                    .content(Some("❌ Falha ao baixar o arquivo. Tente novamente."))
                    .await
                    .map_err(|e| Error::Platform(format!("Error updating import response: {e}")))?;
                return Ok(());
            }
        };
        let text = String::from_utf8_lossy(&bytes);

        let report = self.importer.import_text(&text).await?;
        info!("Imported {} account(s), {} failure(s)", report.inserted, report.failed);

        let embed = panels::import_report_embed(&report);
        http.interaction(application_id)
            .update_response(&interaction.token)
            .embeds(Some(&[embed]))
            .await
            .map_err(|e| Error::Platform(format!("Error updating import response: {e}")))?;
        Ok(())
    }

    async fn handle_component(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        data: &MessageComponentInteractionData,
    ) -> Result<(), Error> {
        let Some(action) = self.registry.component(&data.custom_id) else {
            warn!("Unknown component custom id: {}", data.custom_id);
            return Ok(());
        };

        match action {
            ComponentAction::AdminAddAccount => {
                if !self.is_admin(interaction) {
                    return self.reply_text(http, application_id, interaction, "❌ Sem permissão!").await;
                }
                self.reply_modal(http, application_id, interaction, modals::add_account_modal()).await
            }
            ComponentAction::AdminGenerateKey => {
                if !self.is_admin(interaction) {
                    return self.reply_text(http, application_id, interaction, "❌ Sem permissão!").await;
                }
                self.reply_modal(http, application_id, interaction, modals::generate_key_modal()).await
            }
            ComponentAction::AdminStats => {
                if !self.is_admin(interaction) {
                    return self.reply_text(http, application_id, interaction, "❌ Sem permissão!").await;
                }
                let stats = self.store.store_stats().await?;
                self.reply_embed(http, application_id, interaction, panels::stats_embed(&stats)).await
            }
            ComponentAction::VipSearchGame => {
                if !self.has_vip_access(http, interaction).await? {
                    return self.reply_vip_denied(http, application_id, interaction).await;
                }
                self.reply_modal(http, application_id, interaction, modals::search_game_modal()).await
            }
            // Anyone may open the redeem modal; the key itself is the gate.
            ComponentAction::VipRedeemKey | ComponentAction::PublicRedeemKey => {
                self.reply_modal(http, application_id, interaction, modals::redeem_key_modal()).await
            }
        }
    }

    async fn handle_modal(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        data: &ModalInteractionData,
    ) -> Result<(), Error> {
        let Some(action) = self.registry.modal(&data.custom_id) else {
            warn!("Unknown modal custom id: {}", data.custom_id);
            return Ok(());
        };

        match action {
            ModalAction::AddAccount => {
                if !self.is_admin(interaction) {
                    return self.reply_text(http, application_id, interaction, "❌ Sem permissão!").await;
                }
                let game = modals::text_value(data, modals::FIELD_GAME).unwrap_or_default();
                let category = modals::text_value(data, modals::FIELD_CATEGORY).unwrap_or_default();
                let login = modals::text_value(data, modals::FIELD_LOGIN).unwrap_or_default();
                let password = modals::text_value(data, modals::FIELD_PASSWORD).unwrap_or_default();
                if game.trim().is_empty() || login.trim().is_empty() || password.trim().is_empty() {
                    return self
                        .reply_text(http, application_id, interaction, "⚠️ Preencha todos os campos.")
                        .await;
                }

                let account = self.store.add_account(game, category, login, password).await?;
                let content = format!(
                    "✅ Conta adicionada!\n🎮 **{}**\n📂 Categoria: {}",
                    account.game, account.category
                );
                self.reply_text(http, application_id, interaction, &content).await
            }
            ModalAction::GenerateKey => {
                if !self.is_admin(interaction) {
                    return self.reply_text(http, application_id, interaction, "❌ Sem permissão!").await;
                }
                let duration = modals::text_value(data, modals::FIELD_DURATION).unwrap_or_default();
                let role = modals::text_value(data, modals::FIELD_ROLE).unwrap_or_default();
                let issued_by =
                    interaction.author_id().map(|id| id.to_string()).unwrap_or_default();

                match self.keys.issue_key(duration, role, &issued_by).await {
                    Ok(key) => {
                        let content = format!("🔑 Key gerada:\n`{}`", key.key_code);
                        self.reply_text(http, application_id, interaction, &content).await
                    }
                    Err(Error::KeyGeneration(reason)) => {
                        warn!("Key generation exhausted: {reason}");
                        self.reply_text(
                            http,
                            application_id,
                            interaction,
                            "⚠️ Não foi possível gerar uma key única. Tente novamente.",
                        )
                        .await
                    }
                    Err(e) => Err(e),
                }
            }
            ModalAction::SearchGame => {
                if !self.has_vip_access(http, interaction).await? {
                    return self.reply_vip_denied(http, application_id, interaction).await;
                }
                let name = modals::text_value(data, modals::FIELD_NAME).unwrap_or_default();
                let user_id = interaction.author_id().map(|id| id.to_string()).unwrap_or_default();

                match self.store.find_and_claim(name.trim(), &user_id).await? {
                    Some(account) => {
                        self.reply_embed(
                            http,
                            application_id,
                            interaction,
                            panels::account_delivery_embed(&account),
                        )
                        .await
                    }
                    None => {
                        self.reply_text(
                            http,
                            application_id,
                            interaction,
                            "❌ Jogo não encontrado ou não disponível.",
                        )
                        .await
                    }
                }
            }
            ModalAction::RedeemKey => {
                self.handle_redeem(http, application_id, interaction, data).await
            }
        }
    }

    async fn handle_redeem(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        data: &ModalInteractionData,
    ) -> Result<(), Error> {
        let code = modals::text_value(data, modals::FIELD_KEY).unwrap_or_default();
        let Some(user_id) = interaction.author_id() else {
            return self.reply_text(http, application_id, interaction, "❌ Key inválida.").await;
        };

        // A losing claim is uniform: wrong code, consumed and inactive keys
        // all read the same from here.
        let Some(key) = self.keys.redeem(code, &user_id.to_string()).await? else {
            return self.reply_text(http, application_id, interaction, "❌ Key inválida.").await;
        };

        let Some(guild_id) = interaction.guild_id else {
            return self
                .reply_text(http, application_id, interaction, "⚠️ Resgate keys dentro do servidor.")
                .await;
        };

        let roles = http
            .roles(guild_id)
            .await
            .map_err(|e| Error::Platform(format!("Error listing guild roles: {e}")))?
            .models()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing guild roles: {e}")))?;

        let Some(role) = roles.iter().find(|r| r.name == key.role_name) else {
            warn!("Redeemed key {} names a missing role '{}'", key.key_code, key.role_name);
            return self.reply_text(http, application_id, interaction, "⚠️ Cargo não encontrado.").await;
        };

        http.add_guild_member_role(guild_id, user_id, role.id)
            .await
            .map_err(|e| Error::Platform(format!("Error granting role: {e}")))?;

        let content = format!(
            "✅ **Key resgatada!**\n🏆 Cargo: <@&{}>\n⏰ Duração: {}",
            role.id, key.duration
        );
        self.reply_text(http, application_id, interaction, &content).await
    }

    fn is_admin(&self, interaction: &Interaction) -> bool {
        interaction.author_id().map(|id| id.get()) == Some(self.config.admin_id)
    }

    /// VIP actions are open to the admin and to members holding the
    /// configured role. Member role ids are resolved against the guild
    /// role list by name.
    async fn has_vip_access(
        &self,
        http: &Arc<HttpClient>,
        interaction: &Interaction,
    ) -> Result<bool, Error> {
        if self.is_admin(interaction) {
            return Ok(true);
        }
        let (Some(guild_id), Some(member)) = (interaction.guild_id, interaction.member.as_ref())
        else {
            return Ok(false);
        };

        let roles = http
            .roles(guild_id)
            .await
            .map_err(|e| Error::Platform(format!("Error listing guild roles: {e}")))?
            .models()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing guild roles: {e}")))?;

        Ok(roles
            .iter()
            .any(|role| role.name == self.config.vip_role_name && member.roles.contains(&role.id)))
    }

    async fn reply_vip_denied(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
    ) -> Result<(), Error> {
        let content = format!("❌ Precisa do cargo @{}!", self.config.vip_role_name);
        self.reply_text(http, application_id, interaction, &content).await
    }

    async fn reply_text(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        content: &str,
    ) -> Result<(), Error> {
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(InteractionResponseData {
                content: Some(content.to_string()),
                flags: Some(MessageFlags::EPHEMERAL),
                ..Default::default()
            }),
        };
        self.send_response(http, application_id, interaction, &response).await
    }

    async fn reply_embed(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        embed: Embed,
    ) -> Result<(), Error> {
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(InteractionResponseData {
                embeds: Some(vec![embed]),
                flags: Some(MessageFlags::EPHEMERAL),
                ..Default::default()
            }),
        };
        self.send_response(http, application_id, interaction, &response).await
    }

    async fn reply_panel(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        embed: Embed,
        components: Vec<Component>,
    ) -> Result<(), Error> {
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(InteractionResponseData {
                embeds: Some(vec![embed]),
                components: Some(components),
                flags: Some(MessageFlags::EPHEMERAL),
                ..Default::default()
            }),
        };
        self.send_response(http, application_id, interaction, &response).await
    }

    async fn reply_modal(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        data: InteractionResponseData,
    ) -> Result<(), Error> {
        let response = InteractionResponse {
            kind: InteractionResponseType::Modal,
            data: Some(data),
        };
        self.send_response(http, application_id, interaction, &response).await
    }

    async fn defer(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
    ) -> Result<(), Error> {
        let response = InteractionResponse {
            kind: InteractionResponseType::DeferredChannelMessageWithSource,
            data: Some(InteractionResponseData {
                flags: Some(MessageFlags::EPHEMERAL),
                ..Default::default()
            }),
        };
        self.send_response(http, application_id, interaction, &response).await
    }

    async fn send_response(
        &self,
        http: &Arc<HttpClient>,
        application_id: Id<ApplicationMarker>,
        interaction: &Interaction,
        response: &InteractionResponse,
    ) -> Result<(), Error> {
        http.interaction(application_id)
            .create_response(interaction.id, &interaction.token, response)
            .await
            .map_err(|e| Error::Platform(format!("Error responding to interaction: {e}")))?;
        Ok(())
    }
}
