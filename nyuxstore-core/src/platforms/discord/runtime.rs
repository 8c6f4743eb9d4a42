// File: nyuxstore-core/src/platforms/discord/runtime.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{error, info, trace, warn};

use twilight_gateway::{
    self as gateway,
    CloseFrame,
    Config,
    Event,
    EventTypeFlags,
    Intents,
    MessageSender,
    Shard,
    StreamExt,
};
use twilight_http::client::ClientBuilder;
use twilight_http::Client as HttpClient;
use twilight_model::gateway::payload::incoming::Ready as ReadyPayload;
use twilight_model::id::marker::ApplicationMarker;
use twilight_model::id::Id;

use nyuxstore_common::error::Error;

use crate::platforms::{ConnectionStatus, PlatformAuth, PlatformIntegration};
use crate::services::discord::interaction_service::InteractionService;
use crate::services::discord::slashcommands::register_global_slash_commands;

/// Consumes gateway events for one shard. Interactions are handed to the
/// shared [`InteractionService`], each on its own task — interactions from
/// different users are concurrent and must not serialize behind each other.
async fn shard_runner(
    mut shard: Shard,
    http: Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
    interactions: Arc<InteractionService>,
) {
    let shard_id = shard.id().number();
    info!("(ShardRunner) Shard {shard_id} started. Listening for events.");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        match item {
            Ok(event) => match event {
                Event::Ready(ready) => {
                    let data: &ReadyPayload = ready.as_ref();
                    info!(
                        "Shard {shard_id} => READY as {} (ID={})",
                        data.user.name, data.user.id
                    );
                }
                Event::InteractionCreate(inter) => {
                    let service = interactions.clone();
                    let http = http.clone();
                    tokio::spawn(async move {
                        if let Err(e) =
                            service.handle_interaction(http, application_id, &inter.0).await
                        {
                            error!("(InteractionService) error handling interaction: {e:?}");
                        }
                    });
                }
                other => {
                    trace!("Shard {shard_id} => unhandled event: {other:?}");
                }
            },
            Err(err) => {
                error!("Shard {shard_id} => error receiving event: {err:?}");
            }
        }
    }

    warn!("(ShardRunner) Shard {shard_id} event loop ended.");
}

/// Discord gateway runtime for the storefront. Owns the HTTP client and
/// the shard tasks; every shard shares one [`InteractionService`].
pub struct DiscordPlatform {
    pub token: String,
    pub connection_status: ConnectionStatus,

    interactions: Arc<InteractionService>,

    shard_tasks: Vec<JoinHandle<()>>,
    shard_senders: Vec<MessageSender>,

    pub http: Option<Arc<HttpClient>>,
    application_id: Option<Id<ApplicationMarker>>,
}

impl DiscordPlatform {
    pub fn new(token: String, interactions: Arc<InteractionService>) -> Self {
        Self {
            token,
            connection_status: ConnectionStatus::Disconnected,
            interactions,
            shard_tasks: Vec::new(),
            shard_senders: Vec::new(),
            http: None,
            application_id: None,
        }
    }
}

#[async_trait]
impl PlatformAuth for DiscordPlatform {
    async fn authenticate(&mut self) -> Result<(), Error> {
        if self.token.is_empty() {
            return Err(Error::Auth("Discord token is empty".into()));
        }
        Ok(())
    }

    async fn refresh_auth(&mut self) -> Result<(), Error> {
        Ok(())
    }

    async fn revoke_auth(&mut self) -> Result<(), Error> {
        Ok(())
    }

    async fn is_authenticated(&self) -> Result<bool, Error> {
        Ok(!self.token.is_empty())
    }
}

#[async_trait]
impl PlatformIntegration for DiscordPlatform {
    async fn connect(&mut self) -> Result<(), Error> {
        if matches!(self.connection_status, ConnectionStatus::Connected) {
            info!("(DiscordPlatform) Already connected => skipping");
            return Ok(());
        }

        let http_client = Arc::new(
            ClientBuilder::new()
                .token(self.token.clone())
                .timeout(Duration::from_secs(30))
                .build(),
        );
        self.http = Some(http_client.clone());

        let application = http_client
            .current_user_application()
            .await
            .map_err(|e| Error::Platform(format!("current_user_application error: {e}")))?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing application: {e}")))?;
        let application_id = application.id;
        self.application_id = Some(application_id);

        register_global_slash_commands(&http_client, application_id).await?;
        info!("(DiscordPlatform) Slash commands registered for application {application_id}");

        // Interactions arrive regardless of intents; GUILDS keeps the
        // gateway session minimal.
        let config = Config::new(self.token.clone(), Intents::GUILDS);

        let shards = gateway::create_recommended(&http_client, config, |_, b| b.build())
            .await
            .map_err(|e| Error::Platform(format!("create_recommended error: {e}")))?;

        for shard in shards {
            self.shard_senders.push(shard.sender());

            let http_for_shard = http_client.clone();
            let interactions_for_shard = self.interactions.clone();

            let handle = tokio::spawn(async move {
                shard_runner(shard, http_for_shard, application_id, interactions_for_shard).await;
            });
            self.shard_tasks.push(handle);
        }

        self.connection_status = ConnectionStatus::Connected;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), Error> {
        self.connection_status = ConnectionStatus::Disconnected;

        // Gracefully close shards
        for sender in &self.shard_senders {
            let _ = sender.close(CloseFrame::NORMAL);
        }
        // Wait for them
        for task in &mut self.shard_tasks {
            let _ = task.await;
        }

        self.shard_senders.clear();
        self.shard_tasks.clear();

        Ok(())
    }

    async fn get_connection_status(&self) -> Result<ConnectionStatus, Error> {
        Ok(self.connection_status.clone())
    }
}
