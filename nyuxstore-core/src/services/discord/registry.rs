// File: nyuxstore-core/src/services/discord/registry.rs

use std::collections::HashMap;

/// Slash commands known to the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    AdminPanel,
    VipPanel,
    Setup,
    Import,
    Stock,
}

/// Panel buttons, addressed by their stable component custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    AdminAddAccount,
    AdminGenerateKey,
    AdminStats,
    VipSearchGame,
    VipRedeemKey,
    PublicRedeemKey,
}

/// Modal submissions, addressed by their stable modal custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    AddAccount,
    GenerateKey,
    SearchGame,
    RedeemKey,
}

pub const CMD_ADMIN_PANEL: &str = "painel_admin";
pub const CMD_VIP_PANEL: &str = "painel_vip";
pub const CMD_SETUP: &str = "setup";
pub const CMD_IMPORT: &str = "importar";
pub const CMD_STOCK: &str = "estoque";

pub const BTN_ADMIN_ADD: &str = "admin_add";
pub const BTN_ADMIN_KEY: &str = "admin_key";
pub const BTN_ADMIN_STATS: &str = "admin_stats";
pub const BTN_VIP_SEARCH: &str = "vip_buscar";
pub const BTN_VIP_REDEEM: &str = "vip_resgatar";
pub const BTN_PUBLIC_REDEEM: &str = "pub_resgatar";

pub const MODAL_ADD_ACCOUNT: &str = "modal_add_account";
pub const MODAL_GENERATE_KEY: &str = "modal_generate_key";
pub const MODAL_SEARCH_GAME: &str = "modal_search_game";
pub const MODAL_REDEEM_KEY: &str = "modal_redeem_key";

/// Maps every stable identifier to its tagged variant. Built once when the
/// interaction service starts; interactions only ever do lookups.
pub struct InteractionRegistry {
    commands: HashMap<&'static str, SlashCommand>,
    components: HashMap<&'static str, ComponentAction>,
    modals: HashMap<&'static str, ModalAction>,
}

impl InteractionRegistry {
    pub fn new() -> Self {
        let commands = HashMap::from([
            (CMD_ADMIN_PANEL, SlashCommand::AdminPanel),
            (CMD_VIP_PANEL, SlashCommand::VipPanel),
            (CMD_SETUP, SlashCommand::Setup),
            (CMD_IMPORT, SlashCommand::Import),
            (CMD_STOCK, SlashCommand::Stock),
        ]);
        let components = HashMap::from([
            (BTN_ADMIN_ADD, ComponentAction::AdminAddAccount),
            (BTN_ADMIN_KEY, ComponentAction::AdminGenerateKey),
            (BTN_ADMIN_STATS, ComponentAction::AdminStats),
            (BTN_VIP_SEARCH, ComponentAction::VipSearchGame),
            (BTN_VIP_REDEEM, ComponentAction::VipRedeemKey),
            (BTN_PUBLIC_REDEEM, ComponentAction::PublicRedeemKey),
        ]);
        let modals = HashMap::from([
            (MODAL_ADD_ACCOUNT, ModalAction::AddAccount),
            (MODAL_GENERATE_KEY, ModalAction::GenerateKey),
            (MODAL_SEARCH_GAME, ModalAction::SearchGame),
            (MODAL_REDEEM_KEY, ModalAction::RedeemKey),
        ]);
        Self { commands, components, modals }
    }

    pub fn command(&self, name: &str) -> Option<SlashCommand> {
        self.commands.get(name).copied()
    }

    pub fn component(&self, custom_id: &str) -> Option<ComponentAction> {
        self.components.get(custom_id).copied()
    }

    pub fn modal(&self, custom_id: &str) -> Option<ModalAction> {
        self.modals.get(custom_id).copied()
    }
}

impl Default for InteractionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_stable_identifier() {
        let registry = InteractionRegistry::new();

        assert_eq!(registry.command(CMD_ADMIN_PANEL), Some(SlashCommand::AdminPanel));
        assert_eq!(registry.command(CMD_IMPORT), Some(SlashCommand::Import));
        assert_eq!(registry.component(BTN_VIP_SEARCH), Some(ComponentAction::VipSearchGame));
        assert_eq!(registry.component(BTN_PUBLIC_REDEEM), Some(ComponentAction::PublicRedeemKey));
        assert_eq!(registry.modal(MODAL_REDEEM_KEY), Some(ModalAction::RedeemKey));

        assert_eq!(registry.command("unknown"), None);
        assert_eq!(registry.component("unknown"), None);
        assert_eq!(registry.modal("unknown"), None);
    }
}
