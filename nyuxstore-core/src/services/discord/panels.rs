// File: nyuxstore-core/src/services/discord/panels.rs

//! Embed and button builders for the three panels plus the result embeds
//! they hand out. Custom ids come from the registry so dispatch stays in
//! one place.

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};
use twilight_model::channel::message::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder};

use nyuxstore_common::models::{Account, StoreStats};

use crate::services::import::ImportReport;

use super::registry::{
    BTN_ADMIN_ADD, BTN_ADMIN_KEY, BTN_ADMIN_STATS, BTN_PUBLIC_REDEEM, BTN_VIP_REDEEM,
    BTN_VIP_SEARCH,
};

const COLOR_RED: u32 = 0xED4245;
const COLOR_GOLD: u32 = 0xF1C40F;
const COLOR_BLUE: u32 = 0x3498DB;
const COLOR_GREEN: u32 = 0x57F287;

/// Embed field values cap at 1024 characters; long stock listings get cut
/// with a trailing marker instead of failing validation.
const MAX_STOCK_LINES: usize = 15;

fn button(custom_id: &str, label: &str, style: ButtonStyle) -> Component {
    Component::Button(Button {
        custom_id: Some(custom_id.to_string()),
        disabled: false,
        emoji: None,
        label: Some(label.to_string()),
        style,
        url: None,
        sku_id: None,
    })
}

pub fn admin_panel_embed() -> Embed {
    EmbedBuilder::new()
        .title("🔧 PAINEL ADMIN - NYUXSTORE")
        .description(
            "Gerencie sua loja de contas Steam.\n\
             Para importar contas em massa, use /importar com um arquivo .txt.",
        )
        .color(COLOR_RED)
        .build()
}

pub fn admin_panel_components() -> Vec<Component> {
    vec![Component::ActionRow(ActionRow {
        components: vec![
            button(BTN_ADMIN_ADD, "➕ Adicionar Conta", ButtonStyle::Success),
            button(BTN_ADMIN_KEY, "🔑 Gerar Key", ButtonStyle::Primary),
            button(BTN_ADMIN_STATS, "📊 Estatísticas", ButtonStyle::Secondary),
        ],
    })]
}

pub fn vip_panel_embed(user_id: u64) -> Embed {
    EmbedBuilder::new()
        .title("🎮 PAINEL VIP - NYUXSTORE")
        .description(format!("Olá <@{user_id}>! Acesse seus jogos."))
        .color(COLOR_GOLD)
        .build()
}

pub fn vip_panel_components() -> Vec<Component> {
    vec![Component::ActionRow(ActionRow {
        components: vec![
            button(BTN_VIP_SEARCH, "🔍 Buscar Jogo", ButtonStyle::Success),
            button(BTN_VIP_REDEEM, "🎁 Resgatar Key", ButtonStyle::Primary),
        ],
    })]
}

pub fn public_panel_embed() -> Embed {
    EmbedBuilder::new()
        .title("🎮 NYUXSTORE")
        .description("🎁 Resgate sua key e acesse jogos premium!")
        .color(COLOR_BLUE)
        .build()
}

pub fn public_panel_components() -> Vec<Component> {
    vec![Component::ActionRow(ActionRow {
        components: vec![button(BTN_PUBLIC_REDEEM, "🎁 Resgatar Key", ButtonStyle::Success)],
    })]
}

pub fn stats_embed(stats: &StoreStats) -> Embed {
    EmbedBuilder::new()
        .title("📊 Estatísticas NyuxStore")
        .color(COLOR_BLUE)
        .field(EmbedFieldBuilder::new("🎮 Jogos Disponíveis", stats.available.to_string()).inline())
        .field(EmbedFieldBuilder::new("📦 Total de Jogos", stats.total.to_string()).inline())
        .field(EmbedFieldBuilder::new("✅ Jogos Entregues", stats.used.to_string()).inline())
        .field(EmbedFieldBuilder::new("🔑 Keys Ativas", stats.active_keys.to_string()).inline())
        .field(
            EmbedFieldBuilder::new("📂 Categorias", stats.distinct_categories.to_string()).inline(),
        )
        .build()
}

pub fn account_delivery_embed(account: &Account) -> Embed {
    EmbedBuilder::new()
        .title(format!("🎮 {}", account.game))
        .description("Conta encontrada! Aproveite seu jogo.")
        .color(COLOR_GREEN)
        .field(EmbedFieldBuilder::new("👤 Login", format!("`{}`", account.login)))
        .field(EmbedFieldBuilder::new("🔒 Senha", format!("`{}`", account.password)))
        .field(EmbedFieldBuilder::new("⚠️ Aviso", "Mude para **MODO OFFLINE** antes de jogar!"))
        .footer(EmbedFooterBuilder::new("NyuxStore"))
        .build()
}

pub fn import_report_embed(report: &ImportReport) -> Embed {
    let mut categories = String::new();
    for (category, count) in &report.category_counts {
        categories.push_str(&format!("📂 {category}: {count}\n"));
    }
    if categories.is_empty() {
        categories.push_str("Nenhuma");
    }

    EmbedBuilder::new()
        .title("📥 Importação concluída")
        .color(COLOR_GREEN)
        .field(EmbedFieldBuilder::new("✅ Contas inseridas", report.inserted.to_string()).inline())
        .field(EmbedFieldBuilder::new("❌ Falhas", report.failed.to_string()).inline())
        .field(
            EmbedFieldBuilder::new("🎮 Jogos distintos", report.distinct_games.to_string()).inline(),
        )
        .field(EmbedFieldBuilder::new("Por categoria", categories))
        .build()
}

pub fn stock_embed(groups: &[(String, Vec<Account>)]) -> Embed {
    let mut builder = EmbedBuilder::new().title("📦 Estoque NyuxStore").color(COLOR_BLUE);

    if groups.is_empty() {
        builder = builder.description("Nenhuma conta disponível no momento.");
    }

    for (category, accounts) in groups {
        let mut lines = String::new();
        for account in accounts.iter().take(MAX_STOCK_LINES) {
            lines.push_str(&format!("🎮 {} (`{}`)\n", account.game, account.login));
        }
        if accounts.len() > MAX_STOCK_LINES {
            lines.push_str(&format!("… e mais {}\n", accounts.len() - MAX_STOCK_LINES));
        }
        builder = builder.field(EmbedFieldBuilder::new(
            format!("📂 {category} ({})", accounts.len()),
            lines,
        ));
    }

    builder.build()
}
