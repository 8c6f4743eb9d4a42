// File: nyuxstore-core/src/services/discord/modals.rs

//! Modal builders and the helper that reads submitted text inputs back out
//! of a `ModalSubmit` interaction.

use twilight_model::application::interaction::modal::ModalInteractionData;
use twilight_model::channel::message::component::{
    ActionRow, Component, TextInput, TextInputStyle,
};
use twilight_model::http::interaction::InteractionResponseData;

use super::registry::{MODAL_ADD_ACCOUNT, MODAL_GENERATE_KEY, MODAL_REDEEM_KEY, MODAL_SEARCH_GAME};

pub const FIELD_GAME: &str = "game";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_LOGIN: &str = "login";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_DURATION: &str = "duration";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_NAME: &str = "name";
pub const FIELD_KEY: &str = "key";

fn text_input(custom_id: &str, label: &str, placeholder: &str) -> Component {
    Component::ActionRow(ActionRow {
        components: vec![Component::TextInput(TextInput {
            custom_id: custom_id.to_string(),
            label: label.to_string(),
            max_length: None,
            min_length: None,
            placeholder: Some(placeholder.to_string()),
            required: Some(true),
            style: TextInputStyle::Short,
            value: None,
        })],
    })
}

fn modal(custom_id: &str, title: &str, rows: Vec<Component>) -> InteractionResponseData {
    InteractionResponseData {
        custom_id: Some(custom_id.to_string()),
        title: Some(title.to_string()),
        components: Some(rows),
        ..Default::default()
    }
}

pub fn add_account_modal() -> InteractionResponseData {
    modal(
        MODAL_ADD_ACCOUNT,
        "➕ Adicionar Nova Conta",
        vec![
            text_input(FIELD_GAME, "Nome do Jogo", "Ex: Assassin's Creed Shadows"),
            text_input(FIELD_CATEGORY, "Categoria", "Ex: Ação, Aventura, Corrida"),
            text_input(FIELD_LOGIN, "Login Steam", "Usuário da conta"),
            text_input(FIELD_PASSWORD, "Senha Steam", "Senha da conta"),
        ],
    )
}

pub fn generate_key_modal() -> InteractionResponseData {
    modal(
        MODAL_GENERATE_KEY,
        "🔑 Gerar Key",
        vec![
            text_input(FIELD_DURATION, "Duração", "7d, 1m, 1a, lifetime"),
            text_input(FIELD_ROLE, "Cargo", "Vip Pack"),
        ],
    )
}

pub fn search_game_modal() -> InteractionResponseData {
    modal(
        MODAL_SEARCH_GAME,
        "🔍 Buscar Jogo",
        vec![text_input(FIELD_NAME, "Nome do Jogo", "Digite o nome do jogo...")],
    )
}

pub fn redeem_key_modal() -> InteractionResponseData {
    modal(
        MODAL_REDEEM_KEY,
        "🎁 Resgatar Key",
        vec![text_input(FIELD_KEY, "Sua Key", "NYUX-STORE-XXXXXXXXXX")],
    )
}

/// Pulls the submitted value of a named text input out of modal data.
pub fn text_value<'a>(data: &'a ModalInteractionData, custom_id: &str) -> Option<&'a str> {
    data.components
        .iter()
        .flat_map(|row| row.components.iter())
        .find(|component| component.custom_id == custom_id)
        .and_then(|component| component.value.as_deref())
}
