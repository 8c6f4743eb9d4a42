// File: nyuxstore-core/src/services/import/parser.rs

//! Heuristic extraction of account records from loosely structured text
//! dumps. This is a best-effort pattern matcher, not a grammar: a section
//! whose credentials fit none of the known shapes contributes nothing.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// One candidate record pulled out of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAccount {
    pub game: String,
    pub category: String,
    pub login: String,
    pub password: String,
}

/// Game name used when no label pattern matches a section.
pub const UNKNOWN_GAME: &str = "Desconhecido";

/// Category assigned when no keyword group matches.
pub const FALLBACK_CATEGORY: &str = "Ação/Aventura";

/// Keyword groups evaluated in order over the lowercased game name; the
/// first group with a hit wins. The order is semantic — reordering changes
/// classification results — so new entries are appended within a group,
/// never moved across groups.
pub const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("Corrida", &[
        "forza", "need for speed", "gran turismo", "assetto", "dirt",
        "the crew", "motogp", "wreckfest", "grid", "corrida", "racing",
    ]),
    ("Tiro", &[
        "call of duty", "counter-strike", "counter strike", "battlefield",
        "doom", "valorant", "rainbow six", "halo", "apex", "overwatch",
        "tiro", "fps",
    ]),
    ("RPG/Aventura", &[
        "witcher", "skyrim", "elden ring", "dark souls", "cyberpunk",
        "final fantasy", "baldur", "fallout", "dragon", "rpg",
    ]),
    ("Terror", &[
        "resident evil", "silent hill", "outlast", "dead by daylight",
        "phasmophobia", "amnesia", "evil within", "terror", "horror",
    ]),
    ("Esportes", &[
        "fifa", "efootball", "nba 2k", "madden", "wwe 2k",
        "football manager", "futebol", "esporte",
    ]),
    ("Simulação", &[
        "simulator", "farming", "flight", "euro truck", "cities",
        "the sims", "simula",
    ]),
    ("Casual", &[
        "minecraft", "stardew", "terraria", "among us", "fall guys",
        "roblox", "overcooked",
    ]),
];

static SECTION_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*={10,}\s*CONTA\s+\d+.*$").unwrap());

/// Label patterns for the game name, first match wins. The order mirrors
/// how specific each label is: an emoji-tagged "Jogo:" line beats a plain
/// one, which beats the English variant, which beats a bare emoji line.
static GAME_LABELS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?im)^\s*[🎮🕹️]+\s*Jogo\s*:\s*(.+)$").unwrap(),
        Regex::new(r"(?im)^\s*Jogo\s*:\s*(.+)$").unwrap(),
        Regex::new(r"(?im)^\s*Games?\s*:\s*(.+)$").unwrap(),
        Regex::new(r"(?m)^\s*🎮\s*(.+)$").unwrap(),
    ]
});

// The three credential shapes. All of them run over every section and
// their matches are pooled; duplicates fall out in parse_accounts.
static LOGIN_SENHA_INLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Login\s*:\s*(.+?)\s*Senha\s*:\s*(\S+)").unwrap());
static LOGIN_SENHA_STACKED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*Login\s*:?\s*\r?\n\s*(\S+)\s*\r?\n\s*Senha\s*:?\s*\r?\n\s*(\S+)")
        .unwrap()
});
static USER_PASS_INLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)User\s*:\s*(.+?)\s*Pass\s*:\s*(\S+)").unwrap());

/// Splits the raw dump into sections on `==== CONTA <n>` delimiter rows.
pub fn split_sections(text: &str) -> Vec<&str> {
    SECTION_DELIMITER
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// First game label pattern that matches wins; sections without any label
/// come back as [`UNKNOWN_GAME`].
pub fn extract_game_name(section: &str) -> String {
    for pattern in GAME_LABELS.iter() {
        if let Some(caps) = pattern.captures(section) {
            if let Some(m) = caps.get(1) {
                let name = m.as_str().trim();
                if !name.is_empty() {
                    return name.to_string();
                }
            }
        }
    }
    UNKNOWN_GAME.to_string()
}

/// Keyword classification over the lowercased game name; single label,
/// first matching group wins.
pub fn classify_category(game: &str) -> &'static str {
    let lowered = game.to_lowercase();
    for (category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return category;
        }
    }
    FALLBACK_CATEGORY
}

fn normalize_field(raw: &str) -> String {
    raw.trim().trim_matches(':').trim().to_string()
}

/// Pools credential pairs from the three pattern families, then normalizes
/// and filters them. Placeholder pairs are dropped: fields of two or fewer
/// characters, or logins containing "exemplo".
pub fn extract_credentials(section: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for caps in LOGIN_SENHA_INLINE.captures_iter(section) {
        pairs.push((caps[1].to_string(), caps[2].to_string()));
    }
    for caps in LOGIN_SENHA_STACKED.captures_iter(section) {
        pairs.push((caps[1].to_string(), caps[2].to_string()));
    }
    for caps in USER_PASS_INLINE.captures_iter(section) {
        pairs.push((caps[1].to_string(), caps[2].to_string()));
    }

    pairs
        .into_iter()
        .map(|(login, password)| (normalize_field(&login), normalize_field(&password)))
        .filter(|(login, password)| {
            login.chars().count() > 2
                && password.chars().count() > 2
                && !login.to_lowercase().contains("exemplo")
        })
        .collect()
}

/// Full pipeline: sections → (game, category) → pooled credentials →
/// whole-input dedup by (login, password), first seen wins.
pub fn parse_accounts(text: &str) -> Vec<ParsedAccount> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut out = Vec::new();

    for section in split_sections(text) {
        let game = extract_game_name(section);
        let category = classify_category(&game).to_string();
        for (login, password) in extract_credentials(section) {
            if !seen.insert((login.clone(), password.clone())) {
                continue;
            }
            out.push(ParsedAccount {
                game: game.clone(),
                category: category.clone(),
                login,
                password,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_delimiter_rows() {
        let text = "==================== CONTA 1\nJogo: A\n========== CONTA 2\nJogo: B\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 2);
        assert!(sections[0].contains("Jogo: A"));
        assert!(sections[1].contains("Jogo: B"));
    }

    #[test]
    fn short_equals_rows_are_not_delimiters() {
        let text = "===== CONTA 1\nJogo: A\n";
        assert_eq!(split_sections(text).len(), 1);
    }

    #[test]
    fn game_label_priority_is_fixed() {
        let section = "Jogo: Plain Name\n🎮 Jogo: Tagged Name\n";
        assert_eq!(extract_game_name(section), "Tagged Name");

        assert_eq!(extract_game_name("Game: English Label\n"), "English Label");
        assert_eq!(extract_game_name("Games: Many\n"), "Many");
        assert_eq!(extract_game_name("🎮 Bare Emoji Line\n"), "Bare Emoji Line");
        assert_eq!(extract_game_name("nothing here\n"), UNKNOWN_GAME);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify_category("CALL OF DUTY Modern Warfare"), "Tiro");
        assert_eq!(classify_category("call of duty"), "Tiro");
        assert_eq!(classify_category("Forza Horizon 5"), "Corrida");
        assert_eq!(classify_category("The Sims 4"), "Simulação");
        assert_eq!(classify_category("Some Unknown Game"), FALLBACK_CATEGORY);
    }

    #[test]
    fn classification_order_breaks_ties() {
        // Matches both the Corrida and Terror groups; Corrida is evaluated
        // first and must win.
        assert_eq!(classify_category("Resident Evil Racing"), "Corrida");
    }

    #[test]
    fn inline_and_stacked_credentials_are_pooled() {
        let section = "Login: alice1 Senha: secret1\nLogin:\nbob22\nSenha:\nsecret2\n";
        let pairs = extract_credentials(section);
        assert!(pairs.contains(&("alice1".to_string(), "secret1".to_string())));
        assert!(pairs.contains(&("bob22".to_string(), "secret2".to_string())));
    }

    #[test]
    fn user_pass_family_is_recognized() {
        let pairs = extract_credentials("User: carol3 Pass: hunter22\n");
        assert_eq!(pairs, vec![("carol3".to_string(), "hunter22".to_string())]);
    }

    #[test]
    fn placeholder_and_short_pairs_are_dropped() {
        let section = "Login: exemplo123 Senha: abc456\nLogin: ab Senha: cd\n";
        assert!(extract_credentials(section).is_empty());
    }

    #[test]
    fn dedup_preserves_first_seen_order() {
        let text = "\
========== CONTA 1
Jogo: Forza Horizon 5
Login: alice1 Senha: secret1
========== CONTA 2
Jogo: Doom Eternal
Login: alice1 Senha: secret1
Login: bob22 Senha: secret2
";
        let accounts = parse_accounts(text);
        assert_eq!(accounts.len(), 2);
        // The duplicated pair keeps its first (Forza) attribution.
        assert_eq!(accounts[0].game, "Forza Horizon 5");
        assert_eq!(accounts[0].login, "alice1");
        assert_eq!(accounts[1].game, "Doom Eternal");
        assert_eq!(accounts[1].login, "bob22");
    }

    #[test]
    fn section_without_credentials_contributes_nothing() {
        let text = "========== CONTA 1\nJogo: Forza Horizon 5\nno creds here\n";
        assert!(parse_accounts(text).is_empty());
    }
}
