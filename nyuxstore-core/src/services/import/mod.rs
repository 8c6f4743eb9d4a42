// File: nyuxstore-core/src/services/import/mod.rs

pub mod parser;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};

use nyuxstore_common::error::Error;

use crate::services::store_service::StoreService;

/// Outcome of one import batch.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub inserted: usize,
    pub failed: usize,
    pub distinct_games: usize,
    /// (category, inserted count), descending by count.
    pub category_counts: Vec<(String, usize)>,
}

impl ImportReport {
    pub fn distinct_categories(&self) -> usize {
        self.category_counts.len()
    }
}

/// Best-effort importer for loosely structured account dumps.
pub struct ImportService {
    store: Arc<StoreService>,
}

impl ImportService {
    pub fn new(store: Arc<StoreService>) -> Self {
        Self { store }
    }

    /// Parses `text` and inserts every surviving record. Per-record insert
    /// failures are counted and logged; they never abort the batch.
    pub async fn import_text(&self, text: &str) -> Result<ImportReport, Error> {
        let parsed = parser::parse_accounts(text);
        info!("Import parsed {} candidate account(s)", parsed.len());

        let mut inserted = 0usize;
        let mut failed = 0usize;
        let mut games: HashSet<String> = HashSet::new();
        let mut per_category: HashMap<String, usize> = HashMap::new();

        for record in parsed {
            match self
                .store
                .add_account(&record.game, &record.category, &record.login, &record.password)
                .await
            {
                Ok(account) => {
                    inserted += 1;
                    games.insert(account.game);
                    *per_category.entry(account.category).or_insert(0) += 1;
                }
                Err(e) => {
                    warn!("Import failed to insert an account for '{}': {e}", record.game);
                    failed += 1;
                }
            }
        }

        let mut category_counts: Vec<(String, usize)> = per_category.into_iter().collect();
        category_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(ImportReport {
            inserted,
            failed,
            distinct_games: games.len(),
            category_counts,
        })
    }
}
