use crate::data::card::CardRecord;
use crate::data::connectors::MtgJsonConnector;
use crate::error::{MagiqueError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Read-only card database, keyed by name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards_by_name: HashMap<String, Arc<CardRecord>>,
}

impl Catalog {
    pub fn new(cards: impl IntoIterator<Item = CardRecord>) -> Self {
        let mut cards_by_name = HashMap::new();
        for card in cards {
            if cards_by_name.contains_key(&card.name) {
                log::debug!("Duplicate catalog entry for {}, keeping the last", card.name);
            }
            cards_by_name.insert(card.name.clone(), Arc::new(card));
        }
        Self { cards_by_name }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let cards = MtgJsonConnector::load(path)?;
        log::info!("Loaded {} cards from {}", cards.len(), path.display());
        Ok(Self::new(cards))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(MtgJsonConnector::parse(json)?))
    }

    pub fn at(&self, name: &str) -> Result<Arc<CardRecord>> {
        self.cards_by_name
            .get(name)
            .cloned()
            .ok_or_else(|| MagiqueError::CardNotFound { name: name.to_string() })
    }

    pub fn len(&self) -> usize {
        self.cards_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards_by_name.is_empty()
    }
}
