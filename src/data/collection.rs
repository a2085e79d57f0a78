use crate::data::card::CardRecord;
use crate::data::catalog::Catalog;
use crate::data::connectors::CsvConnector;
use crate::error::{MagiqueError, Result};
use std::path::Path;
use std::sync::Arc;

/// Owned physical cards, one slot per copy
///
/// Slots are indexed in load order. Several slots may share a card record when
/// more than one copy of a card is owned.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    slots: Vec<Arc<CardRecord>>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// One slot per record, in order
    pub fn from_records(records: impl IntoIterator<Item = CardRecord>) -> Self {
        Self {
            slots: records.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn push(&mut self, card: Arc<CardRecord>, copies: usize) {
        for _ in 0..copies {
            self.slots.push(Arc::clone(&card));
        }
    }

    /// Resolves every line of an owned-card list through `catalog`
    pub fn parse(text: &str, catalog: &Catalog) -> Result<Self> {
        let entries = CsvConnector::parse(text)?;
        let mut collection = Self::new();
        for entry in entries {
            let card = catalog.at(&entry.name)?;
            collection.push(card, entry.count);
        }
        Ok(collection)
    }

    pub fn load<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let collection = Self::parse(&contents, catalog)?;
        log::info!("Loaded {} owned cards from {}", collection.count(), path.display());
        Ok(collection)
    }

    pub fn at(&self, index: usize) -> Result<&Arc<CardRecord>> {
        self.slots.get(index).ok_or(MagiqueError::SlotOutOfRange {
            index,
            size: self.slots.len(),
        })
    }

    /// Index of the first slot at or after `start` holding `name`
    pub fn index_at(&self, name: &str, start: usize) -> Result<usize> {
        self.slots
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, card)| card.name == name)
            .map(|(i, _)| i)
            .ok_or_else(|| MagiqueError::NoRemainingCopy {
                name: name.to_string(),
                start,
            })
    }

    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Collection {
        Collection::from_records([
            CardRecord::new("Elf"),
            CardRecord::new("Goblin"),
            CardRecord::new("Elf"),
        ])
    }

    #[test]
    fn test_index_at_finds_next_occurrence() {
        let collection = sample();
        assert_eq!(collection.index_at("Elf", 0).unwrap(), 0);
        assert_eq!(collection.index_at("Elf", 1).unwrap(), 2);
        assert!(matches!(
            collection.index_at("Elf", 3),
            Err(MagiqueError::NoRemainingCopy { .. })
        ));
    }

    #[test]
    fn test_at_out_of_range() {
        let collection = sample();
        assert_eq!(collection.at(1).unwrap().name, "Goblin");
        assert!(matches!(
            collection.at(3),
            Err(MagiqueError::SlotOutOfRange { index: 3, size: 3 })
        ));
    }

    #[test]
    fn test_parse_expands_copies() {
        let catalog = Catalog::new([CardRecord::new("Elf"), CardRecord::new("Forest")]);
        let collection = Collection::parse("2,Elf\nForest\n", &catalog).unwrap();
        assert_eq!(collection.count(), 3);
        assert_eq!(collection.at(1).unwrap().name, "Elf");
        assert_eq!(collection.at(2).unwrap().name, "Forest");
    }

    #[test]
    fn test_parse_unknown_card_fails() {
        let catalog = Catalog::new([CardRecord::new("Elf")]);
        let err = Collection::parse("1,Dragon", &catalog).unwrap_err();
        assert!(matches!(err, MagiqueError::CardNotFound { .. }));
    }
}
