//! Maps a gene sequence onto a concrete deck.
//!
//! Every gene is a collection slot index. Key cards are placed first on their
//! own physical copies, then genes are walked in order. A slot referenced more
//! than once contributes one card. New entries must be legal in the active
//! format; existing entries are only capped.

use super::deck::{ColorIdentityPreference, DeckEntry, ProposedDeck};
use crate::config::DeckConfig;
use crate::data::{CardRecord, Catalog, Collection};
use crate::error::Result;
use crate::types::{Color, Format};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

/// Format and color rules applied while building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRules {
    pub format: Format,
    /// Colors kept when the identity is inferred
    pub colors: usize,
    /// Identity mandated regardless of key cards
    pub color_identity: BTreeSet<Color>,
}

impl DeckRules {
    pub fn new(format: Format, colors: usize) -> Self {
        Self {
            format,
            colors,
            color_identity: BTreeSet::new(),
        }
    }

    pub fn with_identity(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.color_identity.extend(colors);
        self
    }
}

impl From<&DeckConfig> for DeckRules {
    fn from(config: &DeckConfig) -> Self {
        Self {
            format: config.format,
            colors: config.colors,
            color_identity: config.color_identity.clone(),
        }
    }
}

/// Builds a deck from `genes` in one call, resolving key-card slots first
pub fn build(
    genes: &[u32],
    key_cards: &[Arc<CardRecord>],
    collection: &Collection,
    rules: &DeckRules,
) -> Result<ProposedDeck> {
    let key_slots = resolve_key_slots(key_cards, collection)?;
    assemble(genes, key_cards, &key_slots, collection, rules)
}

/// Finds a distinct physical copy for every key card
///
/// Repeated names resolve to successive copies; running out of copies is a
/// lookup failure.
fn resolve_key_slots(key_cards: &[Arc<CardRecord>], collection: &Collection) -> Result<Vec<usize>> {
    let mut last_used: HashMap<&str, usize> = HashMap::new();
    let mut slots = Vec::with_capacity(key_cards.len());

    for card in key_cards {
        let start = last_used.get(card.name.as_str()).map_or(0, |i| i + 1);
        let index = collection.index_at(&card.name, start)?;
        last_used.insert(&card.name, index);
        slots.push(index);
    }

    Ok(slots)
}

fn assemble(
    genes: &[u32],
    key_cards: &[Arc<CardRecord>],
    key_slots: &[usize],
    collection: &Collection,
    rules: &DeckRules,
) -> Result<ProposedDeck> {
    let limit = rules.format.copy_limit();
    let mut preferred: BTreeSet<Color> = rules.color_identity.clone();
    let mut consumed: HashSet<usize> = HashSet::with_capacity(key_slots.len() + genes.len());
    let mut cards: BTreeMap<String, DeckEntry> = BTreeMap::new();

    for (card, &slot) in key_cards.iter().zip(key_slots) {
        consumed.insert(slot);

        match cards.get_mut(&card.name) {
            Some(entry) if entry.count < limit => entry.count += 1,
            // A full stack starts over as a fresh entry
            Some(entry) => *entry = DeckEntry::new(Arc::clone(card)),
            None => {
                cards.insert(card.name.clone(), DeckEntry::new(Arc::clone(card)));
            }
        }

        preferred.extend(card.color_identity.iter().copied());
    }

    let mandated = !preferred.is_empty();
    let mut colors_seen: BTreeMap<Color, u32> = BTreeMap::new();

    for &gene in genes {
        let slot = gene as usize;
        if !consumed.insert(slot) {
            continue;
        }

        let card = collection.at(slot)?;

        if !mandated {
            for &color in &card.color_identity {
                *colors_seen.entry(color).or_default() += 1;
            }
        }

        match cards.get_mut(&card.name) {
            Some(entry) => entry.count = (entry.count + 1).min(limit),
            None if card.is_legal(rules.format) => {
                cards.insert(card.name.clone(), DeckEntry::new(Arc::clone(card)));
            }
            None => {}
        }
    }

    let color_identity = if mandated {
        ColorIdentityPreference::Mandated(preferred)
    } else {
        ColorIdentityPreference::Inferred(top_colors(&colors_seen, rules.colors))
    };

    Ok(ProposedDeck {
        cards,
        color_identity,
    })
}

/// The `k` most observed colors; ties keep enumeration order, colorless never ranks
fn top_colors(colors_seen: &BTreeMap<Color, u32>, k: usize) -> BTreeSet<Color> {
    let mut ranked: Vec<(Color, u32)> = Color::ALL
        .into_iter()
        .filter(|&c| c != Color::Colorless)
        .map(|c| (c, colors_seen.get(&c).copied().unwrap_or(0)))
        .collect();

    // Stable sort
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked.into_iter().take(k).map(|(c, _)| c).collect()
}

/// Builder bound to one collection, key-card list and rule set
///
/// Key-card slots are resolved once at construction, so a missing key card
/// fails before any optimization starts.
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    collection: Arc<Collection>,
    key_cards: Vec<Arc<CardRecord>>,
    key_slots: Vec<usize>,
    rules: DeckRules,
}

impl DeckBuilder {
    pub fn new(collection: Arc<Collection>, key_cards: Vec<Arc<CardRecord>>, rules: DeckRules) -> Result<Self> {
        let key_slots = resolve_key_slots(&key_cards, &collection)?;
        Ok(Self {
            collection,
            key_cards,
            key_slots,
            rules,
        })
    }

    /// Resolves the configured key-card names through `catalog`
    pub fn from_config(collection: Arc<Collection>, catalog: &Catalog, config: &DeckConfig) -> Result<Self> {
        let key_cards = config
            .key_cards
            .iter()
            .map(|name| catalog.at(name))
            .collect::<Result<Vec<_>>>()?;
        Self::new(collection, key_cards, DeckRules::from(config))
    }

    pub fn build(&self, genes: &[u32]) -> Result<ProposedDeck> {
        let deck = assemble(genes, &self.key_cards, &self.key_slots, &self.collection, &self.rules)?;
        log::trace!(
            "Built deck: {} cards ({} distinct), identity {:?}",
            deck.total_cards(),
            deck.distinct_cards(),
            deck.color_identity()
        );
        Ok(deck)
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn rules(&self) -> &DeckRules {
        &self.rules
    }

    pub fn format(&self) -> Format {
        self.rules.format
    }

    pub fn key_cards(&self) -> &[Arc<CardRecord>] {
        &self.key_cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MagiqueError;
    use crate::types::CardType;

    fn card(name: &str, colors: &[Color]) -> CardRecord {
        CardRecord::new(name)
            .with_colors(colors.iter().copied())
            .with_types([CardType::Creature])
            .legal_in([Format::Standard, Format::Commander])
    }

    fn collection() -> Collection {
        Collection::from_records([
            card("Elf", &[Color::Green]),
            card("Goblin", &[Color::Red]),
            card("Elf", &[Color::Green]),
            card("Merfolk", &[Color::Blue]),
            card("Elf", &[Color::Green]),
            card("Knight", &[Color::White]),
        ])
    }

    #[test]
    fn test_key_cards_resolve_to_distinct_copies() {
        let collection = collection();
        let elf = Arc::new(card("Elf", &[Color::Green]));
        let slots = resolve_key_slots(&[elf.clone(), elf.clone(), elf.clone()], &collection).unwrap();
        assert_eq!(slots, vec![0, 2, 4]);

        let err = resolve_key_slots(&[elf.clone(), elf.clone(), elf.clone(), elf], &collection).unwrap_err();
        assert!(matches!(err, MagiqueError::NoRemainingCopy { .. }));
    }

    #[test]
    fn test_key_card_slot_is_consumed() {
        let collection = collection();
        let elf = Arc::new(card("Elf", &[Color::Green]));
        let rules = DeckRules::new(Format::Standard, 2);

        // Gene 0 is the slot the key card already took
        let deck = build(&[0, 1], &[elf], &collection, &rules).unwrap();
        assert_eq!(deck.count_of("Elf"), 1);
        assert_eq!(deck.count_of("Goblin"), 1);
    }

    #[test]
    fn test_key_card_stack_restarts_when_full() {
        let records: Vec<CardRecord> = (0..5).map(|_| card("Elf", &[Color::Green])).collect();
        let collection = Collection::from_records(records);
        let elf = Arc::new(card("Elf", &[Color::Green]));
        let rules = DeckRules::new(Format::Standard, 2);

        let four = build(&[], &vec![elf.clone(); 4], &collection, &rules).unwrap();
        assert_eq!(four.count_of("Elf"), 4);

        let five = build(&[], &vec![elf; 5], &collection, &rules).unwrap();
        assert_eq!(five.count_of("Elf"), 1);
    }

    #[test]
    fn test_key_card_inserted_even_when_illegal() {
        let banned = Arc::new(CardRecord::new("Oko").with_colors([Color::Green, Color::Blue]));
        let collection = Collection::from_records([(*banned).clone(), (*banned).clone()]);
        let rules = DeckRules::new(Format::Standard, 2);

        let deck = build(&[1], &[banned], &collection, &rules).unwrap();
        // The gene copy increments the existing entry despite illegality
        assert_eq!(deck.count_of("Oko"), 2);
    }

    #[test]
    fn test_illegal_gene_card_dropped() {
        let collection = Collection::from_records([
            CardRecord::new("Vintage Only").legal_in([Format::Vintage]),
            card("Goblin", &[Color::Red]),
        ]);
        let rules = DeckRules::new(Format::Standard, 2);

        let deck = build(&[0, 1], &[], &collection, &rules).unwrap();
        assert_eq!(deck.count_of("Vintage Only"), 0);
        assert_eq!(deck.count_of("Goblin"), 1);
    }

    #[test]
    fn test_inferred_identity_ranks_observed_colors() {
        let collection = collection();
        let rules = DeckRules::new(Format::Standard, 2);

        let deck = build(&[0, 2, 1, 5], &[], &collection, &rules).unwrap();
        let expected: BTreeSet<Color> = [Color::Green, Color::White].into();
        assert_eq!(deck.color_identity(), &ColorIdentityPreference::Inferred(expected));
    }

    #[test]
    fn test_inferred_identity_ties_follow_enumeration_order() {
        let collection = collection();
        let rules = DeckRules::new(Format::Standard, 1);

        let deck = build(&[], &[], &collection, &rules).unwrap();
        assert_eq!(deck.color_identity().colors(), &BTreeSet::from([Color::White]));
    }

    #[test]
    fn test_preset_identity_is_a_mandate() {
        let collection = collection();
        let rules = DeckRules::new(Format::Standard, 2).with_identity([Color::Black]);

        let deck = build(&[1, 3], &[], &collection, &rules).unwrap();
        assert!(deck.color_identity().is_mandated());
        assert_eq!(deck.color_identity().colors(), &BTreeSet::from([Color::Black]));
        assert_eq!(deck.distinct_cards(), 2);
    }

    #[test]
    fn test_gene_out_of_range_fails() {
        let collection = collection();
        let rules = DeckRules::new(Format::Standard, 2);
        let err = build(&[99], &[], &collection, &rules).unwrap_err();
        assert!(matches!(err, MagiqueError::SlotOutOfRange { index: 99, size: 6 }));
    }

    #[test]
    fn test_builder_from_config_resolves_names() {
        let collection = Arc::new(collection());
        let catalog = Catalog::new([card("Elf", &[Color::Green])]);
        let config = DeckConfig {
            key_cards: vec!["Elf".to_string()],
            ..Default::default()
        };

        let builder = DeckBuilder::from_config(Arc::clone(&collection), &catalog, &config).unwrap();
        let deck = builder.build(&[3]).unwrap();
        assert_eq!(deck.count_of("Elf"), 1);
        assert_eq!(deck.count_of("Merfolk"), 1);
        assert!(deck.color_identity().is_mandated());

        let missing = DeckConfig {
            key_cards: vec!["Dragon".to_string()],
            ..Default::default()
        };
        let err = DeckBuilder::from_config(collection, &catalog, &missing).unwrap_err();
        assert!(err.is_not_found());
    }
}
