use crate::engines::construction::Deck;
use crate::engines::generation::genome::GeneSequence;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize)]
pub struct EliteDeck {
    pub genes: GeneSequence,
    pub fitness: f64,
    pub card_list: Vec<String>,
    #[serde(skip)]
    pub canonical_string: String, // For deduplication
}

impl EliteDeck {
    pub fn from_deck(genes: GeneSequence, deck: &Deck) -> Self {
        let card_list = deck.card_list();
        Self {
            genes,
            fitness: deck.rank(),
            canonical_string: get_canonical_deck_string(&card_list),
            card_list,
        }
    }
}

/// Best distinct decks seen during a run
///
/// Two gene sequences that build the same card list count once.
pub struct HallOfFame {
    decks: Vec<EliteDeck>,
    max_size: usize,
    seen_signatures: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            decks: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Attempt to add a deck, returns whether it was kept
    pub fn try_add(&mut self, deck: EliteDeck) -> bool {
        if self.max_size == 0 || self.seen_signatures.contains(&deck.canonical_string) {
            return false;
        }

        // Full and no better than the weakest entry
        if self.decks.len() >= self.max_size {
            if let Some(last) = self.decks.last() {
                if deck.fitness <= last.fitness {
                    return false;
                }
            }
        }

        self.seen_signatures.insert(deck.canonical_string.clone());
        self.decks.push(deck);
        self.sort_and_trim();
        true
    }

    fn sort_and_trim(&mut self) {
        // Stable, so earlier discoveries win ties
        self.decks.sort_by(|a, b| {
            b.fitness.partial_cmp(&a.fitness).unwrap_or(std::cmp::Ordering::Equal)
        });

        while self.decks.len() > self.max_size {
            if let Some(removed) = self.decks.pop() {
                self.seen_signatures.remove(&removed.canonical_string);
            }
        }
    }

    pub fn get_all(&self) -> &[EliteDeck] {
        &self.decks
    }

    pub fn best(&self) -> Option<&EliteDeck> {
        self.decks.first()
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }
}

/// Canonical string for deduplication: the sorted card list
pub fn get_canonical_deck_string(card_list: &[String]) -> String {
    card_list.join("|")
}
