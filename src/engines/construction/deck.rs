use crate::data::CardRecord;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Copies of one named card in a deck
#[derive(Debug, Clone, PartialEq)]
pub struct DeckEntry {
    pub count: u32,
    pub card: Arc<CardRecord>,
}

impl DeckEntry {
    pub fn new(card: Arc<CardRecord>) -> Self {
        Self { count: 1, card }
    }
}

/// Colors governing which cards belong in a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "colors", rename_all = "snake_case")]
pub enum ColorIdentityPreference {
    /// Union of the key cards' identities and any pre-set identity
    Mandated(BTreeSet<Color>),
    /// Most frequent colors among the cards the genes referenced
    Inferred(BTreeSet<Color>),
}

impl ColorIdentityPreference {
    pub fn colors(&self) -> &BTreeSet<Color> {
        match self {
            ColorIdentityPreference::Mandated(colors) | ColorIdentityPreference::Inferred(colors) => colors,
        }
    }

    pub fn is_mandated(&self) -> bool {
        matches!(self, ColorIdentityPreference::Mandated(_))
    }
}

/// Card list produced by the deck builder, before scoring
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedDeck {
    pub(crate) cards: BTreeMap<String, DeckEntry>,
    pub(crate) color_identity: ColorIdentityPreference,
}

impl ProposedDeck {
    pub fn entries(&self) -> impl Iterator<Item = (&str, &DeckEntry)> {
        self.cards.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn get(&self, name: &str) -> Option<&DeckEntry> {
        self.cards.get(name)
    }

    /// Copies of `name`, zero when absent
    pub fn count_of(&self, name: &str) -> u32 {
        self.cards.get(name).map_or(0, |e| e.count)
    }

    pub fn distinct_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn total_cards(&self) -> u32 {
        self.cards.values().map(|e| e.count).sum()
    }

    pub fn color_identity(&self) -> &ColorIdentityPreference {
        &self.color_identity
    }

    /// One name per physical copy, alphabetically sorted
    pub fn card_list(&self) -> Vec<String> {
        let mut list: Vec<String> = self
            .cards
            .iter()
            .flat_map(|(name, entry)| std::iter::repeat(name.clone()).take(entry.count as usize))
            .collect();
        list.sort();
        list
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CardScores {
    pub count: u32,
    #[serde(flatten)]
    pub scores: BTreeMap<String, f64>,
}

// A reason named "count" shares its key with the copy count; the copy count wins.
impl Serialize for CardScores {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let scores = self.scores.iter().filter(|(reason, _)| reason.as_str() != "count");
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("count", &self.count)?;
        for (reason, score) in scores {
            map.serialize_entry(reason, score)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReasonScore {
    /// Sum of `score * count` across the deck
    pub score: f64,
    pub normalized_score: f64,
    #[serde(skip)]
    pub scale: f64,
}

/// Per-card and per-reason scores behind a deck's rank
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cards: BTreeMap<String, CardScores>,
    #[serde(flatten)]
    pub reasons: BTreeMap<String, ReasonScore>,
}

impl ScoreBreakdown {
    /// Rank recomputed from the per-reason normalized scores
    pub fn total_normalized(&self) -> f64 {
        self.reasons.values().map(|r| r.normalized_score).sum()
    }
}

/// A scored deck. Built once per evaluation and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    proposal: ProposedDeck,
    rank: f64,
    reasons: ScoreBreakdown,
}

/// Serialized form of a deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckRecord {
    #[serde(rename = "_list")]
    pub list: Vec<String>,
    #[serde(rename = "_count")]
    pub count: u32,
    pub rank: f64,
    pub reasons: ScoreBreakdown,
    pub color_identity: ColorIdentityPreference,
}

impl Deck {
    pub(crate) fn from_parts(proposal: ProposedDeck, rank: f64, reasons: ScoreBreakdown) -> Self {
        Self {
            proposal,
            rank,
            reasons,
        }
    }

    pub fn rank(&self) -> f64 {
        self.rank
    }

    pub fn reasons(&self) -> &ScoreBreakdown {
        &self.reasons
    }

    pub fn cards(&self) -> &ProposedDeck {
        &self.proposal
    }

    pub fn count_of(&self, name: &str) -> u32 {
        self.proposal.count_of(name)
    }

    pub fn total_cards(&self) -> u32 {
        self.proposal.total_cards()
    }

    pub fn color_identity(&self) -> &ColorIdentityPreference {
        &self.proposal.color_identity
    }

    pub fn card_list(&self) -> Vec<String> {
        self.proposal.card_list()
    }

    pub fn to_record(&self) -> DeckRecord {
        DeckRecord {
            list: self.card_list(),
            count: self.total_cards(),
            rank: self.rank,
            reasons: self.reasons.clone(),
            color_identity: self.proposal.color_identity.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_record())
    }
}
