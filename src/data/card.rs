use crate::types::{CardType, Color, Format};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Immutable card attributes, keyed by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    pub color_identity: BTreeSet<Color>,
    pub types: BTreeSet<CardType>,
    pub subtypes: Vec<String>,
    pub legalities: BTreeSet<Format>,
    pub mechanics: BTreeSet<String>,
    pub mana_value: u32,
    pub text: String,
    pub power: Option<String>,
    pub toughness: Option<String>,
}

impl CardRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_identity: BTreeSet::new(),
            types: BTreeSet::new(),
            subtypes: Vec::new(),
            legalities: BTreeSet::new(),
            mechanics: BTreeSet::new(),
            mana_value: 0,
            text: String::new(),
            power: None,
            toughness: None,
        }
    }

    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.color_identity.extend(colors);
        self
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = CardType>) -> Self {
        self.types.extend(types);
        self
    }

    pub fn legal_in(mut self, formats: impl IntoIterator<Item = Format>) -> Self {
        self.legalities.extend(formats);
        self
    }

    pub fn with_mechanics<S: Into<String>>(mut self, mechanics: impl IntoIterator<Item = S>) -> Self {
        self.mechanics.extend(mechanics.into_iter().map(Into::into));
        self
    }

    pub fn with_mana_value(mut self, mana_value: u32) -> Self {
        self.mana_value = mana_value;
        self
    }

    pub fn is_legal(&self, format: Format) -> bool {
        self.legalities.contains(&format)
    }

    pub fn has_type(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    pub fn is_land(&self) -> bool {
        self.types.iter().any(|t| t.is_land())
    }

    pub fn has_mechanic(&self, mechanic: &str) -> bool {
        self.mechanics.contains(mechanic)
    }
}
