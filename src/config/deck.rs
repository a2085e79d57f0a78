use super::traits::ConfigSection;
use crate::error::MagiqueError;
use crate::types::{Color, Format};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub format: Format,
    /// Colors kept when the identity is inferred from the genes
    pub colors: usize,
    /// Non-land card target; 60 cards less 26 lands by default
    pub deck_minimum: usize,
    /// Identity mandated before any key card is considered
    pub color_identity: BTreeSet<Color>,
    /// Names that must appear in every candidate deck
    pub key_cards: Vec<String>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            format: Format::Standard,
            colors: 2,
            deck_minimum: 60 - 26,
            color_identity: BTreeSet::new(),
            key_cards: Vec::new(),
        }
    }
}

impl ConfigSection for DeckConfig {
    fn section_name() -> &'static str {
        "deck"
    }

    fn validate(&self) -> Result<(), MagiqueError> {
        if self.colors == 0 || self.colors > 5 {
            return Err(MagiqueError::Configuration(
                "Color count must be between 1 and 5".to_string()
            ));
        }
        if self.deck_minimum == 0 {
            return Err(MagiqueError::Configuration(
                "Deck minimum must be positive".to_string()
            ));
        }
        if self.key_cards.iter().any(|name| name.trim().is_empty()) {
            return Err(MagiqueError::Configuration(
                "Key card names must not be empty".to_string()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DeckConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.deck_minimum, 34);
        assert_eq!(config.colors, 2);
    }

    #[test]
    fn test_rejects_six_colors() {
        let config = DeckConfig { colors: 6, ..Default::default() };
        assert!(matches!(config.validate(), Err(MagiqueError::Configuration(_))));
    }
}
