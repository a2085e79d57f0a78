use super::traits::ConfigSection;
use crate::data::mechanics;
use crate::error::MagiqueError;
use crate::types::CardType;
use serde::{Deserialize, Serialize};

/// Which built-in evaluators are registered, and their normalization scales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub mechanics: Vec<String>,
    pub mechanic_scale: f64,
    pub mana_curve: bool,
    pub mana_curve_target: u32,
    pub mana_curve_scale: f64,
    /// Score cards toward the deck minimum
    pub deck_size: bool,
    pub card_types: Vec<TypeTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeTarget {
    pub card_type: CardType,
    pub scale: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mechanics: mechanics::ALL.iter().map(|m| m.to_string()).collect(),
            mechanic_scale: 8.0,
            mana_curve: true,
            mana_curve_target: 3,
            mana_curve_scale: 20.0,
            deck_size: true,
            card_types: vec![TypeTarget {
                card_type: CardType::Creature,
                scale: 15.0,
            }],
        }
    }
}

fn check_scale(label: &str, scale: f64) -> Result<(), MagiqueError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(MagiqueError::Configuration(format!(
            "Scale for {} must be a positive number, got {}",
            label, scale
        )));
    }
    Ok(())
}

impl ConfigSection for ScoringConfig {
    fn section_name() -> &'static str {
        "scoring"
    }

    fn validate(&self) -> Result<(), MagiqueError> {
        if !self.mechanics.is_empty() {
            check_scale("mechanics", self.mechanic_scale)?;
        }
        if self.mana_curve {
            check_scale("mana curve", self.mana_curve_scale)?;
            if self.mana_curve_target == 0 {
                return Err(MagiqueError::Configuration(
                    "Mana curve target must be positive".to_string()
                ));
            }
        }
        for target in &self.card_types {
            check_scale(target.card_type.key(), target.scale)?;
        }
        Ok(())
    }
}
