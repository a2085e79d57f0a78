use super::traits::CardEvaluator;
use crate::data::CardRecord;
use crate::types::{CardType, Format};
use anyhow::{bail, Result};

/// 1.0 per card carrying a mechanic tag
pub struct MechanicEvaluator {
    mechanic: String,
    name: String,
    scale: f64,
}

impl MechanicEvaluator {
    pub fn new(mechanic: impl Into<String>, scale: f64) -> Self {
        let mechanic = mechanic.into();
        Self {
            name: format!("mechanic:{}", mechanic),
            mechanic,
            scale,
        }
    }
}

impl CardEvaluator for MechanicEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn reason(&self) -> &str {
        &self.mechanic
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn score(&self, card: &CardRecord, _count: u32, _format: Format) -> Result<f64> {
        Ok(if card.has_mechanic(&self.mechanic) { 1.0 } else { 0.0 })
    }
}

/// 1.0 per card of a given type
pub struct CardTypeEvaluator {
    card_type: CardType,
    name: String,
    scale: f64,
}

impl CardTypeEvaluator {
    pub fn new(card_type: CardType, scale: f64) -> Self {
        Self {
            card_type,
            name: format!("type:{}", card_type.key()),
            scale,
        }
    }
}

impl CardEvaluator for CardTypeEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn reason(&self) -> &str {
        self.card_type.key()
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn score(&self, card: &CardRecord, _count: u32, _format: Format) -> Result<f64> {
        Ok(if card.has_type(self.card_type) { 1.0 } else { 0.0 })
    }
}

/// Rewards cheap spells
///
/// Cards at or below the target mana value score 1.0, more expensive ones
/// `target / mana_value`. Lands score nothing.
pub struct ManaCurveEvaluator {
    target: u32,
    scale: f64,
}

impl ManaCurveEvaluator {
    pub const REASON: &'static str = "mana_curve";

    pub fn new(target: u32, scale: f64) -> Self {
        Self { target, scale }
    }
}

impl CardEvaluator for ManaCurveEvaluator {
    fn reason(&self) -> &str {
        Self::REASON
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn score(&self, card: &CardRecord, _count: u32, _format: Format) -> Result<f64> {
        if self.target == 0 {
            bail!("mana curve target must be positive");
        }
        if card.is_land() {
            return Ok(0.0);
        }
        if card.mana_value <= self.target {
            Ok(1.0)
        } else {
            Ok(self.target as f64 / card.mana_value as f64)
        }
    }
}

/// 1.0 per non-land card; normalized against the non-land deck minimum
pub struct DeckSizeEvaluator {
    deck_minimum: usize,
}

impl DeckSizeEvaluator {
    pub const REASON: &'static str = "deck_size";

    pub fn new(deck_minimum: usize) -> Self {
        Self { deck_minimum }
    }
}

impl CardEvaluator for DeckSizeEvaluator {
    fn reason(&self) -> &str {
        Self::REASON
    }

    fn scale(&self) -> f64 {
        self.deck_minimum as f64
    }

    fn score(&self, card: &CardRecord, _count: u32, _format: Format) -> Result<f64> {
        Ok(if card.is_land() { 0.0 } else { 1.0 })
    }
}

type ScoreFn = dyn Fn(&CardRecord, u32, Format) -> Result<f64> + Send + Sync;

/// Ad hoc evaluator backed by a closure
pub struct FnEvaluator {
    reason: String,
    scale: f64,
    func: Box<ScoreFn>,
}

impl FnEvaluator {
    pub fn new<F>(reason: impl Into<String>, scale: f64, func: F) -> Self
    where
        F: Fn(&CardRecord, u32, Format) -> Result<f64> + Send + Sync + 'static,
    {
        Self {
            reason: reason.into(),
            scale,
            func: Box::new(func),
        }
    }
}

impl CardEvaluator for FnEvaluator {
    fn reason(&self) -> &str {
        &self.reason
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn score(&self, card: &CardRecord, count: u32, format: Format) -> Result<f64> {
        (self.func)(card, count, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mechanics;

    #[test]
    fn test_mechanic_evaluator() {
        let eval = MechanicEvaluator::new(mechanics::FLYING, 8.0);
        let bird = CardRecord::new("Bird").with_mechanics([mechanics::FLYING]);
        let bear = CardRecord::new("Bear");

        assert_eq!(eval.score(&bird, 1, Format::Standard).unwrap(), 1.0);
        assert_eq!(eval.score(&bear, 1, Format::Standard).unwrap(), 0.0);
        assert_eq!(eval.name(), "mechanic:flying");
        assert_eq!(eval.reason(), "flying");
    }

    #[test]
    fn test_mana_curve_evaluator() {
        let eval = ManaCurveEvaluator::new(3, 20.0);
        let cheap = CardRecord::new("Cheap").with_mana_value(2);
        let pricey = CardRecord::new("Pricey").with_mana_value(6);
        let land = CardRecord::new("Forest").with_types([CardType::BasicLand]);

        assert_eq!(eval.score(&cheap, 1, Format::Standard).unwrap(), 1.0);
        assert_eq!(eval.score(&pricey, 1, Format::Standard).unwrap(), 0.5);
        assert_eq!(eval.score(&land, 1, Format::Standard).unwrap(), 0.0);
        assert!(ManaCurveEvaluator::new(0, 1.0).score(&cheap, 1, Format::Standard).is_err());
    }

    #[test]
    fn test_evaluate_carries_declared_reason_and_scale() {
        let eval = CardTypeEvaluator::new(CardType::Creature, 15.0);
        let bear = CardRecord::new("Bear").with_types([CardType::Creature]);

        let evaluation = eval.evaluate(&bear, 2, Format::Standard).unwrap();
        assert_eq!(evaluation.reason, "creature");
        assert_eq!(evaluation.score, 1.0);
        assert_eq!(evaluation.scale, 15.0);
    }

    #[test]
    fn test_deck_size_scale_is_minimum() {
        let eval = DeckSizeEvaluator::new(34);
        assert_eq!(eval.scale(), 34.0);
        assert_eq!(eval.score(&CardRecord::new("Opt"), 1, Format::Standard).unwrap(), 1.0);
    }

    #[test]
    fn test_deck_size_skips_lands() {
        let eval = DeckSizeEvaluator::new(34);
        let forest = CardRecord::new("Forest").with_types([CardType::BasicLand]);
        let dryad_arbor = CardRecord::new("Dryad Arbor").with_types([CardType::Land, CardType::Creature]);

        assert_eq!(eval.score(&forest, 1, Format::Standard).unwrap(), 0.0);
        assert_eq!(eval.score(&dryad_arbor, 1, Format::Standard).unwrap(), 0.0);
    }
}
