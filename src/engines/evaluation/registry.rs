use super::evaluators::{CardTypeEvaluator, DeckSizeEvaluator, ManaCurveEvaluator, MechanicEvaluator};
use super::traits::CardEvaluator;
use crate::config::{DeckConfig, ScoringConfig};
use crate::engines::construction::{CardScores, Deck, ProposedDeck, ReasonScore, ScoreBreakdown};
use crate::error::{MagiqueError, Result};
use crate::types::Format;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Reason names that would collide with keys of the serialized breakdown
pub const RESERVED_REASONS: [&str; 1] = ["cards"];

/// Ordered set of evaluators, with one normalization scale per reason
#[derive(Clone, Default)]
pub struct EvaluatorRegistry {
    evaluators: Vec<Arc<dyn CardEvaluator>>,
    scales: BTreeMap<String, f64>,
}

impl EvaluatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the built-in evaluators selected by `scoring`
    pub fn from_config(scoring: &ScoringConfig, deck: &DeckConfig) -> Result<Self> {
        let mut registry = Self::new();

        for mechanic in &scoring.mechanics {
            registry.register(Arc::new(MechanicEvaluator::new(mechanic.clone(), scoring.mechanic_scale)))?;
        }
        if scoring.mana_curve {
            registry.register(Arc::new(ManaCurveEvaluator::new(
                scoring.mana_curve_target,
                scoring.mana_curve_scale,
            )))?;
        }
        for target in &scoring.card_types {
            registry.register(Arc::new(CardTypeEvaluator::new(target.card_type, target.scale)))?;
        }
        if scoring.deck_size {
            registry.register(Arc::new(DeckSizeEvaluator::new(deck.deck_minimum)))?;
        }

        log::debug!("Registered {} evaluators over {} reasons", registry.len(), registry.scales.len());
        Ok(registry)
    }

    /// Adds an evaluator after checking its reason and scale
    ///
    /// A reason already registered under a different scale is rejected.
    pub fn register(&mut self, evaluator: Arc<dyn CardEvaluator>) -> Result<()> {
        let reason = evaluator.reason();
        let scale = evaluator.scale();

        if reason.trim().is_empty() {
            return Err(MagiqueError::Configuration(format!(
                "Evaluator '{}' declares an empty reason",
                evaluator.name()
            )));
        }
        if RESERVED_REASONS.contains(&reason) {
            return Err(MagiqueError::Configuration(format!(
                "Evaluator '{}' uses reserved reason '{}'",
                evaluator.name(),
                reason
            )));
        }
        if !scale.is_finite() || scale == 0.0 {
            return Err(MagiqueError::Configuration(format!(
                "Evaluator '{}' declares invalid scale {} for '{}'",
                evaluator.name(),
                scale,
                reason
            )));
        }
        if let Some(&existing) = self.scales.get(reason) {
            if existing != scale {
                return Err(MagiqueError::Configuration(format!(
                    "Reason '{}' already registered with scale {}, evaluator '{}' declares {}",
                    reason,
                    existing,
                    evaluator.name(),
                    scale
                )));
            }
        }

        self.scales.insert(reason.to_string(), scale);
        self.evaluators.push(evaluator);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    pub fn scale_of(&self, reason: &str) -> Option<f64> {
        self.scales.get(reason).copied()
    }

    /// Runs every evaluator over every card and normalizes per reason
    ///
    /// The rank is the sum over reasons of `sum(score * count) / scale`.
    pub fn score(&self, proposal: ProposedDeck, format: Format) -> Result<Deck> {
        let mut breakdown = ScoreBreakdown::default();

        for (name, entry) in proposal.entries() {
            let mut card_scores = CardScores {
                count: entry.count,
                scores: BTreeMap::new(),
            };

            for evaluator in &self.evaluators {
                let evaluation = evaluator
                    .evaluate(&entry.card, entry.count, format)
                    .map_err(|e| MagiqueError::Evaluator {
                        evaluator: evaluator.name().to_string(),
                        message: format!("{:#}", e),
                    })?;

                if !evaluation.score.is_finite() {
                    return Err(MagiqueError::Evaluator {
                        evaluator: evaluator.name().to_string(),
                        message: format!("non-finite score {} for {}", evaluation.score, name),
                    });
                }
                match self.scales.get(&evaluation.reason) {
                    Some(&scale) if scale == evaluation.scale => {}
                    _ => {
                        return Err(MagiqueError::Configuration(format!(
                            "Evaluator '{}' produced unregistered reason '{}' or scale {}",
                            evaluator.name(),
                            evaluation.reason,
                            evaluation.scale
                        )));
                    }
                }

                let total = breakdown
                    .reasons
                    .entry(evaluation.reason.clone())
                    .or_insert_with(|| ReasonScore {
                        score: 0.0,
                        normalized_score: 0.0,
                        scale: evaluation.scale,
                    });
                total.score += evaluation.score * entry.count as f64;

                card_scores.scores.insert(evaluation.reason, evaluation.score);
            }

            breakdown.cards.insert(name.to_string(), card_scores);
        }

        let mut rank = 0.0;
        for reason in breakdown.reasons.values_mut() {
            reason.normalized_score = reason.score / reason.scale;
            rank += reason.normalized_score;
        }

        Ok(Deck::from_parts(proposal, rank, breakdown))
    }
}

impl std::fmt::Debug for EvaluatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatorRegistry")
            .field("evaluators", &self.evaluators.iter().map(|e| e.name()).collect::<Vec<_>>())
            .field("scales", &self.scales)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CardRecord, Collection};
    use crate::engines::construction::{build, DeckRules};
    use crate::engines::evaluation::FnEvaluator;
    use crate::types::CardType;
    use anyhow::anyhow;

    fn legal(name: &str) -> CardRecord {
        CardRecord::new(name)
            .with_types([CardType::Creature])
            .legal_in([Format::Standard])
    }

    fn proposal(genes: &[u32]) -> ProposedDeck {
        let collection = Collection::from_records([legal("A"), legal("B"), legal("C"), legal("A")]);
        build(genes, &[], &collection, &DeckRules::new(Format::Standard, 2)).unwrap()
    }

    #[test]
    fn test_conflicting_scale_rejected_at_registration() {
        let mut registry = EvaluatorRegistry::new();
        registry
            .register(Arc::new(FnEvaluator::new("synergy", 4.0, |_, _, _| Ok(1.0))))
            .unwrap();
        registry
            .register(Arc::new(FnEvaluator::new("synergy", 4.0, |_, _, _| Ok(2.0))))
            .unwrap();

        let err = registry
            .register(Arc::new(FnEvaluator::new("synergy", 8.0, |_, _, _| Ok(1.0))))
            .unwrap_err();
        assert!(matches!(err, MagiqueError::Configuration(_)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_reserved_and_degenerate_reasons_rejected() {
        let mut registry = EvaluatorRegistry::new();
        for (reason, scale) in [("cards", 1.0), ("", 1.0), ("  ", 1.0), ("x", 0.0), ("y", f64::INFINITY)] {
            let result = registry.register(Arc::new(FnEvaluator::new(reason, scale, |_, _, _| Ok(1.0))));
            assert!(result.is_err(), "{} / {} should be rejected", reason, scale);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_score_multiplies_by_count_and_normalizes() {
        let mut registry = EvaluatorRegistry::new();
        registry
            .register(Arc::new(FnEvaluator::new("copies", 4.0, |_, _, _| Ok(1.0))))
            .unwrap();
        registry
            .register(Arc::new(FnEvaluator::new("half", 2.0, |_, _, _| Ok(0.5))))
            .unwrap();

        // Two copies of A, one of B
        let deck = registry.score(proposal(&[0, 3, 1]), Format::Standard).unwrap();
        let reasons = deck.reasons();

        assert_eq!(reasons.reasons["copies"].score, 3.0);
        assert_eq!(reasons.reasons["copies"].normalized_score, 0.75);
        assert_eq!(reasons.reasons["half"].score, 1.5);
        assert_eq!(reasons.reasons["half"].normalized_score, 0.75);
        assert_eq!(reasons.cards["A"].count, 2);
        assert_eq!(reasons.cards["A"].scores["half"], 0.5);
        assert_eq!(deck.rank(), 1.5);
        assert_eq!(deck.rank(), reasons.total_normalized());
    }

    #[test]
    fn test_evaluator_failure_names_evaluator() {
        let mut registry = EvaluatorRegistry::new();
        registry
            .register(Arc::new(FnEvaluator::new("broken", 1.0, |card, _, _| {
                Err(anyhow!("cannot score {}", card.name))
            })))
            .unwrap();

        let err = registry.score(proposal(&[1]), Format::Standard).unwrap_err();
        match err {
            MagiqueError::Evaluator { evaluator, message } => {
                assert_eq!(evaluator, "broken");
                assert!(message.contains("cannot score B"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_finite_score_is_an_evaluator_failure() {
        let mut registry = EvaluatorRegistry::new();
        registry
            .register(Arc::new(FnEvaluator::new("nan", 1.0, |_, _, _| Ok(f64::NAN))))
            .unwrap();

        let err = registry.score(proposal(&[0]), Format::Standard).unwrap_err();
        assert!(matches!(err, MagiqueError::Evaluator { .. }));
    }

    #[test]
    fn test_empty_deck_scores_zero() {
        let registry = EvaluatorRegistry::from_config(&ScoringConfig::default(), &DeckConfig::default()).unwrap();
        let deck = registry.score(proposal(&[]), Format::Standard).unwrap();
        assert_eq!(deck.rank(), 0.0);
        assert!(deck.reasons().reasons.is_empty());
    }

    #[test]
    fn test_from_config_registers_builtins() {
        let registry = EvaluatorRegistry::from_config(&ScoringConfig::default(), &DeckConfig::default()).unwrap();
        // six mechanics, curve, creature, deck size
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.scale_of("deck_size"), Some(34.0));
        assert_eq!(registry.scale_of("creature"), Some(15.0));
    }
}
