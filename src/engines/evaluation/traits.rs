use crate::data::CardRecord;
use crate::types::Format;
use anyhow::Result;

/// One labeled score contribution for a card
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub reason: String,
    pub score: f64,
    /// Divisor applied to the deck-wide total for this reason
    pub scale: f64,
}

/// Pure scoring function over a single card
///
/// An evaluator declares its reason and scale up front so the registry can
/// reject conflicting scales before anything is scored.
pub trait CardEvaluator: Send + Sync {
    /// Identity reported when scoring fails
    fn name(&self) -> &str {
        self.reason()
    }

    fn reason(&self) -> &str;

    fn scale(&self) -> f64;

    /// Score for one copy; the registry multiplies by the count in the deck
    fn score(&self, card: &CardRecord, count: u32, format: Format) -> Result<f64>;

    fn evaluate(&self, card: &CardRecord, count: u32, format: Format) -> Result<Evaluation> {
        Ok(Evaluation {
            reason: self.reason().to_string(),
            score: self.score(card, count, format)?,
            scale: self.scale(),
        })
    }
}
