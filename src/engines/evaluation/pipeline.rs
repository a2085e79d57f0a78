use super::registry::EvaluatorRegistry;
use crate::engines::construction::{Deck, DeckBuilder};
use crate::error::Result;
use std::sync::Arc;

/// Gene sequence in, scored deck out
///
/// Holds only read-only state, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct DeckEvaluator {
    builder: DeckBuilder,
    registry: Arc<EvaluatorRegistry>,
}

impl DeckEvaluator {
    pub fn new(builder: DeckBuilder, registry: Arc<EvaluatorRegistry>) -> Self {
        Self { builder, registry }
    }

    pub fn evaluate(&self, genes: &[u32]) -> Result<Deck> {
        let proposal = self.builder.build(genes)?;
        self.registry.score(proposal, self.builder.format())
    }

    /// Deck rank, used as fitness by the optimizer
    pub fn fitness(&self, genes: &[u32]) -> Result<f64> {
        Ok(self.evaluate(genes)?.rank())
    }

    pub fn builder(&self) -> &DeckBuilder {
        &self.builder
    }

    pub fn registry(&self) -> &EvaluatorRegistry {
        &self.registry
    }

    /// Exclusive upper bound for gene values
    pub fn gene_upper_bound(&self) -> usize {
        self.builder.collection().count()
    }
}
