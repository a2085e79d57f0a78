pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use data::{CardRecord, Catalog, Collection};
pub use engines::construction::{Deck, DeckBuilder, DeckRules, ProposedDeck};
pub use engines::evaluation::{CardEvaluator, DeckEvaluator, EvaluatorRegistry};
pub use engines::generation::{EvolutionEngine, EvolutionOutcome, GeneSequence};
pub use error::{MagiqueError, Result};
pub use types::{CardType, Color, Format};
