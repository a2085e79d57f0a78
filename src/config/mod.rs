pub mod traits;
pub mod deck;
pub mod evolution;
pub mod scoring;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use deck::DeckConfig;
pub use evolution::{EvolutionConfig, SelectionStyle, CrossoverStyle, ReplacementStyle};
pub use scoring::{ScoringConfig, TypeTarget};
pub use traits::ConfigSection;
