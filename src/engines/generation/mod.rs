pub mod genome;
pub mod operators;
pub mod population;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use genome::GeneSequence;
pub use population::{Member, Population};
pub use hall_of_fame::{HallOfFame, EliteDeck};
pub use evolution_engine::{EvolutionEngine, EvolutionHistory, EvolutionOutcome, ProgressCallback};
pub use progress::{LogProgressCallback, ChannelProgressCallback, ProgressMessage};
