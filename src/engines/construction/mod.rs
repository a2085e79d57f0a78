pub mod builder;
pub mod deck;

pub use builder::{build, DeckBuilder, DeckRules};
pub use deck::{CardScores, ColorIdentityPreference, Deck, DeckEntry, DeckRecord, ProposedDeck, ReasonScore, ScoreBreakdown};
