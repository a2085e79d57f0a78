pub mod traits;
pub mod evaluators;
pub mod registry;
pub mod pipeline;

pub use traits::{CardEvaluator, Evaluation};
pub use evaluators::{CardTypeEvaluator, DeckSizeEvaluator, FnEvaluator, ManaCurveEvaluator, MechanicEvaluator};
pub use registry::EvaluatorRegistry;
pub use pipeline::DeckEvaluator;
