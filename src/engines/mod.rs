pub mod construction;
pub mod evaluation;
pub mod generation;
