use thiserror::Error;

#[derive(Error, Debug)]
pub enum MagiqueError {
    #[error("Card not found: {name}")]
    CardNotFound { name: String },

    #[error("No remaining copy of {name} at or after slot {start}")]
    NoRemainingCopy { name: String, start: usize },

    #[error("Collection slot {index} out of range (collection size {size})")]
    SlotOutOfRange { index: usize, size: usize },

    #[error("Evaluator '{evaluator}' failed: {message}")]
    Evaluator { evaluator: String, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Optimization cancelled after generation {generation}")]
    Cancelled { generation: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl MagiqueError {
    /// True for the lookup failures a caller may want to report as "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MagiqueError::CardNotFound { .. } | MagiqueError::NoRemainingCopy { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MagiqueError>;
