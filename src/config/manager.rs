use super::{
    deck::DeckConfig,
    evolution::EvolutionConfig,
    scoring::ScoringConfig,
    traits::ConfigSection,
};
use crate::error::MagiqueError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `MAGIQUE__EVOLUTION__SEED=7`
pub const ENV_PREFIX: &str = "MAGIQUE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub deck: DeckConfig,
    pub evolution: EvolutionConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), MagiqueError> {
        self.deck.validate()?;
        self.evolution.validate()?;
        self.scoring.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Layers defaults, the optional file, then `MAGIQUE__*` environment variables
    ///
    /// List-valued keys take comma-separated values, e.g.
    /// `MAGIQUE__DECK__KEY_CARDS=Llanowar Elves,Giant Growth`.
    pub fn load(path: Option<&Path>) -> Result<Self, MagiqueError> {
        Self::load_layered(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("deck.key_cards")
            .with_list_parse_key("deck.color_identity")
            .with_list_parse_key("scoring.mechanics")
    }

    fn load_layered(path: Option<&Path>, environment: config::Environment) -> Result<Self, MagiqueError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config: AppConfig = builder.add_source(environment).build()?.try_deserialize()?;
        config.validate()?;

        log::debug!("Effective configuration: {:?}", config);
        Ok(Self { config })
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), MagiqueError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MagiqueError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| MagiqueError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        self.config = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MagiqueError> {
        std::fs::write(path, self.to_toml()?)
            .map_err(|e| MagiqueError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, MagiqueError> {
        Ok(toml::to_string_pretty(&self.config)?)
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Applies `f` and keeps the result only if it validates
    pub fn update<F>(&mut self, f: F) -> Result<(), MagiqueError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    pub fn into_inner(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
