use super::traits::ConfigSection;
use crate::error::MagiqueError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Genes per candidate, i.e. collection slots proposed per deck
    pub chromosome_length: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub crossover_style: CrossoverStyle,
    /// Members replaced by offspring each generation
    pub replacement_size: usize,
    pub replacement_style: ReplacementStyle,
    pub selection_style: SelectionStyle,
    pub tournament_size: usize,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
    /// Evaluate candidates on the rayon pool
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStyle {
    /// Fitness-proportionate
    Roulette,
    Tournament,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverStyle {
    OnePoint,
    TwoPoint,
    Uniform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementStyle {
    /// Offspring replace the weakest members
    SteadyState,
    /// Offspring replace the members that have survived longest
    Oldest,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            chromosome_length: 30 - 14,
            generations: 1000,
            mutation_rate: 0.2,
            crossover_rate: 1.0,
            crossover_style: CrossoverStyle::OnePoint,
            replacement_size: 500,
            replacement_style: ReplacementStyle::SteadyState,
            selection_style: SelectionStyle::Roulette,
            tournament_size: 3,
            hall_of_fame_size: 10,
            seed: None,
            parallel: true,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), MagiqueError> {
        if self.population_size < 2 {
            return Err(MagiqueError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.chromosome_length == 0 {
            return Err(MagiqueError::Configuration(
                "Chromosome length must be positive".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(MagiqueError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(MagiqueError::Configuration(
                "Crossover rate must be between 0 and 1".to_string()
            ));
        }
        if self.replacement_size == 0 || self.replacement_size > self.population_size {
            return Err(MagiqueError::Configuration(format!(
                "Replacement size must be between 1 and the population size ({})",
                self.population_size
            )));
        }
        if self.selection_style == SelectionStyle::Tournament && self.tournament_size == 0 {
            return Err(MagiqueError::Configuration(
                "Tournament size must be positive".to_string()
            ));
        }
        Ok(())
    }
}
