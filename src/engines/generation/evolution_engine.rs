use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::construction::Deck;
use crate::engines::evaluation::DeckEvaluator;
use crate::engines::generation::{
    genome::GeneSequence,
    hall_of_fame::{EliteDeck, HallOfFame},
    operators::{crossover, mutate, random_genome, select},
    population::{Member, Population},
};
use crate::error::{MagiqueError, Result};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Fitness summary of the population after one generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub average: f64,
    pub worst: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EvolutionHistory {
    generations: Vec<GenerationStats>,
}

impl EvolutionHistory {
    fn record(&mut self, generation: usize, population: &Population) {
        self.generations.push(GenerationStats {
            generation,
            best: population.best().map_or(0.0, |m| m.fitness),
            average: population.average_fitness(),
            worst: population.worst().map_or(0.0, |m| m.fitness),
        });
    }

    pub fn generations(&self) -> &[GenerationStats] {
        &self.generations
    }

    pub fn last(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// Deck built from the fittest gene sequence
    pub best: Deck,
    pub genes: GeneSequence,
    pub fitness: f64,
    pub hall_of_fame: Vec<EliteDeck>,
    pub history: EvolutionHistory,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hall_of_fame_size: usize);
    fn on_candidate_evaluated(&mut self, candidate_num: usize, total: usize);
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    evaluator: DeckEvaluator,
    hall_of_fame: HallOfFame,
    gene_range: std::ops::Range<u32>,
    cancelled: Arc<AtomicBool>,
    rng: StdRng,
}

impl EvolutionEngine {
    /// Validates `config` and fixes the gene range to the collection size
    pub fn new(config: EvolutionConfig, evaluator: DeckEvaluator) -> Result<Self> {
        config.validate()?;

        let slots = evaluator.gene_upper_bound();
        if slots == 0 {
            return Err(MagiqueError::Configuration(
                "Cannot evolve decks from an empty collection".to_string(),
            ));
        }
        let upper = u32::try_from(slots).map_err(|_| {
            MagiqueError::Configuration(format!("Collection of {} slots exceeds the gene range", slots))
        })?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            hall_of_fame: HallOfFame::new(config.hall_of_fame_size),
            config,
            evaluator,
            gene_range: 0..upper,
            cancelled: Arc::new(AtomicBool::new(false)),
            rng,
        })
    }

    /// Setting the returned flag stops the run before its next generation
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionOutcome> {
        log::info!(
            "Evolving {} candidates of {} genes over {} collection slots for {} generations",
            self.config.population_size,
            self.config.chromosome_length,
            self.gene_range.end,
            self.config.generations
        );

        let mut population = self.initialize_population(&mut callback)?;
        let mut history = EvolutionHistory::default();

        for generation in 0..self.config.generations {
            if self.cancelled.load(Ordering::Relaxed) {
                log::warn!("Evolution cancelled before generation {}", generation + 1);
                return Err(MagiqueError::Cancelled { generation });
            }
            callback.on_generation_start(generation);

            let offspring = self.breed(&population);
            let evaluated = self.evaluate_batch(offspring, generation + 1, &mut callback)?;
            population.replace(evaluated, self.config.replacement_style);

            history.record(generation + 1, &population);
            let best_fitness = population.best().map_or(0.0, |m| m.fitness);
            log::debug!(
                "Generation {}: best {:.4}, average {:.4}",
                generation + 1,
                best_fitness,
                population.average_fitness()
            );

            callback.on_generation_complete(generation, best_fitness, self.hall_of_fame.len());
        }

        let champion = population.best().ok_or_else(|| {
            MagiqueError::Configuration("Population is empty".to_string())
        })?;
        let best = self.evaluator.evaluate(&champion.genes)?;

        log::info!(
            "Evolution finished: rank {:.4} with {} cards",
            best.rank(),
            best.total_cards()
        );

        Ok(EvolutionOutcome {
            genes: champion.genes.clone(),
            fitness: champion.fitness,
            best,
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
            history,
        })
    }

    fn initialize_population<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<Population> {
        let genomes: Vec<GeneSequence> = (0..self.config.population_size)
            .map(|_| {
                random_genome(
                    self.config.chromosome_length,
                    self.gene_range.clone(),
                    &mut self.rng,
                )
            })
            .collect();

        let members = self.evaluate_batch(genomes, 0, callback)?;
        Ok(Population::new(members))
    }

    /// Produces `replacement_size` offspring by selection, crossover and mutation
    fn breed(&mut self, population: &Population) -> Vec<GeneSequence> {
        let fitness = population.fitness();
        let members = population.members();
        let wanted = self.config.replacement_size;
        let mut offspring = Vec::with_capacity(wanted);

        while offspring.len() < wanted {
            let p1 = select(self.config.selection_style, &fitness, self.config.tournament_size, &mut self.rng);
            let p2 = select(self.config.selection_style, &fitness, self.config.tournament_size, &mut self.rng);
            let (parent1, parent2) = (&members[p1].genes, &members[p2].genes);

            let (mut child1, mut child2) = if self.rng.gen::<f64>() < self.config.crossover_rate {
                crossover(self.config.crossover_style, parent1, parent2, &mut self.rng)
            } else {
                (parent1.clone(), parent2.clone())
            };

            mutate(&mut child1, self.config.mutation_rate, self.gene_range.clone(), &mut self.rng);
            mutate(&mut child2, self.config.mutation_rate, self.gene_range.clone(), &mut self.rng);

            offspring.push(child1);
            if offspring.len() < wanted {
                offspring.push(child2);
            }
        }

        offspring
    }

    /// Scores every genome, in parallel when configured
    ///
    /// Results come back in input order, so a seeded run is reproducible
    /// either way.
    fn evaluate_batch<C: ProgressCallback>(
        &mut self,
        genomes: Vec<GeneSequence>,
        born: usize,
        callback: &mut C,
    ) -> Result<Vec<Member>> {
        let evaluator = &self.evaluator;
        let decks: Vec<(GeneSequence, Deck)> = if self.config.parallel {
            genomes
                .into_par_iter()
                .map(|genes| evaluator.evaluate(&genes).map(|deck| (genes, deck)))
                .collect::<Result<Vec<_>>>()?
        } else {
            genomes
                .into_iter()
                .map(|genes| evaluator.evaluate(&genes).map(|deck| (genes, deck)))
                .collect::<Result<Vec<_>>>()?
        };

        let total = decks.len();
        let mut members = Vec::with_capacity(total);
        for (i, (genes, deck)) in decks.into_iter().enumerate() {
            callback.on_candidate_evaluated(i + 1, total);
            self.hall_of_fame.try_add(EliteDeck::from_deck(genes.clone(), &deck));
            members.push(Member::new(genes, deck.rank(), born));
        }

        Ok(members)
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }
}
