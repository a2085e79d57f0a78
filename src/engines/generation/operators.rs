use crate::config::{CrossoverStyle, SelectionStyle};
use crate::engines::generation::genome::GeneSequence;
use rand::Rng;
use std::ops::Range;

/// Picks a parent index according to `style`
///
/// `fitness` must not be empty.
pub fn select<R: Rng>(style: SelectionStyle, fitness: &[f64], tournament_size: usize, rng: &mut R) -> usize {
    match style {
        SelectionStyle::Roulette => roulette_selection(fitness, rng),
        SelectionStyle::Tournament => tournament_selection(fitness, tournament_size, rng),
        SelectionStyle::Random => rng.gen_range(0..fitness.len()),
    }
}

/// Tournament selection: pick best of K random candidates
pub fn tournament_selection<R: Rng>(fitness: &[f64], tournament_size: usize, rng: &mut R) -> usize {
    let mut best_idx = rng.gen_range(0..fitness.len());
    let mut best_fitness = fitness[best_idx];

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..fitness.len());
        if fitness[idx] > best_fitness {
            best_idx = idx;
            best_fitness = fitness[idx];
        }
    }

    best_idx
}

/// Roulette wheel selection: probability proportional to fitness
///
/// Negative fitness counts as zero.
pub fn roulette_selection<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let total_fitness: f64 = fitness.iter().map(|f| f.max(0.0)).sum();

    if total_fitness <= 0.0 {
        // Nothing positive to weigh, pick uniformly
        return rng.gen_range(0..fitness.len());
    }

    let mut spin = rng.gen::<f64>() * total_fitness;

    for (i, f) in fitness.iter().enumerate() {
        spin -= f.max(0.0);
        if spin <= 0.0 && *f > 0.0 {
            return i;
        }
    }

    // Rounding left a sliver; take the last member with positive weight
    fitness.iter().rposition(|f| *f > 0.0).unwrap_or(fitness.len() - 1)
}

pub fn crossover<R: Rng>(
    style: CrossoverStyle,
    parent1: &GeneSequence,
    parent2: &GeneSequence,
    rng: &mut R,
) -> (GeneSequence, GeneSequence) {
    match style {
        CrossoverStyle::OnePoint => one_point_crossover(parent1, parent2, rng),
        CrossoverStyle::TwoPoint => two_point_crossover(parent1, parent2, rng),
        CrossoverStyle::Uniform => uniform_crossover(parent1, parent2, rng),
    }
}

/// Single-point crossover: swap genome tails
pub fn one_point_crossover<R: Rng>(
    parent1: &GeneSequence,
    parent2: &GeneSequence,
    rng: &mut R,
) -> (GeneSequence, GeneSequence) {
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.clone(), parent2.clone());
    }

    let point = rng.gen_range(1..len);

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    child1[point..len].copy_from_slice(&parent2[point..len]);
    child2[point..len].copy_from_slice(&parent1[point..len]);

    (child1, child2)
}

/// Two-point crossover: swap the segment between two cut points
pub fn two_point_crossover<R: Rng>(
    parent1: &GeneSequence,
    parent2: &GeneSequence,
    rng: &mut R,
) -> (GeneSequence, GeneSequence) {
    let len = parent1.len().min(parent2.len());
    if len <= 2 {
        return one_point_crossover(parent1, parent2, rng);
    }

    let a = rng.gen_range(1..len);
    let b = rng.gen_range(1..len);
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    child1[start..end].copy_from_slice(&parent2[start..end]);
    child2[start..end].copy_from_slice(&parent1[start..end]);

    (child1, child2)
}

/// Uniform crossover: each position swaps with probability 1/2
pub fn uniform_crossover<R: Rng>(
    parent1: &GeneSequence,
    parent2: &GeneSequence,
    rng: &mut R,
) -> (GeneSequence, GeneSequence) {
    let len = parent1.len().min(parent2.len());

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    for i in 0..len {
        if rng.gen_bool(0.5) {
            child1[i] = parent2[i];
            child2[i] = parent1[i];
        }
    }

    (child1, child2)
}

/// Mutation: each gene is redrawn with probability `mutation_rate`
pub fn mutate<R: Rng>(
    genome: &mut GeneSequence,
    mutation_rate: f64,
    gene_range: Range<u32>,
    rng: &mut R,
) {
    for gene in genome.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *gene = rng.gen_range(gene_range.clone());
        }
    }
}

/// Generate random genome
pub fn random_genome<R: Rng>(
    length: usize,
    gene_range: Range<u32>,
    rng: &mut R,
) -> GeneSequence {
    (0..length)
        .map(|_| rng.gen_range(gene_range.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roulette_never_picks_zero_weight() {
        let mut rng = StdRng::seed_from_u64(7);
        let fitness = [0.0, 3.0, 0.0, 1.0, -2.0];
        for _ in 0..500 {
            let idx = roulette_selection(&fitness, &mut rng);
            assert!(idx == 1 || idx == 3, "picked {}", idx);
        }
    }

    #[test]
    fn test_roulette_favours_fitter_members() {
        let mut rng = StdRng::seed_from_u64(11);
        let fitness = [1.0, 9.0];
        let picks_of_fit = (0..2000)
            .filter(|_| roulette_selection(&fitness, &mut rng) == 1)
            .count();
        assert!(picks_of_fit > 1500, "fitter member picked {} times", picks_of_fit);
    }

    #[test]
    fn test_roulette_all_non_positive_is_uniform_fallback() {
        let mut rng = StdRng::seed_from_u64(3);
        let fitness = [-1.0, 0.0, -3.0];
        let idx = roulette_selection(&fitness, &mut rng);
        assert!(idx < fitness.len());
    }

    #[test]
    fn test_tournament_of_population_size_usually_finds_best() {
        let mut rng = StdRng::seed_from_u64(5);
        let fitness = [0.1, 0.5, 0.9, 0.2];
        let idx = tournament_selection(&fitness, 64, &mut rng);
        assert_eq!(idx, 2);
    }

    #[test]
    fn test_one_point_crossover_swaps_tails() {
        let mut rng = StdRng::seed_from_u64(1);
        let p1 = vec![0, 0, 0, 0, 0, 0];
        let p2 = vec![1, 1, 1, 1, 1, 1];
        let (c1, c2) = one_point_crossover(&p1, &p2, &mut rng);

        assert_eq!(c1.len(), 6);
        assert_eq!(c1[0], 0);
        assert_eq!(c2[0], 1);
        let point = c1.iter().position(|&g| g == 1).unwrap();
        assert!(c1[point..].iter().all(|&g| g == 1));
        assert!(c2[point..].iter().all(|&g| g == 0));
    }

    #[test]
    fn test_crossovers_preserve_gene_multiset() {
        let mut rng = StdRng::seed_from_u64(9);
        let p1: GeneSequence = (0..10).collect();
        let p2: GeneSequence = (10..20).collect();

        for style in [CrossoverStyle::OnePoint, CrossoverStyle::TwoPoint, CrossoverStyle::Uniform] {
            let (c1, c2) = crossover(style, &p1, &p2, &mut rng);
            assert_eq!(c1.len(), 10);
            assert_eq!(c2.len(), 10);
            for i in 0..10 {
                let mut pair = [c1[i], c2[i]];
                pair.sort();
                assert_eq!(pair, [p1[i], p2[i]], "{:?} position {}", style, i);
            }
        }
    }

    #[test]
    fn test_mutation_rate_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut genome = vec![5; 50];
        mutate(&mut genome, 0.0, 0..3, &mut rng);
        assert!(genome.iter().all(|&g| g == 5));

        mutate(&mut genome, 1.0, 0..3, &mut rng);
        assert!(genome.iter().all(|&g| g < 3));
    }

    #[test]
    fn test_random_genome_in_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let genome = random_genome(100, 0..7, &mut rng);
        assert_eq!(genome.len(), 100);
        assert!(genome.iter().all(|&g| g < 7));
    }
}
