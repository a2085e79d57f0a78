use crate::config::ReplacementStyle;
use crate::engines::generation::genome::GeneSequence;
use std::cmp::Ordering;

/// One gene sequence with its fitness and the generation it entered in
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub genes: GeneSequence,
    pub fitness: f64,
    pub born: usize,
}

impl Member {
    pub fn new(genes: GeneSequence, fitness: f64, born: usize) -> Self {
        Self { genes, fitness, born }
    }
}

/// Fixed-size pool of members, kept sorted best first
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Member>,
}

fn by_fitness_desc(a: &Member, b: &Member) -> Ordering {
    b.fitness.partial_cmp(&a.fitness).unwrap_or(Ordering::Equal)
}

impl Population {
    pub fn new(members: Vec<Member>) -> Self {
        let mut population = Self { members };
        population.sort();
        population
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Fitness values in member order
    pub fn fitness(&self) -> Vec<f64> {
        self.members.iter().map(|m| m.fitness).collect()
    }

    pub fn best(&self) -> Option<&Member> {
        self.members.first()
    }

    pub fn worst(&self) -> Option<&Member> {
        self.members.last()
    }

    pub fn average_fitness(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|m| m.fitness).sum::<f64>() / self.members.len() as f64
    }

    /// Stable sort, so equally fit members keep their relative order
    fn sort(&mut self) {
        self.members.sort_by(by_fitness_desc);
    }

    /// Swaps offspring in for existing members and re-sorts
    ///
    /// `SteadyState` evicts the weakest members, oldest first among equals.
    /// `Oldest` evicts by age, weakest first among equals. At most
    /// `offspring.len()` members are replaced; the size never changes.
    pub fn replace(&mut self, offspring: Vec<Member>, style: ReplacementStyle) {
        let mut victims: Vec<usize> = (0..self.members.len()).collect();
        victims.sort_by(|&a, &b| {
            let (ma, mb) = (&self.members[a], &self.members[b]);
            let weaker = ma.fitness.partial_cmp(&mb.fitness).unwrap_or(Ordering::Equal);
            let older = ma.born.cmp(&mb.born);
            match style {
                ReplacementStyle::SteadyState => weaker.then(older),
                ReplacementStyle::Oldest => older.then(weaker),
            }
        });

        for (slot, child) in victims.into_iter().zip(offspring) {
            self.members[slot] = child;
        }
        self.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(tag: u32, fitness: f64, born: usize) -> Member {
        Member::new(vec![tag], fitness, born)
    }

    fn tags(population: &Population) -> Vec<u32> {
        population.members().iter().map(|m| m.genes[0]).collect()
    }

    #[test]
    fn test_new_sorts_best_first() {
        let population = Population::new(vec![member(0, 1.0, 0), member(1, 3.0, 0), member(2, 2.0, 0)]);
        assert_eq!(tags(&population), vec![1, 2, 0]);
        assert_eq!(population.best().unwrap().fitness, 3.0);
        assert_eq!(population.worst().unwrap().fitness, 1.0);
        assert_eq!(population.average_fitness(), 2.0);
    }

    #[test]
    fn test_steady_state_evicts_weakest_then_oldest() {
        let mut population = Population::new(vec![
            member(0, 5.0, 0),
            member(1, 1.0, 2),
            member(2, 1.0, 1),
            member(3, 4.0, 0),
        ]);

        population.replace(vec![member(9, 0.5, 3)], ReplacementStyle::SteadyState);

        // Member 2 is as weak as member 1 but older
        assert_eq!(population.len(), 4);
        assert!(!tags(&population).contains(&2));
        assert!(tags(&population).contains(&1));
        assert_eq!(population.worst().unwrap().genes, vec![9]);
    }

    #[test]
    fn test_oldest_evicts_by_age_then_weakness() {
        let mut population = Population::new(vec![
            member(0, 5.0, 0),
            member(1, 1.0, 0),
            member(2, 0.1, 1),
        ]);

        population.replace(vec![member(8, 2.0, 2), member(9, 2.0, 2)], ReplacementStyle::Oldest);

        let mut remaining = tags(&population);
        remaining.sort();
        assert_eq!(remaining, vec![2, 8, 9]);
    }

    #[test]
    fn test_surplus_offspring_are_dropped() {
        let mut population = Population::new(vec![member(0, 1.0, 0), member(1, 2.0, 0)]);
        population.replace(
            vec![member(7, 3.0, 1), member(8, 3.0, 1), member(9, 3.0, 1)],
            ReplacementStyle::SteadyState,
        );
        let mut remaining = tags(&population);
        remaining.sort();
        assert_eq!(remaining, vec![7, 8]);
    }
}
