use crate::coordinates::CoordinateSpace;
use crate::genetic_algorithm::Chromosome;
use crate::tour::Tour;
use rand::RngCore;
use std::cmp::Ordering;

/// An ordered collection of chromosomes. Exactly `population_size` long at
/// the boundary of every generation; transiently longer while offspring
/// are appended, restored by `truncate`.
#[derive(Clone, Debug, Default)]
pub struct Population<C: Chromosome> {
    members: Vec<C>,
}

impl<C: Chromosome> Population<C> {
    pub fn new(members: Vec<C>) -> Self {
        Self { members }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn push(&mut self, member: C) {
        self.members.push(member);
    }

    pub fn extend(&mut self, members: Vec<C>) {
        self.members.extend(members);
    }

    /// Sort ascending by unfitness, best first. Stable, so sorting an
    /// already sorted population leaves it untouched.
    pub fn sort(&mut self) {
        self.members.sort_by(|a, b| {
            a.unfitness()
                .partial_cmp(&b.unfitness())
                .unwrap_or(Ordering::Equal)
        });
    }

    pub fn truncate(&mut self, len: usize) {
        self.members.truncate(len);
    }

    /// Best member of a sorted population.
    pub fn best(&self) -> Option<&C> {
        self.members.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[C] {
        &self.members
    }

    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.members
    }

    pub fn into_vec(self) -> Vec<C> {
        self.members
    }
}

impl Population<Tour> {
    /// Seed a population with `size` uniformly random tours.
    pub fn random_init(size: usize, space: &CoordinateSpace, rng: &mut dyn RngCore) -> Self {
        let members = (0..size).map(|_| Tour::random(space, rng)).collect();
        Self { members }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::{CoordinateSpace, PLANE_LIMIT};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_init_produces_requested_size() {
        let mut rng = StdRng::seed_from_u64(21);
        let space = CoordinateSpace::random(15, PLANE_LIMIT, &mut rng);
        let population = Population::random_init(40, &space, &mut rng);

        assert_eq!(population.len(), 40);
        for tour in population.iter() {
            assert_eq!(tour.path().len(), 15);
        }
    }

    #[test]
    fn sort_orders_ascending_and_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(22);
        let space = CoordinateSpace::random(20, PLANE_LIMIT, &mut rng);
        let mut population = Population::random_init(30, &space, &mut rng);

        population.sort();
        let once: Vec<f64> = population.iter().map(|t| t.unfitness()).collect();
        assert!(once.windows(2).all(|w| w[0] <= w[1]));

        population.sort();
        let twice: Vec<f64> = population.iter().map(|t| t.unfitness()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn truncate_keeps_the_front() {
        let mut rng = StdRng::seed_from_u64(23);
        let space = CoordinateSpace::random(10, PLANE_LIMIT, &mut rng);
        let mut population = Population::random_init(25, &space, &mut rng);

        population.sort();
        let best = population.best().unwrap().unfitness();
        population.truncate(10);

        assert_eq!(population.len(), 10);
        assert_eq!(population.best().unwrap().unfitness(), best);
    }
}
