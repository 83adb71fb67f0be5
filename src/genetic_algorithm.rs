use crate::population::Population;
use rand::RngCore;
use std::fmt::Debug;

// This trait represents a chromosome - a single candidate solution to
// the problem we're solving. Lower unfitness is better.
pub trait Chromosome: Send + Sync + Debug + Clone {
    fn unfitness(&self) -> f64;
}

// This trait represents a configuration of the algorithm
pub trait Meta: Send + Sync + Debug + Clone {
    fn population_size(&self) -> usize;
    fn selection_size(&self) -> usize;
    fn max_generations(&self) -> i32;
}

// This trait represents the stopping condition of the algorithm and the
// consumer of its periodic progress
pub trait Evaluator<C: Chromosome>: Send + Sync + Debug {
    fn can_terminate(&mut self, population: &Population<C>, generation: i32) -> bool;
}

// This trait encapsulates the optimizer logic. The caller supplies the
// random generator so runs can be reproduced from a seed.
pub trait Optimizer<C: Chromosome>: Send + Sync + Debug {
    fn optimize(&mut self, eval: &mut dyn Evaluator<C>, rng: &mut dyn RngCore) -> Population<C>;
}

// This trait encapsulates the underlying genetic algorithm used by the
// optimizer to find the solution
pub trait Algorithm<M: Meta, C: Chromosome>: Send + Sync + Debug {
    fn meta(&self) -> &M;
    fn generate(&self, rng: &mut dyn RngCore) -> Population<C>;
    fn evaluate(&self, population: Population<C>) -> Population<C>;
    fn evaluate_only(&self, population: Population<C>) -> Population<C>;
    fn select(&self, population: &Population<C>, rng: &mut dyn RngCore) -> Vec<C>;
    fn crossover(&self, parents: &[C], rng: &mut dyn RngCore) -> Vec<C>;
    fn mutate(&self, offspring: Vec<C>, rng: &mut dyn RngCore) -> Vec<C>;
    fn replace(&self, population: Population<C>, offspring: Vec<C>) -> Population<C>;
}
