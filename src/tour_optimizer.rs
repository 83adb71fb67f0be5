use crate::coordinates::CoordinateSpace;
use crate::genetic_algorithm::{Algorithm, Chromosome, Evaluator, Meta, Optimizer};
use crate::population::Population;
use crate::tour::{crossover_one_point, crossover_two_point, Tour};
use colored::Colorize;
use rand::prelude::*;
use rand::RngCore;
use rayon::prelude::*;
use serde::Serialize;
use std::error::Error;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CrossoverKind {
    OnePoint,
    TwoPoint,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    EmptyCoordinateSpace,
    ZeroPopulationSize,
    NonPositiveGenerations(i32),
    ElitismFractionOutOfRange(f64),
    MutationProbabilityOutOfRange(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCoordinateSpace => write!(f, "coordinate space holds no cities"),
            Self::ZeroPopulationSize => write!(f, "population size must be positive"),
            Self::NonPositiveGenerations(g) => {
                write!(f, "generation budget must be positive, got {}", g)
            }
            Self::ElitismFractionOutOfRange(e) => {
                write!(f, "elitism fraction must lie in (0, 1), got {}", e)
            }
            Self::MutationProbabilityOutOfRange(p) => {
                write!(f, "mutation probability must lie in [0, 1], got {}", p)
            }
        }
    }
}

impl Error for ConfigError {}

/// Run configuration plus the city coordinates it applies to. All bounds
/// are checked here, before any generation runs.
#[derive(Clone, Debug)]
pub struct TourConfig {
    pub space: CoordinateSpace,
    pub population_size: usize,
    pub max_generations: i32,
    pub crossover: CrossoverKind,
    pub elitism_fraction: f64,
    pub mutation_probability: f64,
}

impl TourConfig {
    pub fn new(
        space: CoordinateSpace,
        population_size: usize,
        max_generations: i32,
        crossover: CrossoverKind,
        elitism_fraction: f64,
        mutation_probability: f64,
    ) -> Result<Self, ConfigError> {
        if space.is_empty() {
            return Err(ConfigError::EmptyCoordinateSpace);
        }
        if population_size == 0 {
            return Err(ConfigError::ZeroPopulationSize);
        }
        if max_generations <= 0 {
            return Err(ConfigError::NonPositiveGenerations(max_generations));
        }
        if !(elitism_fraction > 0.0 && elitism_fraction < 1.0) {
            return Err(ConfigError::ElitismFractionOutOfRange(elitism_fraction));
        }
        if !(0.0..=1.0).contains(&mutation_probability) {
            return Err(ConfigError::MutationProbabilityOutOfRange(
                mutation_probability,
            ));
        }

        Ok(Self {
            space,
            population_size,
            max_generations,
            crossover,
            elitism_fraction,
            mutation_probability,
        })
    }

    pub fn report_interval(&self) -> i32 {
        (self.max_generations / 10).max(1)
    }
}

impl Meta for TourConfig {
    fn population_size(&self) -> usize {
        self.population_size
    }

    // Parents drawn per generation: the non-elite share of the population,
    // rounded up to the next even number so every parent gets a mate.
    fn selection_size(&self) -> usize {
        let count = (self.population_size as f64 * (1.0 - self.elitism_fraction)).ceil() as usize;
        count + count % 2
    }

    fn max_generations(&self) -> i32 {
        self.max_generations
    }
}

#[derive(Debug)]
pub struct TourAlgorithm {
    pub config: TourConfig,
}

impl TourAlgorithm {
    pub fn new(config: TourConfig) -> Self {
        Self { config }
    }
}

impl Algorithm<TourConfig, Tour> for TourAlgorithm {
    fn meta(&self) -> &TourConfig {
        &self.config
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Population<Tour> {
        Population::random_init(self.config.population_size, &self.config.space, rng)
    }

    fn evaluate(&self, population: Population<Tour>) -> Population<Tour> {
        let mut population = self.evaluate_only(population);
        population.sort();
        population
    }

    fn evaluate_only(&self, mut population: Population<Tour>) -> Population<Tour> {
        // Path costs of distinct tours are independent, so this is the one
        // step that may run in parallel.
        population
            .as_mut_slice()
            .par_iter_mut()
            .for_each(|tour| tour.refresh_unfitness(&self.config.space));

        population
    }

    // Roulette-wheel selection over the sorted population: each member is
    // weighted by max_cost - unfitness and drawn with replacement from the
    // cumulative normalized distribution.
    fn select(&self, population: &Population<Tour>, rng: &mut dyn RngCore) -> Vec<Tour> {
        let draws = self.config.selection_size();
        let max_cost = self.config.space.max_cost();

        let mut cumulative = Vec::with_capacity(population.len());
        let mut total = 0.0;
        for tour in population.iter() {
            total += (max_cost - tour.unfitness()).max(0.0);
            cumulative.push(total);
        }

        let mut selected = Vec::with_capacity(draws);
        for _ in 0..draws {
            let index = if total > 0.0 {
                let u = rng.gen::<f64>();
                cumulative
                    .partition_point(|&c| c / total < u)
                    .min(population.len() - 1)
            } else {
                // All weights vanish (single city or coincident points);
                // fall back to uniform draws rather than divide by zero.
                rng.gen_range(0..population.len())
            };

            selected.push(population.as_slice()[index].clone());
        }

        selected
    }

    fn crossover(&self, parents: &[Tour], rng: &mut dyn RngCore) -> Vec<Tour> {
        let half = parents.len() / 2;
        let cities = self.config.space.len();
        let mut offspring = Vec::with_capacity(half * 2);

        for i in 0..half {
            let (p1, p2) = (&parents[i], &parents[i + half]);

            let (c1, c2) = match self.config.crossover {
                CrossoverKind::OnePoint => {
                    let point = rng.gen_range(0..=cities);
                    (
                        crossover_one_point(p1, p2, &self.config.space, point),
                        crossover_one_point(p2, p1, &self.config.space, point),
                    )
                }
                CrossoverKind::TwoPoint => {
                    let mut a = rng.gen_range(0..=cities);
                    let mut b = rng.gen_range(0..=cities);
                    if a > b {
                        std::mem::swap(&mut a, &mut b);
                    }
                    (
                        crossover_two_point(p1, p2, &self.config.space, a, b),
                        crossover_two_point(p2, p1, &self.config.space, a, b),
                    )
                }
            };

            offspring.push(c1);
            offspring.push(c2);
        }

        offspring
    }

    fn mutate(&self, mut offspring: Vec<Tour>, rng: &mut dyn RngCore) -> Vec<Tour> {
        for tour in offspring.iter_mut() {
            if rng.gen_bool(self.config.mutation_probability) {
                tour.mutate_inversion(&self.config.space, rng);
            }
        }

        offspring
    }

    // Elitist replacement: offspring join the pool alongside their parents
    // and everyone else, then the pool is sorted and cut back to size.
    fn replace(&self, mut population: Population<Tour>, offspring: Vec<Tour>) -> Population<Tour> {
        population.extend(offspring);
        population.sort();
        population.truncate(self.config.population_size);
        population
    }
}

#[derive(Debug)]
pub struct GeneticOptimizer {
    pub algorithm: Box<dyn Algorithm<TourConfig, Tour>>,
}

impl Optimizer<Tour> for GeneticOptimizer {
    fn optimize(
        &mut self,
        eval: &mut dyn Evaluator<Tour>,
        rng: &mut dyn RngCore,
    ) -> Population<Tour> {
        let mut generation = 0;
        let mut population = self.algorithm.evaluate(self.algorithm.generate(rng));

        loop {
            if eval.can_terminate(&population, generation) {
                break;
            }

            let parents = self.algorithm.select(&population, rng);
            let offspring = self.algorithm.crossover(&parents, rng);
            let offspring = self.algorithm.mutate(offspring, rng);

            population = self.algorithm.replace(population, offspring);

            generation += 1;
        }

        population
    }
}

/// Prints the best path length at fixed intervals and stops the run after
/// the fixed generation budget; the emitted reports stay queryable.
#[derive(Debug)]
pub struct ProgressEvaluator {
    max_generations: i32,
    report_interval: i32,
    quiet: bool,
    reports: Vec<(i32, f64)>,
}

impl ProgressEvaluator {
    pub fn new(config: &TourConfig) -> Self {
        Self {
            max_generations: config.max_generations,
            report_interval: config.report_interval(),
            quiet: false,
            reports: Vec::new(),
        }
    }

    pub fn quiet(config: &TourConfig) -> Self {
        Self {
            quiet: true,
            ..Self::new(config)
        }
    }

    pub fn reports(&self) -> &[(i32, f64)] {
        &self.reports
    }
}

impl Evaluator<Tour> for ProgressEvaluator {
    fn can_terminate(&mut self, population: &Population<Tour>, generation: i32) -> bool {
        let done = generation >= self.max_generations;

        if done || generation % self.report_interval == 0 {
            if let Some(best) = population.best() {
                self.reports.push((generation, best.unfitness()));

                if !self.quiet {
                    println!(
                        "{} - best path length: {:.4}",
                        format!("Generation {:4}", generation).bold().red(),
                        best.unfitness(),
                    );
                }
            }
        }

        done
    }
}
