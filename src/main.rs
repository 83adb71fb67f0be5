use chrono::Local;
use csv::Writer;
use itertools::iproduct;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::error::Error;
use std::fs::OpenOptions;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::time::Instant;
use tsp_genetic::coordinates::PLANE_LIMIT;
use tsp_genetic::demo_data::{clustered_cities, uniform_cities};
use tsp_genetic::genetic_algorithm::{Chromosome, Optimizer};
use tsp_genetic::tour::Tour;
use tsp_genetic::tour_optimizer::{
    CrossoverKind, GeneticOptimizer, ProgressEvaluator, TourAlgorithm, TourConfig,
};
use tsp_genetic::visualization::visualize_tour;

#[derive(Debug)]
pub struct TestSchema {
    cities: Vec<usize>,
    clustered: Vec<bool>,
    crossover: Vec<CrossoverKind>,
    population_size: Vec<usize>,
    max_generations: Vec<i32>,
    elitism_fraction: Vec<f64>,
    mutation_probability: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct FinalTestResult {
    pub scenario: u64,
    pub repetitions: i32,
    pub cities: usize,
    pub clustered: bool,
    pub crossover: CrossoverKind,
    pub population_size: usize,
    pub max_generations: i32,
    pub elitism_fraction: f64,
    pub mutation_probability: f64,
    pub mean_best_length: f64,
    pub mean_runtime: f64,
    pub var_best_length: f64,
    pub var_runtime: f64,
}

#[derive(Debug)]
pub struct RunResult {
    runtime: f64,
    best: Tour,
}

const REPETITIONS: i32 = 5;

fn mean_variance<T: Copy + Into<f64> + Sum<T>>(values: &[T]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let sum: f64 = values.iter().map(|&v| v.into()).sum();
    let mean = sum / n;

    let variance = values
        .iter()
        .map(|&v| {
            let diff = v.into() - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance)
}

fn hash_combination(
    cities: &usize,
    clustered: &bool,
    crossover: &CrossoverKind,
    population_size: &usize,
    max_generations: &i32,
    elitism_fraction: &f64,
    mutation_probability: &f64,
) -> u64 {
    let mut hasher = DefaultHasher::new();

    cities.hash(&mut hasher);
    clustered.hash(&mut hasher);
    crossover.hash(&mut hasher);
    population_size.hash(&mut hasher);
    max_generations.hash(&mut hasher);
    elitism_fraction.to_bits().hash(&mut hasher); // Hashing the f64 as its bit representation
    mutation_probability.to_bits().hash(&mut hasher);

    hasher.finish()
}

fn collect_benchmarks(schemas: &[TestSchema], file_path: &str) -> Result<(), Box<dyn Error>> {
    let mut visited: HashSet<u64> = HashSet::new();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    let mut writer = Writer::from_writer(file);

    for schema in schemas {
        for (
            &cities,
            &clustered,
            &crossover,
            &population_size,
            &max_generations,
            &elitism_fraction,
            &mutation_probability,
        ) in iproduct!(
            &schema.cities,
            &schema.clustered,
            &schema.crossover,
            &schema.population_size,
            &schema.max_generations,
            &schema.elitism_fraction,
            &schema.mutation_probability
        ) {
            let hash = hash_combination(
                &cities,
                &clustered,
                &crossover,
                &population_size,
                &max_generations,
                &elitism_fraction,
                &mutation_probability,
            );

            if visited.contains(&hash) {
                println!("Scenario {} already evaluated, skipping...", hash);
                continue;
            } else {
                println!("Scenario {} is being run...", hash);
            }

            visited.insert(hash);

            let mut runs = Vec::with_capacity(REPETITIONS as usize);
            for i in 0..REPETITIONS {
                println!("-- Repetition {} of {} is being run...", i, hash);

                // Seed per repetition so every run is reproducible from
                // the scenario hash alone.
                let mut rng = StdRng::seed_from_u64(hash.wrapping_add(i as u64));
                let space = if clustered {
                    clustered_cities(cities, cities / 10 + 1, PLANE_LIMIT, &mut rng)
                } else {
                    uniform_cities(cities, PLANE_LIMIT, &mut rng)
                };

                let config = TourConfig::new(
                    space,
                    population_size,
                    max_generations,
                    crossover,
                    elitism_fraction,
                    mutation_probability,
                )?;

                runs.push(benchmark_run(config, &mut rng));
            }

            let length_values: Vec<f64> = runs.iter().map(|r| r.best.unfitness()).collect();
            let runtime_values: Vec<f64> = runs.iter().map(|r| r.runtime).collect();

            let (mean_best_length, var_best_length) = mean_variance(&length_values);
            let (mean_runtime, var_runtime) = mean_variance(&runtime_values);

            let result = FinalTestResult {
                scenario: hash,
                repetitions: REPETITIONS,
                cities,
                clustered,
                crossover,
                population_size,
                max_generations,
                elitism_fraction,
                mutation_probability,
                mean_best_length,
                mean_runtime,
                var_best_length,
                var_runtime,
            };

            writer.serialize(result)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn benchmark_run(config: TourConfig, rng: &mut StdRng) -> RunResult {
    let mut optimizer = GeneticOptimizer {
        algorithm: Box::new(TourAlgorithm::new(config.clone())),
    };
    let mut evaluator = ProgressEvaluator::new(&config);

    let start = Instant::now();
    let population = optimizer.optimize(&mut evaluator, rng);
    let runtime = start.elapsed().as_secs_f64();

    let best = population.best().expect("non-empty population").clone();

    RunResult { runtime, best }
}

fn main() {
    let schemas = vec![
        TestSchema {
            cities: vec![20, 50],
            clustered: vec![false, true],
            crossover: vec![CrossoverKind::OnePoint, CrossoverKind::TwoPoint],
            population_size: vec![100],
            max_generations: vec![500],
            elitism_fraction: vec![0.1, 0.25],
            mutation_probability: vec![0.8],
        },
        TestSchema {
            cities: vec![100, 200],
            clustered: vec![false],
            crossover: vec![CrossoverKind::TwoPoint],
            population_size: vec![200, 500],
            max_generations: vec![1000],
            elitism_fraction: vec![0.1],
            mutation_probability: vec![0.6, 0.8],
        },
    ];

    let now = Local::now();
    let date_str = now.format("%Y-%m-%d_%H-%M-%S").to_string();
    let filename = format!("test_results_{}.csv", date_str);

    collect_benchmarks(&schemas, &filename).unwrap();

    // Render one representative instance so the result can be eyeballed.
    let mut rng = StdRng::seed_from_u64(42);
    let space = uniform_cities(50, PLANE_LIMIT, &mut rng);
    let config = TourConfig::new(space.clone(), 200, 1000, CrossoverKind::TwoPoint, 0.1, 0.8)
        .expect("valid demo configuration");

    let mut optimizer = GeneticOptimizer {
        algorithm: Box::new(TourAlgorithm::new(config.clone())),
    };
    let mut evaluator = ProgressEvaluator::new(&config);
    let population = optimizer.optimize(&mut evaluator, &mut rng);

    if let Some(best) = population.best() {
        visualize_tour(best, &space, "best_tour.png").unwrap();
    }
}
