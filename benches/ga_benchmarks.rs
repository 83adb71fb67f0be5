use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tsp_genetic::coordinates::{CoordinateSpace, PLANE_LIMIT};
use tsp_genetic::genetic_algorithm::{Algorithm, Optimizer};
use tsp_genetic::tour::{crossover_one_point, crossover_two_point, Tour};
use tsp_genetic::tour_optimizer::{
    CrossoverKind, GeneticOptimizer, ProgressEvaluator, TourAlgorithm, TourConfig,
};

fn bench_crossover(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let space = CoordinateSpace::random(200, PLANE_LIMIT, &mut rng);
    let a = Tour::random(&space, &mut rng);
    let b = Tour::random(&space, &mut rng);

    c.bench_function("crossover_one_point_200", |bench| {
        bench.iter(|| crossover_one_point(black_box(&a), black_box(&b), &space, 100))
    });

    c.bench_function("crossover_two_point_200", |bench| {
        bench.iter(|| crossover_two_point(black_box(&a), black_box(&b), &space, 50, 150))
    });
}

fn bench_generation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let space = CoordinateSpace::random(100, PLANE_LIMIT, &mut rng);
    let config = TourConfig::new(space, 200, 10, CrossoverKind::TwoPoint, 0.1, 0.8).unwrap();
    let algorithm = TourAlgorithm::new(config);

    c.bench_function("single_generation_100_cities", |bench| {
        let population = algorithm.evaluate(algorithm.generate(&mut rng));
        bench.iter_batched(
            || population.clone(),
            |population| {
                let parents = algorithm.select(&population, &mut rng);
                let offspring = algorithm.mutate(algorithm.crossover(&parents, &mut rng), &mut rng);
                algorithm.replace(population, offspring)
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

fn bench_short_run(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let space = CoordinateSpace::random(30, PLANE_LIMIT, &mut rng);
    let config = TourConfig::new(space, 50, 50, CrossoverKind::OnePoint, 0.2, 0.8).unwrap();

    c.bench_function("fifty_generations_30_cities", |bench| {
        bench.iter(|| {
            let mut optimizer = GeneticOptimizer {
                algorithm: Box::new(TourAlgorithm::new(config.clone())),
            };
            let mut evaluator = ProgressEvaluator::quiet(&config);
            optimizer.optimize(&mut evaluator, &mut rng)
        })
    });
}

criterion_group!(benches, bench_crossover, bench_generation, bench_short_run);
criterion_main!(benches);
