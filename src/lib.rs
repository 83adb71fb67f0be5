pub mod coordinates;
pub mod demo_data;
pub mod genetic_algorithm;
pub mod population;
pub mod tour;
pub mod tour_optimizer;
pub mod visualization;
