use crate::coordinates::{CoordinateSpace, Point};
use rand::prelude::*;
use rand::RngCore;
use rand_distr::{Distribution, Normal};

/// Cities spread uniformly over the `[0, limit]` square.
pub fn uniform_cities(n: usize, limit: f64, rng: &mut dyn RngCore) -> CoordinateSpace {
    CoordinateSpace::random(n, limit, rng)
}

/// Cities grouped into Gaussian clusters, a harder instance shape than the
/// uniform plane. Cluster centers are uniform over the plane; members are
/// normally distributed around them and clamped back into bounds.
pub fn clustered_cities(
    n: usize,
    clusters: usize,
    limit: f64,
    rng: &mut dyn RngCore,
) -> CoordinateSpace {
    let clusters = clusters.max(1);
    let spread = Normal::new(0.0, limit / 20.0).expect("finite std dev");

    let centers: Vec<Point> = (0..clusters)
        .map(|_| Point::new(rng.gen_range(0.0..=limit), rng.gen_range(0.0..=limit)))
        .collect();

    let points = (0..n)
        .map(|i| {
            let center = centers[i % clusters];
            Point::new(
                (center.x + spread.sample(&mut *rng)).clamp(0.0, limit),
                (center.y + spread.sample(&mut *rng)).clamp(0.0, limit),
            )
        })
        .collect();

    CoordinateSpace::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generators_respect_size_and_bounds() {
        let mut rng = StdRng::seed_from_u64(40);

        for space in [
            uniform_cities(64, 100.0, &mut rng),
            clustered_cities(64, 5, 100.0, &mut rng),
        ] {
            assert_eq!(space.len(), 64);
            for p in space.points() {
                assert!((0.0..=100.0).contains(&p.x));
                assert!((0.0..=100.0).contains(&p.y));
            }
        }
    }

    #[test]
    fn clustered_cities_tolerates_degenerate_cluster_count() {
        let mut rng = StdRng::seed_from_u64(41);
        assert_eq!(clustered_cities(10, 0, 100.0, &mut rng).len(), 10);
    }
}
