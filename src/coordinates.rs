use rand::distributions::Uniform;
use rand::prelude::*;
use rand::RngCore;

/// Default bound of the square plane cities are drawn from.
pub const PLANE_LIMIT: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An immutable, 0-indexed set of city coordinates. Built once per run and
/// shared by every individual for cost evaluation.
#[derive(Clone, Debug, Default)]
pub struct CoordinateSpace {
    points: Vec<Point>,
    max_cost: f64,
}

impl CoordinateSpace {
    pub fn new(points: Vec<Point>) -> Self {
        let max_cost = bounding_diagonal(&points) * points.len().saturating_sub(1) as f64;
        Self { points, max_cost }
    }

    /// `n` cities with both coordinates drawn uniformly from `[0, limit]`.
    pub fn random(n: usize, limit: f64, rng: &mut dyn RngCore) -> Self {
        let range = Uniform::new_inclusive(0.0, limit);
        let points = (0..n)
            .map(|_| Point::new(rng.sample(&range), rng.sample(&range)))
            .collect();

        Self::new(points)
    }

    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.points[i].distance(&self.points[j])
    }

    /// Loose upper bound on any open-path length: bounding-box diagonal
    /// times the number of edges. Only used to turn a path cost into a
    /// selection weight, never as a correctness constraint.
    pub fn max_cost(&self) -> f64 {
        self.max_cost
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, i: usize) -> Point {
        self.points[i]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

fn bounding_diagonal(points: &[Point]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }

    let mut min = points[0];
    let mut max = points[0];

    for p in points.iter() {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    min.distance(&max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn euclidean_distance() {
        let space = CoordinateSpace::new(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        assert!((space.distance(0, 1) - 5.0).abs() < 1e-12);
        assert!((space.distance(1, 0) - 5.0).abs() < 1e-12);
        assert_eq!(space.distance(0, 0), 0.0);
    }

    #[test]
    fn max_cost_bounds_any_open_path() {
        let square = CoordinateSpace::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]);
        // Diagonal sqrt(2), three edges.
        assert!((square.max_cost() - 3.0 * 2.0_f64.sqrt()).abs() < 1e-12);
        // Worst open path over the unit square is 1 + 2*sqrt(2), both
        // diagonals plus one side; still below the bound.
        assert!(square.max_cost() >= 1.0 + 2.0 * 2.0_f64.sqrt());
    }

    #[test]
    fn degenerate_spaces_have_zero_bound() {
        assert_eq!(CoordinateSpace::new(vec![]).max_cost(), 0.0);
        assert_eq!(
            CoordinateSpace::new(vec![Point::new(4.0, 2.0)]).max_cost(),
            0.0
        );
    }

    #[test]
    fn random_points_stay_in_plane() {
        let mut rng = StdRng::seed_from_u64(7);
        let space = CoordinateSpace::random(50, PLANE_LIMIT, &mut rng);

        assert_eq!(space.len(), 50);
        for p in space.points() {
            assert!((0.0..=PLANE_LIMIT).contains(&p.x));
            assert!((0.0..=PLANE_LIMIT).contains(&p.y));
        }
    }
}
