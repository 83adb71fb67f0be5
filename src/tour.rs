use crate::coordinates::CoordinateSpace;
use crate::genetic_algorithm::Chromosome;
use rand::prelude::*;
use rand::RngCore;

/// One candidate solution: a permutation of city indices plus its cached
/// open-path length. Every constructor and operator preserves the
/// permutation property by construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tour {
    path: Vec<usize>,
    unfitness: f64,
}

impl Tour {
    pub fn new(path: Vec<usize>, space: &CoordinateSpace) -> Self {
        debug_assert!(is_permutation(&path));
        let unfitness = path_cost(&path, space);
        Self { path, unfitness }
    }

    /// Uniformly random permutation of `[0, N)`.
    pub fn random(space: &CoordinateSpace, rng: &mut dyn RngCore) -> Self {
        let mut path: Vec<usize> = (0..space.len()).collect();
        path.shuffle(rng);
        Self::new(path, space)
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Recompute the cached cost from the current permutation.
    pub fn refresh_unfitness(&mut self, space: &CoordinateSpace) {
        self.unfitness = path_cost(&self.path, space);
    }

    /// Reverse a random contiguous sub-range of the path and refresh the
    /// cached cost. Drawing the same index twice leaves the path unchanged.
    pub fn mutate_inversion(&mut self, space: &CoordinateSpace, rng: &mut dyn RngCore) {
        if self.path.len() < 2 {
            return;
        }

        let mut i = rng.gen_range(0..self.path.len());
        let mut j = rng.gen_range(0..self.path.len());
        if i > j {
            std::mem::swap(&mut i, &mut j);
        }

        self.path[i..=j].reverse();
        self.unfitness = path_cost(&self.path, space);
    }
}

/// One-point order crossover: the child keeps `parent_a`'s prefix
/// `[0, point)` in place and fills the remaining positions in order by
/// scanning `parent_b` cyclically from `point`, skipping cities already
/// placed. Each city occurs exactly once in `parent_b`, so the scan always
/// finds enough novel cities. The complementary child is the same call
/// with the parents swapped.
pub fn crossover_one_point(
    parent_a: &Tour,
    parent_b: &Tour,
    space: &CoordinateSpace,
    point: usize,
) -> Tour {
    let n = parent_a.path.len();
    assert!(point <= n, "crossover point {} out of range 0..={}", point, n);
    assert_eq!(n, parent_b.path.len());

    let mut child = Vec::with_capacity(n);
    let mut placed = vec![false; n];

    child.extend_from_slice(&parent_a.path[..point]);
    for &city in &child {
        placed[city] = true;
    }

    let mut read = point;
    while child.len() < n {
        let city = parent_b.path[read % n];
        read += 1;
        if !placed[city] {
            placed[city] = true;
            child.push(city);
        }
    }

    Tour::new(child, space)
}

/// Two-point order crossover with `i <= j <= N`: the child keeps
/// `parent_a`'s segment `[i, j)` in place; independent read and write
/// cursors start at `j` and wrap modulo N, writing novel cities from
/// `parent_b` until the write cursor comes back around to `i`. With
/// `i == j` this degenerates to one-point crossover at that index.
pub fn crossover_two_point(
    parent_a: &Tour,
    parent_b: &Tour,
    space: &CoordinateSpace,
    i: usize,
    j: usize,
) -> Tour {
    assert!(i <= j, "cut points out of order: {} > {}", i, j);
    if i == j {
        return crossover_one_point(parent_a, parent_b, space, i);
    }

    let n = parent_a.path.len();
    assert!(j <= n, "crossover point {} out of range 0..={}", j, n);
    assert_eq!(n, parent_b.path.len());

    let mut child = vec![0usize; n];
    let mut placed = vec![false; n];

    for pos in i..j {
        child[pos] = parent_a.path[pos];
        placed[parent_a.path[pos]] = true;
    }

    let mut read = j % n;
    let mut write = j % n;
    while write != i {
        let city = parent_b.path[read];
        read = (read + 1) % n;
        if !placed[city] {
            placed[city] = true;
            child[write] = city;
            write = (write + 1) % n;
        }
    }

    Tour::new(child, space)
}

/// Total length of the open path (no closing edge). Paths shorter than two
/// cities cost 0 by convention.
pub fn path_cost(path: &[usize], space: &CoordinateSpace) -> f64 {
    if path.len() < 2 {
        return 0.0;
    }

    path.windows(2).map(|w| space.distance(w[0], w[1])).sum()
}

fn is_permutation(path: &[usize]) -> bool {
    let mut seen = vec![false; path.len()];
    path.iter().all(|&city| {
        if city >= seen.len() || seen[city] {
            false
        } else {
            seen[city] = true;
            true
        }
    })
}

impl Chromosome for Tour {
    fn unfitness(&self) -> f64 {
        self.unfitness
    }
}
