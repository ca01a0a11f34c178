#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Biased Randomized Insertion Order (BRIO) for incremental Delaunay
//! triangulation.
//!
//! Feeding points to an incremental triangulator in their natural input
//! order is pathological for both the point-location walk (long, mostly
//! undirected walks from one insertion to the next) and the expected number
//! of vertices visited per insertion. BRIO fixes this in two steps:
//!
//! 1. split the points into `O(log n)` rounds of geometrically shrinking
//!    size, inserted smallest-first, so every new point already has most of
//!    a useful triangulation to fall into;
//! 2. within each round, sort by a randomized kD-tree traversal, so that
//!    consecutive insertions are also spatially close.
//!
//! See [`reorder`] for the entry point.

mod kdtree;
mod rounds;

use delaunay_geom::Point;
use rand::Rng;

/// Computes an insertion order for `points` that is biased for incremental
/// Delaunay construction: few, small early rounds followed by
/// progressively larger ones, each internally ordered for spatial locality.
///
/// Returns a permutation of `0..points.len()`.
pub fn reorder(points: &[Point], rng: &mut impl Rng) -> Vec<usize> {
    let n = points.len();
    let mut order: Vec<usize> = (0..n).collect();
    if n < 2 {
        return order;
    }

    for (left, right) in rounds::compute_rounds(n, rng) {
        if right - left > 1 {
            let block = kdtree::build(points, &mut order[left..right], rng);
            order[left..right].copy_from_slice(&block);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn reorder_is_a_permutation() {
        let points: Vec<Point> = (0..250)
            .map(|i| Point::new((i % 17) as f64, (i * 3 % 23) as f64))
            .collect();
        let mut rng = StdRng::seed_from_u64(99);
        let order = reorder(&points, &mut rng);

        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..points.len()).collect::<Vec<_>>());
    }

    #[test]
    fn small_inputs_are_unaffected() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(reorder(&[], &mut rng), Vec::<usize>::new());
        assert_eq!(reorder(&[Point::new(0.0, 0.0)], &mut rng), vec![0]);
    }
}
