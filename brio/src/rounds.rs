//! Round-size computation for biased randomized insertion order.
//!
//! Points are split into `r = floor(log2 n)` rounds of geometrically
//! shrinking expected size, so that later rounds (inserted first) are tiny
//! and the final round (inserted last) holds about half of all points. This
//! mirrors `original_source/sources/brio/__init__.py::__create_rounds`: round
//! sizes are drawn high-index-first via `Binomial(remaining, 0.5)`, but the
//! resulting ranges are assigned low-index-first, so round 0 - the smallest
//! leftover - is inserted first and the largest round last.

use rand::Rng;
use rand_distr::{Binomial, Distribution};

fn sample_binomial(trials: usize, rng: &mut impl Rng) -> usize {
    if trials == 0 {
        return 0;
    }
    Binomial::new(trials as u64, 0.5)
        .expect("trials fits in a valid binomial parameter")
        .sample(rng) as usize
}

/// Computes contiguous `[start, end)` ranges over `0..n`, one per round, in
/// insertion order (round 0 first).
pub fn compute_rounds(n: usize, rng: &mut impl Rng) -> Vec<(usize, usize)> {
    if n == 0 {
        return Vec::new();
    }

    let r = (n as f64).log2().floor() as usize;
    if r == 0 {
        return vec![(0, n)];
    }

    let mut sizes = vec![0usize; r];
    let mut remaining = n;
    for i in (1..r).rev() {
        let k = sample_binomial(remaining, rng);
        sizes[i] = k;
        remaining -= k;
    }
    sizes[0] = remaining;

    let mut ranges = Vec::with_capacity(r);
    let mut left = 0;
    for size in sizes {
        let right = left + size;
        ranges.push((left, right));
        left = right;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ranges_cover_every_point_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let ranges = compute_rounds(100, &mut rng);
        let mut left = 0;
        for (start, end) in &ranges {
            assert_eq!(*start, left);
            assert!(end >= start);
            left = *end;
        }
        assert_eq!(left, 100);
    }

    #[test]
    fn round_count_matches_floor_log2() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(compute_rounds(1, &mut rng).len(), 1);
        assert_eq!(compute_rounds(2, &mut rng).len(), 1);
        assert_eq!(compute_rounds(16, &mut rng).len(), 4);
        assert_eq!(compute_rounds(1000, &mut rng).len(), 9);
    }

    #[test]
    fn empty_input_has_no_rounds() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(compute_rounds(0, &mut rng).is_empty());
    }
}
