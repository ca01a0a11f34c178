//! Within-round reordering via a randomized kD-tree build.
//!
//! The tree itself is never materialized as a standalone structure: since
//! nothing downstream needs to walk it again, building the tree and emitting
//! the alternating in-order traversal are fused into a single recursive pass
//! over the index slice, each call partitioning its slice in place. The
//! splitting bounding box is narrowed and threaded through the recursion
//! rather than re-fit from each subregion's live points, matching the
//! original's `__insert`.

use delaunay_geom::{BoundingBox, Point};
use rand::Rng;

/// Splits `bbox` at `value` along `axis`, the way the original's `__insert`
/// narrows `[xmin,ymin,xmax,ymax]` for each child call rather than re-fitting
/// a box from the child's own points.
fn split_bbox(bbox: BoundingBox, axis: usize, value: f64) -> (BoundingBox, BoundingBox) {
    let (min, max) = (bbox.min(), bbox.max());
    if axis == 0 {
        (
            BoundingBox::new(min, Point::new(value, max.y)),
            BoundingBox::new(Point::new(value, min.y), max),
        )
    } else {
        (
            BoundingBox::new(min, Point::new(max.x, value)),
            BoundingBox::new(Point::new(min.x, value), max),
        )
    }
}

#[inline]
fn axis_value(points: &[Point], index: usize, axis: usize) -> f64 {
    if axis == 0 {
        points[index].x
    } else {
        points[index].y
    }
}

/// Lomuto partition of `indices` around a uniformly random pivot, ordered by
/// `axis`. Returns the pivot's final position within the slice.
fn partition(points: &[Point], indices: &mut [usize], axis: usize, rng: &mut impl Rng) -> usize {
    let len = indices.len();
    let pivot_pos = rng.random_range(0..len);
    indices.swap(pivot_pos, len - 1);
    let pivot_value = axis_value(points, indices[len - 1], axis);

    let mut store = 0;
    for j in 0..len - 1 {
        if axis_value(points, indices[j], axis) <= pivot_value {
            indices.swap(store, j);
            store += 1;
        }
    }
    indices.swap(store, len - 1);
    store
}

/// Builds a kD-tree over the points named by `indices` and returns them in
/// alternating in-order emission order: `build(left) ++ [node] ++ reverse(build(right))`.
pub fn build(points: &[Point], indices: &mut [usize], rng: &mut impl Rng) -> Vec<usize> {
    if indices.is_empty() {
        return Vec::new();
    }
    let block: Vec<Point> = indices.iter().map(|&i| points[i]).collect();
    let bbox = BoundingBox::fit(&block);
    build_in(points, indices, bbox, rng)
}

/// Recursive worker threading the splitting bounding box through each call,
/// rather than re-fitting one from the live subregion at every level.
fn build_in(points: &[Point], indices: &mut [usize], bbox: BoundingBox, rng: &mut impl Rng) -> Vec<usize> {
    let n = indices.len();
    if n <= 1 {
        return indices.to_vec();
    }

    let axis = bbox.longest_axis();
    let k = (n + n % 2) / 2; // ceil(n / 2), 1-indexed rank of the split point
    select_median(points, indices, k, axis, rng);

    let median_pos = k - 1;
    let node = indices[median_pos];
    let split = axis_value(points, node, axis);
    let (left_bbox, right_bbox) = split_bbox(bbox, axis, split);

    let (left_part, rest) = indices.split_at_mut(median_pos);
    let (_, right_part) = rest.split_at_mut(1);

    let mut sequence = if left_part.is_empty() {
        Vec::new()
    } else {
        build_in(points, left_part, left_bbox, rng)
    };
    sequence.push(node);

    if !right_part.is_empty() {
        let mut right_sequence = build_in(points, right_part, right_bbox, rng);
        right_sequence.reverse();
        sequence.extend(right_sequence);
    }

    sequence
}

/// Rearranges `indices` so that the element of 1-indexed rank `k` along
/// `axis` ends up at position `k - 1`, with every element before it no
/// greater and every element after it no smaller. Expected linear time.
fn select_median(points: &[Point], indices: &mut [usize], mut k: usize, axis: usize, rng: &mut impl Rng) {
    let mut lo = 0;
    let mut hi = indices.len();
    loop {
        if hi - lo <= 1 {
            return;
        }
        let pivot = partition(points, &mut indices[lo..hi], axis, rng) + lo;
        let rank = pivot - lo + 1;
        if k == rank {
            return;
        } else if k < rank {
            hi = pivot;
        } else {
            k -= rank;
            lo = pivot + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn build_is_a_permutation() {
        let points: Vec<Point> = (0..37)
            .map(|i| Point::new(i as f64, (i * 7 % 13) as f64))
            .collect();
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let order = build(&points, &mut indices, &mut rng);

        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..points.len()).collect::<Vec<_>>());
    }

    #[test]
    fn single_point_is_trivial() {
        let points = [Point::new(0.0, 0.0)];
        let mut indices = [0usize];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(build(&points, &mut indices, &mut rng), vec![0]);
    }
}
