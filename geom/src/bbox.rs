use crate::Point;
use euclid::default::Box2D;

/// An axis-aligned bounding box, described by its `min` and `max` corners.
///
/// Thin wrapper around [`euclid::default::Box2D<f64>`], matching the way the
/// teacher crate builds its own geometry on top of `euclid` rather than
/// rolling a bespoke rectangle type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    inner: Box2D<f64>,
}

impl BoundingBox {
    #[inline]
    pub fn new(min: Point, max: Point) -> Self {
        BoundingBox {
            inner: Box2D::new(
                euclid::default::Point2D::new(min.x, min.y),
                euclid::default::Point2D::new(max.x, max.y),
            ),
        }
    }

    #[inline]
    pub fn min(&self) -> Point {
        Point::new(self.inner.min.x, self.inner.min.y)
    }

    #[inline]
    pub fn max(&self) -> Point {
        Point::new(self.inner.max.x, self.inner.max.y)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.inner.max.x - self.inner.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.inner.max.y - self.inner.min.y
    }

    /// Computes the smallest bounding box that contains every point.
    ///
    /// Panics if `points` is empty.
    pub fn fit(points: &[Point]) -> Self {
        let first = points.first().expect("fit: at least one point required");
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        BoundingBox::new(min, max)
    }

    /// Returns the smallest box containing both `self` and `p`.
    #[inline]
    pub fn expand(&self, p: Point) -> Self {
        BoundingBox::new(
            Point::new(self.min().x.min(p.x), self.min().y.min(p.y)),
            Point::new(self.max().x.max(p.x), self.max().y.max(p.y)),
        )
    }

    /// Returns a box scaled by `factor` around its own center.
    pub fn scale(&self, factor: f64) -> Self {
        let cx = (self.inner.min.x + self.inner.max.x) * 0.5;
        let cy = (self.inner.min.y + self.inner.max.y) * 0.5;
        let hw = self.width() * 0.5 * factor;
        let hh = self.height() * 0.5 * factor;
        BoundingBox::new(
            Point::new(cx - hw, cy - hh),
            Point::new(cx + hw, cy + hh),
        )
    }

    /// The longer of the two axes: `0` for x, `1` for y. Used by the kD-tree
    /// builder to pick the splitting axis at each node.
    pub fn longest_axis(&self) -> usize {
        if self.width() >= self.height() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_computes_tight_box() {
        let pts = [
            Point::new(1.0, 5.0),
            Point::new(-2.0, 3.0),
            Point::new(0.0, -1.0),
        ];
        let bb = BoundingBox::fit(&pts);
        assert_eq!(bb.min(), Point::new(-2.0, -1.0));
        assert_eq!(bb.max(), Point::new(1.0, 5.0));
    }

    #[test]
    fn expand_grows_to_include_point() {
        let bb = BoundingBox::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let grown = bb.expand(Point::new(2.0, -1.0));
        assert_eq!(grown.min(), Point::new(0.0, -1.0));
        assert_eq!(grown.max(), Point::new(2.0, 1.0));
    }

    #[test]
    fn scale_is_centered() {
        let bb = BoundingBox::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let scaled = bb.scale(2.0);
        assert_eq!(scaled.min(), Point::new(-1.0, -1.0));
        assert_eq!(scaled.max(), Point::new(3.0, 3.0));
    }

    #[test]
    fn longest_axis_picks_wider_dimension() {
        let wide = BoundingBox::new(Point::new(0.0, 0.0), Point::new(10.0, 1.0));
        let tall = BoundingBox::new(Point::new(0.0, 0.0), Point::new(1.0, 10.0));
        assert_eq!(wide.longest_axis(), 0);
        assert_eq!(tall.longest_axis(), 1);
    }
}
