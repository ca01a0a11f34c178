use crate::Point;

/// A circle, described by its center and a non-negative radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub fn new(center: Point, radius: f64) -> Self {
        debug_assert!(radius >= 0.0, "circle radius must be non-negative");
        Circle { center, radius }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        (dx * dx + dy * dy) < self.radius * self.radius
    }
}

/// Computes the circumcircle of the triangle `(p, q, r)`.
///
/// Precondition: `p`, `q`, `r` are not collinear (`orient2d(p, q, r) != 0`).
/// Uses the standard 2x2-determinant formula, ported from
/// `original_source/sources/geometry.py::circumcenter`.
pub fn circumcircle(p: Point, q: Point, r: Point) -> Circle {
    let ax = p.x;
    let ay = p.y;
    let bx = q.x - ax;
    let by = q.y - ay;
    let cx = r.x - ax;
    let cy = r.y - ay;

    let d = 2.0 * (bx * cy - by * cx);
    debug_assert!(d != 0.0, "circumcircle: p, q, r must not be collinear");

    let b_len2 = bx * bx + by * by;
    let c_len2 = cx * cx + cy * cy;

    let ux = (cy * b_len2 - by * c_len2) / d;
    let uy = (bx * c_len2 - cx * b_len2) / d;

    let center = Point::new(ax + ux, ay + uy);
    let radius = (ux * ux + uy * uy).sqrt();
    Circle::new(center, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn circumcircle_of_right_triangle() {
        let p = Point::new(0.0, 0.0);
        let q = Point::new(2.0, 0.0);
        let r = Point::new(0.0, 2.0);
        let c = circumcircle(p, q, r);
        assert_abs_diff_eq!(c.center.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.center.y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.radius, 2.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn circle_contains_respects_strict_inequality() {
        let c = Circle::new(Point::new(0.0, 0.0), 1.0);
        assert!(c.contains(Point::new(0.5, 0.0)));
        assert!(!c.contains(Point::new(1.0, 0.0)));
        assert!(!c.contains(Point::new(2.0, 0.0)));
    }
}
