use std::fmt;

/// Identifies a vertex within one triangulation. Stable for the lifetime of
/// the triangulation: vertices are appended to an arena and never removed,
/// so an id remains valid (and keeps pointing at the same point) forever
/// once handed out.
///
/// `VertexId(0)` is reserved for the infinite vertex, the sentinel that
/// represents the point at infinity surrounding the convex hull.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexId(pub u32);

impl VertexId {
    /// The sentinel vertex representing the point at infinity.
    pub const INFINITE: VertexId = VertexId(0);

    /// Marks the absence of a vertex (e.g. a not-yet-linked slot).
    pub const INVALID: VertexId = VertexId(u32::MAX);

    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_usize(value: usize) -> Self {
        VertexId(value as u32)
    }

    /// True iff this is the sentinel vertex at infinity.
    #[inline]
    pub fn is_infinite(self) -> bool {
        self == VertexId::INFINITE
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// True iff any of the given vertices is the infinite vertex. Mirrors the
/// TDS contract's variadic `is_infinite(v0[,v1[,v2]])`.
#[inline]
pub fn is_infinite(vertices: &[VertexId]) -> bool {
    vertices.iter().any(|v| v.is_infinite())
}

/// A vertex's identity together with its stored point, as returned by
/// [`crate::TriangulationDataStructure::vertex`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexHandle {
    pub id: VertexId,
    pub point: delaunay_geom::Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_vertex_is_index_zero() {
        assert!(VertexId::INFINITE.is_infinite());
        assert!(is_infinite(&[VertexId::from_usize(4), VertexId::INFINITE]));
        assert!(!is_infinite(&[VertexId::from_usize(1), VertexId::from_usize(2)]));
    }

    #[test]
    fn debug_format_matches_teacher_style() {
        assert_eq!(format!("{:?}", VertexId::from_usize(7)), "#7");
    }
}
