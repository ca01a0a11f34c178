use crate::{Error, Face, VertexHandle, VertexId};
use delaunay_geom::Point;

/// The capability set the Bowyer-Watson triangulator needs from a
/// connectivity structure, unified across the link-vertex and guard-vertex
/// variants. The triangulator is generic over this trait rather than
/// depending on either concrete implementation, so it never has to know
/// which variant it is driving.
pub trait TriangulationDataStructure {
    /// Returns the identity and stored point of `id`.
    fn vertex(&self, id: VertexId) -> VertexHandle;

    /// Total vertex count, including the infinite vertex.
    fn number_of_vertices(&self) -> usize;

    /// Appends a fresh vertex, initially incident to no face, and returns
    /// its id.
    fn create_vertex(&mut self, point: Point) -> VertexId;

    /// Inserts face `(v0, v1, v2)`.
    ///
    /// Precondition: the CCW triple is not already present, and each
    /// involved edge has fewer than 2 incident faces.
    fn insert_face(&mut self, face: Face) -> Result<(), Error>;

    /// Removes face `(v0, v1, v2)`.
    ///
    /// Precondition: the face exists.
    fn remove_face(&mut self, face: Face) -> Result<(), Error>;

    /// The unique face sharing the edge opposite `face`'s `i`-th vertex,
    /// oriented consistently with `face`. `None` only if that edge lies on
    /// a boundary, which does not happen in a closed triangulation that
    /// includes infinite faces.
    fn neighbor(&self, face: Face, i: usize) -> Option<Face>;

    /// Every face incident to `v`, each rotated so `v` comes first.
    fn incident_faces(&self, v: VertexId) -> Vec<Face>;

    /// Total count of stored link-path / guard-set references across all
    /// vertices. A diagnostic, not load-bearing for correctness.
    fn number_of_references(&self) -> usize;
}
