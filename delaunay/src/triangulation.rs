use delaunay_geom::Point;
use delaunay_tds::{Error, Face, TriangulationDataStructure, VertexHandle, VertexId};
use delaunay_tds_guard::GuardTds;
use delaunay_tds_link::LinkTds;
use delaunay_triangulate::Triangulator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
}

/// Selects the uncompressed link-vertex connectivity representation.
pub struct Link(PhantomData<()>);

/// Selects the compressed guard-vertex connectivity representation.
pub struct Guard(PhantomData<()>);

impl sealed::Sealed for Link {}
impl sealed::Sealed for Guard {}

/// A connectivity representation a [`Triangulation`] can be backed by.
/// Sealed: [`Link`] and [`Guard`] are the only implementors.
pub trait Variant: sealed::Sealed {
    #[doc(hidden)]
    type Tds: TriangulationDataStructure;
    #[doc(hidden)]
    fn new_tds() -> Self::Tds;
}

impl Variant for Link {
    type Tds = LinkTds;
    fn new_tds() -> LinkTds {
        LinkTds::new()
    }
}

impl Variant for Guard {
    type Tds = GuardTds;
    fn new_tds() -> GuardTds {
        GuardTds::new()
    }
}

pub type LinkTriangulation = Triangulation<Link>;
pub type GuardTriangulation = Triangulation<Guard>;

/// A 2D Delaunay triangulation, built incrementally via Bowyer-Watson
/// insertion. `Variant` selects the connectivity representation: [`Link`]
/// for the uncompressed link-vertex structure, [`Guard`] for the
/// compressed guard-vertex structure.
pub struct Triangulation<V: Variant> {
    triangulator: Triangulator<V::Tds>,
    rng: StdRng,
}

fn face_to_tuple(f: Face) -> (VertexId, VertexId, VertexId) {
    let [a, b, c] = f.vertices();
    (a, b, c)
}

impl<V: Variant> Triangulation<V> {
    fn with_rng(rng: StdRng) -> Self {
        Triangulation {
            triangulator: Triangulator::new(V::new_tds()),
            rng,
        }
    }

    /// Builds an empty triangulation, seeded from the operating system's
    /// entropy source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Builds an empty triangulation with a fixed seed, for a reproducible
    /// insertion order and reproducible walk tie-breaks.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Inserts a batch of at least 3 points, BRIO-reordered internally.
    /// Multiple batches may be inserted over the triangulation's lifetime;
    /// only the very first call bootstraps the initial triangle.
    pub fn insert(&mut self, points: &[Point]) -> Result<(), Error> {
        self.triangulator.insert(points, &mut self.rng)
    }

    /// The identity and stored point of `id`.
    pub fn vertex(&self, id: VertexId) -> VertexHandle {
        self.triangulator.tds().vertex(id)
    }

    /// Total vertex count, including the infinite vertex.
    pub fn number_of_vertices(&self) -> usize {
        self.triangulator.tds().number_of_vertices()
    }

    /// Total count of stored link-path / guard-set references, a
    /// diagnostic of the connectivity representation's memory footprint.
    pub fn number_of_references(&self) -> usize {
        self.triangulator.tds().number_of_references()
    }

    /// Every face incident to `v`, each rotated so `v` comes first.
    pub fn incident_faces(&self, v: VertexId) -> Vec<Face> {
        self.triangulator.tds().incident_faces(v)
    }

    /// Every finite face, each appearing once as `(a, b, c)`. Derived by
    /// unioning every vertex's incident faces and canonicalizing so the
    /// lowest-id vertex comes first, mirroring how the original sources
    /// (`stars.py`) recover the whole face set from per-vertex links.
    pub fn finite_faces(&self) -> impl Iterator<Item = (VertexId, VertexId, VertexId)> {
        self.canonical_faces()
            .into_iter()
            .filter(|f| !f.is_infinite())
            .map(face_to_tuple)
    }

    /// Every infinite face (a face containing the vertex at infinity),
    /// each appearing once. See [`Self::finite_faces`].
    pub fn infinite_faces(&self) -> impl Iterator<Item = (VertexId, VertexId, VertexId)> {
        self.canonical_faces()
            .into_iter()
            .filter(|f| f.is_infinite())
            .map(face_to_tuple)
    }

    fn canonical_faces(&self) -> Vec<Face> {
        let mut seen = HashSet::new();
        let mut faces = Vec::new();
        for i in 0..self.number_of_vertices() {
            for f in self.incident_faces(VertexId::from_usize(i)) {
                let verts = f.vertices();
                let min_at = (0..3).min_by_key(|&k| verts[k].to_usize()).unwrap();
                let canon = f.rotate_left(min_at);
                if seen.insert(canon) {
                    faces.push(canon);
                }
            }
        }
        faces
    }
}

impl<V: Variant> Default for Triangulation<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl Triangulation<Link> {
    pub fn new_link() -> Self {
        Self::new()
    }

    pub fn new_link_with_seed(seed: u64) -> Self {
        Self::with_seed(seed)
    }
}

impl Triangulation<Guard> {
    pub fn new_guard() -> Self {
        Self::new()
    }

    pub fn new_guard_with_seed(seed: u64) -> Self {
        Self::with_seed(seed)
    }

    /// Count of vertices currently holding an explicit link.
    pub fn number_of_guards(&self) -> usize {
        self.triangulator.tds().number_of_guards()
    }

    /// Count of vertices currently deferring to a guard set.
    pub fn number_of_ordinaries(&self) -> usize {
        self.triangulator.tds().number_of_ordinaries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_only_yields_one_finite_face() {
        let mut t = Triangulation::new_link_with_seed(1);
        t.insert(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)])
            .unwrap();
        assert_eq!(t.finite_faces().count(), 1);
        assert_eq!(t.infinite_faces().count(), 3);
    }

    #[test]
    fn collinear_input_is_invalid() {
        let mut t = Triangulation::new_guard_with_seed(1);
        let err = t
            .insert(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn guard_triangulation_tracks_guard_and_ordinary_counts() {
        let mut t = Triangulation::new_guard_with_seed(3);
        t.insert(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)])
            .unwrap();
        assert_eq!(t.number_of_guards() + t.number_of_ordinaries(), t.number_of_vertices());
    }
}
