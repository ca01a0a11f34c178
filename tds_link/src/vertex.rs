use delaunay_geom::Point;
use delaunay_tds::VertexId;

/// A vertex's stored point plus its link: an ordered collection of *paths*,
/// each path a sequence of neighbor ids in counter-clockwise order. A path
/// whose first and last entries coincide is closed (a cycle); otherwise it
/// is open, with distinct endpoints.
#[derive(Clone, Debug, Default)]
pub struct VertexRecord {
    pub point: Point,
    pub links: Vec<Vec<VertexId>>,
}

impl VertexRecord {
    pub fn new(point: Point) -> Self {
        VertexRecord {
            point,
            links: Vec::new(),
        }
    }

    /// Locates `target` among this vertex's paths, returning
    /// `(path_index, position_within_path)`.
    pub fn locate(&self, target: VertexId) -> Option<(usize, usize)> {
        self.links
            .iter()
            .enumerate()
            .find_map(|(path_index, path)| {
                path.iter()
                    .position(|&v| v == target)
                    .map(|pos| (path_index, pos))
            })
    }

    /// Total number of stored neighbor references across every path.
    pub fn reference_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum()
    }
}
