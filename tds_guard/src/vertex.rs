use delaunay_geom::Point;
use delaunay_tds::VertexId;
use smallvec::SmallVec;

/// Whether a vertex carries its own link (a guard) or only a set of guards
/// it currently relies on (ordinary).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexStatus {
    Ordinary,
    Guard,
}

/// A vertex's stored point together with both representations a vertex can
/// hold, only one of which is meaningful at a time depending on `status`:
/// `links` for a guard (exactly [`delaunay_tds_link::VertexRecord`]'s
/// layout), `guards` for an ordinary vertex.
#[derive(Clone, Debug)]
pub struct GuardVertexRecord {
    pub point: Point,
    pub status: VertexStatus,
    pub links: Vec<Vec<VertexId>>,
    pub guards: SmallVec<[VertexId; 4]>,
}

impl GuardVertexRecord {
    pub fn ordinary(point: Point) -> Self {
        GuardVertexRecord {
            point,
            status: VertexStatus::Ordinary,
            links: Vec::new(),
            guards: SmallVec::new(),
        }
    }

    pub fn guard(point: Point) -> Self {
        GuardVertexRecord {
            point,
            status: VertexStatus::Guard,
            links: Vec::new(),
            guards: SmallVec::new(),
        }
    }

    /// Locates `target` among this guard's paths, returning
    /// `(path_index, position_within_path)`. Meaningless unless
    /// `status == Guard`.
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

    /// True iff `target` appears anywhere in this guard's link.
    pub fn links_contain(&self, target: VertexId) -> bool {
        self.links.iter().any(|path| path.contains(&target))
    }

    /// Count of stored references: link entries for a guard, guard-set
    /// entries for an ordinary vertex.
    pub fn reference_count(&self) -> usize {
        match self.status {
            VertexStatus::Guard => self.links.iter().map(Vec::len).sum(),
            VertexStatus::Ordinary => self.guards.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_count_reads_the_active_field() {
        let mut g = GuardVertexRecord::guard(Point::new(0.0, 0.0));
        g.links.push(vec![VertexId::from_usize(1), VertexId::from_usize(2)]);
        assert_eq!(g.reference_count(), 2);

        let mut o = GuardVertexRecord::ordinary(Point::new(1.0, 0.0));
        o.guards.push(VertexId::from_usize(3));
        assert_eq!(o.reference_count(), 1);
    }
}
