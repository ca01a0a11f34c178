use crate::vertex::VertexRecord;
use delaunay_geom::Point;
use delaunay_tds::{
    is_infinite, topology_violation, Error, Face, TopologyViolationKind, TriangulationDataStructure,
    VertexHandle, VertexId,
};

/// The uncompressed link-vertex triangulation data structure of Blandford,
/// Blelloch, Cardoze & Kadow: every vertex stores its own link directly, as
/// an ordered list of neighbor paths.
///
/// Vertex 0 is the infinite vertex, created at construction time and always
/// present. Vertices are appended and never removed.
pub struct LinkTds {
    vertices: Vec<VertexRecord>,
}

impl Default for LinkTds {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkTds {
    pub fn new() -> Self {
        LinkTds {
            vertices: vec![VertexRecord::new(Point::new(f64::INFINITY, f64::INFINITY))],
        }
    }

    fn record(&self, v: VertexId) -> &VertexRecord {
        &self.vertices[v.to_usize()]
    }

    fn record_mut(&mut self, v: VertexId) -> &mut VertexRecord {
        &mut self.vertices[v.to_usize()]
    }

    /// Finds the face `(v0, v1, v2)` implied by `v0`'s link containing the
    /// edge `(v0, v1)`, i.e. the third vertex immediately following `v1` in
    /// whichever path holds it. `None` if `v1` ends an open path, meaning
    /// the edge `(v0, v1)` has no face on this side.
    fn find_up(&self, v0: VertexId, v1: VertexId) -> Option<Face> {
        let record = self.record(v0);
        let (path_index, pos) = record.locate(v1)?;
        let path = &record.links[path_index];
        if pos == path.len() - 1 {
            return None;
        }
        Some(Face::new(v0, v1, path[pos + 1]))
    }

    /// Extends `v0`'s link with the directed edge `(v1, v2)`, implementing
    /// the four extension cases of the link-path algorithm.
    fn extend(&mut self, v0: VertexId, v1: VertexId, v2: VertexId, face: Face) -> Result<(), Error> {
        let record = self.record_mut(v0);
        let p1 = record.locate(v1);
        let p2 = record.locate(v2);

        match (p1, p2) {
            (None, None) => record.links.push(vec![v1, v2]),
            (Some((path1, i1)), None) => record.links[path1].insert(i1 + 1, v2),
            (None, Some((path2, i2))) => record.links[path2].insert(i2, v1),
            (Some((path1, i1)), Some((path2, i2))) => {
                if path1 != path2 {
                    let (pmin, pmax, pos) = if path1 < path2 {
                        (path1, path2, i1 + 1)
                    } else {
                        (path2, path1, i2)
                    };
                    let tail = record.links.remove(pmax);
                    record.links[pmin].splice(pos..pos, tail);
                } else {
                    let path = &mut record.links[path1];
                    if i2 == 0 && i1 + 1 == path.len() {
                        path.push(v2);
                    } else {
                        return Err(topology_violation(face, TopologyViolationKind::FaceAlreadyPresent));
                    }
                }
            }
        }
        Ok(())
    }

    /// Removes the directed edge `(v1, v2)` from `v0`'s link, implementing
    /// the path-splitting removal algorithm.
    fn retract(&mut self, v0: VertexId, v1: VertexId, v2: VertexId, face: Face) -> Result<(), Error> {
        let record = self.record_mut(v0);
        let p1 = record.locate(v1);
        let p2 = record.locate(v2);

        let (path1, _i1) = p1.ok_or_else(|| topology_violation(face, TopologyViolationKind::FaceNotPresent))?;
        let (path2, i2) = p2.ok_or_else(|| topology_violation(face, TopologyViolationKind::FaceNotPresent))?;
        if path1 != path2 {
            return Err(topology_violation(face, TopologyViolationKind::FaceNotPresent));
        }

        let path = record.links.remove(path1);
        let closed = path.first() == path.last();
        let first = path[..i2].to_vec();
        let latest = path[i2..].to_vec();
        debug_assert!(first.len() + latest.len() > 1);

        if closed {
            let mut reopened = latest[..latest.len() - 1].to_vec();
            reopened.extend(first);
            record.links.push(reopened);
        } else {
            let mut at = path1;
            if first.len() > 1 {
                record.links.insert(at, first);
                at += 1;
            }
            if latest.len() > 1 {
                record.links.insert(at, latest);
            }
        }
        Ok(())
    }
}

fn cw(i: usize) -> usize {
    (i + 2) % 3
}

fn ccw(i: usize) -> usize {
    (i + 1) % 3
}

impl TriangulationDataStructure for LinkTds {
    fn vertex(&self, id: VertexId) -> VertexHandle {
        VertexHandle {
            id,
            point: self.record(id).point,
        }
    }

    fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    fn create_vertex(&mut self, point: Point) -> VertexId {
        let id = VertexId::from_usize(self.vertices.len());
        self.vertices.push(VertexRecord::new(point));
        id
    }

    fn insert_face(&mut self, face: Face) -> Result<(), Error> {
        let [v0, v1, v2] = face.vertices();
        self.extend(v0, v1, v2, face)?;
        self.extend(v1, v2, v0, face)?;
        self.extend(v2, v0, v1, face)?;
        Ok(())
    }

    fn remove_face(&mut self, face: Face) -> Result<(), Error> {
        let [v0, v1, v2] = face.vertices();
        self.retract(v0, v1, v2, face)?;
        self.retract(v1, v2, v0, face)?;
        self.retract(v2, v0, v1, face)?;
        Ok(())
    }

    fn neighbor(&self, face: Face, i: usize) -> Option<Face> {
        let verts = face.vertices();
        self.find_up(verts[cw(i)], verts[ccw(i)])
    }

    fn incident_faces(&self, v: VertexId) -> Vec<Face> {
        let record = self.record(v);
        let mut faces = Vec::new();
        for path in &record.links {
            for window in path.windows(2) {
                faces.push(Face::new(v, window[0], window[1]));
            }
        }
        faces
    }

    fn number_of_references(&self) -> usize {
        self.vertices.iter().map(VertexRecord::reference_count).sum()
    }
}

/// True iff any of `v0, v1, v2` is the infinite vertex. Convenience
/// re-export matching the TDS contract's `is_infinite`.
pub fn is_infinite_face(v0: VertexId, v1: VertexId, v2: VertexId) -> bool {
    is_infinite(&[v0, v1, v2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: u32) -> VertexId {
        VertexId(i)
    }

    fn triangle() -> LinkTds {
        let mut tds = LinkTds::new();
        tds.create_vertex(Point::new(0.0, 0.0));
        tds.create_vertex(Point::new(1.0, 0.0));
        tds.create_vertex(Point::new(0.0, 1.0));
        tds
    }

    #[test]
    fn single_finite_triangle_and_its_infinite_skirt() {
        let mut tds = triangle();
        tds.insert_face(Face::new(v(1), v(2), v(3))).unwrap();
        tds.insert_face(Face::new(v(0), v(2), v(1))).unwrap();
        tds.insert_face(Face::new(v(0), v(3), v(2))).unwrap();
        tds.insert_face(Face::new(v(0), v(1), v(3))).unwrap();

        let mut faces = tds.incident_faces(v(1));
        faces.sort_by_key(|f| f.vertices().map(VertexId::to_usize));
        assert!(faces.contains(&Face::new(v(1), v(2), v(3))));
        assert!(faces.contains(&Face::new(v(1), v(3), v(0))));

        assert_eq!(tds.neighbor(Face::new(v(1), v(2), v(3)), 0), Some(Face::new(v(3), v(2), v(0))));
    }

    #[test]
    fn insert_then_remove_restores_empty_links() {
        let mut tds = triangle();
        let faces = [
            Face::new(v(1), v(2), v(3)),
            Face::new(v(0), v(2), v(1)),
            Face::new(v(0), v(3), v(2)),
            Face::new(v(0), v(1), v(3)),
        ];
        for f in faces {
            tds.insert_face(f).unwrap();
        }
        for f in faces.iter().rev() {
            tds.remove_face(*f).unwrap();
        }
        for i in 0..tds.number_of_vertices() {
            assert!(tds.incident_faces(VertexId::from_usize(i)).is_empty());
        }
    }

    #[test]
    fn duplicate_face_insertion_is_a_topology_violation() {
        let mut tds = triangle();
        let face = Face::new(v(1), v(2), v(3));
        tds.insert_face(face).unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| tds.insert_face(face)));
        assert!(result.is_err(), "debug build should panic on duplicate face");
    }
}
