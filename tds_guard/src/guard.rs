use crate::vertex::{GuardVertexRecord, VertexStatus};
use delaunay_geom::Point;
use delaunay_tds::{
    is_infinite, topology_violation, Error, Face, TopologyViolationKind, TriangulationDataStructure,
    VertexHandle, VertexId,
};
use smallvec::SmallVec;
use std::collections::HashSet;

/// The compressed guard-vertex triangulation data structure of Batista:
/// only a subset of vertices (the *guards*) store a link; every other
/// vertex (*ordinary*) stores only the set of guards it currently relies
/// on to answer its own queries.
///
/// Vertex 0 is the infinite vertex, created as a guard at construction
/// time and never demoted. Vertices are appended and never removed.
pub struct GuardTds {
    vertices: Vec<GuardVertexRecord>,
}

impl Default for GuardTds {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardTds {
    pub fn new() -> Self {
        GuardTds {
            vertices: vec![GuardVertexRecord::guard(Point::new(f64::INFINITY, f64::INFINITY))],
        }
    }

    fn record(&self, v: VertexId) -> &GuardVertexRecord {
        &self.vertices[v.to_usize()]
    }

    fn record_mut(&mut self, v: VertexId) -> &mut GuardVertexRecord {
        &mut self.vertices[v.to_usize()]
    }

    pub fn status(&self, v: VertexId) -> VertexStatus {
        self.record(v).status
    }

    pub fn number_of_guards(&self) -> usize {
        self.vertices.iter().filter(|r| r.status == VertexStatus::Guard).count()
    }

    pub fn number_of_ordinaries(&self) -> usize {
        self.vertices.iter().filter(|r| r.status == VertexStatus::Ordinary).count()
    }

    /// The number of faces currently incident to `v`, used only to rank
    /// promotion candidates.
    fn link_degree(&self, v: VertexId) -> usize {
        self.incident_faces(v).len()
    }

    /// The GREEDY promotion policy: the vertex of the triple with the
    /// largest current link degree, ties broken by lowest id.
    fn greedy_promotion_target(&self, v0: VertexId, v1: VertexId, v2: VertexId) -> VertexId {
        let mut best = v0;
        let mut best_degree = self.link_degree(v0);
        for v in [v1, v2] {
            let degree = self.link_degree(v);
            if degree > best_degree || (degree == best_degree && v.to_usize() < best.to_usize()) {
                best = v;
                best_degree = degree;
            }
        }
        best
    }

    /// Faces read directly off guard `v`'s own link.
    fn guard_incident_faces(&self, v: VertexId) -> Vec<Face> {
        let record = self.record(v);
        let mut faces = Vec::new();
        for path in &record.links {
            for window in path.windows(2) {
                faces.push(Face::new(v, window[0], window[1]));
            }
        }
        faces
    }

    /// Finds the face `(v0, v1, v2)` implied by the edge `(v0, v1)`,
    /// dispatching on `v0`'s status.
    fn find_up(&self, v0: VertexId, v1: VertexId) -> Option<Face> {
        match self.status(v0) {
            VertexStatus::Guard => self.find_up_guard(v0, v1),
            VertexStatus::Ordinary => self.find_up_ordinary(v0, v1),
        }
    }

    fn find_up_guard(&self, v0: VertexId, v1: VertexId) -> Option<Face> {
        let record = self.record(v0);
        let (path_index, pos) = record.locate(v1)?;
        let path = &record.links[path_index];
        if pos == path.len() - 1 {
            return None;
        }
        Some(Face::new(v0, v1, path[pos + 1]))
    }

    /// `v0` is ordinary: search each of its guards for the edge `(v0,
    /// v1)`. If the guard itself is `v1`, the third vertex is `v0`'s
    /// predecessor in that guard's link (walking backward, with the
    /// closed-path wraparound); otherwise the third vertex is the guard
    /// itself, found when `v1` is `v0`'s immediate successor.
    fn find_up_ordinary(&self, v0: VertexId, v1: VertexId) -> Option<Face> {
        let guards: SmallVec<[VertexId; 4]> = self.record(v0).guards.clone();
        for g in guards {
            let record = self.record(g);
            let (path_index, pos) = match record.locate(v0) {
                Some(hit) => hit,
                None => continue,
            };
            let path = &record.links[path_index];
            let len = path.len();
            if g == v1 {
                if pos > 0 {
                    return Some(Face::new(v0, v1, path[pos - 1]));
                }
                let closed = path.first() == path.last();
                if closed && len > 1 {
                    return Some(Face::new(v0, v1, path[len - 2]));
                }
            } else if pos + 1 < len && path[pos + 1] == v1 {
                return Some(Face::new(v0, v1, g));
            }
        }
        None
    }

    /// Extends guard `v0`'s link with the directed edge `(v1, v2)`.
    /// Identical case analysis to the uncompressed link-vertex structure.
    fn extend_in_guard(&mut self, v0: VertexId, v1: VertexId, v2: VertexId, face: Face) -> Result<(), Error> {
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

    /// Removes the directed edge `(v1, v2)` from guard `v0`'s link.
    fn retract_in_guard(&mut self, v0: VertexId, v1: VertexId, v2: VertexId, face: Face) -> Result<(), Error> {
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

    /// Adds `v1`, `v2` to ordinary vertex `v0`'s guard set, whichever of
    /// them are currently guards.
    fn insert_face_in_ordinary(&mut self, v0: VertexId, v1: VertexId, v2: VertexId) {
        if self.status(v1) == VertexStatus::Guard {
            self.add_guard(v0, v1);
        }
        if self.status(v2) == VertexStatus::Guard {
            self.add_guard(v0, v2);
        }
    }

    fn add_guard(&mut self, v: VertexId, g: VertexId) {
        let guards = &mut self.record_mut(v).guards;
        if !guards.contains(&g) {
            guards.push(g);
        }
    }

    /// Promotes the GREEDY-chosen vertex of an all-ordinary face to
    /// guard, rebuilding its link from the faces it was already
    /// indirectly incident to and broadcasting its id into the guard
    /// sets of its new ordinary neighbors.
    fn promote(&mut self, v0: VertexId, v1: VertexId, v2: VertexId) -> Result<(), Error> {
        let g = self.greedy_promotion_target(v0, v1, v2);
        log::debug!("promoting {g:?} to guard (face {v0:?}, {v1:?}, {v2:?} was all-ordinary)");
        let incidents = self.incident_faces(g);

        let record = self.record_mut(g);
        record.status = VertexStatus::Guard;
        record.links.clear();
        for f in &incidents {
            let [a, b, c] = f.vertices();
            self.extend_in_guard(a, b, c, *f)?;
        }
        self.record_mut(g).guards.clear();

        let neighbors: HashSet<VertexId> = self.record(g).links.iter().flatten().copied().collect();
        for n in neighbors {
            if n != g && self.status(n) == VertexStatus::Ordinary {
                self.add_guard(n, g);
            }
        }
        Ok(())
    }

    /// Drops any guard from `v`'s guard set whose link no longer
    /// mentions `v`.
    fn refresh_guard_set(&mut self, v: VertexId) {
        let stale: SmallVec<[VertexId; 4]> = self
            .record(v)
            .guards
            .iter()
            .copied()
            .filter(|&g| !self.record(g).links_contain(v))
            .collect();
        if stale.is_empty() {
            return;
        }
        self.record_mut(v).guards.retain(|g| !stale.contains(g));
    }

    /// Demotes a guard back to ordinary once its link has emptied.
    /// Vertex 0 is permanently a guard.
    fn maybe_demote(&mut self, v: VertexId) {
        if v == VertexId::INFINITE {
            return;
        }
        if self.record(v).links.is_empty() {
            log::debug!("demoting {v:?} to ordinary (its link emptied)");
            let record = self.record_mut(v);
            record.status = VertexStatus::Ordinary;
            record.guards.clear();
        }
    }
}

fn cw(i: usize) -> usize {
    (i + 2) % 3
}

fn ccw(i: usize) -> usize {
    (i + 1) % 3
}

impl TriangulationDataStructure for GuardTds {
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
        self.vertices.push(GuardVertexRecord::ordinary(point));
        id
    }

    fn insert_face(&mut self, face: Face) -> Result<(), Error> {
        let [v0, v1, v2] = face.vertices();
        let all_ordinary = self.status(v0) == VertexStatus::Ordinary
            && self.status(v1) == VertexStatus::Ordinary
            && self.status(v2) == VertexStatus::Ordinary;
        if all_ordinary {
            self.promote(v0, v1, v2)?;
        }

        for (a, b, c) in [(v0, v1, v2), (v1, v2, v0), (v2, v0, v1)] {
            match self.status(a) {
                VertexStatus::Guard => self.extend_in_guard(a, b, c, face)?,
                VertexStatus::Ordinary => self.insert_face_in_ordinary(a, b, c),
            }
        }
        Ok(())
    }

    fn remove_face(&mut self, face: Face) -> Result<(), Error> {
        let [v0, v1, v2] = face.vertices();
        for (a, b, c) in [(v0, v1, v2), (v1, v2, v0), (v2, v0, v1)] {
            if self.status(a) == VertexStatus::Guard {
                self.retract_in_guard(a, b, c, face)?;
            }
        }
        for v in face.vertices() {
            match self.status(v) {
                VertexStatus::Ordinary => self.refresh_guard_set(v),
                VertexStatus::Guard => self.maybe_demote(v),
            }
        }
        Ok(())
    }

    fn neighbor(&self, face: Face, i: usize) -> Option<Face> {
        let verts = face.vertices();
        self.find_up(verts[cw(i)], verts[ccw(i)])
    }

    fn incident_faces(&self, v: VertexId) -> Vec<Face> {
        match self.status(v) {
            VertexStatus::Guard => self.guard_incident_faces(v),
            VertexStatus::Ordinary => {
                let mut seen = HashSet::new();
                let mut faces = Vec::new();
                for g in self.record(v).guards.clone() {
                    for f in self.guard_incident_faces(g) {
                        if let Some(idx) = f.index_of(v) {
                            let rotated = f.rotate_left(idx);
                            if seen.insert(rotated) {
                                faces.push(rotated);
                            }
                        }
                    }
                }
                faces
            }
        }
    }

    fn number_of_references(&self) -> usize {
        self.vertices.iter().map(GuardVertexRecord::reference_count).sum()
    }
}

/// True iff any of `v0, v1, v2` is the infinite vertex.
pub fn is_infinite_face(v0: VertexId, v1: VertexId, v2: VertexId) -> bool {
    is_infinite(&[v0, v1, v2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: u32) -> VertexId {
        VertexId(i)
    }

    fn triangle() -> GuardTds {
        let mut tds = GuardTds::new();
        tds.create_vertex(Point::new(0.0, 0.0));
        tds.create_vertex(Point::new(1.0, 0.0));
        tds.create_vertex(Point::new(0.0, 1.0));
        tds
    }

    fn faces() -> [Face; 4] {
        [
            Face::new(v(1), v(2), v(3)),
            Face::new(v(0), v(2), v(1)),
            Face::new(v(0), v(3), v(2)),
            Face::new(v(0), v(1), v(3)),
        ]
    }

    #[test]
    fn inserting_an_all_ordinary_face_promotes_exactly_one_vertex() {
        let mut tds = triangle();
        assert_eq!(tds.number_of_guards(), 1); // only the infinite vertex
        tds.insert_face(faces()[0]).unwrap();
        assert_eq!(tds.number_of_guards(), 2);
        assert_eq!(tds.number_of_ordinaries(), 2);
    }

    #[test]
    fn full_triangulation_matches_link_tds_incidence() {
        let mut tds = triangle();
        for f in faces() {
            tds.insert_face(f).unwrap();
        }
        let mut incident = tds.incident_faces(v(1));
        incident.sort_by_key(|f| f.vertices().map(VertexId::to_usize));
        assert!(incident.contains(&Face::new(v(1), v(2), v(3))));
        assert!(incident.contains(&Face::new(v(1), v(3), v(0))));
        assert_eq!(incident.len(), 3);

        for i in 0..tds.number_of_vertices() {
            let iv = VertexId::from_usize(i);
            assert_eq!(tds.incident_faces(iv).len(), 3);
        }
    }

    #[test]
    fn insert_then_remove_restores_empty_incidence_and_demotes_guards() {
        let mut tds = triangle();
        let fs = faces();
        for f in fs {
            tds.insert_face(f).unwrap();
        }
        for f in fs.iter().rev() {
            tds.remove_face(*f).unwrap();
        }
        for i in 0..tds.number_of_vertices() {
            assert!(tds.incident_faces(VertexId::from_usize(i)).is_empty());
        }
        // every vertex but the infinite one must have been demoted back
        // to ordinary once its link emptied.
        assert_eq!(tds.number_of_guards(), 1);
        assert_eq!(tds.status(VertexId::INFINITE), VertexStatus::Guard);
    }

    #[test]
    fn duplicate_face_insertion_is_a_topology_violation() {
        let mut tds = triangle();
        let face = faces()[0];
        tds.insert_face(face).unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| tds.insert_face(face)));
        assert!(result.is_err(), "debug build should panic on duplicate face");
    }
}
