use delaunay_geom::{in_between, incircle, orient2d, Point};
use delaunay_tds::{Error, Face, TriangulationDataStructure, VertexId};
use rand::Rng;
use std::collections::{HashSet, VecDeque};

/// Drives a `T: TriangulationDataStructure` through incremental
/// Bowyer-Watson construction: BRIO reordering, point location by walking,
/// conflict-region removal and star-shaped cavity re-fanning.
///
/// Generic over the TDS capability set rather than a concrete variant, so
/// the same driver builds a triangulation backed by either
/// `delaunay_tds_link::LinkTds` or `delaunay_tds_guard::GuardTds`.
pub struct Triangulator<T> {
    tds: T,
    hint: Option<Face>,
    bootstrapped: bool,
}

impl<T: TriangulationDataStructure> Triangulator<T> {
    pub fn new(tds: T) -> Self {
        Triangulator {
            tds,
            hint: None,
            bootstrapped: false,
        }
    }

    pub fn tds(&self) -> &T {
        &self.tds
    }

    pub fn into_tds(self) -> T {
        self.tds
    }

    fn point(&self, v: VertexId) -> Point {
        self.tds.vertex(v).point
    }

    /// Inserts `points`, BRIO-reordered, bootstrapping the first triangle
    /// out of this batch the first time the triangulator is used.
    pub fn insert(&mut self, points: &[Point], rng: &mut impl Rng) -> Result<(), Error> {
        if points.len() < 3 {
            return Err(Error::InvalidInput("fewer than 3 points".to_string()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidInput("non-finite coordinate".to_string()));
        }

        let order = delaunay_brio::reorder(points, rng);
        let sequence: Vec<Point> = order.iter().map(|&i| points[i]).collect();

        let rest: Vec<Point> = if self.bootstrapped {
            sequence
        } else {
            let third = self.bootstrap(&sequence)?;
            self.bootstrapped = true;
            sequence
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != 0 && i != 1 && i != third)
                .map(|(_, &p)| p)
                .collect()
        };

        for p in rest {
            self.insert_point(p, rng)?;
        }
        Ok(())
    }

    /// Finds the first index `>= 2` at which `points[2..]` contains a point
    /// not collinear with `p0, p1`, swapping `p0`/`p1` once if the first
    /// scan fails. Creates the initial finite face and its infinite skirt,
    /// and returns the index of the point consumed as the third vertex.
    fn bootstrap(&mut self, points: &[Point]) -> Result<usize, Error> {
        let mut p0 = points[0];
        let mut p1 = points[1];
        let mut third = find_non_collinear(points, p0, p1);
        if third.is_none() {
            std::mem::swap(&mut p0, &mut p1);
            third = find_non_collinear(points, p0, p1);
        }
        let third = third.ok_or_else(|| Error::InvalidInput("all input points are collinear".to_string()))?;
        let p2 = points[third];

        let v1 = self.tds.create_vertex(p0);
        let v2 = self.tds.create_vertex(p1);
        let v3 = self.tds.create_vertex(p2);
        self.tds.insert_face(Face::new(v1, v2, v3))?;
        self.tds.insert_face(Face::new(VertexId::INFINITE, v2, v1))?;
        self.tds.insert_face(Face::new(VertexId::INFINITE, v3, v2))?;
        self.tds.insert_face(Face::new(VertexId::INFINITE, v1, v3))?;
        self.hint = Some(Face::new(v1, v2, v3));
        Ok(third)
    }

    /// Executes `find_conflict -> remove_conflict -> fill_cavity ->
    /// update_hint` for a single point.
    fn insert_point(&mut self, p: Point, rng: &mut impl Rng) -> Result<(), Error> {
        let hint = self.hint.expect("bootstrap runs before any point insertion");
        let seed = self.locate(hint, p, rng)?;
        let (conflict, cavity) = self.expand_conflict_region(seed, p);

        for face in &conflict {
            self.tds.remove_face(*face)?;
        }
        let v_new = self.tds.create_vertex(p);
        for (e0, e1) in cavity {
            self.tds.insert_face(Face::new(v_new, e0, e1))?;
        }
        self.hint = self.tds.incident_faces(v_new).into_iter().next();
        Ok(())
    }

    /// Walks from `start` towards `p`, returning the first face that is in
    /// `p`'s conflict region: either the finite face containing `p`, or the
    /// first infinite face reached by stepping across a hull edge.
    fn locate(&self, start: Face, p: Point, rng: &mut impl Rng) -> Result<Face, Error> {
        let mut current = match start.index_of(VertexId::INFINITE) {
            Some(i) => self.tds.neighbor(start, i).expect("closed triangulation"),
            None => start,
        };

        loop {
            let [v0, v1, v2] = current.vertices();
            let (p0, p1, p2) = (self.point(v0), self.point(v1), self.point(v2));
            let e0 = orient2d(p0, p1, p).to_walk_digit();
            let e1 = orient2d(p1, p2, p).to_walk_digit();
            let e2 = orient2d(p2, p0, p).to_walk_digit();
            let mask = 9 * e2 + 3 * e1 + e0;

            let step = match mask {
                11 | 20 | 19 => Some(0),
                5 | 7 | 8 => Some(1),
                15 | 21 | 24 => Some(2),
                2 => Some(if rng.random_bool(0.5) { 0 } else { 1 }),
                6 => Some(if rng.random_bool(0.5) { 1 } else { 2 }),
                18 => Some(if rng.random_bool(0.5) { 0 } else { 2 }),
                16 => {
                    log::warn!("point ({}, {}) coincides with an existing vertex", p.x, p.y);
                    return Ok(current);
                }
                22 => {
                    log::warn!("point ({}, {}) coincides with an existing vertex", p.x, p.y);
                    return Ok(current.rotate_left(1));
                }
                14 => {
                    log::warn!("point ({}, {}) coincides with an existing vertex", p.x, p.y);
                    return Ok(current.rotate_left(2));
                }
                25 => return Ok(current),
                23 => return Ok(current.rotate_left(1)),
                17 => return Ok(current.rotate_left(2)),
                26 => return Ok(current),
                _ => {
                    log::warn!("point-location walk hit undefined mask {mask} locating ({}, {})", p.x, p.y);
                    return Err(Error::DegenerateLocation);
                }
            };

            current = self.tds.neighbor(current, step.unwrap()).expect("closed triangulation");
            if current.vertices()[2].is_infinite() {
                return Ok(current);
            }
        }
    }

    /// Whether `face` belongs to `p`'s conflict region.
    fn in_conflict(&self, face: Face, p: Point) -> bool {
        if !face.is_infinite() {
            let [a, b, c] = face.vertices();
            let (pa, pb, pc) = (self.point(a), self.point(b), self.point(c));
            !incircle(pa, pb, pc, p).is_negative()
        } else {
            let idx = face.index_of(VertexId::INFINITE).expect("face is infinite");
            let rotated = face.rotate_left((idx + 1) % 3);
            let (pa, pb) = (self.point(rotated.0), self.point(rotated.1));
            let s = orient2d(pa, pb, p);
            s.is_positive() || (s.is_zero() && in_between(pa, pb, p))
        }
    }

    /// Breadth-first expansion of the conflict region from `seed`,
    /// returning the set of faces to remove and the CCW boundary edges of
    /// the cavity they leave behind.
    fn expand_conflict_region(&self, seed: Face, p: Point) -> (HashSet<Face>, Vec<(VertexId, VertexId)>) {
        let mut conflict = HashSet::new();
        let mut cavity = Vec::new();
        let mut visited: HashSet<VertexId> = HashSet::new();
        let mut queue = VecDeque::new();

        conflict.insert(seed);
        visited.extend(seed.vertices());
        queue.push_back(seed);

        while let Some(face) = queue.pop_front() {
            for i in 0..3 {
                let neighbor = match self.tds.neighbor(face, i) {
                    Some(n) => n,
                    None => continue,
                };
                if conflict.contains(&neighbor) {
                    continue;
                }
                if neighbor.vertices().iter().all(|v| visited.contains(v)) {
                    continue;
                }
                if self.in_conflict(neighbor, p) {
                    conflict.insert(neighbor);
                    visited.extend(neighbor.vertices());
                    queue.push_back(neighbor);
                } else {
                    cavity.push(face.opposite_edge(i));
                }
            }
        }
        (conflict, cavity)
    }
}

fn find_non_collinear(points: &[Point], p0: Point, p1: Point) -> Option<usize> {
    points[2..]
        .iter()
        .position(|&p| orient2d(p0, p1, p).is_positive())
        .map(|i| i + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delaunay_tds_link::LinkTds;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn triangulate(points: &[Point], seed: u64) -> Triangulator<LinkTds> {
        let mut t = Triangulator::new(LinkTds::new());
        let mut rng = StdRng::seed_from_u64(seed);
        t.insert(points, &mut rng).unwrap();
        t
    }

    #[test]
    fn triangle_only_has_one_finite_face() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let t = triangulate(&points, 1);
        let tds = t.tds();
        let finite: Vec<_> = tds
            .incident_faces(VertexId::from_usize(1))
            .into_iter()
            .filter(|f| !f.is_infinite())
            .collect();
        assert_eq!(finite.len(), 1);
    }

    #[test]
    fn collinear_input_is_rejected() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
        let mut t = Triangulator::new(LinkTds::new());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(t.insert(&points, &mut rng), Err(Error::InvalidInput("all input points are collinear".to_string())));
    }

    #[test]
    fn blandford_example_has_eight_finite_faces() {
        let points = [
            Point::new(0.0, 1.0),
            Point::new(3.0, 0.0),
            Point::new(6.0, 1.0),
            Point::new(9.0, 0.0),
            Point::new(9.0, 2.0),
            Point::new(6.0, 3.0),
            Point::new(3.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(9.0, 4.0),
        ];
        let t = triangulate(&points, 42);
        let tds = t.tds();

        let mut finite = HashSet::new();
        let mut infinite = HashSet::new();
        for i in 0..tds.number_of_vertices() {
            for f in tds.incident_faces(VertexId::from_usize(i)) {
                let verts = f.vertices();
                let mut canon = verts;
                canon.sort_by_key(|v| v.to_usize());
                if f.is_infinite() {
                    infinite.insert(canon);
                } else {
                    finite.insert(canon);
                }
            }
        }
        assert_eq!(finite.len(), 8);
        assert_eq!(infinite.len(), 6);
    }

    #[test]
    fn point_outside_hull_expands_it() {
        let base = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let mut t = Triangulator::new(LinkTds::new());
        let mut rng = StdRng::seed_from_u64(7);
        t.insert(&base, &mut rng).unwrap();
        t.insert(&[Point::new(10.0, 10.0)], &mut rng).unwrap();

        let tds = t.tds();
        let mut finite = HashSet::new();
        for i in 0..tds.number_of_vertices() {
            for f in tds.incident_faces(VertexId::from_usize(i)) {
                if !f.is_infinite() {
                    let mut verts = f.vertices();
                    verts.sort_by_key(|v| v.to_usize());
                    finite.insert(verts);
                }
            }
        }
        assert_eq!(finite.len(), 2);
    }
}
