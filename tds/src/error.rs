use crate::Face;

/// The triangulation's result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a topology-mutating call was rejected. These indicate a bug in the
/// caller or in the TDS itself, not bad input.
#[derive(Clone, Debug, PartialEq)]
pub enum TopologyViolationKind {
    /// `insert_face` was called for a face that is already present.
    FaceAlreadyPresent,
    /// `remove_face` was called for a face that does not exist.
    FaceNotPresent,
    /// An internal consistency check failed (e.g. a link path lost an
    /// endpoint, or a guard set drifted out of sync with its links).
    InvariantBroken(String),
}

impl std::fmt::Display for TopologyViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyViolationKind::FaceAlreadyPresent => write!(f, "face already present"),
            TopologyViolationKind::FaceNotPresent => write!(f, "face not present"),
            TopologyViolationKind::InvariantBroken(msg) => write!(f, "invariant broken: {msg}"),
        }
    }
}

/// A fatal assertion: `insert_face`/`remove_face` was asked to do something
/// that should be unreachable if the triangulator is correct.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologyViolation {
    pub face: Face,
    pub kind: TopologyViolationKind,
}

impl std::fmt::Display for TopologyViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "topology violation on face {:?}: {}", self.face, self.kind)
    }
}

impl std::error::Error for TopologyViolation {}

/// The triangulation's error enumeration.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Fewer than 3 points, all-collinear input, or a non-finite coordinate.
    InvalidInput(String),
    /// The point-location walk produced an undefined predicate mask.
    DegenerateLocation,
    /// A fatal internal-consistency failure; see [`TopologyViolation`].
    Topology(TopologyViolation),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::DegenerateLocation => write!(f, "point-location walk hit an undefined mask"),
            Error::Topology(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<TopologyViolation> for Error {
    fn from(value: TopologyViolation) -> Self {
        Error::Topology(value)
    }
}

/// Builds the `Error::Topology` for `face`/`kind` and, in debug builds,
/// panics immediately instead of returning - a topology violation is a bug,
/// and debug builds (which is what the test suite runs) should fail loudly.
/// Release builds still hand back the `Result::Err`, so a library bug does
/// not summarily abort a release caller.
pub fn topology_violation(face: Face, kind: TopologyViolationKind) -> Error {
    let violation = TopologyViolation { face, kind };
    if cfg!(debug_assertions) {
        panic!("{violation}");
    }
    Error::Topology(violation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VertexId;

    #[test]
    fn display_mentions_the_offending_face() {
        let face = Face::new(VertexId(1), VertexId(2), VertexId(3));
        let violation = TopologyViolation {
            face,
            kind: TopologyViolationKind::FaceAlreadyPresent,
        };
        assert!(format!("{violation}").contains("#1"));
    }
}
