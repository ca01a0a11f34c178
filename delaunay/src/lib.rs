#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Incremental 2D Delaunay triangulation.
//!
//! # Crates
//!
//! This facade crate ties together the workspace's building blocks:
//!
//! * **delaunay_geom** - points, bounding boxes and the robust `orient2d` /
//!   `incircle` predicates everything else treats as exact.
//! * **delaunay_brio** - Biased Randomized Insertion Order, reordering a
//!   point set for a well-behaved incremental construction.
//! * **delaunay_tds** - the connectivity contract shared by both variants.
//! * **delaunay_tds_link** / **delaunay_tds_guard** - the link-vertex and
//!   guard-vertex connectivity representations.
//! * **delaunay_triangulate** - the Bowyer-Watson driver, generic over
//!   either representation.
//!
//! # Example
//!
//! ```
//! use delaunay::{Point, Triangulation};
//!
//! let mut triangulation = Triangulation::new_link_with_seed(1234567890);
//! triangulation.insert(&[
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(0.0, 1.0),
//! ]).unwrap();
//! assert_eq!(triangulation.finite_faces().count(), 1);
//! ```

mod triangulation;

pub use delaunay_geom::Point;
pub use delaunay_tds::{Error, Face, VertexHandle, VertexId};
pub use triangulation::{Guard, GuardTriangulation, Link, LinkTriangulation, Triangulation, Variant};
