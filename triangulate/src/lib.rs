#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Incremental Bowyer-Watson Delaunay triangulation, generic over the
//! connectivity representation.
//!
//! [`Triangulator`] drives any `T: delaunay_tds::TriangulationDataStructure`
//! through BRIO-ordered point insertion: point location by walking,
//! conflict-region removal, and star-shaped cavity re-triangulation.

mod triangulator;

pub use triangulator::Triangulator;
