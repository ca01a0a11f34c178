#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! The compressed guard-vertex triangulation data structure of Batista:
//! only a subset of vertices (the *guards*) hold an explicit link, with
//! every other (*ordinary*) vertex deferring to the guards it borders.
//!
//! [`GuardTds`] implements [`delaunay_tds::TriangulationDataStructure`].

mod guard;
mod vertex;

pub use guard::{is_infinite_face, GuardTds};
pub use vertex::{GuardVertexRecord, VertexStatus};
