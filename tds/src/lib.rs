#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! The triangulation-data-structure (TDS) contract shared by the
//! link-vertex and guard-vertex connectivity representations.
//!
//! This crate owns the vocabulary both variants and the triangulator speak:
//! [`VertexId`], [`Face`], the [`TriangulationDataStructure`] trait, and the
//! shared [`Error`] type. It has no algorithm of its own.

mod error;
mod face;
mod tds;
mod vertex;

pub use error::{topology_violation, Error, TopologyViolation, TopologyViolationKind};
pub use face::Face;
pub use tds::TriangulationDataStructure;
pub use vertex::{is_infinite, VertexHandle, VertexId};

pub use delaunay_geom as geom;
