#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! The uncompressed link-vertex triangulation data structure of Blandford,
//! Blelloch, Cardoze & Kadow (2005): every vertex directly stores its own
//! link as an ordered list of neighbor paths.
//!
//! [`LinkTds`] implements [`delaunay_tds::TriangulationDataStructure`].

mod link;
mod vertex;

pub use link::{is_infinite_face, LinkTds};
pub use vertex::VertexRecord;
