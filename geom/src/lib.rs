#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Geometric primitives for the Delaunay triangulation engine.
//!
//! This crate implements the leaf-level maths the rest of the workspace is
//! built on:
//!
//! - [`Point`], a pair of `f64` coordinates with an optional external id,
//! - [`Circle`] and [`circumcircle`], for the Delaunay empty-circle test,
//! - [`BoundingBox`], used by the BRIO kD-tree to split point sets,
//! - [`orient2d`], [`incircle`] and [`in_between`], the robust predicates
//!   every higher-level module treats as an exact black box.

mod bbox;
mod circle;
mod point;
mod predicates;

pub use bbox::BoundingBox;
pub use circle::{circumcircle, Circle};
pub use point::Point;
pub use predicates::{in_between, incircle, orient2d, Sign};

/// Re-exported for callers that want to build their own bounding-box math on
/// top of the same `euclid` types this crate uses internally.
pub use euclid;
