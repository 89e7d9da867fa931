//! Core solid types for heightmesh.
//!
//! This crate provides the data model shared by the builder, the codec and
//! the transform crates:
//!
//! - [`Triplet`] - Three single-precision components, used for positions and normals
//! - [`Facet`] - One triangle: normal, three ordered vertices, attribute word
//! - [`Model`] - An 80-byte opaque header plus an ordered list of facets
//! - [`Aabb`] - Axis-aligned bounding box over facet vertices
//! - [`ErrorKind`] - The failure taxonomy every crate error maps onto
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f32`, matching the
//! on-disk precision of binary STL.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: grid columns
//! - Y: grid rows (row 0 at minimum Y)
//! - Z: elevation
//!
//! Facet winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Facet, Model, Triplet};
//!
//! let mut model = Model::new();
//! model.facets.push(Facet::from_vertices(
//!     Triplet::new(0.0, 0.0, 0.0),
//!     Triplet::new(1.0, 0.0, 0.0),
//!     Triplet::new(0.0, 1.0, 0.0),
//! ));
//!
//! assert_eq!(model.facet_count(), 1);
//! assert!((model.facets[0].normal.z - 1.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod facet;
mod kind;
mod model;
mod traits;

pub use bounds::Aabb;
pub use facet::{Facet, triangle_normal};
pub use kind::ErrorKind;
pub use model::{HEADER_SIZE, Model, ModelDump};
pub use traits::MeshBounds;

/// A three-component single-precision vector.
///
/// Used for both vertex positions and facet normals.
pub type Triplet = nalgebra::Vector3<f32>;

// Re-export nalgebra for callers that need more than the alias
pub use nalgebra;
