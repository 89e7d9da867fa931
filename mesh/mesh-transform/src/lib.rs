//! In-place transforms for heightmesh models.
//!
//! This crate provides:
//! - Rotation about a principal axis ([`rotate`], [`PrincipalRotation`])
//! - Per-axis percentage scaling ([`scale`])
//!
//! Both mutate a [`Model`](mesh_types::Model) in place and cannot fail.
//! Only rotations about X, Y and Z through the origin are supported.
//!
//! # Example
//!
//! ```
//! use mesh_transform::{Axis, rotate, scale};
//! use mesh_types::{Facet, Model, Triplet};
//!
//! let mut model = Model::new();
//! model.facets.push(Facet::from_vertices(
//!     Triplet::new(0.0, 0.0, 0.0),
//!     Triplet::new(1.0, 0.0, 0.0),
//!     Triplet::new(0.0, 1.0, 0.0),
//! ));
//!
//! rotate(&mut model, Axis::Z, 90.0);
//! scale(&mut model, 50.0, 50.0, 100.0);
//! ```
//!
//! # Normals
//!
//! [`scale`] does not touch normals, so a non-uniform scale leaves them
//! inconsistent with the scaled triangles. This is a known limitation kept
//! for output compatibility.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod transform;

pub use error::{TransformError, TransformResult};
pub use transform::{Axis, PrincipalRotation, rotate, scale};
