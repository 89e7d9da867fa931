//! Heightmaps to printable STL solids.
//!
//! This umbrella crate re-exports the heightmesh crates under one roof:
//! build a closed solid from a grid of elevations, rotate or scale it, and
//! read or write it as binary STL.
//!
//! # Quick Start
//!
//! ```no_run
//! use heightmesh::prelude::*;
//!
//! // A relief from a raw 8-bit image
//! let grid = HeightGrid::from_raw_file("terrain.raw", 256, 256).unwrap();
//! let mut model = ReliefBuilder::new(&grid)
//!     .origin(Origin::TopLeft)
//!     .scale_pct(20.0)
//!     .base_height(3.0)
//!     .units_per_pixel(0.5)
//!     .build()
//!     .unwrap();
//!
//! // Stand it up and shrink it
//! rotate(&mut model, Axis::X, 90.0);
//! scale(&mut model, 50.0, 50.0, 50.0);
//!
//! // Never overwrites an existing file
//! save_stl(&model, "terrain.stl").unwrap();
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `Model`, `Facet`, `Triplet`, `Aabb` and the shared `ErrorKind`
//! - [`io`] - Binary STL encode, decode, load and save
//! - [`transform`] - Principal-axis rotation and per-axis scaling
//! - [`heightmap`] - Grids, parameters and the triangulation itself
//!
//! # Feature Flags
//!
//! - `serde` - Serialize and deserialize `Facet` and `Aabb`

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `Model`, `Facet`, `Triplet`, `Aabb`.
pub use mesh_types as types;

/// Binary STL encoding, decoding and file I/O.
pub use mesh_io as io;

/// Rotation about principal axes and percentage scaling.
pub use mesh_transform as transform;

/// Elevation grids and their triangulation into closed solids.
pub use mesh_heightmap as heightmap;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for building and saving heightmap solids.
///
/// # Usage
///
/// ```
/// use heightmesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, ErrorKind, Facet, MeshBounds, Model, Triplet};

    // I/O
    pub use mesh_io::{decode_stl, encode_stl, load_stl, save_stl};

    // Transform
    pub use mesh_transform::{Axis, rotate, scale};

    // Heightmap (main use case)
    pub use mesh_heightmap::{
        FloorStyle, HeightGrid, HeightmapParams, Origin, ReliefBuilder, build_model,
    };
}

// =============================================================================
// Tests
// =============================================================================
