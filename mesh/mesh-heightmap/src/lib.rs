//! Closed solids from elevation grids.
//!
//! Every grid of at least 2x2 samples becomes a watertight model with:
//! - A top surface following the samples
//! - A flat floor closed by a triangle fan
//! - Vertical walls joining the two along the grid perimeter
//!
//! Samples can be 8-bit unsigned, 8-bit signed, `f64`, or read from a raw
//! file of bytes.
//!
//! # Example
//!
//! ```
//! use mesh_heightmap::{HeightmapParams, Origin, build_from_u8};
//!
//! let samples = [
//!     0u8, 10, 20, //
//!     30, 40, 50,
//! ];
//! let params = HeightmapParams::default()
//!     .with_origin(Origin::TopLeft)
//!     .with_base_height(2.0);
//!
//! let model = build_from_u8(&samples, 3, 2, &params).unwrap();
//! assert_eq!(model.facet_count(), 22);
//! ```
//!
//! # Coordinates
//!
//! Sample `(row, col)` lands at x = `col * units_per_pixel`,
//! y = `row * units_per_pixel`. The top is at
//! `sample * scale_pct / 100 + base_height` and the floor at
//! `min_sample * scale_pct / 100 - base_height`. The base height is added
//! on top and subtracted below, so the walls grow by twice its value.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod builder;
mod error;
mod generate;
mod grid;
mod params;

use std::path::Path;

use mesh_types::Model;
use tracing::warn;

pub use builder::ReliefBuilder;
pub use error::{HeightmapError, HeightmapResult};
pub use generate::{build_model, expected_facet_count};
pub use grid::{GridView, HeightGrid, Origin};
pub use params::{FloorStyle, HeightmapParams};

/// Build a solid from `f64` samples in row-major order.
///
/// # Errors
///
/// Returns an error on bad dimensions, a sample count other than
/// `cols * rows`, invalid `params`, or allocation failure.
pub fn build_from_f64(
    samples: &[f64],
    cols: usize,
    rows: usize,
    params: &HeightmapParams,
) -> HeightmapResult<Model> {
    let grid = HeightGrid::from_f64(samples, cols, rows).inspect_err(log_rejected)?;
    build_model(&grid, params)
}

/// Build a solid from unsigned 8-bit samples in row-major order.
///
/// # Errors
///
/// Same conditions as [`build_from_f64`].
pub fn build_from_u8(
    samples: &[u8],
    cols: usize,
    rows: usize,
    params: &HeightmapParams,
) -> HeightmapResult<Model> {
    params.validate().inspect_err(log_rejected)?;
    let grid = HeightGrid::from_u8(samples, cols, rows).inspect_err(log_rejected)?;
    build_model(&grid, params)
}

/// Build a solid from signed 8-bit samples in row-major order.
///
/// # Errors
///
/// Same conditions as [`build_from_f64`].
pub fn build_from_i8(
    samples: &[i8],
    cols: usize,
    rows: usize,
    params: &HeightmapParams,
) -> HeightmapResult<Model> {
    params.validate().inspect_err(log_rejected)?;
    let grid = HeightGrid::from_i8(samples, cols, rows).inspect_err(log_rejected)?;
    build_model(&grid, params)
}

/// Build a solid from a raw file holding one unsigned byte per sample.
///
/// # Errors
///
/// Returns an error on bad dimensions or `params`, if the file cannot be
/// read, or if it holds fewer than `cols * rows` bytes.
pub fn build_from_raw_file<P: AsRef<Path>>(
    path: P,
    cols: usize,
    rows: usize,
    params: &HeightmapParams,
) -> HeightmapResult<Model> {
    params.validate().inspect_err(log_rejected)?;
    let grid = HeightGrid::from_raw_file(path, cols, rows).inspect_err(log_rejected)?;
    build_model(&grid, params)
}

fn log_rejected(err: &HeightmapError) {
    warn!(error = %err, "Heightmap input rejected");
}
