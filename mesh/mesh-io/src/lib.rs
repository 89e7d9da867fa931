//! Binary STL I/O for heightmesh models.
//!
//! This crate encodes and decodes [`Model`](mesh_types::Model) values in the
//! binary STL layout, bit for bit:
//!
//! - [`decode_stl`] / [`encode_stl`] - In-memory bytes
//! - [`read_stl`] / [`write_stl`] - Any `Read` / `Write`
//! - [`load_stl`] / [`save_stl`] - Files; saving never overwrites
//!
//! Text STL (files starting with `solid`) is detected and rejected.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_stl, save_stl};
//!
//! // Load a model
//! let model = load_stl("relief.stl").unwrap();
//!
//! // Save it under a new name
//! save_stl(&model, "relief-copy.stl").unwrap();
//! ```
//!
//! # Errors
//!
//! Every failure is an [`IoError`]; [`IoError::kind`] maps it onto the
//! shared [`ErrorKind`](mesh_types::ErrorKind) taxonomy. Failures are also
//! reported as `tracing` warnings.

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{
    ASCII_PREFIX, COUNT_SIZE, FACET_SIZE, decode_stl, encode_stl, load_stl, read_stl, save_stl,
    stl_file_size, write_stl,
};
