//! Fluent builder API for heightmap solids.
//!
//! # Example
//!
//! ```
//! use mesh_heightmap::{HeightGrid, Origin, ReliefBuilder};
//!
//! let samples = [0u8, 40, 80, 120, 160, 200];
//! let grid = HeightGrid::from_u8(&samples, 3, 2).unwrap();
//!
//! let model = ReliefBuilder::new(&grid)
//!     .origin(Origin::TopLeft)
//!     .scale_pct(10.0)
//!     .base_height(1.5)
//!     .header("relief")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(model.facet_count(), 22);
//! ```

use mesh_types::Model;

use crate::error::HeightmapResult;
use crate::generate::build_model;
use crate::grid::{HeightGrid, Origin};
use crate::params::{FloorStyle, HeightmapParams};

/// Fluent builder for turning a [`HeightGrid`] into a [`Model`].
///
/// Starts from [`HeightmapParams::default`]. Each setter overrides one
/// parameter; [`build`](Self::build) validates them and triangulates.
#[derive(Debug, Clone)]
pub struct ReliefBuilder<'g> {
    grid: &'g HeightGrid<'g>,
    params: HeightmapParams,
    header: Option<String>,
}

impl<'g> ReliefBuilder<'g> {
    /// Create a builder for `grid` with default parameters.
    #[must_use]
    pub fn new(grid: &'g HeightGrid<'g>) -> Self {
        Self {
            grid,
            params: HeightmapParams::default(),
            header: None,
        }
    }

    /// Replace all parameters at once.
    #[must_use]
    pub fn params(mut self, params: HeightmapParams) -> Self {
        self.params = params;
        self
    }

    /// Set the grid origin.
    #[must_use]
    pub fn origin(mut self, origin: Origin) -> Self {
        self.params.origin = origin;
        self
    }

    /// Set the vertical scale in percent.
    #[must_use]
    pub fn scale_pct(mut self, scale_pct: f64) -> Self {
        self.params.scale_pct = scale_pct;
        self
    }

    /// Set the base height.
    #[must_use]
    pub fn base_height(mut self, base_height: f64) -> Self {
        self.params.base_height = base_height;
        self
    }

    /// Set the horizontal sample spacing.
    #[must_use]
    pub fn units_per_pixel(mut self, units_per_pixel: f64) -> Self {
        self.params.units_per_pixel = units_per_pixel;
        self
    }

    /// Set the floor style.
    #[must_use]
    pub fn floor(mut self, floor: FloorStyle) -> Self {
        self.params.floor = floor;
        self
    }

    /// Write `text` into the model header.
    ///
    /// See [`Model::set_header_text`] for padding and truncation.
    #[must_use]
    pub fn header(mut self, text: impl Into<String>) -> Self {
        self.header = Some(text.into());
        self
    }

    /// Build the model.
    ///
    /// # Errors
    ///
    /// Same conditions as [`build_model`].
    pub fn build(self) -> HeightmapResult<Model> {
        let mut model = build_model(self.grid, &self.params)?;
        if let Some(text) = &self.header {
            model.set_header_text(text);
        }
        Ok(model)
    }
}
