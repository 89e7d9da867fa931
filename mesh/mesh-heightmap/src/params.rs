//! Parameters for heightmap triangulation.

use crate::error::{HeightmapError, HeightmapResult};
use crate::grid::Origin;

/// How the underside of the solid is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FloorStyle {
    /// Triangle fan from the perimeter to one centre point on the floor.
    #[default]
    Fan,
    /// Legacy floor mirroring the full top grid. No longer supported;
    /// requesting it fails with [`HeightmapError::UnsupportedFloor`].
    LegacyFullGrid,
}

/// Parameters controlling how samples become geometry.
///
/// A sample `s` at `(row, col)` is placed at
/// `(col * units_per_pixel, row * units_per_pixel, s * scale_pct / 100 + base_height)`.
/// The floor sits at `min_sample * scale_pct / 100 - base_height`, so a
/// positive `base_height` raises the top and lowers the floor by the same
/// amount.
///
/// # Example
///
/// ```
/// use mesh_heightmap::{HeightmapParams, Origin};
///
/// let params = HeightmapParams::default()
///     .with_origin(Origin::TopLeft)
///     .with_scale_pct(25.0)
///     .with_base_height(2.0);
///
/// assert_eq!(params.units_per_pixel, 1.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightmapParams {
    /// Row placement of the grid.
    pub origin: Origin,

    /// Vertical scale in percent of the sample value. Must be positive.
    pub scale_pct: f64,

    /// Offset added to the top and subtracted from the floor. Any sign.
    pub base_height: f64,

    /// Horizontal distance between adjacent samples. Must be positive.
    pub units_per_pixel: f64,

    /// Floor construction.
    pub floor: FloorStyle,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            origin: Origin::BottomLeft,
            scale_pct: 100.0,
            base_height: 0.0,
            units_per_pixel: 1.0,
            floor: FloorStyle::Fan,
        }
    }
}

impl HeightmapParams {
    /// Create parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Set the vertical scale in percent.
    #[must_use]
    pub const fn with_scale_pct(mut self, scale_pct: f64) -> Self {
        self.scale_pct = scale_pct;
        self
    }

    /// Set the base height.
    #[must_use]
    pub const fn with_base_height(mut self, base_height: f64) -> Self {
        self.base_height = base_height;
        self
    }

    /// Set the horizontal sample spacing.
    #[must_use]
    pub const fn with_units_per_pixel(mut self, units_per_pixel: f64) -> Self {
        self.units_per_pixel = units_per_pixel;
        self
    }

    /// Set the floor style.
    #[must_use]
    pub const fn with_floor(mut self, floor: FloorStyle) -> Self {
        self.floor = floor;
        self
    }

    /// Check that the parameters can produce a model.
    ///
    /// # Errors
    ///
    /// Returns an error if `scale_pct` or `units_per_pixel` is not a
    /// positive number, or if the legacy floor is requested.
    pub fn validate(&self) -> HeightmapResult<()> {
        if self.scale_pct.is_nan() || self.scale_pct <= 0.0 {
            return Err(HeightmapError::invalid_parameter("scale_pct", self.scale_pct));
        }
        if self.units_per_pixel.is_nan() || self.units_per_pixel <= 0.0 {
            return Err(HeightmapError::invalid_parameter(
                "units_per_pixel",
                self.units_per_pixel,
            ));
        }
        if self.floor == FloorStyle::LegacyFullGrid {
            return Err(HeightmapError::UnsupportedFloor);
        }
        Ok(())
    }
}
