//! Triangulation of an elevation grid into a closed solid.
//!
//! The model is emitted in three passes, always in the same order:
//!
//! 1. Top surface: two triangles per grid cell, split along the diagonal
//!    from `(r, c + 1)` to `(r + 1, c)`.
//! 2. Floor: a fan from every perimeter segment to one centre point at the
//!    floor height.
//! 3. Walls: two triangles per perimeter segment joining the top edge to the
//!    floor, first row, last row, first column, then last column.
//!
//! All triangles are wound counter-clockwise seen from outside the solid,
//! and every normal is the normalised cross product of the triangle edges.

// Grid indices and coordinates are computed in f64 and stored as f32
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use mesh_types::{Facet, Model, Triplet};
use tracing::{debug, info, warn};

use crate::error::{HeightmapError, HeightmapResult};
use crate::grid::{GridView, HeightGrid};
use crate::params::HeightmapParams;

/// Number of facets [`build_model`] emits for a `cols` by `rows` grid.
///
/// With `c = cols - 1` and `r = rows - 1` this is `2cr` top triangles,
/// `2c + 2r` floor triangles and `4c + 4r` wall triangles.
///
/// # Errors
///
/// Returns an error if the grid is smaller than 2x2 or the count does not
/// fit in `usize`.
///
/// # Example
///
/// ```
/// use mesh_heightmap::expected_facet_count;
///
/// assert_eq!(expected_facet_count(2, 2).unwrap(), 14);
/// assert_eq!(expected_facet_count(3, 4).unwrap(), 42);
/// ```
pub fn expected_facet_count(cols: usize, rows: usize) -> HeightmapResult<usize> {
    if cols < 2 || rows < 2 {
        return Err(HeightmapError::InvalidDimensions { cols, rows });
    }
    let (c, r) = (cols - 1, rows - 1);
    let top = c.checked_mul(r).and_then(|n| n.checked_mul(2));
    let rim = c.checked_add(r).and_then(|n| n.checked_mul(6));
    top.zip(rim)
        .and_then(|(top, rim)| top.checked_add(rim))
        .ok_or(HeightmapError::GridTooLarge { cols, rows })
}

/// Build a closed solid from `grid`.
///
/// The header of the returned model is all zeros. See the module
/// documentation for the emission order, and [`HeightmapParams`] for how
/// samples map to coordinates.
///
/// # Errors
///
/// Returns an error if `params` fail [`HeightmapParams::validate`], or if
/// the facet storage cannot be allocated.
///
/// # Panics
///
/// Panics if the number of emitted facets differs from
/// [`expected_facet_count`]. That would be a bug in this module, not a
/// property of the input.
///
/// # Example
///
/// ```
/// use mesh_heightmap::{HeightGrid, HeightmapParams, build_model};
///
/// let samples = [0.0, 1.0, 2.0, 3.0];
/// let grid = HeightGrid::from_f64(&samples, 2, 2).unwrap();
/// let model = build_model(&grid, &HeightmapParams::default()).unwrap();
///
/// assert_eq!(model.facet_count(), 14);
/// ```
pub fn build_model(grid: &HeightGrid<'_>, params: &HeightmapParams) -> HeightmapResult<Model> {
    triangulate(grid, params).inspect_err(|e| {
        warn!(error = %e, cols = grid.cols(), rows = grid.rows(), "Heightmap build failed");
    })
}

fn triangulate(grid: &HeightGrid<'_>, params: &HeightmapParams) -> HeightmapResult<Model> {
    params.validate()?;

    let (cols, rows) = (grid.cols(), grid.rows());
    let expected = expected_facet_count(cols, rows)?;
    let model =
        Model::try_with_capacity(expected).map_err(|source| HeightmapError::OutOfMemory {
            what: "facets",
            count: expected,
            source,
        })?;

    info!(
        cols,
        rows,
        facets = expected,
        origin = ?params.origin,
        "Building heightmap solid"
    );

    let view = grid.oriented(params.origin);
    let relief = Relief::new(view, params);
    let mut writer = FacetWriter::new(model, expected);

    relief.emit_top(&mut writer);
    debug!(facets = writer.len(), "Emitted top surface");
    relief.emit_floor(&mut writer);
    debug!(facets = writer.len(), "Emitted floor fan");
    relief.emit_walls(&mut writer);
    debug!(facets = writer.len(), "Emitted walls");

    Ok(writer.finish())
}

/// Collects facets and checks the final count.
struct FacetWriter {
    model: Model,
    expected: usize,
}

impl FacetWriter {
    const fn new(model: Model, expected: usize) -> Self {
        Self { model, expected }
    }

    fn len(&self) -> usize {
        self.model.facets.len()
    }

    fn push(&mut self, v0: Triplet, v1: Triplet, v2: Triplet) {
        debug_assert!(self.len() < self.expected);
        self.model.facets.push(Facet::from_vertices(v0, v1, v2));
    }

    fn finish(self) -> Model {
        assert_eq!(
            self.model.facets.len(),
            self.expected,
            "emitted facet count disagrees with expected_facet_count"
        );
        self.model
    }
}

/// Maps oriented grid positions to model coordinates.
struct Relief<'g> {
    view: GridView<'g>,
    scale: f64,
    base_height: f64,
    units_per_pixel: f64,
    floor_z: f64,
}

impl<'g> Relief<'g> {
    fn new(view: GridView<'g>, params: &HeightmapParams) -> Self {
        let scale = params.scale_pct / 100.0;
        let floor_z = view.min_sample() * scale - params.base_height;
        Self {
            view,
            scale,
            base_height: params.base_height,
            units_per_pixel: params.units_per_pixel,
            floor_z,
        }
    }

    fn last_col(&self) -> usize {
        self.view.cols() - 1
    }

    fn last_row(&self) -> usize {
        self.view.rows() - 1
    }

    fn point(&self, x: usize, y: usize, z: f64) -> Triplet {
        Triplet::new(
            (x as f64 * self.units_per_pixel) as f32,
            (y as f64 * self.units_per_pixel) as f32,
            z as f32,
        )
    }

    /// Surface point above grid position `(row, col)`.
    fn top(&self, row: usize, col: usize) -> Triplet {
        let z = self.view.sample(row, col) * self.scale + self.base_height;
        self.point(col, row, z)
    }

    /// Floor point below grid position `(row, col)`.
    fn floor(&self, row: usize, col: usize) -> Triplet {
        self.point(col, row, self.floor_z)
    }

    fn floor_centre(&self) -> Triplet {
        self.point(self.last_col() / 2, self.last_row() / 2, self.floor_z)
    }

    fn emit_top(&self, w: &mut FacetWriter) {
        for r in 0..self.last_row() {
            for c in 0..self.last_col() {
                w.push(self.top(r, c), self.top(r, c + 1), self.top(r + 1, c));
                w.push(self.top(r, c + 1), self.top(r + 1, c + 1), self.top(r + 1, c));
            }
        }
    }

    fn emit_floor(&self, w: &mut FacetWriter) {
        let centre = self.floor_centre();
        let (last_row, last_col) = (self.last_row(), self.last_col());

        for r in 0..last_row {
            w.push(self.floor(r, 0), self.floor(r + 1, 0), centre);
            w.push(self.floor(r + 1, last_col), self.floor(r, last_col), centre);
        }
        for c in 0..last_col {
            w.push(self.floor(0, c + 1), self.floor(0, c), centre);
            w.push(self.floor(last_row, c), self.floor(last_row, c + 1), centre);
        }
    }

    fn emit_walls(&self, w: &mut FacetWriter) {
        let (last_row, last_col) = (self.last_row(), self.last_col());

        // First row, facing -y
        for c in 0..last_col {
            let (t0, t1) = (self.top(0, c), self.top(0, c + 1));
            let (b0, b1) = (self.floor(0, c), self.floor(0, c + 1));
            w.push(t0, b0, t1);
            w.push(t1, b0, b1);
        }
        // Last row, facing +y
        for c in 0..last_col {
            let (t0, t1) = (self.top(last_row, c), self.top(last_row, c + 1));
            let (b0, b1) = (self.floor(last_row, c), self.floor(last_row, c + 1));
            w.push(t0, t1, b0);
            w.push(t1, b1, b0);
        }
        // First column, facing -x
        for r in 0..last_row {
            let (t0, t1) = (self.top(r, 0), self.top(r + 1, 0));
            let (b0, b1) = (self.floor(r, 0), self.floor(r + 1, 0));
            w.push(t0, t1, b0);
            w.push(t1, b1, b0);
        }
        // Last column, facing +x
        for r in 0..last_row {
            let (t0, t1) = (self.top(r, last_col), self.top(r + 1, last_col));
            let (b0, b1) = (self.floor(r, last_col), self.floor(r + 1, last_col));
            w.push(t0, b0, t1);
            w.push(t1, b0, b1);
        }
    }
}
