//! Elevation grids and their oriented views.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{HeightmapError, HeightmapResult};

/// Where grid row 0 lies in the output model.
///
/// With [`BottomLeft`](Self::BottomLeft) the first row of samples is placed
/// at y = 0. With [`TopLeft`](Self::TopLeft) rows are read in reverse, so
/// the first row of samples ends up at the largest y, the way image rows
/// are usually stored.
///
/// # Example
///
/// ```
/// use mesh_heightmap::Origin;
///
/// assert_eq!("tl".parse::<Origin>().unwrap(), Origin::TopLeft);
/// assert_eq!(Origin::default(), Origin::BottomLeft);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// Row 0 at y = 0.
    #[default]
    BottomLeft,
    /// Row 0 at the far edge; rows are flipped.
    TopLeft,
}

impl FromStr for Origin {
    type Err = HeightmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bottom-left" | "bottomleft" | "bl" => Ok(Self::BottomLeft),
            "top-left" | "topleft" | "tl" => Ok(Self::TopLeft),
            _ => Err(HeightmapError::UnknownOrigin(s.to_string())),
        }
    }
}

/// A rectangular grid of elevation samples in row-major order.
///
/// Sample `(row, col)` is stored at index `row * cols + col`. Construction
/// checks that the grid is at least 2x2 and that exactly `cols * rows`
/// samples were supplied, so every in-range index is valid afterwards.
///
/// Borrowed `f64` samples are used as-is; narrower inputs are widened into
/// an owned buffer.
///
/// # Example
///
/// ```
/// use mesh_heightmap::HeightGrid;
///
/// let samples = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// let grid = HeightGrid::from_f64(&samples, 3, 2).unwrap();
///
/// assert_eq!(grid.get(1, 0), Some(3.0));
/// assert_eq!(grid.row(0), Some(&samples[..3]));
/// assert_eq!(grid.get(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid<'a> {
    samples: Cow<'a, [f64]>,
    cols: usize,
    rows: usize,
}

impl<'a> HeightGrid<'a> {
    /// Wrap borrowed `f64` samples.
    ///
    /// # Errors
    ///
    /// Returns an error if `cols` or `rows` is below 2, or if `samples` does
    /// not hold exactly `cols * rows` values.
    pub fn from_f64(samples: &'a [f64], cols: usize, rows: usize) -> HeightmapResult<Self> {
        check_len(cols, rows, samples.len())?;
        Ok(Self {
            samples: Cow::Borrowed(samples),
            cols,
            rows,
        })
    }

    /// Wrap an owned sample buffer.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_f64`](Self::from_f64).
    pub fn from_vec(samples: Vec<f64>, cols: usize, rows: usize) -> HeightmapResult<Self> {
        check_len(cols, rows, samples.len())?;
        Ok(Self {
            samples: Cow::Owned(samples),
            cols,
            rows,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// All samples in row-major order.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample at `(row, col)`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.samples[row * self.cols + col])
    }

    /// One row of samples, or `None` if out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.samples.get(start..start + self.cols)
    }

    /// View the grid with rows arranged for `origin`.
    #[must_use]
    pub fn oriented(&self, origin: Origin) -> GridView<'_> {
        GridView {
            samples: &self.samples,
            cols: self.cols,
            rows: self.rows,
            flip: origin == Origin::TopLeft,
        }
    }
}

impl HeightGrid<'static> {
    /// Widen unsigned 8-bit samples into an owned grid.
    ///
    /// # Errors
    ///
    /// Returns an error on bad dimensions or sample count, or if the widened
    /// buffer cannot be allocated.
    pub fn from_u8(samples: &[u8], cols: usize, rows: usize) -> HeightmapResult<Self> {
        check_len(cols, rows, samples.len())?;
        Self::from_vec(widen(samples)?, cols, rows)
    }

    /// Widen signed 8-bit samples into an owned grid.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_u8`](Self::from_u8).
    pub fn from_i8(samples: &[i8], cols: usize, rows: usize) -> HeightmapResult<Self> {
        check_len(cols, rows, samples.len())?;
        Self::from_vec(widen(samples)?, cols, rows)
    }

    /// Load a raw file of unsigned 8-bit samples, one byte per sample.
    ///
    /// Exactly `cols * rows` bytes are read. Any bytes after that are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error on bad dimensions, if the file cannot be opened or
    /// read, or if it holds fewer than `cols * rows` bytes.
    pub fn from_raw_file<P: AsRef<Path>>(path: P, cols: usize, rows: usize) -> HeightmapResult<Self> {
        let path = path.as_ref();
        let expected = sample_count(cols, rows)?;

        let file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                HeightmapError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                HeightmapError::Io(e)
            }
        })?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(expected)
            .map_err(|source| HeightmapError::OutOfMemory {
                what: "bytes",
                count: expected,
                source,
            })?;
        let limit = u64::try_from(expected).unwrap_or(u64::MAX);
        file.take(limit).read_to_end(&mut bytes)?;

        if bytes.len() < expected {
            return Err(HeightmapError::ShortRead {
                path: path.to_path_buf(),
                expected,
                actual: bytes.len(),
            });
        }

        debug!(path = ?path, cols, rows, "Read raw heightmap");
        Self::from_u8(&bytes, cols, rows)
    }
}

/// A read-only view of a [`HeightGrid`] with rows arranged for an [`Origin`].
///
/// View row 0 is the row placed at y = 0 in the output.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'g> {
    samples: &'g [f64],
    cols: usize,
    rows: usize,
    flip: bool,
}

impl GridView<'_> {
    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Sample at view position `(row, col)`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.sample(row, col))
    }

    /// Smallest sample, scanning the view in row-major order.
    ///
    /// A NaN sample never replaces the running minimum, but a NaN at view
    /// position `(0, 0)` is returned as-is.
    #[must_use]
    pub fn min_sample(&self) -> f64 {
        let mut min = self.sample(0, 0);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let s = self.sample(row, col);
                if s < min {
                    min = s;
                }
            }
        }
        min
    }

    /// Unchecked lookup for positions known to be in range.
    pub(crate) fn sample(&self, row: usize, col: usize) -> f64 {
        let physical = if self.flip {
            self.rows - 1 - row
        } else {
            row
        };
        self.samples[physical * self.cols + col]
    }
}

/// Number of samples in a `cols` by `rows` grid.
pub(crate) fn sample_count(cols: usize, rows: usize) -> HeightmapResult<usize> {
    if cols < 2 || rows < 2 {
        return Err(HeightmapError::InvalidDimensions { cols, rows });
    }
    cols.checked_mul(rows)
        .ok_or(HeightmapError::GridTooLarge { cols, rows })
}

fn check_len(cols: usize, rows: usize, actual: usize) -> HeightmapResult<()> {
    let expected = sample_count(cols, rows)?;
    if actual != expected {
        return Err(HeightmapError::SampleCount {
            cols,
            rows,
            expected,
            actual,
        });
    }
    Ok(())
}

fn widen<T: Copy>(samples: &[T]) -> HeightmapResult<Vec<f64>>
where
    f64: From<T>,
{
    let mut out = Vec::new();
    out.try_reserve_exact(samples.len())
        .map_err(|source| HeightmapError::OutOfMemory {
            what: "samples",
            count: samples.len(),
            source,
        })?;
    out.extend(samples.iter().map(|&s| f64::from(s)));
    Ok(out)
}
