//! Axis-aligned bounding box.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Triplet;

/// An axis-aligned bounding box (AABB).
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Triplet};
///
/// let aabb = Aabb::new(Triplet::new(0.0, 0.0, 0.0), Triplet::new(10.0, 4.0, 2.0));
///
/// assert_eq!(aabb.size(), Triplet::new(10.0, 4.0, 2.0));
/// assert_eq!(aabb.center(), Triplet::new(5.0, 2.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Triplet,
    /// Maximum corner (largest x, y, z values).
    pub max: Triplet,
}

impl Aabb {
    /// Create a new AABB from two corners.
    ///
    /// The corners are reordered per axis so that `min <= max`.
    #[must_use]
    pub fn new(a: Triplet, b: Triplet) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create an empty (inverted) AABB.
    ///
    /// An empty AABB has min > max, which is the starting point for
    /// expanding to include points.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Triplet};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Triplet::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Triplet::repeat(f32::INFINITY),
            max: Triplet::repeat(f32::NEG_INFINITY),
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Triplet>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Grow the box so it contains `point`.
    #[inline]
    pub fn expand_to_include(&mut self, point: &Triplet) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Check if the AABB is empty (min > max on any axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extent along each axis.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Triplet {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Triplet {
        (self.min + self.max) * 0.5
    }
}
