//! Facet type and normal derivation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Triplet;

/// Compute the unit normal of the triangle `a, b, c`.
///
/// The normal is `normalize((b - a) × (c - a))`, so it follows the
/// right-hand rule with the vertex order. Degenerate (zero-area) triangles
/// yield the zero vector.
///
/// # Example
///
/// ```
/// use mesh_types::{Triplet, triangle_normal};
///
/// let n = triangle_normal(
///     &Triplet::new(0.0, 0.0, 0.0),
///     &Triplet::new(1.0, 0.0, 0.0),
///     &Triplet::new(0.0, 1.0, 0.0),
/// );
/// assert_eq!(n, Triplet::new(0.0, 0.0, 1.0));
///
/// // Collinear points
/// let degen = triangle_normal(
///     &Triplet::new(0.0, 0.0, 0.0),
///     &Triplet::new(1.0, 0.0, 0.0),
///     &Triplet::new(2.0, 0.0, 0.0),
/// );
/// assert_eq!(degen, Triplet::zeros());
/// ```
#[must_use]
pub fn triangle_normal(a: &Triplet, b: &Triplet, c: &Triplet) -> Triplet {
    let e1 = b - a;
    let e2 = c - a;
    e1.cross(&e2)
        .try_normalize(0.0)
        .unwrap_or_else(Triplet::zeros)
}

/// One triangle of a solid.
///
/// Stores the normal as given. The codec never re-derives it, so a facet
/// loaded from a file keeps whatever normal was stored even when it
/// disagrees with the vertices. Only [`Facet::from_vertices`] computes one.
///
/// `attr` is the 16-bit attribute word of the binary format. It is opaque
/// and carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// Outward normal.
    pub normal: Triplet,
    /// Vertices in winding order.
    pub vertices: [Triplet; 3],
    /// Attribute word.
    pub attr: u16,
}

impl Facet {
    /// Create a facet from stored parts, without touching the normal.
    #[inline]
    #[must_use]
    pub const fn new(normal: Triplet, vertices: [Triplet; 3], attr: u16) -> Self {
        Self {
            normal,
            vertices,
            attr,
        }
    }

    /// Create a facet whose normal is derived from the vertex order.
    ///
    /// The attribute word is zero.
    #[must_use]
    pub fn from_vertices(v0: Triplet, v1: Triplet, v2: Triplet) -> Self {
        Self {
            normal: triangle_normal(&v0, &v1, &v2),
            vertices: [v0, v1, v2],
            attr: 0,
        }
    }

    /// Recompute the normal from the current vertices.
    ///
    /// Does not modify the facet; compare with [`Facet::normal`] to detect
    /// stale normals (for example after a non-uniform scale).
    #[inline]
    #[must_use]
    pub fn computed_normal(&self) -> Triplet {
        let [a, b, c] = &self.vertices;
        triangle_normal(a, b, c)
    }

    /// Area of the triangle.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Facet, Triplet};
    ///
    /// // Right triangle with legs 3 and 4
    /// let f = Facet::from_vertices(
    ///     Triplet::new(0.0, 0.0, 0.0),
    ///     Triplet::new(3.0, 0.0, 0.0),
    ///     Triplet::new(0.0, 4.0, 0.0),
    /// );
    /// assert!((f.area() - 6.0).abs() < 1e-6);
    /// ```
    #[inline]
    #[must_use]
    pub fn area(&self) -> f32 {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a)).norm() * 0.5
    }

    /// Check if the triangle has (near) zero area.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f32) -> bool {
        self.area() <= epsilon
    }
}
