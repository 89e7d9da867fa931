//! In-place rotation and scaling of models.

// Transforms compute in f64 and store back into f32 triplets
#![allow(clippy::cast_possible_truncation)]

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use mesh_types::{Model, Triplet};
use tracing::debug;

use crate::error::{TransformError, TransformResult};

/// A principal coordinate axis.
///
/// # Example
///
/// ```
/// use mesh_transform::Axis;
///
/// let axis: Axis = "Z".parse().unwrap();
/// assert_eq!(axis, Axis::Z);
/// assert!("w".parse::<Axis>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl FromStr for Axis {
    type Err = TransformError;

    fn from_str(s: &str) -> TransformResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(TransformError::UnknownAxis(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

/// A rotation about one principal axis through the origin.
///
/// The cosine and sine are computed once; each [`apply`](Self::apply)
/// rotates the two components orthogonal to the axis using the standard 2D
/// rotation formula, in `f64`, and stores the result back as `f32`.
///
/// # Example
///
/// ```
/// use mesh_transform::{Axis, PrincipalRotation};
/// use mesh_types::Triplet;
///
/// let rotation = PrincipalRotation::new(Axis::Z, 90.0);
/// let mut p = Triplet::new(1.0, 0.0, 0.0);
/// rotation.apply(&mut p);
///
/// assert!(p.x.abs() < 1e-6);
/// assert!((p.y - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalRotation {
    axis: Axis,
    cos: f64,
    sin: f64,
}

impl PrincipalRotation {
    /// Create a rotation of `degrees` about `axis`.
    ///
    /// Positive angles are counter-clockwise when looking down the axis
    /// toward the origin.
    #[must_use]
    pub fn new(axis: Axis, degrees: f64) -> Self {
        let radians = degrees * PI / 180.0;
        Self {
            axis,
            cos: radians.cos(),
            sin: radians.sin(),
        }
    }

    /// The rotation axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Rotate `t` in place.
    pub fn apply(&self, t: &mut Triplet) {
        let (c, s) = (self.cos, self.sin);
        let x = f64::from(t.x);
        let y = f64::from(t.y);
        let z = f64::from(t.z);

        match self.axis {
            Axis::X => {
                t.y = (y * c - z * s) as f32;
                t.z = (y * s + z * c) as f32;
            }
            Axis::Y => {
                t.x = (x * c + z * s) as f32;
                t.z = (-x * s + z * c) as f32;
            }
            Axis::Z => {
                t.x = (x * c - y * s) as f32;
                t.y = (x * s + y * c) as f32;
            }
        }
    }
}

/// Rotate every vertex and every normal of `model` about a principal axis.
///
/// # Arguments
///
/// * `model` - The model to rotate in place
/// * `axis` - Rotation axis through the origin
/// * `degrees` - Rotation angle in degrees
///
/// # Example
///
/// ```
/// use mesh_transform::{Axis, rotate};
/// use mesh_types::{Facet, Model, Triplet};
///
/// let mut model = Model::new();
/// model.facets.push(Facet::from_vertices(
///     Triplet::new(0.0, 0.0, 0.0),
///     Triplet::new(1.0, 0.0, 0.0),
///     Triplet::new(0.0, 1.0, 0.0),
/// ));
///
/// rotate(&mut model, Axis::X, 90.0);
///
/// // The +Z normal now points along -Y
/// assert!((model.facets[0].normal.y + 1.0).abs() < 1e-6);
/// ```
pub fn rotate(model: &mut Model, axis: Axis, degrees: f64) {
    let rotation = PrincipalRotation::new(axis, degrees);
    for facet in &mut model.facets {
        rotation.apply(&mut facet.normal);
        for vertex in &mut facet.vertices {
            rotation.apply(vertex);
        }
    }

    debug!(
        %axis,
        degrees,
        facets = model.facet_count(),
        "Rotated model"
    );
}

/// Scale every vertex of `model` by per-axis percentages.
///
/// Each vertex component is multiplied by `pct / 100`. Normals are left
/// exactly as they were: after a non-uniform scale they no longer match the
/// geometry, and callers that need consistent normals must recompute them
/// (see [`Facet::computed_normal`](mesh_types::Facet::computed_normal)).
///
/// # Arguments
///
/// * `model` - The model to scale in place
/// * `pct_x`, `pct_y`, `pct_z` - Scale per axis, in percent (100 = unchanged)
///
/// # Example
///
/// ```
/// use mesh_transform::scale;
/// use mesh_types::{Facet, Model, Triplet};
///
/// let mut model = Model::new();
/// model.facets.push(Facet::from_vertices(
///     Triplet::new(1.0, 1.0, 1.0),
///     Triplet::new(2.0, 1.0, 1.0),
///     Triplet::new(1.0, 2.0, 1.0),
/// ));
///
/// scale(&mut model, 200.0, 100.0, 50.0);
/// assert_eq!(model.facets[0].vertices[1], Triplet::new(4.0, 1.0, 0.5));
/// ```
pub fn scale(model: &mut Model, pct_x: f64, pct_y: f64, pct_z: f64) {
    let sx = pct_x / 100.0;
    let sy = pct_y / 100.0;
    let sz = pct_z / 100.0;

    for facet in &mut model.facets {
        for vertex in &mut facet.vertices {
            vertex.x = (f64::from(vertex.x) * sx) as f32;
            vertex.y = (f64::from(vertex.y) * sy) as f32;
            vertex.z = (f64::from(vertex.z) * sz) as f32;
        }
    }

    debug!(
        pct_x,
        pct_y,
        pct_z,
        facets = model.facet_count(),
        "Scaled model"
    );
}
