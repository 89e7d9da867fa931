//! Triangulated solid: header plus facets.

use std::collections::TryReserveError;
use std::fmt;

use tracing::warn;

use crate::{Aabb, Facet, MeshBounds};

/// Size of the opaque binary STL header in bytes.
pub const HEADER_SIZE: usize = 80;

/// A triangulated solid.
///
/// This is the unit of file I/O and transformation. A model exclusively owns
/// its facets; transforms mutate it in place.
///
/// # Memory Layout
///
/// - `header`: `[u8; 80]` - Opaque header, written and read verbatim
/// - `facets`: `Vec<Facet>` - Triangles in emission order
///
/// # Example
///
/// ```
/// use mesh_types::{Facet, Model, Triplet};
///
/// let mut model = Model::new();
/// model.set_header_text("terrain relief");
/// model.facets.push(Facet::from_vertices(
///     Triplet::new(0.0, 0.0, 0.0),
///     Triplet::new(1.0, 0.0, 0.0),
///     Triplet::new(0.0, 1.0, 0.0),
/// ));
///
/// assert_eq!(model.facet_count(), 1);
/// assert_eq!(&model.header[..14], b"terrain relief");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Opaque header bytes.
    pub header: [u8; HEADER_SIZE],

    /// Facets in order.
    pub facets: Vec<Facet>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Create an empty model with a zeroed header.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            header: [0; HEADER_SIZE],
            facets: Vec::new(),
        }
    }

    /// Create a model from a header and facets.
    #[inline]
    #[must_use]
    pub const fn from_parts(header: [u8; HEADER_SIZE], facets: Vec<Facet>) -> Self {
        Self { header, facets }
    }

    /// Create an empty model with room for exactly `facet_count` facets.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the facets cannot be reserved.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Model;
    ///
    /// let model = Model::try_with_capacity(1000).unwrap();
    /// assert!(model.is_empty());
    /// assert!(model.facets.capacity() >= 1000);
    /// ```
    pub fn try_with_capacity(facet_count: usize) -> Result<Self, TryReserveError> {
        let mut facets = Vec::new();
        facets.try_reserve_exact(facet_count)?;
        Ok(Self {
            header: [0; HEADER_SIZE],
            facets,
        })
    }

    /// Number of facets.
    #[inline]
    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Check if the model has no facets.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Replace the header with `text`, zero-padded to 80 bytes.
    ///
    /// Text longer than the header is cut at 80 bytes. A header starting
    /// with `solid` marks the file as text STL to most readers, including
    /// this workspace's own loader, so that case is logged.
    pub fn set_header_text(&mut self, text: &str) {
        let bytes = text.as_bytes();
        let len = bytes.len().min(HEADER_SIZE);
        self.header = [0; HEADER_SIZE];
        self.header[..len].copy_from_slice(&bytes[..len]);

        if self.header.starts_with(b"solid") {
            warn!(header = text, "Header starts with solid");
        }
    }

    /// Render the model as human-readable text.
    ///
    /// The output lists the facet count, then each facet's normal and
    /// vertices. It is for people, not for parsing.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Model;
    ///
    /// let text = Model::new().dump().to_string();
    /// assert!(text.starts_with("facets: 0"));
    /// ```
    #[inline]
    #[must_use]
    pub const fn dump(&self) -> ModelDump<'_> {
        ModelDump { model: self }
    }
}

impl MeshBounds for Model {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.facets.iter().flat_map(|f| f.vertices.iter()))
    }
}

/// Human-readable view of a [`Model`], created by [`Model::dump`].
#[derive(Debug, Clone, Copy)]
pub struct ModelDump<'a> {
    model: &'a Model,
}

impl fmt::Display for ModelDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "facets: {}", self.model.facet_count())?;
        for (i, facet) in self.model.facets.iter().enumerate() {
            let n = &facet.normal;
            writeln!(f, "facet {}:", i + 1)?;
            writeln!(f, "   normal: {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
            for (j, v) in facet.vertices.iter().enumerate() {
                writeln!(f, "      v{}: {:.6} {:.6} {:.6}", j + 1, v.x, v.y, v.z)?;
            }
        }
        Ok(())
    }
}
