//! Binary STL (Stereolithography) codec.
//!
//! Only the binary variant is supported. Data whose first bytes are the
//! ASCII text `solid` is taken to be text STL and rejected.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (opaque, kept verbatim)
//! UINT32       – Number of triangles (little-endian)
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute word
//! end
//! ```
//!
//! All multi-byte fields are little-endian. A file holding `N` facets is
//! exactly `84 + 50 * N` bytes long.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use mesh_types::{Facet, HEADER_SIZE, Model, Triplet};
use tracing::{debug, info, warn};

use crate::error::{IoError, IoResult};

/// Size of the facet count field in bytes.
pub const COUNT_SIZE: usize = 4;

/// Size of one facet record (normal + 3 vertices + attribute).
pub const FACET_SIZE: usize = 50;

/// Leading bytes that identify text STL.
pub const ASCII_PREFIX: &[u8] = b"solid";

/// Offset of the first facet record.
const FACETS_OFFSET: usize = HEADER_SIZE + COUNT_SIZE;

/// Size in bytes of a binary STL file holding `facet_count` facets.
///
/// Saturates at `usize::MAX` instead of overflowing.
///
/// # Example
///
/// ```
/// use mesh_io::stl_file_size;
///
/// assert_eq!(stl_file_size(0), 84);
/// assert_eq!(stl_file_size(2), 184);
/// ```
#[must_use]
pub const fn stl_file_size(facet_count: usize) -> usize {
    facet_count
        .saturating_mul(FACET_SIZE)
        .saturating_add(FACETS_OFFSET)
}

/// Decode a model from binary STL bytes.
///
/// The header is kept verbatim and every facet's normal and attribute word
/// are stored as read. Bytes after the last facet are ignored.
///
/// # Errors
///
/// Returns an error if:
/// - The data starts with `solid` ([`IoError::AsciiStl`])
/// - The data ends inside the header, the count, or any facet record
///   ([`IoError::Truncated`]); no partial model is returned
/// - The facets cannot be allocated ([`IoError::OutOfMemory`])
///
/// # Example
///
/// ```
/// use mesh_io::{decode_stl, encode_stl};
/// use mesh_types::Model;
///
/// let bytes = encode_stl(&Model::new()).unwrap();
/// let model = decode_stl(&bytes).unwrap();
/// assert!(model.is_empty());
/// ```
pub fn decode_stl(bytes: &[u8]) -> IoResult<Model> {
    decode(bytes).inspect_err(|e| warn!(error = %e, "Failed to decode binary STL"))
}

/// Decode a model from a reader holding binary STL.
///
/// The reader is consumed to its end before decoding.
///
/// # Errors
///
/// Returns [`IoError::Io`] if reading fails, otherwise the errors of
/// [`decode_stl`].
pub fn read_stl<R: Read>(mut reader: R) -> IoResult<Model> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .inspect_err(|e| warn!(error = %e, "Failed to read binary STL"))?;
    decode_stl(&bytes)
}

/// Load a model from a binary STL file.
///
/// # Arguments
///
/// * `path` - Path to the STL file
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if there is no file at `path`,
/// [`IoError::Io`] if it cannot be read, otherwise the errors of
/// [`decode_stl`].
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let model = load_stl("relief.stl").unwrap();
/// println!("Loaded {} facets", model.facet_count());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Model> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IoError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IoError::Io(e)
            }
        })
        .inspect_err(|e| warn!(path = %path.display(), error = %e, "Failed to open STL file"))?;

    let model = decode_stl(&bytes)?;
    info!(
        path = %path.display(),
        facets = model.facet_count(),
        "Loaded binary STL"
    );
    Ok(model)
}

/// Encode a model as binary STL bytes.
///
/// # Errors
///
/// Returns [`IoError::TooManyFacets`] if the model has more than
/// `u32::MAX` facets, or [`IoError::OutOfMemory`] if the output buffer
/// cannot be allocated.
///
/// # Example
///
/// ```
/// use mesh_io::encode_stl;
/// use mesh_types::{Facet, Model, Triplet};
///
/// let mut model = Model::new();
/// model.facets.push(Facet::from_vertices(
///     Triplet::new(0.0, 0.0, 0.0),
///     Triplet::new(1.0, 0.0, 0.0),
///     Triplet::new(0.0, 1.0, 0.0),
/// ));
///
/// let bytes = encode_stl(&model).unwrap();
/// assert_eq!(bytes.len(), 84 + 50);
/// assert_eq!(&bytes[80..84], &1u32.to_le_bytes());
/// ```
pub fn encode_stl(model: &Model) -> IoResult<Vec<u8>> {
    encode(model).inspect_err(|e| warn!(error = %e, "Failed to encode binary STL"))
}

fn encode(model: &Model) -> IoResult<Vec<u8>> {
    let size = stl_file_size(model.facet_count());
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(size)
        .map_err(|source| IoError::OutOfMemory {
            facets: model.facet_count(),
            source,
        })?;
    write_model(model, &mut bytes)?;
    Ok(bytes)
}

/// Write a model as binary STL to `writer`.
///
/// Writes the header verbatim, the facet count, then every facet record.
/// Nothing is written if the facet count does not fit the count field.
///
/// # Errors
///
/// Returns [`IoError::TooManyFacets`] for oversized models and
/// [`IoError::Io`] for any failed or short write.
pub fn write_stl<W: Write>(model: &Model, writer: W) -> IoResult<()> {
    write_model(model, writer).inspect_err(|e| warn!(error = %e, "Failed to write binary STL"))
}

fn write_model<W: Write>(model: &Model, mut writer: W) -> IoResult<()> {
    let count = facet_count_field(model)?;

    writer.write_all(&model.header)?;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; FACET_SIZE];
    for facet in &model.facets {
        encode_facet(facet, &mut record);
        writer.write_all(&record)?;
    }

    Ok(())
}

/// Save a model to a new binary STL file.
///
/// The file must not exist yet. Its existence is probed by opening it for
/// reading; the file is then created exclusively, so a file that appears in
/// between is also reported as a conflict.
///
/// The write is not atomic: if it fails partway, the partially written file
/// is left at `path`.
///
/// # Arguments
///
/// * `model` - The model to save
/// * `path` - Output file path
///
/// # Errors
///
/// Returns [`IoError::AlreadyExists`] if `path` is occupied,
/// [`IoError::TooManyFacets`] for oversized models (checked before the file
/// is created), and [`IoError::Io`] if the file cannot be created or fully
/// written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_stl, save_stl};
///
/// let model = load_stl("input.stl").unwrap();
/// save_stl(&model, "copy.stl").unwrap();
///
/// // A second save to the same path is refused
/// assert!(save_stl(&model, "copy.stl").is_err());
/// ```
pub fn save_stl<P: AsRef<Path>>(model: &Model, path: P) -> IoResult<()> {
    let path = path.as_ref();
    save(model, path)
        .inspect_err(|e| warn!(path = %path.display(), error = %e, "Failed to save binary STL"))?;

    info!(
        path = %path.display(),
        facets = model.facet_count(),
        "Saved binary STL"
    );
    Ok(())
}

fn save(model: &Model, path: &Path) -> IoResult<()> {
    facet_count_field(model)?;

    if File::open(path).is_ok() {
        return Err(IoError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                IoError::AlreadyExists {
                    path: path.to_path_buf(),
                }
            } else {
                IoError::Io(e)
            }
        })?;

    let mut writer = BufWriter::new(file);
    write_model(model, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn facet_count_field(model: &Model) -> IoResult<u32> {
    u32::try_from(model.facet_count()).map_err(|_| IoError::TooManyFacets {
        count: model.facet_count(),
    })
}

fn decode(bytes: &[u8]) -> IoResult<Model> {
    if bytes.starts_with(ASCII_PREFIX) {
        return Err(IoError::AsciiStl);
    }

    let header: [u8; HEADER_SIZE] = bytes
        .get(..HEADER_SIZE)
        .and_then(|h| h.try_into().ok())
        .ok_or_else(|| IoError::truncated("header", 0, HEADER_SIZE, bytes.len()))?;

    let count: [u8; COUNT_SIZE] = bytes
        .get(HEADER_SIZE..FACETS_OFFSET)
        .and_then(|c| c.try_into().ok())
        .ok_or_else(|| {
            IoError::truncated(
                "facet count",
                HEADER_SIZE,
                COUNT_SIZE,
                bytes.len().saturating_sub(HEADER_SIZE),
            )
        })?;
    let count = u32::from_le_bytes(count);

    // Check the payload length before allocating anything for it
    let payload = &bytes[FACETS_OFFSET..];
    let complete = payload.len() / FACET_SIZE;
    let facet_count = usize::try_from(count).unwrap_or(usize::MAX);
    if facet_count > complete {
        return Err(IoError::truncated(
            "facet record",
            FACETS_OFFSET + complete * FACET_SIZE,
            FACET_SIZE,
            payload.len() % FACET_SIZE,
        ));
    }

    let mut model = Model::try_with_capacity(facet_count).map_err(|source| {
        IoError::OutOfMemory {
            facets: facet_count,
            source,
        }
    })?;
    model.header = header;

    let (records, trailing) = payload.split_at(facet_count * FACET_SIZE);
    model
        .facets
        .extend(records.chunks_exact(FACET_SIZE).map(decode_facet));

    if !trailing.is_empty() {
        debug!(
            trailing = trailing.len(),
            "Ignoring bytes after the last facet"
        );
    }
    debug!(facets = facet_count, "Decoded binary STL");

    Ok(model)
}

/// Decode one 50-byte facet record.
fn decode_facet(record: &[u8]) -> Facet {
    Facet::new(
        read_triplet(&record[0..12]),
        [
            read_triplet(&record[12..24]),
            read_triplet(&record[24..36]),
            read_triplet(&record[36..48]),
        ],
        u16::from_le_bytes([record[48], record[49]]),
    )
}

/// Read a triplet from 12 bytes (3 f32s).
fn read_triplet(buf: &[u8]) -> Triplet {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Triplet::new(x, y, z)
}

/// Encode one facet into a 50-byte record.
fn encode_facet(facet: &Facet, record: &mut [u8; FACET_SIZE]) {
    let triplets = std::iter::once(&facet.normal).chain(facet.vertices.iter());
    for (buf, triplet) in record[..48].chunks_exact_mut(12).zip(triplets) {
        write_triplet(buf, triplet);
    }
    record[48..].copy_from_slice(&facet.attr.to_le_bytes());
}

/// Write a triplet as 3 f32s in little-endian.
fn write_triplet(buf: &mut [u8], triplet: &Triplet) {
    buf[0..4].copy_from_slice(&triplet.x.to_le_bytes());
    buf[4..8].copy_from_slice(&triplet.y.to_le_bytes());
    buf[8..12].copy_from_slice(&triplet.z.to_le_bytes());
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_heightmap::{HeightmapParams, Origin, build_from_u8};

    fn sample_model() -> Model {
        let mut model = Model::new();
        model.set_header_text("sample header");
        model.facets.push(Facet::from_vertices(
            Triplet::new(0.0, 0.0, 0.0),
            Triplet::new(1.0, 0.0, 0.0),
            Triplet::new(0.0, 1.0, 0.0),
        ));
        // Stored normal deliberately disagrees with the vertices
        model.facets.push(Facet::new(
            Triplet::new(0.25, -0.5, 8.0),
            [
                Triplet::new(-1.5, 2.25, 3.0),
                Triplet::new(1e-7, -4.0e6, 0.0),
                Triplet::new(f32::MAX, f32::MIN_POSITIVE, -0.0),
            ],
            0xA55A,
        ));
        model
    }

    #[test]
    fn roundtrip_bytes() {
        let original = sample_model();
        let bytes = encode_stl(&original).unwrap();
        assert_eq!(bytes.len(), stl_file_size(2));

        let loaded = decode_stl(&bytes).unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.facets[1].attr, 0xA55A);
        assert_eq!(loaded.facets[1].normal, Triplet::new(0.25, -0.5, 8.0));

        // Re-encoding reproduces the same bytes
        assert_eq!(encode_stl(&loaded).unwrap(), bytes);
    }

    #[test]
    fn roundtrip_empty_model() {
        let bytes = encode_stl(&Model::new()).unwrap();
        assert_eq!(bytes.len(), 84);
        let loaded = decode_stl(&bytes).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.header, [0; HEADER_SIZE]);
    }

    #[test]
    fn byte_layout() {
        let mut model = Model::new();
        model.facets.push(Facet::new(
            Triplet::new(1.0, 2.0, 3.0),
            [
                Triplet::new(4.0, 5.0, 6.0),
                Triplet::new(7.0, 8.0, 9.0),
                Triplet::new(10.0, 11.0, 12.0),
            ],
            0x0102,
        ));
        let bytes = encode_stl(&model).unwrap();

        assert_eq!(&bytes[80..84], &[1, 0, 0, 0]);
        for (i, expected) in (1..=12u8).enumerate() {
            let at = FACETS_OFFSET + i * 4;
            let value = f32::from_le_bytes(bytes[at..at + 4].try_into().unwrap());
            assert_eq!(value, f32::from(expected));
        }
        assert_eq!(&bytes[132..134], &[0x02, 0x01]);
    }

    #[test]
    fn nan_payload_is_preserved() {
        let mut model = Model::new();
        let nan = f32::from_bits(0x7FC0_1234);
        model.facets.push(Facet::new(
            Triplet::new(nan, f32::INFINITY, f32::NEG_INFINITY),
            [Triplet::zeros(); 3],
            0,
        ));
        let bytes = encode_stl(&model).unwrap();
        let loaded = decode_stl(&bytes).unwrap();
        assert_eq!(loaded.facets[0].normal.x.to_bits(), 0x7FC0_1234);
        assert_eq!(encode_stl(&loaded).unwrap(), bytes);
    }

    #[test]
    fn ascii_header_rejected() {
        let mut bytes = encode_stl(&sample_model()).unwrap();
        bytes[..5].copy_from_slice(b"solid");
        assert!(matches!(decode_stl(&bytes), Err(IoError::AsciiStl)));

        let text = b"solid cube\n  facet normal 0 0 1\nendsolid cube\n";
        assert!(matches!(decode_stl(text), Err(IoError::AsciiStl)));
    }

    #[test]
    fn solid_elsewhere_in_header_is_fine() {
        let mut model = sample_model();
        model.set_header_text(" solid but indented");
        let bytes = encode_stl(&model).unwrap();
        assert!(decode_stl(&bytes).is_ok());
    }

    #[test]
    fn truncated_header() {
        let err = decode_stl(&[0u8; 40]).unwrap_err();
        assert!(matches!(
            err,
            IoError::Truncated {
                field: "header",
                available: 40,
                ..
            }
        ));
    }

    #[test]
    fn truncated_count() {
        let err = decode_stl(&[0u8; 82]).unwrap_err();
        assert!(matches!(
            err,
            IoError::Truncated {
                field: "facet count",
                offset: 80,
                available: 2,
                ..
            }
        ));
    }

    #[test]
    fn truncated_mid_facet() {
        let bytes = encode_stl(&sample_model()).unwrap();
        let cut = &bytes[..bytes.len() - 7];
        let err = decode_stl(cut).unwrap_err();
        assert!(matches!(
            err,
            IoError::Truncated {
                field: "facet record",
                offset: 134,
                needed: 50,
                available: 43,
            }
        ));
    }

    #[test]
    fn huge_count_fails_before_allocating() {
        let mut bytes = vec![0u8; FACETS_OFFSET + FACET_SIZE];
        bytes[80..84].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = decode_stl(&bytes).unwrap_err();
        assert!(matches!(err, IoError::Truncated { offset: 134, .. }));
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut bytes = encode_stl(&sample_model()).unwrap();
        bytes.extend_from_slice(&[0xFF; 13]);
        let loaded = decode_stl(&bytes).unwrap();
        assert_eq!(loaded, sample_model());
    }

    #[test]
    fn read_from_reader() {
        let bytes = encode_stl(&sample_model()).unwrap();
        let loaded = read_stl(&bytes[..]).unwrap();
        assert_eq!(loaded.facet_count(), 2);
    }

    /// A writer that accepts a fixed number of bytes and then stalls.
    struct ShortWriter {
        remaining: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn relief_normals_survive_round_trip() {
        let samples = [9, 3, 7, 1, 0, 4, 8, 2, 6, 5, 3, 1];
        let params = HeightmapParams::default()
            .with_origin(Origin::TopLeft)
            .with_scale_pct(37.5)
            .with_base_height(-2.25)
            .with_units_per_pixel(0.3);
        let model = build_from_u8(&samples, 4, 3, &params).unwrap();

        let loaded = decode_stl(&encode_stl(&model).unwrap()).unwrap();
        assert_eq!(loaded, model);
        for facet in loaded.facets.iter().filter(|f| f.area() > 0.0) {
            assert_relative_eq!(facet.normal.norm(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(facet.normal, facet.computed_normal(), epsilon = 1e-5);
        }
    }

    #[test]
    fn encode_stops_on_short_write() {
        let err = write_stl(&sample_model(), ShortWriter { remaining: 84 }).unwrap_err();
        assert_eq!(err.kind(), mesh_types::ErrorKind::Io);
    }

    #[test]
    fn short_write_is_io_error() {
        let err = write_stl(&sample_model(), ShortWriter { remaining: 100 }).unwrap_err();
        match err {
            IoError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::WriteZero),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.stl");
        let original = sample_model();

        save_stl(&original, &path).unwrap();
        let size = std::fs::metadata(&path).unwrap().len();
        assert_eq!(size, stl_file_size(2) as u64);

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn save_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.stl");

        save_stl(&sample_model(), &path).unwrap();
        let err = save_stl(&Model::new(), &path).unwrap_err();
        assert!(matches!(err, IoError::AlreadyExists { .. }));

        // The first file is untouched
        assert_eq!(load_stl(&path).unwrap(), sample_model());
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("model.stl");
        let err = save_stl(&sample_model(), &path).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn load_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent_model.stl");
        let err = load_stl(&path).unwrap_err();
        match err {
            IoError::FileNotFound { path } => {
                assert!(path.to_string_lossy().contains("nonexistent_model"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
