//! API Regression Tests for the heightmesh crates
//!
//! These tests exercise the public API end to end through the umbrella
//! crate, in three tiers:
//!
//! - Tier 1: Foundation (types, facet counts, grid construction)
//! - Tier 2: Core Operations (build, save, load, transform)
//! - Tier 3: Failure Modes (text STL, truncation, conflicts, bad input)
//!
//! If any of these tests fail after API changes, it indicates a breaking
//! change that needs a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]

use approx::assert_relative_eq;
use heightmesh::{heightmap, io, prelude::*};

/// Formula from first principles, kept separate from the library's own.
fn facet_formula(cols: usize, rows: usize) -> usize {
    let (c, r) = (cols - 1, rows - 1);
    2 * c * r + 2 * c + 2 * r + 4 * c + 4 * r
}

fn ramp(cols: usize, rows: usize) -> Vec<f64> {
    (0..cols * rows)
        .map(|i| ((i * 37) % 11) as f64 * 0.75)
        .collect()
}

// =============================================================================
// TIER 1: Foundation
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn facet_count_matches_formula() {
        for cols in 2..7 {
            for rows in 2..7 {
                let samples = ramp(cols, rows);
                let model = heightmap::build_from_f64(
                    &samples,
                    cols,
                    rows,
                    &HeightmapParams::default(),
                )
                .unwrap();
                assert_eq!(model.facet_count(), facet_formula(cols, rows));
                assert_eq!(
                    heightmap::expected_facet_count(cols, rows).unwrap(),
                    facet_formula(cols, rows)
                );
            }
        }
    }

    #[test]
    fn model_bounds_follow_grid() {
        let samples = ramp(6, 4);
        let grid = HeightGrid::from_f64(&samples, 6, 4).unwrap();
        let model = ReliefBuilder::new(&grid)
            .units_per_pixel(2.0)
            .base_height(1.0)
            .build()
            .unwrap();

        let bounds = model.bounds();
        assert_relative_eq!(bounds.min.x, 0.0);
        assert_relative_eq!(bounds.min.y, 0.0);
        assert_relative_eq!(bounds.max.x, 10.0);
        assert_relative_eq!(bounds.max.y, 6.0);
        // Floor at min - base_height
        assert_relative_eq!(bounds.min.z, -1.0);
    }

    #[test]
    fn dump_lists_every_facet() {
        let grid = HeightGrid::from_u8(&[1, 2, 3, 4], 2, 2).unwrap();
        let model = build_model(&grid, &HeightmapParams::default()).unwrap();
        let text = model.dump().to_string();

        assert!(text.starts_with("facets: 14"));
        assert!(text.contains("facet 13:"));
    }
}

// =============================================================================
// TIER 2: Core Operations
// =============================================================================

mod tier2_core {
    use super::*;

    #[test]
    fn flat_grid_has_zero_thickness() {
        let h = 7.5;
        let model =
            heightmap::build_from_f64(&[h; 4], 2, 2, &HeightmapParams::default()).unwrap();

        let top = &model.facets[..2];
        for facet in top {
            assert!(facet.vertices.iter().all(|v| v.z == 7.5));
            assert_eq!(facet.normal, Triplet::new(0.0, 0.0, 1.0));
        }
        let bounds = model.bounds();
        assert_eq!(bounds.min, Triplet::new(0.0, 0.0, 7.5));
        assert_eq!(bounds.max, Triplet::new(1.0, 1.0, 7.5));

        let floor = &model.facets[2..6];
        for facet in floor {
            assert!(facet.vertices.iter().all(|v| v.z == 7.5));
        }
    }

    #[test]
    fn save_then_load_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relief.stl");

        let samples = ramp(5, 5);
        let grid = HeightGrid::from_f64(&samples, 5, 5).unwrap();
        let mut model = ReliefBuilder::new(&grid)
            .origin(Origin::TopLeft)
            .scale_pct(35.0)
            .header("heightmesh relief")
            .build()
            .unwrap();
        model.facets[3].attr = 0xBEEF;

        save_stl(&model, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), io::stl_file_size(model.facet_count()));

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded, model);
        assert_eq!(loaded.facets[3].attr, 0xBEEF);
    }

    #[test]
    fn empty_model_round_trips() {
        let model = Model::new();
        let bytes = encode_stl(&model).unwrap();
        assert_eq!(bytes.len(), 84);
        assert_eq!(decode_stl(&bytes).unwrap(), model);
    }

    #[test]
    fn identity_rotation() {
        let samples = ramp(4, 3);
        let original = heightmap::build_from_f64(&samples, 4, 3, &HeightmapParams::default())
            .unwrap();
        let mut model = original.clone();
        rotate(&mut model, Axis::Z, 0.0);

        for (a, b) in model.facets.iter().zip(&original.facets) {
            assert_relative_eq!(a.normal, b.normal, epsilon = 1e-6);
            for (va, vb) in a.vertices.iter().zip(&b.vertices) {
                assert_relative_eq!(*va, *vb, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn quarter_turn_about_z() {
        let mut model = Model::new();
        model.facets.push(Facet::new(
            Triplet::new(1.0, 0.0, 0.0),
            [
                Triplet::new(1.0, 0.0, 0.0),
                Triplet::new(1.0, 1.0, 0.0),
                Triplet::new(1.0, 0.0, 1.0),
            ],
            0,
        ));
        rotate(&mut model, Axis::Z, 90.0);

        let facet = &model.facets[0];
        assert_relative_eq!(facet.vertices[0], Triplet::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(facet.normal, Triplet::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn scale_x_only_keeps_normals() {
        let samples = ramp(4, 4);
        let original = heightmap::build_from_f64(&samples, 4, 4, &HeightmapParams::default())
            .unwrap();
        let mut model = original.clone();
        scale(&mut model, 200.0, 100.0, 100.0);

        for (a, b) in model.facets.iter().zip(&original.facets) {
            assert_eq!(a.normal, b.normal);
            for (va, vb) in a.vertices.iter().zip(&b.vertices) {
                assert_eq!(va.x, vb.x * 2.0);
                assert_eq!(va.y, vb.y);
                assert_eq!(va.z, vb.z);
            }
        }
    }

    #[test]
    fn transformed_model_survives_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turned.stl");

        let mut model =
            heightmap::build_from_u8(&[5, 9, 2, 7, 1, 8], 3, 2, &HeightmapParams::default())
                .unwrap();
        rotate(&mut model, Axis::X, 90.0);
        scale(&mut model, 50.0, 50.0, 50.0);

        save_stl(&model, &path).unwrap();
        assert_eq!(load_stl(&path).unwrap(), model);
    }
}

// =============================================================================
// TIER 3: Failure Modes
// =============================================================================

mod tier3_failures {
    use super::*;
    use std::io::Write;

    #[test]
    fn second_save_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("once.stl");
        let model = heightmap::build_from_u8(&[0; 9], 3, 3, &HeightmapParams::default()).unwrap();

        save_stl(&model, &path).unwrap();
        let before = std::fs::read(&path).unwrap();

        let err = save_stl(&model, &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn text_stl_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"solid cube\n  facet normal 0 0 1\n").unwrap();

        let err = load_stl(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn solid_header_written_then_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solid.stl");
        let grid = HeightGrid::from_u8(&[1, 2, 3, 4], 2, 2).unwrap();
        let model = ReliefBuilder::new(&grid).header("solid relief").build().unwrap();

        save_stl(&model, &path).unwrap();
        let err = load_stl(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn truncated_mid_facet() {
        let model =
            heightmap::build_from_u8(&[3, 1, 4, 1, 5, 9], 3, 2, &HeightmapParams::default())
                .unwrap();
        let bytes = encode_stl(&model).unwrap();

        for cut in [10, 83, 84 + 25, bytes.len() - 1] {
            let err = decode_stl(&bytes[..cut]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TruncatedInput, "cut at {cut}");
        }
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_stl(dir.path().join("absent.stl")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn bad_build_input() {
        let params = HeightmapParams::default();
        for err in [
            heightmap::build_from_u8(&[1, 2], 2, 1, &params).unwrap_err(),
            heightmap::build_from_u8(&[1, 2, 3], 2, 2, &params).unwrap_err(),
            heightmap::build_from_u8(&[1, 2, 3, 4], 2, 2, &params.with_scale_pct(-5.0))
                .unwrap_err(),
            heightmap::build_from_u8(&[1, 2, 3, 4], 2, 2, &params.with_units_per_pixel(0.0))
                .unwrap_err(),
            heightmap::build_from_u8(
                &[1, 2, 3, 4],
                2,
                2,
                &params.with_floor(FloorStyle::LegacyFullGrid),
            )
            .unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn unknown_names_rejected() {
        assert_eq!(
            "w".parse::<Axis>().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            "middle".parse::<Origin>().unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
