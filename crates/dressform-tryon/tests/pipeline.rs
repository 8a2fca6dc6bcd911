//! End-to-end pipeline tests: real files, real catalog, real PNGs.

use std::fs;
use std::path::Path;

use dressform_render::png_io::{read_rgba, write_rgba, PngConfig};
use dressform_render::{Color, PixelBuffer};
use dressform_spec::catalog::JsonCatalog;
use dressform_spec::{BodyShape, FitAdjustments, Measurements, TryOnError, TryOnReport};
use dressform_tryon::{FittingRoom, GarmentSource, RuleClassifier, StorageConfig};

/// A dress-like PNG: colored torso block on a white backdrop, wide at
/// the top and bottom so type detection reads it as full-body.
fn write_garment_png(path: &Path) {
    let mut pixels = PixelBuffer::new(120, 180, Color::white());
    for y in 5..175 {
        for x in 20..100 {
            pixels.set(x, y, Color::rgb(0.7, 0.15, 0.3));
        }
    }
    write_rgba(&pixels, path, &PngConfig::default()).unwrap();
}

fn setup_room(root: &Path) -> FittingRoom {
    let storage = StorageConfig::under(root);
    fs::create_dir_all(&storage.results_dir).unwrap();
    fs::create_dir_all(&storage.temp_dir).unwrap();
    fs::create_dir_all(&storage.templates_dir).unwrap();

    write_garment_png(&storage.templates_dir.join("dress1.png"));

    let catalog = JsonCatalog::from_json(
        r#"[
            {
                "id": "dress001",
                "name": "Summer Dress",
                "type": "full",
                "style": "casual",
                "image": "dress1.png",
                "measurements": { "bust": 92.0, "waist": 74.0, "hips": 98.0 }
            }
        ]"#,
    )
    .unwrap();

    FittingRoom::new(Box::new(RuleClassifier), Box::new(catalog), storage)
}

fn hourglass() -> Measurements {
    Measurements {
        bust: Some(92.0),
        waist: Some(65.0),
        hips: Some(94.0),
        ..Default::default()
    }
}

#[test]
fn test_try_on_writes_image_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let room = setup_room(dir.path());

    let outcome = room
        .try_on(&hourglass(), &GarmentSource::CatalogId("dress001".into()))
        .unwrap();

    assert!(outcome.image_path.exists());
    assert!(outcome.report.ok);
    assert_eq!(outcome.report.body_shape, Some(BodyShape::Hourglass));
    assert_eq!(outcome.report.outputs.len(), 1);

    // The recorded hash matches the bytes on disk.
    let bytes = fs::read(&outcome.image_path).unwrap();
    assert_eq!(
        outcome.report.outputs[0].hash,
        blake3::hash(&bytes).to_hex().to_string()
    );

    // The report sits next to the image and parses back.
    let stem = outcome.image_path.file_stem().unwrap().to_str().unwrap();
    let report_path = room
        .storage()
        .results_dir
        .join(TryOnReport::filename(stem));
    let parsed = TryOnReport::from_json(&fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(parsed, outcome.report);
}

#[test]
fn test_try_on_result_contains_garment_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let room = setup_room(dir.path());

    let outcome = room
        .try_on(&hourglass(), &GarmentSource::CatalogId("dress001".into()))
        .unwrap();

    let decoded = read_rgba(&outcome.image_path).unwrap();
    let mut garment_pixels = 0;
    for y in 0..decoded.pixels.height as i64 {
        for x in 0..decoded.pixels.width as i64 {
            let c = decoded.pixels.get(x, y);
            if c.r > 0.5 && c.g < 0.4 && c.b < 0.5 {
                garment_pixels += 1;
            }
        }
    }
    assert!(garment_pixels > 1000, "garment color should dominate the torso");
}

#[test]
fn test_try_on_by_path_bypasses_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let room = setup_room(dir.path());
    let direct = dir.path().join("standalone.png");
    write_garment_png(&direct);

    let outcome = room
        .try_on(&hourglass(), &GarmentSource::Path(direct.clone()))
        .unwrap();
    assert_eq!(outcome.report.garment, Some(direct.display().to_string()));
}

#[test]
fn test_try_on_over_uses_the_supplied_base_image() {
    let dir = tempfile::tempdir().unwrap();
    let room = setup_room(dir.path());

    // A gray "photo" base; its corners must survive the composite.
    let base_color = Color::rgb(0.5, 0.6, 0.5);
    let base_path = dir.path().join("photo.png");
    write_rgba(
        &PixelBuffer::new(300, 400, base_color),
        &base_path,
        &PngConfig::default(),
    )
    .unwrap();

    let outcome = room
        .try_on_over(
            &base_path,
            &hourglass(),
            &GarmentSource::CatalogId("dress001".into()),
        )
        .unwrap();

    let decoded = read_rgba(&outcome.image_path).unwrap();
    assert_eq!(decoded.pixels.width, 300);
    assert_eq!(decoded.pixels.height, 400);

    // Uncovered pixels keep the photo; the garment landed in the middle.
    let corner = decoded.pixels.get(0, 0);
    assert!((corner.g - 0.6).abs() < 0.01);
    let center = decoded.pixels.get(150, 200);
    assert!(center.r > 0.5 && center.g < 0.4, "garment color at center");
}

#[test]
fn test_missing_garment_image_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let room = setup_room(dir.path());

    let err = room
        .try_on(
            &hourglass(),
            &GarmentSource::Path(dir.path().join("absent.png")),
        )
        .unwrap_err();
    assert!(matches!(err, TryOnError::NotFound(_)));
}

#[test]
fn test_adjust_zero_is_pixel_identical() {
    let dir = tempfile::tempdir().unwrap();
    let room = setup_room(dir.path());

    let tried = room
        .try_on(&hourglass(), &GarmentSource::CatalogId("dress001".into()))
        .unwrap();
    let adjusted = room
        .adjust(&tried.image_path, &FitAdjustments::default())
        .unwrap();

    let before = read_rgba(&tried.image_path).unwrap().pixels;
    let after = read_rgba(&adjusted.image_path).unwrap().pixels;
    assert_eq!(before, after);
}

#[test]
fn test_adjust_length_changes_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let room = setup_room(dir.path());

    let tried = room
        .try_on(&hourglass(), &GarmentSource::CatalogId("dress001".into()))
        .unwrap();
    let adjusted = room
        .adjust(
            &tried.image_path,
            &FitAdjustments {
                length: 10.0,
                ..Default::default()
            },
        )
        .unwrap();

    let before = read_rgba(&tried.image_path).unwrap().pixels;
    let after = read_rgba(&adjusted.image_path).unwrap().pixels;
    assert_eq!(after.width, before.width);
    assert!(after.height > before.height);
    assert_eq!(adjusted.report.adjustments.unwrap().length, 10.0);
}

#[test]
fn test_recommend_returns_the_catalog_match() {
    let dir = tempfile::tempdir().unwrap();
    let room = setup_room(dir.path());

    let recs = room.recommend(&hourglass(), Some("casual"), 5).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].id, "dress001");
    assert!(recs[0].score > 0.7);

    let none = room.recommend(&hourglass(), Some("formal"), 5).unwrap();
    assert!(none.is_empty());
}
