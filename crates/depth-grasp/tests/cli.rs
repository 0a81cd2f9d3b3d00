use assert_cmd::Command;
use image::{GrayImage, ImageBuffer, Luma};
use predicates::prelude::*;
use serde_json::Value;
use std::f64::consts::TAU;
use std::path::Path;

fn cli() -> Command {
    Command::cargo_bin("depth-grasp").unwrap()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// 16-bit depth PNG of a near bump centered at (100, 100).
fn write_dome(path: &Path) {
    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_fn(200, 200, |x, y| {
        let r2 = (x as f64 - 100.0).powi(2) + (y as f64 - 100.0).powi(2);
        let d = 1.0 - 0.5 * (-r2 / (2.0 * 25.0 * 25.0)).exp();
        Luma([(d * 10_000.0) as u16])
    });
    img.save(path).unwrap();
}

/// Dark ellipse with 100 × 30 px semi-axes on a white 300 × 120 background.
fn write_ellipse(path: &Path) {
    let img = GrayImage::from_fn(300, 120, |x, y| {
        let u = (x as f64 - 150.0) / 100.0;
        let v = (y as f64 - 60.0) / 30.0;
        Luma([if u * u + v * v <= 1.0 { 50 } else { 255 }])
    });
    img.save(path).unwrap();
}

#[test]
fn config_subcommand_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("config.json");
    cli().args(["config", "--out"]).arg(&out).assert().success();

    let cfg = read_json(&out);
    assert_eq!(cfg["efd"]["order"], 15);
    assert_eq!(cfg["efd"]["samples"], 300);
    assert_eq!(cfg["mask"]["top_k"], 1);
    assert_eq!(cfg["image"]["threshold"], 230);
}

#[test]
fn mask_on_depth_png() {
    let dir = tempfile::tempdir().unwrap();
    let depth = dir.path().join("dome.png");
    let out = dir.path().join("report.json");
    write_dome(&depth);

    cli()
        .args(["mask", "--depth"])
        .arg(&depth)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let report = read_json(&out);
    assert_eq!(report["pipeline"], "mask");
    assert!(report["error"].is_null());
    let best = &report["mask"]["best"];
    let (x, y) = (best["x"].as_f64().unwrap(), best["y"].as_f64().unwrap());
    assert!((x - 100.0).hypot(y - 100.0) < 5.0, "best at ({x}, {y})");
    assert_eq!(report["mask"]["angles"].as_array().unwrap().len(), 37);
}

#[test]
fn mask_mode_flag_limits_the_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let depth = dir.path().join("dome.png");
    let out = dir.path().join("report.json");
    write_dome(&depth);

    cli()
        .args(["mask", "--mode", "major-component-image", "--depth"])
        .arg(&depth)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let report = read_json(&out);
    assert_eq!(report["mask"]["angles"].as_array().unwrap().len(), 1);
    assert_eq!(report["config"]["mask"]["mode"], "major_component_image");
}

#[test]
fn top_k_flag_sets_the_principal_axis_count() {
    cli()
        .args(["mask", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of principal axes kept (1 or 2)"));

    let dir = tempfile::tempdir().unwrap();
    let depth = dir.path().join("dome.png");
    let out = dir.path().join("report.json");
    write_dome(&depth);

    cli()
        .args(["mask", "--top-k", "2", "--depth"])
        .arg(&depth)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let report = read_json(&out);
    assert_eq!(report["config"]["mask"]["top_k"], 2);
    assert_eq!(report["mask"]["axes"]["directions"].as_array().unwrap().len(), 2);
}

#[test]
fn efd_on_gray_image() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("ellipse.png");
    let out = dir.path().join("report.json");
    write_ellipse(&image);

    cli()
        .args(["efd", "--image"])
        .arg(&image)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let report = read_json(&out);
    assert_eq!(report["pipeline"], "efd");
    let efd = &report["efd"];
    assert!(efd["normal_angle_deg"].as_f64().unwrap() > 120.0);
    assert!(efd["distance"].as_f64().unwrap() < 0.08);
    for p in efd["points"].as_array().unwrap() {
        let x = p[0].as_f64().unwrap();
        let y = p[1].as_f64().unwrap();
        assert!((0.0..300.0).contains(&x) && (0.0..120.0).contains(&y));
    }
}

#[test]
fn efd_on_point_cloud() {
    let dir = tempfile::tempdir().unwrap();
    let points = dir.path().join("cloud.json");
    let out = dir.path().join("report.json");
    let cloud: Vec<[f64; 3]> = (0..120)
        .map(|i| {
            let t = TAU * i as f64 / 120.0;
            [0.1 * t.cos(), 0.03 * t.sin(), 0.75]
        })
        .collect();
    std::fs::write(&points, serde_json::to_string(&cloud).unwrap()).unwrap();

    cli()
        .args(["efd", "--points"])
        .arg(&points)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let report = read_json(&out);
    for p in report["efd"]["points"].as_array().unwrap() {
        assert_eq!(p.as_array().unwrap().len(), 3);
        assert!((p[2].as_f64().unwrap() - 0.75).abs() < 1e-12);
    }
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["mask", "--depth"])
        .arg(dir.path().join("nope.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn flat_depth_reports_the_error() {
    let dir = tempfile::tempdir().unwrap();
    let depth = dir.path().join("flat.png");
    let out = dir.path().join("report.json");
    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_pixel(32, 32, Luma([500]));
    img.save(&depth).unwrap();

    cli()
        .args(["mask", "--depth"])
        .arg(&depth)
        .arg("--out")
        .arg(&out)
        .assert()
        .failure();

    let report = read_json(&out);
    assert!(report["mask"].is_null());
    assert!(report["error"].as_str().unwrap().contains("degenerate"));
}
