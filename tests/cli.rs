//! End-to-end checks of the `image-bridge` binary.

use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::process::Command;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_image-bridge"))
}

fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
    let img = RgbImage::from_pixel(width, height, image::Rgb([10, 200, 30]));
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, out).unwrap();
    path
}

#[test]
fn resize_writes_jpeg_of_requested_size() {
    let tmp = TempDir::new().unwrap();
    let input = write_png(&tmp, "in.png", 40, 30);
    let output = tmp.path().join("out.jpg");

    let status = bin()
        .args(["resize", "--rows", "6", "--cols", "8"])
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (8, 6));
}

#[test]
fn preview_honours_config_file() {
    let tmp = TempDir::new().unwrap();
    let input = write_png(&tmp, "in.png", 50, 50);
    let output = tmp.path().join("preview.jpg");
    let config = tmp.path().join("config.toml");
    std::fs::write(&config, "[preview]\nwidth = 20\nheight = 10\n").unwrap();

    let status = bin()
        .arg("--config")
        .arg(&config)
        .arg("preview")
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let img = image::open(&output).unwrap();
    assert_eq!((img.width(), img.height()), (20, 10));
}

#[test]
fn identify_prints_format_and_dimensions() {
    let tmp = TempDir::new().unwrap();
    let input = write_png(&tmp, "in.png", 12, 7);

    let out = bin().arg("identify").arg(&input).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Png"), "{stdout}");
    assert!(stdout.contains("12x7"), "{stdout}");
}

#[test]
fn gen_config_output_is_loadable() {
    let out = bin().arg("gen-config").output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    let parsed = image_bridge::config::parse_config(&text).unwrap();
    assert_eq!(parsed, image_bridge::BridgeConfig::default());
}

#[test]
fn resize_rejects_corrupt_input() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("bad.jpg");
    std::fs::write(&input, b"definitely not a jpeg").unwrap();

    let status = bin()
        .args(["resize", "--rows", "2", "--cols", "2"])
        .arg(&input)
        .arg(tmp.path().join("out.jpg"))
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn unknown_config_keys_are_rejected() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.toml");
    std::fs::write(&config, "[output]\nqualty = 80\n").unwrap();

    let status = bin()
        .arg("--config")
        .arg(&config)
        .arg("gen-config")
        .status()
        .unwrap();
    assert!(!status.success());
}
