//! Build script for detecting system dependencies and providing installation guidance.
//!
//! Video decoding needs OpenCV built with an FFmpeg backend. Missing pieces are
//! reported as warnings; the `opencv` crate's own build fails hard if the
//! library cannot be linked.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");

    if !check_pkg_config() {
        return;
    }

    check_opencv();
    check_ffmpeg();
}

fn pkg_config(args: &[&str]) -> Option<String> {
    let output = Command::new("pkg-config").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn check_pkg_config() -> bool {
    if pkg_config(&["--version"]).is_some() {
        return true;
    }

    println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
    println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
    println!("cargo:warning=On macOS: brew install pkg-config");
    false
}

fn check_opencv() {
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    match pkg_config(&["--modversion", "opencv4"]).or_else(|| pkg_config(&["--modversion", "opencv"])) {
        Some(version) => println!("cargo:warning=Found OpenCV version: {version}"),
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config. Make sure OpenCV is installed.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev");
            println!("cargo:warning=On macOS: brew install opencv");
        }
    }
}

fn check_ffmpeg() {
    if pkg_config(&["--exists", "libavformat"]).is_none() {
        println!("cargo:warning=FFmpeg libraries not found. OpenCV may be unable to decode uploaded videos.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install libavformat-dev libavcodec-dev");
    }
}
