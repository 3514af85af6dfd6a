// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod rig {
    include!("../src/core/rig.rs");
}

use constants::*;
use rig::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn dom_constants_are_sane() {
    assert!(!CANVAS_ID.is_empty());
    assert!(RESIZE_DEBOUNCE_MS > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn projection_constants_are_sane() {
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
    assert!(CAMERA_Z_NEAR > 0.0);
    assert!(CAMERA_Z_FAR > CAMERA_Z_NEAR);
    // The whole camera path stays inside the clip range
    assert!(CAMERA_FAR < CAMERA_Z_FAR);
    assert!(CAMERA_NEAR > CAMERA_Z_NEAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn star_constants_are_sane() {
    assert!(STAR_POINT_SIZE > 0.0);
    assert!(STAR_OPACITY > 0.0 && STAR_OPACITY <= 1.0);
    for ch in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&ch));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_path_has_logical_relationships() {
    // Bands step the camera closer as the page progresses
    assert!(CAMERA_FAR > CAMERA_MID && CAMERA_MID > CAMERA_NEAR);
    assert!(BAND_LOW > 0.0 && BAND_LOW < BAND_HIGH && BAND_HIGH < 1.0);
    // Height never drops below the look-at origin by more than its start
    assert!(HEIGHT_DROP <= HEIGHT_START * 2.0);
    // Camera smoothing is slower than input smoothing on every tier
    assert!(CAMERA_BLEND < 0.05);
    assert!(CAMERA_BLEND > 0.0);
}
