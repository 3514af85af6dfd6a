// Host-side tests for the camera-path controller and frame pacing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod rig {
    include!("../src/core/rig.rs");
}

use rig::*;

#[test]
fn camera_distance_bands_with_boundaries() {
    // Each boundary belongs to the nearer band.
    assert_eq!(target_camera_distance(0.0), CAMERA_FAR);
    assert_eq!(target_camera_distance(0.32), CAMERA_FAR);
    assert_eq!(target_camera_distance(0.33), CAMERA_MID);
    assert_eq!(target_camera_distance(0.5), CAMERA_MID);
    assert_eq!(target_camera_distance(0.65), CAMERA_MID);
    assert_eq!(target_camera_distance(0.66), CAMERA_NEAR);
    assert_eq!(target_camera_distance(1.0), CAMERA_NEAR);
}

#[test]
fn camera_height_is_monotonically_non_increasing() {
    let mut prev = f32::MAX;
    for i in 0..=100 {
        let progress = i as f32 / 100.0;
        let h = target_camera_height(progress);
        assert!(h <= prev, "height increased at progress {}", progress);
        prev = h;
    }
    assert_eq!(target_camera_height(0.0), HEIGHT_START);
    assert_eq!(target_camera_height(1.0), HEIGHT_START - HEIGHT_DROP);
}

#[test]
fn scroll_progress_clamps_and_guards_zero_extent() {
    assert_eq!(scroll_progress(100.0, 0.0), 0.0);
    assert_eq!(scroll_progress(100.0, -5.0), 0.0);
    assert_eq!(scroll_progress(0.0, 1000.0), 0.0);
    assert_eq!(scroll_progress(500.0, 1000.0), 0.5);
    assert_eq!(scroll_progress(2000.0, 1000.0), 1.0);
    // Overscroll bounce can report negative positions
    assert_eq!(scroll_progress(-50.0, 1000.0), 0.0);
}

#[test]
fn lerp_moves_toward_target_without_overshoot() {
    let stepped = lerp(0.0, 10.0, 0.25);
    assert!(stepped > 0.0 && stepped < 10.0);
    assert_eq!(lerp(5.0, 5.0, 0.25), 5.0);
    assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
}

#[test]
fn rig_smooths_input_instead_of_snapping() {
    let mut rig = CameraRig::new(0.05, 0.0);
    rig.set_scroll_target(1000.0);
    let pose = rig.step(0.0, 1000.0);
    // One tick moves a fraction of the way, never the full distance
    assert!(pose.progress > 0.0 && pose.progress < 0.1);
}

#[test]
fn rig_converges_to_near_band_at_full_scroll() {
    let mut rig = CameraRig::new(0.05, 0.0);
    rig.set_scroll_target(1000.0);
    let mut pose = rig.step(0.0, 1000.0);
    for _ in 0..2_000 {
        pose = rig.step(0.0, 1000.0);
    }
    assert!((pose.progress - 1.0).abs() < 1e-3);
    assert!((pose.eye_distance - CAMERA_NEAR).abs() < 1e-2);
    assert!((pose.eye_height - (HEIGHT_START - HEIGHT_DROP)).abs() < 1e-2);
}

#[test]
fn scroll_adds_half_turn_of_galaxy_yaw() {
    let mut at_top = CameraRig::new(0.05, 0.0);
    let mut at_bottom = CameraRig::new(0.05, 1000.0);
    let yaw_top = at_top.step(10.0, 1000.0).galaxy_yaw;
    let yaw_bottom = at_bottom.step(10.0, 1000.0).galaxy_yaw;
    assert!((yaw_bottom - yaw_top - SCROLL_SPIN_RANGE).abs() < 1e-4);
}

#[test]
fn star_field_rotates_slower_than_galaxy() {
    assert!(STAR_SPIN_RATE < GALAXY_SPIN_RATE);
    let mut rig = CameraRig::new(0.05, 0.0);
    let pose = rig.step(100.0, 1000.0);
    assert!((pose.star_yaw - 100.0 * STAR_SPIN_RATE).abs() < 1e-4);
}

#[test]
fn pointer_tilt_is_bounded_by_gain() {
    let mut rig = CameraRig::new(0.05, 0.0);
    rig.set_pointer_target(0.5, -0.5);
    let mut pose = rig.step(0.0, 1000.0);
    for _ in 0..2_000 {
        pose = rig.step(0.0, 1000.0);
    }
    assert!((pose.tilt_z - 0.5 * TILT_GAIN).abs() < 1e-3);
    assert!((pose.tilt_x + 0.5 * TILT_GAIN).abs() < 1e-3);
}

#[test]
fn pacer_enforces_frame_interval() {
    let mut pacer = FramePacer::new(1_000.0 / 60.0);
    assert!(pacer.admit(0.0));
    assert!(!pacer.admit(10.0));
    assert!(!pacer.admit(16.0));
    assert!(pacer.admit(17.0));
    assert!(!pacer.admit(20.0));
}

#[test]
fn hidden_tab_admits_no_frames() {
    let mut pacer = FramePacer::new(1_000.0 / 60.0);
    for t in 0..10 {
        assert!(!admit_frame(true, &mut pacer, t as f64 * 100.0));
    }
    // Becoming visible again resumes immediately; the pacer was not advanced
    // while hidden.
    assert!(admit_frame(false, &mut pacer, 1_000.0));
}

#[test]
fn initial_scroll_seeds_smoothed_state() {
    // Mounting mid-page must not start the camera at the top of its path.
    let mut rig = CameraRig::new(0.05, 500.0);
    let pose = rig.step(0.0, 1000.0);
    assert!((pose.progress - 0.5).abs() < 1e-3);
}
