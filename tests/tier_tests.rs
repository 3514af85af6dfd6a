// Host-side tests for device-tier classification and its scaling tables.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tier {
    include!("../src/core/tier.rs");
}

use tier::*;

#[test]
fn classification_width_boundary() {
    let t = TierThresholds::default();
    // Width wins over core count
    assert_eq!(DeviceTier::classify(767.9, 16, &t), DeviceTier::Mobile);
    assert_eq!(DeviceTier::classify(320.0, 2, &t), DeviceTier::Mobile);
    // At the threshold the device is no longer mobile
    assert_eq!(DeviceTier::classify(768.0, 16, &t), DeviceTier::Desktop);
}

#[test]
fn classification_core_boundary() {
    let t = TierThresholds::default();
    assert_eq!(DeviceTier::classify(1920.0, 4, &t), DeviceTier::LowEnd);
    assert_eq!(DeviceTier::classify(1920.0, 5, &t), DeviceTier::Desktop);
    assert_eq!(DeviceTier::classify(1920.0, 1, &t), DeviceTier::LowEnd);
}

#[test]
fn custom_thresholds_are_honored() {
    let t = TierThresholds {
        mobile_max_width: 1024.0,
        low_end_max_cores: 8,
    };
    assert_eq!(DeviceTier::classify(1000.0, 16, &t), DeviceTier::Mobile);
    assert_eq!(DeviceTier::classify(1200.0, 8, &t), DeviceTier::LowEnd);
}

#[test]
fn particle_counts_per_tier() {
    assert_eq!(DeviceTier::Mobile.particle_count(), 30_000);
    assert_eq!(DeviceTier::LowEnd.particle_count(), 50_000);
    assert_eq!(DeviceTier::Desktop.particle_count(), 90_000);
}

#[test]
fn star_counts_per_tier() {
    assert_eq!(DeviceTier::Mobile.star_count(), 3_000);
    assert_eq!(DeviceTier::LowEnd.star_count(), 6_000);
    assert_eq!(DeviceTier::Desktop.star_count(), 6_000);
}

#[test]
fn particle_sizes_per_tier() {
    // Mobile compensates for the smaller field with larger points
    assert!(DeviceTier::Mobile.particle_size() > DeviceTier::Desktop.particle_size());
    assert_eq!(DeviceTier::Mobile.particle_size(), 0.012);
    assert_eq!(DeviceTier::Desktop.particle_size(), 0.008);
}

#[test]
fn frame_caps_per_tier() {
    assert_eq!(DeviceTier::Mobile.fps_cap(), 45.0);
    assert_eq!(DeviceTier::Desktop.fps_cap(), 60.0);
    assert!((DeviceTier::Mobile.frame_min_ms() - 1_000.0 / 45.0).abs() < 1e-9);
    assert!((DeviceTier::Desktop.frame_min_ms() - 1_000.0 / 60.0).abs() < 1e-9);
    // Lower cap means a longer minimum interval
    assert!(DeviceTier::Mobile.frame_min_ms() > DeviceTier::Desktop.frame_min_ms());
}

#[test]
fn pixel_ratio_caps() {
    assert_eq!(DeviceTier::Mobile.pixel_ratio_cap(), 1.5);
    assert_eq!(DeviceTier::Desktop.pixel_ratio_cap(), 2.0);

    let t = TierThresholds::default();
    assert_eq!(pixel_ratio_cap_for_width(767.0, &t), 1.5);
    assert_eq!(pixel_ratio_cap_for_width(768.0, &t), 2.0);
}

#[test]
fn input_blend_is_snappier_on_mobile() {
    assert!(DeviceTier::Mobile.input_blend() > DeviceTier::Desktop.input_blend());
    assert_eq!(DeviceTier::LowEnd.input_blend(), DeviceTier::Desktop.input_blend());
}
