// DOM wiring and projection constants shared across the web frontend.

// The host page places this canvas full-viewport behind its content with
// pointer-events disabled; we only look it up by id.
pub const CANVAS_ID: &str = "backdrop-canvas";

// Resize work (layout reads, surface reconfiguration) runs at most once per
// this interval.
pub const RESIZE_DEBOUNCE_MS: i32 = 150;

// Perspective projection
pub const CAMERA_FOV_DEG: f32 = 70.0;
pub const CAMERA_Z_NEAR: f32 = 0.1;
pub const CAMERA_Z_FAR: f32 = 100.0;

// Star rendering (tier-independent)
pub const STAR_POINT_SIZE: f32 = 0.015;
pub const STAR_OPACITY: f32 = 0.5;

// Page background: deep navy (#00050d)
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.019_607_843, 0.050_980_392];
