// Camera-path controller: smooths raw scroll/pointer targets into camera
// pose and field rotations, and paces rendering against the tier frame cap.

// Camera distance bands over scroll progress
pub const CAMERA_FAR: f32 = 6.0;
pub const CAMERA_MID: f32 = 5.0;
pub const CAMERA_NEAR: f32 = 4.0;
pub const BAND_LOW: f32 = 0.33;
pub const BAND_HIGH: f32 = 0.66;

// Camera height mapping (linear in scroll progress)
pub const HEIGHT_START: f32 = 2.5;
pub const HEIGHT_DROP: f32 = 2.0;

// Blend factor for camera distance/height and pointer tilt; input smoothing
// (scroll/pointer) uses the per-tier factor instead
pub const CAMERA_BLEND: f32 = 0.04;

// Pointer-reactive field tilt, radians at full pointer deflection
pub const TILT_GAIN: f32 = 0.3;

// Field rotation rates, radians per second
pub const GALAXY_SPIN_RATE: f32 = 0.08;
pub const STAR_SPIN_RATE: f32 = 0.02;

// Extra galaxy yaw across the full scroll range (half turn)
pub const SCROLL_SPIN_RANGE: f32 = std::f32::consts::PI;

#[inline]
pub fn lerp(current: f32, target: f32, alpha: f32) -> f32 {
    current + (target - current) * alpha
}

/// Normalized page position in [0, 1]; a page shorter than the viewport
/// (max_scroll <= 0) pins progress to 0.
#[inline]
pub fn scroll_progress(scroll: f32, max_scroll: f32) -> f32 {
    if max_scroll > 0.0 {
        (scroll / max_scroll).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Three discrete distance bands; each boundary belongs to the nearer band.
#[inline]
pub fn target_camera_distance(progress: f32) -> f32 {
    if progress < BAND_LOW {
        CAMERA_FAR
    } else if progress < BAND_HIGH {
        CAMERA_MID
    } else {
        CAMERA_NEAR
    }
}

/// Camera height decreases linearly with progress (never increases).
#[inline]
pub fn target_camera_height(progress: f32) -> f32 {
    HEIGHT_START - HEIGHT_DROP * progress
}

/// Per-frame pose derived from the rig state.
#[derive(Clone, Copy, Debug)]
pub struct RigFrame {
    pub progress: f32,
    pub eye_height: f32,
    pub eye_distance: f32,
    pub galaxy_yaw: f32,
    pub tilt_x: f32,
    pub tilt_z: f32,
    pub star_yaw: f32,
}

/// Smoothed camera state. Event handlers only move the targets; every
/// rendered frame eases the current values toward them, so the camera always
/// lags input slightly.
#[derive(Clone, Debug)]
pub struct CameraRig {
    input_blend: f32,
    scroll: f32,
    target_scroll: f32,
    pointer_x: f32,
    target_pointer_x: f32,
    pointer_y: f32,
    target_pointer_y: f32,
    distance: f32,
    height: f32,
    tilt_x: f32,
    tilt_z: f32,
}

impl CameraRig {
    /// Seed the smoothed scroll from the live position so mounting mid-page
    /// does not lunge the camera.
    pub fn new(input_blend: f32, initial_scroll: f32) -> Self {
        Self {
            input_blend,
            scroll: initial_scroll,
            target_scroll: initial_scroll,
            pointer_x: 0.0,
            target_pointer_x: 0.0,
            pointer_y: 0.0,
            target_pointer_y: 0.0,
            distance: CAMERA_FAR,
            height: HEIGHT_START,
            tilt_x: 0.0,
            tilt_z: 0.0,
        }
    }

    pub fn set_scroll_target(&mut self, scroll: f32) {
        self.target_scroll = scroll;
    }

    /// Pointer offset normalized to [-0.5, 0.5] on both axes.
    pub fn set_pointer_target(&mut self, x: f32, y: f32) {
        self.target_pointer_x = x;
        self.target_pointer_y = y;
    }

    /// Advance all smoothed values one frame and produce the pose.
    pub fn step(&mut self, elapsed_sec: f32, max_scroll: f32) -> RigFrame {
        self.scroll = lerp(self.scroll, self.target_scroll, self.input_blend);
        self.pointer_x = lerp(self.pointer_x, self.target_pointer_x, self.input_blend);
        self.pointer_y = lerp(self.pointer_y, self.target_pointer_y, self.input_blend);

        let progress = scroll_progress(self.scroll, max_scroll);
        self.distance = lerp(self.distance, target_camera_distance(progress), CAMERA_BLEND);
        self.height = lerp(self.height, target_camera_height(progress), CAMERA_BLEND);
        self.tilt_x = lerp(self.tilt_x, self.pointer_y * TILT_GAIN, CAMERA_BLEND);
        self.tilt_z = lerp(self.tilt_z, self.pointer_x * TILT_GAIN, CAMERA_BLEND);

        RigFrame {
            progress,
            eye_height: self.height,
            eye_distance: self.distance,
            galaxy_yaw: elapsed_sec * GALAXY_SPIN_RATE + progress * SCROLL_SPIN_RANGE,
            tilt_x: self.tilt_x,
            tilt_z: self.tilt_z,
            star_yaw: elapsed_sec * STAR_SPIN_RATE,
        }
    }
}

/// Frame-rate ceiling: admits a frame only when at least the minimum
/// interval has passed since the last admitted one.
#[derive(Clone, Debug)]
pub struct FramePacer {
    frame_min_ms: f64,
    last_ms: Option<f64>,
}

impl FramePacer {
    pub fn new(frame_min_ms: f64) -> Self {
        Self {
            frame_min_ms,
            last_ms: None,
        }
    }

    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < self.frame_min_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Gate for one tick of the render loop: a hidden tab renders nothing and
/// does not advance the pacer.
#[inline]
pub fn admit_frame(hidden: bool, pacer: &mut FramePacer, now_ms: f64) -> bool {
    !hidden && pacer.admit(now_ms)
}
