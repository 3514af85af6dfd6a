// Coarse device-capability classification used to scale the particle budget,
// frame cap, and pixel-ratio cap.

/// Classification cutoffs. Tunable defaults, not load-bearing contracts: the
/// numbers are heuristics, so callers that need different behavior construct
/// their own thresholds.
#[derive(Clone, Copy, Debug)]
pub struct TierThresholds {
    pub mobile_max_width: f32,
    pub low_end_max_cores: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            mobile_max_width: 768.0,
            low_end_max_cores: 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceTier {
    Mobile,
    LowEnd,
    Desktop,
}

impl DeviceTier {
    pub fn classify(viewport_width: f32, logical_cores: u32, t: &TierThresholds) -> Self {
        if viewport_width < t.mobile_max_width {
            DeviceTier::Mobile
        } else if logical_cores <= t.low_end_max_cores {
            DeviceTier::LowEnd
        } else {
            DeviceTier::Desktop
        }
    }

    pub fn particle_count(self) -> usize {
        match self {
            DeviceTier::Mobile => 30_000,
            DeviceTier::LowEnd => 50_000,
            DeviceTier::Desktop => 90_000,
        }
    }

    pub fn star_count(self) -> usize {
        match self {
            DeviceTier::Mobile => 3_000,
            DeviceTier::LowEnd | DeviceTier::Desktop => 6_000,
        }
    }

    /// Galaxy point size in world units (larger on mobile to compensate for
    /// the lower particle count).
    pub fn particle_size(self) -> f32 {
        match self {
            DeviceTier::Mobile => 0.012,
            DeviceTier::LowEnd | DeviceTier::Desktop => 0.008,
        }
    }

    pub fn fps_cap(self) -> f64 {
        match self {
            DeviceTier::Mobile => 45.0,
            DeviceTier::LowEnd | DeviceTier::Desktop => 60.0,
        }
    }

    pub fn frame_min_ms(self) -> f64 {
        1_000.0 / self.fps_cap()
    }

    /// Device-pixel-ratio ceiling, bounding GPU fill cost.
    pub fn pixel_ratio_cap(self) -> f64 {
        match self {
            DeviceTier::Mobile => 1.5,
            DeviceTier::LowEnd | DeviceTier::Desktop => 2.0,
        }
    }

    /// Scroll/pointer smoothing factor (slightly snappier on mobile).
    pub fn input_blend(self) -> f32 {
        match self {
            DeviceTier::Mobile => 0.06,
            DeviceTier::LowEnd | DeviceTier::Desktop => 0.05,
        }
    }
}

/// Pixel-ratio cap re-evaluated from the live viewport width (a resized
/// window may cross the mobile threshold after mount).
#[inline]
pub fn pixel_ratio_cap_for_width(viewport_width: f32, t: &TierThresholds) -> f64 {
    if viewport_width < t.mobile_max_width {
        1.5
    } else {
        2.0
    }
}
