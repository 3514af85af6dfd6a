use glam::Vec3;
use rand::Rng;

/// Generation parameters for the spiral particle field.
///
/// Constructed once at mount and never mutated afterwards; the generated
/// field is uploaded to an immutable GPU buffer. `randomness_power` controls
/// how tightly the per-axis offsets cluster around the spiral arms (higher
/// exponent pulls offsets toward zero).
#[derive(Clone, Debug)]
pub struct GalaxyParams {
    pub count: usize,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: [f32; 3],
    pub outside_color: [f32; 3],
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 90_000,
            radius: 5.0,
            branches: 4,
            spin: 1.2,
            randomness: 0.25,
            randomness_power: 3.5,
            // #ff6030 -> #1b3984
            inside_color: [1.0, 0.376_470_6, 0.188_235_3],
            outside_color: [0.105_882_36, 0.223_529_42, 0.517_647_1],
        }
    }
}

/// Generation parameters for the background star shell.
#[derive(Clone, Debug)]
pub struct StarShellParams {
    pub count: usize,
    pub inner_radius: f32,
    pub shell_thickness: f32,
}

impl Default for StarShellParams {
    fn default() -> Self {
        Self {
            count: 6_000,
            inner_radius: 20.0,
            shell_thickness: 20.0,
        }
    }
}

/// The spiral point cloud: one position and one color per particle.
#[derive(Clone, Debug)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
}

impl ParticleField {
    /// Sample `params.count` particles along `params.branches` spiral arms.
    ///
    /// Each particle picks a radius in `[0, radius]`, a spin angle
    /// proportional to that radius, a branch angle from its arm index, and a
    /// per-axis offset whose magnitude is bounded by `randomness * radius`.
    pub fn generate(params: &GalaxyParams, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(params.count);
        let mut colors = Vec::with_capacity(params.count);
        let branches = params.branches.max(1);

        for i in 0..params.count {
            let radius = rng.gen::<f32>() * params.radius;
            let spin_angle = radius * params.spin;
            let branch_angle =
                (i as u32 % branches) as f32 / branches as f32 * std::f32::consts::TAU;

            let spread = params.randomness * radius;
            let rx = arm_offset(rng, params.randomness_power, spread);
            let ry = arm_offset(rng, params.randomness_power, spread);
            let rz = arm_offset(rng, params.randomness_power, spread);

            positions.push(Vec3::new(
                (branch_angle + spin_angle).cos() * radius + rx,
                ry,
                (branch_angle + spin_angle).sin() * radius + rz,
            ));
            colors.push(color_at_radius(params, radius));
        }

        Self { positions, colors }
    }
}

/// The background star shell: positions only, drawn in a uniform color.
#[derive(Clone, Debug)]
pub struct StarField {
    pub positions: Vec<Vec3>,
}

impl StarField {
    /// Sample `params.count` points uniformly over a spherical shell.
    ///
    /// The polar angle uses the inverse-cosine method so points do not bunch
    /// at the poles.
    pub fn generate(params: &StarShellParams, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(params.count);

        for _ in 0..params.count {
            let radius = params.inner_radius + rng.gen::<f32>() * params.shell_thickness;
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            positions.push(Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ));
        }

        Self { positions }
    }
}

// Signed offset with power-law falloff; magnitude bounded by `spread`.
fn arm_offset(rng: &mut impl Rng, power: f32, spread: f32) -> f32 {
    let sign = if rng.gen::<f32>() < 0.5 { 1.0 } else { -1.0 };
    rng.gen::<f32>().powf(power) * sign * spread
}

/// Palette position for a particle at `radius`: inner color at the center,
/// outer color at the rim, exact at both endpoints.
pub fn color_at_radius(params: &GalaxyParams, radius: f32) -> [f32; 3] {
    let t = if params.radius > 0.0 {
        (radius / params.radius).clamp(0.0, 1.0)
    } else {
        0.0
    };
    mix_rgb(params.inside_color, params.outside_color, t)
}

#[inline]
pub fn mix_rgb(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] * (1.0 - t) + b[0] * t,
        a[1] * (1.0 - t) + b[1] * t,
        a[2] * (1.0 - t) + b[2] * t,
    ]
}
