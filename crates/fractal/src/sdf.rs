//! Time-morphing Mandelbulb distance estimator
//!
//! This is a power-3 escape-time fractal with a deliberately distorted
//! reconstruction step: the y axis uses a quartic sine divided by `cos(phi)` and
//! the z axis a `cos * sin^3` product instead of the textbook spherical mapping.
//! The animation parameter enters twice: it scales both spherical angles, which
//! morphs the shape, and it displaces every orbit point along the sample position.

use glam::Vec3;

/// Exponent applied to the orbit radius each iteration.
pub const POWER: f32 = 3.0;

/// Upper bound on orbit iterations per sample.
pub const SDF_ITERATIONS: u32 = 15;

/// Orbits with a radius above this value have escaped.
pub const ESCAPE_RADIUS: f32 = 2.0;

/// Empirical scale applied to the distance estimate.
pub const DISTANCE_SCALE: f32 = 1.9;

/// Floor for the orbit radius. Keeps the estimate finite at the exact origin,
/// where `z.z / r` would be `0 / 0`.
pub const MIN_RADIUS: f32 = 1e-6;

/// The fractal as it looks at one instant of the animation.
///
/// Construction evaluates the two time-dependent factors once so a frame's worth
/// of samples can share them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mandelbulb {
    iteration_factor: f32,
    displacement: f32,
}

impl Mandelbulb {
    #[must_use]
    pub fn at(t: f32) -> Self {
        Self {
            iteration_factor: iteration_factor(t),
            displacement: displacement_factor(t),
        }
    }

    #[must_use]
    pub fn iteration_factor(&self) -> f32 {
        self.iteration_factor
    }

    #[must_use]
    pub fn displacement(&self) -> f32 {
        self.displacement
    }

    /// Estimated distance from `pos` to the fractal surface.
    #[must_use]
    pub fn distance(&self, pos: Vec3) -> f32 {
        let mut z = pos;
        let mut dr = 1.0_f32;
        let mut r = 0.0_f32;

        for _ in 0..SDF_ITERATIONS {
            r = z.length().max(MIN_RADIUS);
            if r > ESCAPE_RADIUS {
                break;
            }

            let mut theta = (z.z / r).acos() * self.iteration_factor;
            let mut phi = z.y.atan2(z.x) * self.iteration_factor;
            dr = r.powf(POWER - 1.0) * POWER * dr + 1.0;

            let zr = r.powf(POWER);
            theta *= POWER;
            phi *= POWER;

            let sin_theta = theta.sin();
            z = zr * Vec3::new(
                sin_theta * phi.cos(),
                phi.sin() * sin_theta * sin_theta * sin_theta * sin_theta / phi.cos(),
                theta.cos() * sin_theta * sin_theta * sin_theta,
            );
            z += pos * self.displacement;
        }

        DISTANCE_SCALE * r.ln() * r / dr
    }
}

/// Angular scale that makes the shape morph with `t`. Oscillates in `[0.55, 2.45]`.
#[must_use]
pub fn iteration_factor(t: f32) -> f32 {
    (t * 0.01).sin() * 0.95 + 1.5
}

/// Weight of the per-iteration displacement along the sample position.
#[must_use]
pub fn displacement_factor(t: f32) -> f32 {
    ((t * 0.1988) * 1.01 + 0.1988).sin()
}

/// Evaluates the distance field at `pos` for animation parameter `t`.
#[must_use]
pub fn mandelbulb_sdf(pos: Vec3, t: f32) -> f32 {
    Mandelbulb::at(t).distance(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::TAU;

    #[test]
    fn iteration_factor_cycle() {
        assert_relative_eq!(iteration_factor(0.0), 1.5);
        assert_relative_eq!(iteration_factor(TAU / 4.0 / 0.01), 2.45, epsilon = 1e-4);
        assert_relative_eq!(iteration_factor(3.0 * TAU / 4.0 / 0.01), 0.55, epsilon = 1e-4);
    }

    #[test]
    fn escaped_point_uses_first_radius() {
        // |p| = 4 escapes immediately, so dr stays 1.
        let d = mandelbulb_sdf(Vec3::new(0.0, 0.0, 4.0), 0.0);
        assert_relative_eq!(d, DISTANCE_SCALE * 4.0_f32.ln() * 4.0, epsilon = 1e-5);
    }

    #[test]
    fn far_points_are_far() {
        for p in [Vec3::new(50.0, 0.0, 0.0), Vec3::new(-3.0, 7.0, 2.0), Vec3::splat(100.0)] {
            let d = mandelbulb_sdf(p, 12.5);
            assert!(d > 1.0, "distance at {p:?} was {d}");
        }
    }

    #[test]
    fn origin_is_finite() {
        let d = mandelbulb_sdf(Vec3::ZERO, 0.0);
        assert!(d.is_finite());
        assert!(d < 0.0, "origin should read as inside, got {d}");
    }

    #[test]
    fn frame_constants_match_free_function() {
        let bulb = Mandelbulb::at(42.0);
        let p = Vec3::new(0.3, -0.7, 0.9);
        assert_eq!(bulb.distance(p).to_bits(), mandelbulb_sdf(p, 42.0).to_bits());
        assert_relative_eq!(bulb.iteration_factor(), iteration_factor(42.0));
        assert_relative_eq!(bulb.displacement(), displacement_factor(42.0));
    }
}
