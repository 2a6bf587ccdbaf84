use crate::sdf::Mandelbulb;
use glam::Vec3;

/// Offset used for the finite differences.
pub const NORMAL_EPSILON: f32 = 0.001;

/// Approximates the outward surface normal at `p` from backward differences of
/// the distance field along each axis.
#[must_use]
pub fn estimate_normal(sdf: &Mandelbulb, p: Vec3) -> Vec3 {
    let d = sdf.distance(p);
    let n = Vec3::splat(d)
        - Vec3::new(
            sdf.distance(p - Vec3::X * NORMAL_EPSILON),
            sdf.distance(p - Vec3::Y * NORMAL_EPSILON),
            sdf.distance(p - Vec3::Z * NORMAL_EPSILON),
        );
    n.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn points_away_from_the_fractal_outside_the_escape_radius() {
        // Beyond the escape radius the field grows with |p|, so the gradient
        // points radially outward.
        let sdf = Mandelbulb::at(3.0);
        let n = estimate_normal(&sdf, Vec3::new(0.0, 5.0, 0.0));
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-3);
        assert!(n.y > 0.99, "normal {n:?} should point along +Y");
    }
}
