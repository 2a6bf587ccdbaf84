//! Surface coloring
//!
//! A hit is lit by a single point light with a Lambertian term. The base color
//! cycles through three sinusoids of the animation parameter, and a fixed blue
//! rim term brightens silhouettes where the normal turns away from the viewer.

use crate::march::MarchState;
use crate::normal::estimate_normal;
use crate::ray::Ray;
use crate::sdf::Mandelbulb;
use glam::{Vec3, Vec4};

pub const LIGHT_POSITION: Vec3 = Vec3::new(2.0, 4.0, 2.0);

/// Tint of the rim highlight.
pub const RIM_TINT: Vec3 = Vec3::new(0.1, 0.2, 0.3);

/// Opaque black, used for every pixel whose ray misses.
pub const BACKGROUND: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Where a ray met the surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceHit {
    pub position: Vec3,
    pub normal: Vec3,
}

impl SurfaceHit {
    /// Resolves a march outcome into a surface hit.
    ///
    /// Misses yield `None`, and so does a hit at zero travel: that can only happen
    /// when the ray starts inside the surface.
    #[must_use]
    pub fn from_march(sdf: &Mandelbulb, ray: &Ray, outcome: MarchState) -> Option<Self> {
        let travel = outcome.travel();
        if travel <= 0.0 {
            return None;
        }
        let position = ray.at(travel);
        Some(Self {
            position,
            normal: estimate_normal(sdf, position),
        })
    }
}

/// Time-varying surface color, each channel in `[0, 1]`.
#[must_use]
pub fn base_color(t: f32) -> Vec3 {
    Vec3::new(
        (t * 0.2).sin() * 0.5 + 0.5,
        (t * 0.15).cos() * 0.5 + 0.5,
        (t * 0.1).sin() * 0.5 + 0.5,
    )
}

/// Final color for a pixel. Alpha is always 1.
#[must_use]
pub fn shade(hit: Option<&SurfaceHit>, ray_direction: Vec3, t: f32) -> Vec4 {
    let Some(hit) = hit else {
        return BACKGROUND;
    };

    let light_dir = (LIGHT_POSITION - hit.position).normalize();
    let diffuse = hit.normal.dot(light_dir).max(0.0);

    let rim = (1.0 - hit.normal.dot(ray_direction).abs()).powf(2.0);
    let color = base_color(t) * diffuse + RIM_TINT * rim;
    color.extend(1.0)
}
