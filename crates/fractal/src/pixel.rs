use crate::march::raymarch;
use crate::ray::{Ray, Resolution};
use crate::sdf::Mandelbulb;
use crate::shade::{shade, SurfaceHit};
use glam::{Vec2, Vec4};

/// Everything a pixel needs to compute its color for one frame.
///
/// The program is immutable and `Copy`, so any number of threads can shade pixels
/// from the same instance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelProgram {
    sdf: Mandelbulb,
    t: f32,
    resolution: Resolution,
}

impl PixelProgram {
    #[must_use]
    pub fn new(t: f32, resolution: Resolution) -> Self {
        Self {
            sdf: Mandelbulb::at(t),
            t,
            resolution,
        }
    }

    #[must_use]
    pub fn sdf(&self) -> &Mandelbulb {
        &self.sdf
    }

    /// Shades the pixel whose center is at `frag_coord` (bottom-left origin).
    #[must_use]
    pub fn shade(&self, frag_coord: Vec2) -> Vec4 {
        let ray = Ray::for_pixel(frag_coord, self.resolution);
        let outcome = raymarch(&self.sdf, &ray);
        let hit = SurfaceHit::from_march(&self.sdf, &ray, outcome);
        shade(hit.as_ref(), ray.direction, self.t)
    }

    /// Shades a framebuffer texel addressed by column and top-down row.
    #[must_use]
    pub fn shade_texel(&self, column: u32, row: u32) -> Vec4 {
        self.shade(self.resolution.frag_coord(column, row))
    }
}

/// The per-pixel program as a pure function of its inputs.
#[must_use]
pub fn render_pixel(frag_coord: Vec2, t: f32, resolution: Resolution) -> Vec4 {
    PixelProgram::new(t, resolution).shade(frag_coord)
}
