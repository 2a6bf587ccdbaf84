//! Camera rays and viewport mapping
//!
//! The camera is fixed: the eye sits at [`EYE`] and looks down the negative Z axis.
//! Pixel coordinates follow the GL convention (origin in the bottom-left corner,
//! sampled at pixel centers) and are mapped to a view plane that is centered on the
//! screen and scaled by the viewport height.

use crate::error::FractalError;
use glam::{Vec2, Vec3};

/// Eye position shared by every ray.
pub const EYE: Vec3 = Vec3::new(0.0, 0.0, 4.0);

/// Z component of every unnormalized view direction.
pub const FORWARD_Z: f32 = -1.0;

/// Viewport size in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution {
    pub width: f32,
    pub height: f32,
}

impl Resolution {
    /// Builds a resolution from window dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`FractalError::InvalidResolution`] if either dimension is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(width: u32, height: u32) -> Result<Self, FractalError> {
        if width == 0 || height == 0 {
            return Err(FractalError::InvalidResolution { width, height });
        }
        Ok(Self {
            width: width as f32,
            height: height as f32,
        })
    }

    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Maps a pixel coordinate to the normalized view plane.
    ///
    /// The screen center maps to `(0, 0)` and the vertical extent spans `[-0.5, 0.5]`
    /// regardless of the aspect ratio.
    #[must_use]
    pub fn normalized_coord(self, frag_coord: Vec2) -> Vec2 {
        (frag_coord - 0.5 * self.as_vec2()) / self.height
    }

    /// Converts a framebuffer texel (rows stored top-to-bottom) into the
    /// bottom-left pixel-center coordinate used by [`Ray::for_pixel`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn frag_coord(self, column: u32, row: u32) -> Vec2 {
        Vec2::new(column as f32 + 0.5, self.height - row as f32 - 0.5)
    }
}

/// A ray with a unit-length direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Builds the camera ray through a pixel.
    #[must_use]
    pub fn for_pixel(frag_coord: Vec2, resolution: Resolution) -> Self {
        let uv = resolution.normalized_coord(frag_coord);
        Self::new(EYE, uv.extend(FORWARD_Z))
    }

    /// Point reached after travelling `travel` units along the ray.
    #[must_use]
    pub fn at(&self, travel: f32) -> Vec3 {
        self.origin + self.direction * travel
    }
}
