//! GPU-facing data for the WGSL version of the raymarcher
//!
//! [`FrameUniforms`] mirrors the uniform block declared at group 0, binding 0 of
//! `shaders/mandelbulb.wgsl`. It must stay `Pod` and keep the exact field order
//! and padding of the WGSL struct.

use crate::driver::RendererState;
use bytemuck::{Pod, Zeroable};

/// WGSL source of the full-screen raymarching program (`vs_main` / `fs_main`).
pub const SHADER_SOURCE: &str = include_str!("../../../shaders/mandelbulb.wgsl");

/// Per-frame uniform block consumed by the fragment shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Animation parameter `t`.
    pub iteration: f32,
    /// Keeps `resolution` on its 8-byte WGSL alignment.
    pub padding: f32,
    /// Viewport width and height in pixels.
    pub resolution: [f32; 2],
}

impl FrameUniforms {
    #[must_use]
    pub fn new(iteration: f32, width: f32, height: f32) -> Self {
        Self {
            iteration,
            padding: 0.0,
            resolution: [width, height],
        }
    }

    /// Viewport size rounded to whole pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.resolution[0].round().max(0.0) as u32,
            self.resolution[1].round().max(0.0) as u32,
        )
    }
}

impl From<&RendererState> for FrameUniforms {
    fn from(state: &RendererState) -> Self {
        Self::new(
            state.shader_iteration(),
            state.resolution.width,
            state.resolution.height,
        )
    }
}
