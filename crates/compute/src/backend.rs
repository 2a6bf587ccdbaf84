use crate::{ComputeError, Framebuffer};
use fractal::FrameUniforms;

pub trait ComputeBackend: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Renders one full frame of the Mandelbulb for the given uniforms.
    ///
    /// The framebuffer size is taken from `uniforms.resolution`, rounded to whole
    /// pixels. Every texel is opaque.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::InvalidResolution`] if either dimension rounds to
    /// zero. GPU implementations may also report device or readback failures.
    fn dispatch(&self, uniforms: &FrameUniforms) -> Result<Framebuffer, ComputeError>;
}
