use crate::framebuffer::{to_rgba8, BYTES_PER_PIXEL};
use crate::{ComputeBackend, ComputeError, Framebuffer};
use fractal::{FrameUniforms, PixelProgram, Resolution};

/// Renders frames with the CPU reference raymarcher.
///
/// Rows are independent, so with the `parallel` feature they are shaded on the
/// rayon pool. [`CpuBackend::sequential`] forces a single thread.
#[derive(Debug, Clone, Copy)]
pub struct CpuBackend {
    parallel: bool,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
        }
    }

    #[must_use]
    pub fn sequential() -> Self {
        Self { parallel: false }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn shade_row(program: &PixelProgram, row: usize, out: &mut [u8]) {
    for (column, texel) in out.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
        let color = program.shade_texel(column as u32, row as u32);
        texel.copy_from_slice(&to_rgba8(color));
    }
}

fn shade_rows_sequential(program: &PixelProgram, pixels: &mut [u8], row_bytes: usize) {
    for (row, out) in pixels.chunks_mut(row_bytes).enumerate() {
        shade_row(program, row, out);
    }
}

#[cfg(feature = "parallel")]
fn shade_rows_parallel(program: &PixelProgram, pixels: &mut [u8], row_bytes: usize) {
    use rayon::prelude::*;

    pixels
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(row, out)| shade_row(program, row, out));
}

#[cfg(not(feature = "parallel"))]
fn shade_rows_parallel(program: &PixelProgram, pixels: &mut [u8], row_bytes: usize) {
    shade_rows_sequential(program, pixels, row_bytes);
}

impl ComputeBackend for CpuBackend {
    fn name(&self) -> &'static str {
        if self.parallel {
            "cpu (parallel)"
        } else {
            "cpu"
        }
    }

    fn dispatch(&self, uniforms: &FrameUniforms) -> Result<Framebuffer, ComputeError> {
        let (width, height) = uniforms.pixel_size();
        let resolution = Resolution::new(width, height)?;
        let program = PixelProgram::new(uniforms.iteration, resolution);

        let mut frame = Framebuffer::new(width, height);
        let row_bytes = frame.row_bytes();
        if self.parallel {
            shade_rows_parallel(&program, frame.as_bytes_mut(), row_bytes);
        } else {
            shade_rows_sequential(&program, frame.as_bytes_mut(), row_bytes);
        }

        tracing::debug!(
            backend = self.name(),
            width,
            height,
            iteration = uniforms.iteration,
            "cpu frame shaded"
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: f32, height: f32, t: f32) -> Framebuffer {
        CpuBackend::new()
            .dispatch(&FrameUniforms::new(t, width, height))
            .unwrap()
    }

    #[test]
    fn dimensions_match_the_request() {
        let f = frame(24.0, 10.0, 0.0);
        assert_eq!((f.width(), f.height()), (24, 10));
        assert_eq!(f.as_bytes().len(), 24 * 10 * 4);
    }

    #[test]
    fn every_texel_is_opaque() {
        let f = frame(16.0, 12.0, 4.0);
        assert!(f.as_bytes().chunks_exact(4).all(|texel| texel[3] == 255));
    }

    #[test]
    fn corners_are_background_and_center_is_lit() {
        let f = frame(33.0, 33.0, 0.0);
        for (x, y) in [(0, 0), (32, 0), (0, 32), (32, 32)] {
            assert_eq!(f.pixel(x, y), Some([0, 0, 0, 255]), "corner {x},{y}");
        }
        let center = f.pixel(16, 16).unwrap();
        assert!(center[..3].iter().any(|&c| c > 0), "center was {center:?}");
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let uniforms = FrameUniforms::new(11.5, 20.0, 14.0);
        let parallel = CpuBackend::new().dispatch(&uniforms).unwrap();
        let sequential = CpuBackend::sequential().dispatch(&uniforms).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn zero_size_is_rejected() {
        let result = CpuBackend::new().dispatch(&FrameUniforms::new(0.0, 0.0, 10.0));
        assert!(matches!(result, Err(ComputeError::InvalidResolution(_))));
    }
}
