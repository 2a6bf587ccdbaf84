#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Frame backends
//!
//! A [`ComputeBackend`] turns one frame's [`fractal::FrameUniforms`] into a finished
//! [`Framebuffer`]. [`CpuBackend`] runs the reference raymarcher from the
//! `fractal` crate, one row per rayon task. With the `gpu` feature,
//! [`WgpuBackend`] draws the WGSL version of the same program into an offscreen
//! texture and reads it back.
//!
//! [`default_backend`] prefers the GPU and quietly falls back to the CPU.

use fractal::FractalError;
use std::sync::Arc;
use thiserror::Error;

pub mod backend;
pub mod cpu_backend;
pub mod framebuffer;
#[cfg(feature = "gpu")]
pub mod pipeline;
#[cfg(feature = "gpu")]
pub mod wgpu_backend;

pub use backend::ComputeBackend;
pub use cpu_backend::CpuBackend;
pub use framebuffer::{to_rgba8, Framebuffer};
#[cfg(feature = "gpu")]
pub use wgpu_backend::WgpuBackend;

#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("backend not available: {0}")]
    BackendUnavailable(String),
    #[error(transparent)]
    InvalidResolution(#[from] FractalError),
    #[error("{width}x{height} exceeds the device texture limit of {max}")]
    ResolutionTooLarge { width: u32, height: u32, max: u32 },
    #[error("gpu device error: {0}")]
    Device(String),
    #[error("frame readback failed: {0}")]
    Readback(String),
}

/// Which backend the host asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    Cpu,
    Gpu,
    #[default]
    Auto,
}

/// Creates the requested backend.
///
/// # Errors
///
/// `BackendKind::Gpu` fails with [`ComputeError::BackendUnavailable`] when the
/// crate is built without the `gpu` feature or no adapter can be opened.
/// The other kinds always succeed.
pub fn create_backend(kind: BackendKind) -> Result<Arc<dyn ComputeBackend>, ComputeError> {
    match kind {
        BackendKind::Cpu => Ok(Arc::new(CpuBackend::new())),
        BackendKind::Gpu => gpu_backend(),
        BackendKind::Auto => Ok(default_backend()),
    }
}

#[cfg(feature = "gpu")]
fn gpu_backend() -> Result<Arc<dyn ComputeBackend>, ComputeError> {
    Ok(Arc::new(WgpuBackend::new()?))
}

#[cfg(not(feature = "gpu"))]
fn gpu_backend() -> Result<Arc<dyn ComputeBackend>, ComputeError> {
    Err(ComputeError::BackendUnavailable(
        "built without the `gpu` feature".into(),
    ))
}

/// Returns a GPU backend if one can be created, otherwise the CPU backend.
#[must_use]
pub fn default_backend() -> Arc<dyn ComputeBackend> {
    match gpu_backend() {
        Ok(gpu) => {
            tracing::info!(backend = gpu.name(), "using gpu backend");
            gpu
        }
        Err(err) => {
            tracing::warn!(%err, "gpu backend unavailable, falling back to cpu");
            Arc::new(CpuBackend::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractal::FrameUniforms;

    #[test]
    fn cpu_kind_always_succeeds() {
        let backend = create_backend(BackendKind::Cpu).unwrap();
        assert!(backend.name().starts_with("cpu"));
    }

    #[test]
    fn auto_kind_always_yields_a_backend() {
        let backend = create_backend(BackendKind::Auto).unwrap();
        let frame = backend.dispatch(&FrameUniforms::new(0.0, 4.0, 3.0)).unwrap();
        assert_eq!((frame.width(), frame.height()), (4, 3));
    }

    #[cfg(not(feature = "gpu"))]
    #[test]
    fn gpu_kind_needs_the_feature() {
        assert!(matches!(
            create_backend(BackendKind::Gpu),
            Err(ComputeError::BackendUnavailable(_))
        ));
    }
}
