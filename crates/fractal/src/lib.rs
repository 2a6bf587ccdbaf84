#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Evolving Mandelbulb
//!
//! CPU reference implementation of the fractal raymarcher that the WGSL program in
//! `shaders/mandelbulb.wgsl` runs on the GPU. Every function here is pure: the same
//! inputs always produce bit-identical outputs, and no state is shared between
//! pixels.
//!
//! ## Key Components
//!
//! -   **Parameter driver:** [`RendererState`] carries the animation parameter and
//!     the viewport [`Resolution`] from frame to frame. [`RendererState::advance`]
//!     wraps the parameter modulo [`AnimationConfig::max_iterations`].
//! -   **Distance estimator:** [`Mandelbulb`] evaluates the time-morphing fractal
//!     distance field for one frame.
//! -   **Raymarcher:** [`raymarch`] walks a [`Ray`] through the field and returns a
//!     terminal [`MarchState`].
//! -   **Shading:** [`estimate_normal`] and [`shade`] turn a hit into a color.
//! -   **Pixel program:** [`PixelProgram`] bundles the above into the per-pixel
//!     function `(fragCoord, t, resolution) -> color`.
//!
//! ## Usage
//!
//! ```rust
//! use fractal::{render_pixel, Resolution};
//! use glam::Vec2;
//!
//! let resolution = Resolution::new(640, 480).unwrap();
//! let color = render_pixel(Vec2::new(320.0, 240.0), 0.0, resolution);
//! assert_eq!(color.w, 1.0);
//! ```

pub mod driver;
pub mod error;
pub mod gpu_types;
pub mod march;
pub mod normal;
pub mod pixel;
pub mod ray;
pub mod sdf;
pub mod shade;

pub use driver::{AnimationConfig, FrameClock, RendererState};
pub use error::FractalError;
pub use gpu_types::{FrameUniforms, SHADER_SOURCE};
pub use march::{raymarch, MarchState, MAX_DIST, MAX_STEPS, MIN_DIST, MISS_SENTINEL};
pub use normal::estimate_normal;
pub use pixel::{render_pixel, PixelProgram};
pub use ray::{Ray, Resolution, EYE};
pub use sdf::{mandelbulb_sdf, Mandelbulb};
pub use shade::{base_color, shade, SurfaceHit, LIGHT_POSITION};
