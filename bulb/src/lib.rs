//! # bulb
//!
//! Command-line front end for the evolving Mandelbulb.
//!
//! ## The Crates
//!
//! -   **[`fractal`]:** the distance estimator, raymarcher, shading, and the
//!     animation driver, as pure CPU code. Also owns the WGSL program and the
//!     uniform layout it expects.
//! -   **[`compute`]:** frame backends that turn per-frame uniforms into RGBA
//!     framebuffers, on the CPU with rayon or on the GPU with wgpu.
//! -   **`render`:** the windowed viewer (behind the `render` feature).
//! -   **`bulb`:** this crate. Parses the command line, merges it with an
//!     optional TOML file, and runs either mode.
//!
//! ## Running
//!
//! ```text
//! bulb                                   # windowed animation
//! bulb headless --frames 120 --output    # 120 PNGs in frames-YYYYMMDD-HHMMSS/
//! BULB_EVOLUTION_SPEED=5 bulb window --width 1280 --height 720
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod snapshot;
