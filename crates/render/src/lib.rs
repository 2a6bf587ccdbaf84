//! Windowed presentation of the evolving Mandelbulb.
//!
//! [`run`] opens a `winit` window, draws the shared WGSL program over a
//! full-screen quad every frame, and advances the animation with the wall clock.

pub mod run;
pub mod state;

pub use run::{run, WindowOptions};
pub use state::State;
