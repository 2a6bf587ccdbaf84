use anyhow::{Context, Result};
use fractal::AnimationConfig;
use std::sync::Arc;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use crate::state::State;

/// Initial window settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Evolving Mandelbulb".to_owned(),
            width: 800,
            height: 600,
        }
    }
}

/// Only the window manager ends the session; keyboard and mouse input is ignored.
fn ends_session(event: &WindowEvent) -> bool {
    matches!(event, WindowEvent::CloseRequested)
}

/// Opens a window and animates the fractal until it is closed.
///
/// # Errors
///
/// Fails if the event loop, window, surface or device cannot be created.
pub fn run(options: &WindowOptions, animation: AnimationConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(options.title.as_str())
            .with_inner_size(LogicalSize::new(options.width, options.height))
            .build(&event_loop)
            .context("failed to create window")?,
    );

    let mut state = pollster::block_on(State::new(window, animation))?;
    let mut frames: u64 = 0;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            ref event,
            window_id,
        } if window_id == state.window().id() => match event {
            event if ends_session(event) => elwt.exit(),
            WindowEvent::Resized(physical_size) => state.resize(*physical_size),
            WindowEvent::RedrawRequested => {
                state.update();
                match state.render() {
                    Ok(()) => {
                        frames += 1;
                        if frames % 600 == 0 {
                            tracing::debug!(
                                frames,
                                iteration = state.renderer_state().iteration(),
                                "still animating"
                            );
                        }
                    }
                    Err(wgpu::SurfaceError::Lost) => {
                        tracing::warn!("surface lost, reconfiguring");
                        state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("surface out of memory, exiting");
                        elwt.exit();
                    }
                    Err(err) => tracing::warn!(%err, "skipping frame"),
                }
            }
            _ => {}
        },
        Event::AboutToWait => state.window().request_redraw(),
        _ => {}
    })?;
    Ok(())
}
