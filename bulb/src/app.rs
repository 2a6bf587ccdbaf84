//! # Application logic
//!
//! [`run`] resolves the layered configuration and dispatches to one of the two
//! modes:
//!
//! -   **Window:** animates the fractal in real time with the `render` crate. The
//!     parameter advances with the wall clock.
//! -   **Headless:** renders a fixed number of frames on a [`compute`] backend
//!     with a fixed timestep, logging how much of each frame the fractal covers
//!     and optionally writing PNG files.

use anyhow::{Context, Result};
use chrono::Local;
use compute::BackendKind;
use fractal::{AnimationConfig, FrameUniforms, RendererState, Resolution};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, HeadlessArgs, WindowArgs};
use crate::config::{AppConfig, WindowSection};
use crate::snapshot;

/// Installs the global `fmt` subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Runs the mode selected on the command line.
///
/// # Errors
///
/// Returns configuration, backend, window, or I/O errors.
pub fn run(cli: Cli) -> Result<()> {
    let file_config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    let config = file_config.with_overrides(&cli.animation);
    let animation = config.animation().context("invalid animation settings")?;
    tracing::info!(
        max_iterations = animation.max_iterations,
        evolution_speed = animation.evolution_speed,
        "animation configured"
    );

    match cli.command.unwrap_or_else(|| Command::Window(WindowArgs::default())) {
        Command::Window(args) => run_window(&config.window(&args), animation),
        Command::Headless(args) => {
            let plan = HeadlessPlan::resolve(&config, &args, Path::new("."));
            run_headless(&plan, animation).map(|summary| {
                tracing::info!(
                    frames = summary.frames,
                    final_iteration = summary.final_iteration,
                    mean_coverage = summary.mean_coverage,
                    written = summary.written.len(),
                    "headless run finished"
                );
            })
        }
    }
}

#[cfg(feature = "render")]
fn run_window(window: &WindowSection, animation: AnimationConfig) -> Result<()> {
    let options = render::WindowOptions {
        title: window.title.clone(),
        width: window.width,
        height: window.height,
    };
    tracing::info!(width = options.width, height = options.height, "opening window");
    render::run(&options, animation)
}

#[cfg(not(feature = "render"))]
fn run_window(_window: &WindowSection, _animation: AnimationConfig) -> Result<()> {
    anyhow::bail!("built without the `render` feature; use `bulb headless` instead")
}

/// Fully resolved settings for a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessPlan {
    pub frames: u32,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub backend: BackendKind,
    pub output: Option<PathBuf>,
    pub start: f64,
}

impl HeadlessPlan {
    /// Merges file settings with command-line arguments. A bare `--output`
    /// becomes a timestamped directory under `base`.
    #[must_use]
    pub fn resolve(config: &AppConfig, args: &HeadlessArgs, base: &Path) -> Self {
        let settings = config.headless(args);
        let output = args.output.as_ref().map(|dir| {
            dir.clone()
                .unwrap_or_else(|| snapshot::timestamped_dir(base, Local::now()))
        });
        Self {
            frames: args.frames,
            width: settings.width,
            height: settings.height,
            fps: settings.fps,
            backend: args.backend.into(),
            output,
            start: args.start,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u32,
    pub final_iteration: f64,
    pub mean_coverage: f64,
    pub written: Vec<PathBuf>,
}

/// Renders `plan.frames` frames, advancing the parameter by `1 / fps` seconds
/// between frames.
///
/// # Errors
///
/// Fails on an invalid resolution or frame rate, an unavailable backend, a
/// failed frame, or an unwritable output directory.
pub fn run_headless(plan: &HeadlessPlan, animation: AnimationConfig) -> Result<HeadlessSummary> {
    if !plan.fps.is_finite() || plan.fps <= 0.0 {
        anyhow::bail!("fps must be finite and positive, got {}", plan.fps);
    }
    let resolution = Resolution::new(plan.width, plan.height)?;
    let backend = compute::create_backend(plan.backend).context("failed to create backend")?;
    tracing::info!(
        backend = backend.name(),
        frames = plan.frames,
        width = plan.width,
        height = plan.height,
        "headless run starting"
    );

    if let Some(dir) = &plan.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        tracing::info!(dir = %dir.display(), "writing frames");
    }

    let delta = 1.0 / plan.fps;
    let mut state = RendererState::starting_at(plan.start, resolution, &animation);
    let mut coverage_sum = 0.0;
    let mut written = Vec::new();

    for index in 0..plan.frames {
        let uniforms = FrameUniforms::from(&state);
        let frame = backend
            .dispatch(&uniforms)
            .with_context(|| format!("failed to render frame {index}"))?;

        let coverage = frame.coverage();
        coverage_sum += coverage;
        tracing::info!(
            frame = index,
            iteration = state.iteration(),
            coverage,
            "frame rendered"
        );

        if let Some(dir) = &plan.output {
            let path = snapshot::frame_path(dir, index);
            snapshot::save_png(&frame, &path)?;
            written.push(path);
        }

        state = state.advance(delta, &animation);
    }

    Ok(HeadlessSummary {
        frames: plan.frames,
        final_iteration: state.iteration(),
        mean_coverage: if plan.frames == 0 {
            0.0
        } else {
            coverage_sum / f64::from(plan.frames)
        },
        written,
    })
}
