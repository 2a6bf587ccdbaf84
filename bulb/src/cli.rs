//! Command-line surface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use compute::BackendKind;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "bulb", version, about = "Evolving Mandelbulb raymarcher")]
pub struct Cli {
    #[command(flatten)]
    pub animation: AnimationArgs,

    /// TOML file with default settings. Command-line values take precedence.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Animation knobs shared by every mode.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct AnimationArgs {
    /// Wrap bound for the animation parameter.
    #[arg(long, global = true, env = "BULB_MAX_ITERATIONS")]
    pub max_iterations: Option<f64>,

    /// Parameter units advanced per second.
    #[arg(long, global = true, env = "BULB_EVOLUTION_SPEED")]
    pub evolution_speed: Option<f64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Animate the fractal in a window (the default).
    Window(WindowArgs),
    /// Render a fixed number of frames without a window.
    Headless(HeadlessArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowArgs {
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct HeadlessArgs {
    /// Number of frames to render.
    #[arg(long, default_value_t = 60)]
    pub frames: u32,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    /// Simulated frame rate; each frame advances the clock by `1 / fps` seconds.
    #[arg(long)]
    pub fps: Option<f64>,
    #[arg(long, value_enum, default_value_t = BackendArg::Auto)]
    pub backend: BackendArg,
    /// Write PNG frames. Without a directory a timestamped one is created.
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub output: Option<Option<PathBuf>>,
    /// Animation parameter of the first frame.
    #[arg(long, default_value_t = 0.0)]
    pub start: f64,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendArg {
    Cpu,
    Gpu,
    #[default]
    Auto,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Cpu => Self::Cpu,
            BackendArg::Gpu => Self::Gpu,
            BackendArg::Auto => Self::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
