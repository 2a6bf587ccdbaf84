//! Layered settings: built-in defaults, then an optional TOML file, then the
//! command line.

use crate::cli::{AnimationArgs, HeadlessArgs, WindowArgs};
use fractal::{AnimationConfig, FractalError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Invalid(#[from] FractalError),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub animation: AnimationSection,
    pub window: WindowSection,
    pub headless: HeadlessSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationSection {
    pub max_iterations: f64,
    pub evolution_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSection {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadlessSection {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl Default for AnimationSection {
    fn default() -> Self {
        let defaults = AnimationConfig::default();
        Self {
            max_iterations: defaults.max_iterations,
            evolution_speed: defaults.evolution_speed,
        }
    }
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "Evolving Mandelbulb".to_owned(),
            width: 800,
            height: 600,
        }
    }
}

impl Default for HeadlessSection {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            fps: 60.0,
        }
    }
}

impl AppConfig {
    /// Loads settings from a `.toml` file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, malformed TOML, unknown keys, or a file that does not
    /// end in `.toml`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies command-line animation values on top of the file values.
    #[must_use]
    pub fn with_overrides(mut self, args: &AnimationArgs) -> Self {
        if let Some(max_iterations) = args.max_iterations {
            self.animation.max_iterations = max_iterations;
        }
        if let Some(evolution_speed) = args.evolution_speed {
            self.animation.evolution_speed = evolution_speed;
        }
        self
    }

    /// The validated animation settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a non-positive wrap bound or a
    /// negative speed.
    pub fn animation(&self) -> Result<AnimationConfig, ConfigError> {
        Ok(AnimationConfig {
            max_iterations: self.animation.max_iterations,
            evolution_speed: self.animation.evolution_speed,
        }
        .validate()?)
    }

    /// Window settings with command-line values taking precedence.
    #[must_use]
    pub fn window(&self, args: &WindowArgs) -> WindowSection {
        WindowSection {
            title: args.title.clone().unwrap_or_else(|| self.window.title.clone()),
            width: args.width.unwrap_or(self.window.width),
            height: args.height.unwrap_or(self.window.height),
        }
    }

    /// Headless settings with command-line values taking precedence.
    #[must_use]
    pub fn headless(&self, args: &HeadlessArgs) -> HeadlessSection {
        HeadlessSection {
            width: args.width.unwrap_or(self.headless.width),
            height: args.height.unwrap_or(self.headless.height),
            fps: args.fps.unwrap_or(self.headless.fps),
        }
    }
}
