//! # Parameter Driver
//!
//! Advances the single animation parameter that drives every change in the
//! fractal. The parameter is the only state that survives from one frame to the
//! next; it lives in [`RendererState`], which is passed into each frame and handed
//! back updated instead of being mutated in place behind the renderer's back.
//!
//! The accumulator is an `f64`. Narrowing to `f32` happens only when the value is
//! published to the shader, otherwise small per-frame increments would be rounded
//! away once the parameter reaches a few hundred thousand.

use crate::error::FractalError;
use crate::ray::Resolution;
use std::time::Instant;

/// Default wrap bound for the animation parameter.
pub const DEFAULT_MAX_ITERATIONS: f64 = 1_000_000.0;

/// Default multiplier on elapsed seconds.
pub const DEFAULT_EVOLUTION_SPEED: f64 = 1.0;

/// Host-adjustable animation settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Exclusive upper bound; the parameter wraps back towards zero past it.
    pub max_iterations: f64,
    /// How many parameter units pass per second of wall-clock time.
    pub evolution_speed: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            evolution_speed: DEFAULT_EVOLUTION_SPEED,
        }
    }
}

impl AnimationConfig {
    /// Checks that the wrap bound is positive and the speed non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`FractalError::InvalidMaxIterations`] or
    /// [`FractalError::InvalidEvolutionSpeed`] for out-of-range values.
    pub fn validate(self) -> Result<Self, FractalError> {
        if !self.max_iterations.is_finite() || self.max_iterations <= 0.0 {
            return Err(FractalError::InvalidMaxIterations(self.max_iterations));
        }
        if !self.evolution_speed.is_finite() || self.evolution_speed < 0.0 {
            return Err(FractalError::InvalidEvolutionSpeed(self.evolution_speed));
        }
        tracing::debug!(
            max_iterations = self.max_iterations,
            evolution_speed = self.evolution_speed,
            "animation config accepted"
        );
        Ok(self)
    }
}

/// Per-frame renderer inputs: the animation parameter and the viewport size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RendererState {
    iteration: f64,
    pub resolution: Resolution,
}

impl RendererState {
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            iteration: 0.0,
            resolution,
        }
    }

    /// Starts the animation at `iteration`, wrapped into `[0, max_iterations)`.
    /// Negative and non-finite starting points begin at zero.
    #[must_use]
    pub fn starting_at(iteration: f64, resolution: Resolution, config: &AnimationConfig) -> Self {
        let iteration = if iteration.is_finite() {
            iteration.max(0.0) % config.max_iterations
        } else {
            0.0
        };
        Self {
            iteration: below_bound(iteration, config.max_iterations),
            resolution,
        }
    }

    #[must_use]
    pub fn iteration(&self) -> f64 {
        self.iteration
    }

    /// The parameter as the shader sees it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn shader_iteration(&self) -> f32 {
        self.iteration as f32
    }

    /// Moves the animation forward by `delta_seconds` of wall-clock time.
    ///
    /// Negative and non-finite deltas count as zero, as does a step that overflows,
    /// so the result always lies in `[0, config.max_iterations)` for a validated
    /// config.
    #[must_use]
    pub fn advance(self, delta_seconds: f64, config: &AnimationConfig) -> Self {
        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            tracing::warn!(delta_seconds, "ignoring non-finite frame delta");
            0.0
        };
        let max = config.max_iterations;
        let step = delta * config.evolution_speed;
        let step = if step.is_finite() {
            step % max
        } else {
            tracing::warn!(delta, speed = config.evolution_speed, "frame step overflowed");
            0.0
        };
        // Both terms are below `max`; subtracting first keeps huge bounds finite.
        let headroom = max - self.iteration;
        let iteration = if step >= headroom {
            step - headroom
        } else {
            self.iteration + step
        };
        Self {
            iteration: below_bound(iteration, max),
            ..self
        }
    }

    /// Applies a viewport resize. The animation parameter is untouched.
    #[must_use]
    pub fn resize(self, resolution: Resolution) -> Self {
        Self { resolution, ..self }
    }
}

/// Keeps `value` in `[0, max)`, and nudges it down when narrowing to `f32`
/// would round it up onto the bound.
#[allow(clippy::cast_possible_truncation)]
fn below_bound(value: f64, max: f64) -> f64 {
    let value = if (0.0..max).contains(&value) { value } else { 0.0 };
    let narrowed = value as f32;
    if narrowed.is_infinite() || f64::from(narrowed) < max {
        return value;
    }
    let rounded = max as f32;
    let ceiling = if f64::from(rounded) < max {
        rounded
    } else {
        f32::from_bits(rounded.to_bits() - 1)
    };
    f64::from(ceiling).min(value)
}

/// Monotonic frame timer that reports the seconds elapsed between ticks.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous tick (or since construction). Never negative.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        delta.as_secs_f64()
    }
}
