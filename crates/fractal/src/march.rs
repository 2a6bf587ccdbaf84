//! Sphere tracing against the Mandelbulb field
//!
//! The march is a small state machine. It starts in [`MarchState::Marching`] and
//! ends in one of three terminal states: a hit, a miss because the ray travelled
//! past [`MAX_DIST`], or a miss because [`MAX_STEPS`] ran out.

use crate::ray::Ray;
use crate::sdf::Mandelbulb;

/// Step budget for one ray.
pub const MAX_STEPS: u32 = 100_000;

/// A sample closer than this counts as a surface hit.
pub const MIN_DIST: f32 = 1.0;

/// Rays that travel further than this are misses.
pub const MAX_DIST: f32 = 10_000.0;

/// Fraction of the estimated distance advanced per step.
pub const STEP_DAMPING: f32 = 0.5;

/// Travel value reported for misses.
pub const MISS_SENTINEL: f32 = -1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarchState {
    Marching { travel: f32, steps: u32 },
    Hit { travel: f32, steps: u32 },
    MissedByDistance { travel: f32, steps: u32 },
    MissedBySteps,
}

impl MarchState {
    #[must_use]
    pub const fn start() -> Self {
        Self::Marching {
            travel: 0.0,
            steps: 0,
        }
    }

    /// Runs one step of the march. Terminal states are returned unchanged.
    #[must_use]
    pub fn step(self, sdf: &Mandelbulb, ray: &Ray) -> Self {
        let Self::Marching { travel, steps } = self else {
            return self;
        };
        if steps >= MAX_STEPS {
            return Self::MissedBySteps;
        }

        let distance = sdf.distance(ray.at(travel));
        if distance < MIN_DIST {
            return Self::Hit { travel, steps };
        }
        if travel > MAX_DIST {
            return Self::MissedByDistance { travel, steps };
        }

        Self::Marching {
            travel: travel + distance * STEP_DAMPING,
            steps: steps + 1,
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Marching { .. })
    }

    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Distance to the hit, or [`MISS_SENTINEL`] for anything else.
    #[must_use]
    pub const fn travel(&self) -> f32 {
        match self {
            Self::Hit { travel, .. } => *travel,
            _ => MISS_SENTINEL,
        }
    }
}

/// Marches `ray` until it reaches a terminal state.
#[must_use]
pub fn raymarch(sdf: &Mandelbulb, ray: &Ray) -> MarchState {
    let mut state = MarchState::start();
    while !state.is_terminal() {
        state = state.step(sdf, ray);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn terminal_states_are_sticky() {
        let sdf = Mandelbulb::at(0.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 4.0), Vec3::NEG_Z);
        for terminal in [
            MarchState::Hit { travel: 2.0, steps: 3 },
            MarchState::MissedByDistance { travel: 20_000.0, steps: 9 },
            MarchState::MissedBySteps,
        ] {
            assert_eq!(terminal.step(&sdf, &ray), terminal);
            assert!(terminal.is_terminal());
        }
    }

    #[test]
    fn step_budget_is_enforced() {
        let sdf = Mandelbulb::at(0.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 4.0), Vec3::Z);
        let exhausted = MarchState::Marching {
            travel: 0.0,
            steps: MAX_STEPS,
        };
        assert_eq!(exhausted.step(&sdf, &ray), MarchState::MissedBySteps);
    }

    #[test]
    fn first_step_advances_by_half_the_distance() {
        let sdf = Mandelbulb::at(0.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 4.0), Vec3::NEG_Z);
        let expected = sdf.distance(ray.origin) * STEP_DAMPING;
        match MarchState::start().step(&sdf, &ray) {
            MarchState::Marching { travel, steps } => {
                assert_eq!(travel.to_bits(), expected.to_bits());
                assert_eq!(steps, 1);
            }
            other => panic!("expected to keep marching, got {other:?}"),
        }
    }

    #[test]
    fn sentinel_for_misses() {
        assert_eq!(MarchState::MissedBySteps.travel(), MISS_SENTINEL);
        assert_eq!(
            MarchState::MissedByDistance { travel: 1.0e5, steps: 4 }.travel(),
            MISS_SENTINEL
        );
        assert_eq!(MarchState::Hit { travel: 5.5, steps: 1 }.travel(), 5.5);
    }
}
