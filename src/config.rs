//! Configuration types for the simulation engine.

use crate::error::SimError;
use crate::float::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard gravity at the Earth's surface, in m/s².
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Frame interval of a 60 FPS renderer, in whole milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: f32 = 16.0;

/// Engine-wide simulation parameters.
///
/// # Builder Pattern
/// ```
/// use pendula::config::SimulationConfig;
///
/// let config: SimulationConfig<f64> = SimulationConfig::new()
///     .with_sub_steps(50)
///     .with_frame_interval_ms(20.0)
///     .with_gravity(9.81)
///     .with_selection_radius(0.25);
/// assert_eq!(config.dt(), 0.0004);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig<F: Float> {
    /// Number of integration sub-steps per rendered frame.
    /// Higher = more stable and more expensive. Default: 10.
    pub sub_steps: usize,
    /// Nominal wall-clock duration of one rendered frame. Default: 16 ms.
    pub frame_interval_ms: F,
    /// Pointer distance within which a press selects a point. Default: 0.5.
    pub selection_radius: F,
    /// Gravitational acceleration used by weights without their own. Default: 9.81.
    pub gravity: F,
    /// Trajectory history recording.
    pub trail: TrailConfig,
}

/// How often, and how much, trajectory history is kept per mass point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrailConfig {
    /// Record one sample every this many frames. 0 disables recording.
    pub sample_every: u64,
    /// Maximum number of samples kept per point; the oldest is overwritten.
    pub capacity: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        TrailConfig { sample_every: 2, capacity: 30 }
    }
}

impl<F: Float> SimulationConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimulationConfig {
            sub_steps: 10,
            frame_interval_ms: F::from_f32(DEFAULT_FRAME_INTERVAL_MS),
            selection_radius: F::from_f32(0.5),
            gravity: F::from_f64(STANDARD_GRAVITY),
            trail: TrailConfig::default(),
        }
    }

    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps;
        self
    }

    pub fn with_frame_interval_ms(mut self, interval_ms: F) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    pub fn with_selection_radius(mut self, radius: F) -> Self {
        self.selection_radius = radius;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_trail(mut self, trail: TrailConfig) -> Self {
        self.trail = trail;
        self
    }

    /// Fixed sub-step duration in seconds: `interval / (1000 * sub_steps)`.
    pub fn dt(&self) -> F {
        self.frame_interval_ms / (F::from_f32(1000.0) * F::from_u64(self.sub_steps as u64))
    }

    /// Duration of one whole frame in seconds (`dt * sub_steps`).
    pub fn frame_duration(&self) -> F {
        self.dt() * F::from_u64(self.sub_steps as u64)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.sub_steps == 0 {
            return Err(SimError::InvalidSubSteps);
        }
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms > F::zero()) {
            return Err(SimError::InvalidFrameInterval {
                interval_ms: self.frame_interval_ms.to_f64(),
            });
        }
        if !(self.selection_radius.is_finite() && self.selection_radius >= F::zero()) {
            return Err(SimError::InvalidParameter {
                name: "selection radius",
                value: self.selection_radius.to_f64(),
            });
        }
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "gravity",
                value: self.gravity.to_f64(),
            });
        }
        Ok(())
    }
}

impl<F: Float> Default for SimulationConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
