//! Read-only view of simulation time.

use crate::float::Float;

/// The engine's running sub-step counter together with the fixed sub-step
/// duration.
///
/// The engine owns the only mutable copy and hands `&SimClock` to whatever
/// needs elapsed time, such as kinematic anchors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimClock<F: Float> {
    step: u64,
    dt: F,
}

impl<F: Float> SimClock<F> {
    pub fn new(dt: F) -> Self {
        SimClock { step: 0, dt }
    }

    /// Number of sub-steps completed since construction or the last reset.
    pub fn step(&self) -> u64 { self.step }

    /// Fixed sub-step duration in seconds.
    pub fn dt(&self) -> F { self.dt }

    /// Elapsed simulation time, `step * dt`.
    pub fn time(&self) -> F {
        F::from_u64(self.step) * self.dt
    }

    pub(crate) fn tick(&mut self) {
        self.step += 1;
    }

    pub(crate) fn rewind(&mut self) {
        self.step = 0;
    }
}
