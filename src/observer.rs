//! Step observer trait for monitoring simulation progress.

/// Trait for observing the phases of each frame.
///
/// Implement this trait to monitor the engine (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations. `step` is the sub-step index since the last reset.
pub trait StepObserver {
    /// Called after every field force has added its contribution.
    fn on_field_pass(&mut self, _step: u64) {}

    /// Called after every constraint has corrected its points.
    fn on_constraint_pass(&mut self, _step: u64) {}

    /// Called after all mass points have been integrated.
    fn on_integrate(&mut self, _step: u64) {}

    /// Called when all sub-steps of a frame are done.
    fn on_frame_complete(&mut self, _frame: u64) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
