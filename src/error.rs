//! Error types for simulation construction.
//!
//! Every error is a configuration error detected once, when a point, force
//! or simulation is built. Stepping a built simulation never fails; numeric
//! degeneracies such as coincident points are absorbed by
//! [`Vec2::guarded_length`](crate::vec::Vec2::guarded_length).

use crate::point::PointRef;
use thiserror::Error;

/// Errors that can occur while building a simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite, got {mass}")]
    InvalidMass { mass: f64 },

    /// At least one sub-step per frame is required.
    #[error("sub-step count must be at least 1")]
    InvalidSubSteps,

    /// Frame interval must be positive and finite.
    #[error("frame interval must be positive and finite, got {interval_ms} ms")]
    InvalidFrameInterval { interval_ms: f64 },

    /// A named force or configuration parameter is out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A force references a point the simulation does not own.
    #[error("unknown point reference {0:?}")]
    UnknownPoint(PointRef),

    /// A spring between two anchors can never move anything.
    #[error("spring has no mass point endpoint")]
    StaticSpring,

    /// A force whose geometry is undefined.
    #[error("degenerate force: {reason}")]
    DegenerateForce { reason: &'static str },
}
