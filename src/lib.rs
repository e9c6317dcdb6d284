//! Sub-stepped 2D point-mass simulation.
//!
//! `pendula` simulates point masses tied together by composable forces and
//! advances them with fixed-step semi-implicit Euler, several sub-steps per
//! rendered frame. Points can be grabbed, dragged and thrown with a pointer.
//! Rendering is left to the caller: it calls [`Simulation::advance`] once
//! per frame and reads positions back.
//!
//! # Features
//!
//! - **Complex-number vectors**: `Vec2 * Vec2` multiplies as complex numbers
//! - **Anchors**: fixed, or kinematic (sinusoidal paths driven by the sim clock)
//! - **Field forces**: weight, Hookean springs, linear viscous drag
//! - **Constraints**: circular restriction with reaction on a mass center
//! - **Pointer interaction**: press/move/release drag-and-throw state machine
//! - **Trajectory history**: bounded per-point ring buffers
//! - **Observable**: Monitor sub-step phases via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use pendula::{PointSet, Simulation, SimulationConfig, Spring, Weight, Vec2, MouseButton};
//!
//! let mut points = PointSet::<f64>::new();
//! let pivot = points.add_anchor(Vec2::new(0.0, 4.0));
//! let bob = points.add_mass(Vec2::new(3.0, 4.0), Vec2::zero(), 0.1).unwrap();
//!
//! let forces = vec![
//!     Weight::new([bob]).unwrap().into(),
//!     Spring::new(pivot, bob, 5.0, 2.0).unwrap().into(),
//! ];
//! let mut sim = Simulation::new(points, forces, SimulationConfig::new()).unwrap();
//!
//! sim.advance();
//! assert!(sim.position(bob).unwrap().y < 4.0);
//!
//! sim.press(3.0, 4.0, MouseButton::Primary);
//! assert_eq!(sim.selected(), Some(bob));
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod clock;
pub mod point;
pub mod spring;
pub mod force;
pub mod constraint;
pub mod interaction;
pub mod trail;
pub mod simulation;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use clock::SimClock;
pub use point::{AnchorPoint, MassPoint, Motion, PointRef, PointSet, Sinusoid};
pub use spring::{Spring, MAX_COILS};
pub use force::{ConstraintForce, Drag, FieldForce, Force, Weight};
pub use constraint::CircleRestriction;
pub use interaction::{Grab, MouseButton, MoveOutcome, PointerState};
pub use trail::{Trail, TrailSet};
pub use simulation::Simulation;
pub use config::{SimulationConfig, TrailConfig};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::SimError;
