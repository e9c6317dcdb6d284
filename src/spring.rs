//! Hookean springs between two points.

use crate::error::SimError;
use crate::float::Float;
use crate::point::{PointRef, PointSet};
use crate::vec::Vec2;
use alloc::vec::Vec;

/// Coil segments drawn per unit of `rest_length / stiffness`.
const COIL_DENSITY: f64 = 20.0;
/// Base half-width of the drawn coil.
const COIL_BASE_WIDTH: f64 = 0.1;
/// Extra half-width per unit of stiffness.
const COIL_WIDTH_PER_STIFFNESS: f64 = 0.01;
/// Upper bound on drawn coil segments, reached by very soft springs.
pub const MAX_COILS: usize = 512;

/// Linear spring of stiffness `k` and natural length `l0` between `a` and `b`.
///
/// With `d = a - b`, the force on `a` is `-k (|d| - l0) d / |d|` and `b`
/// receives the opposite. A stretched spring pulls its ends together.
/// Anchor endpoints are only read.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring<F: Float> {
    a: PointRef,
    b: PointRef,
    stiffness: F,
    rest_length: F,
}

impl<F: Float> Spring<F> {
    pub fn new(a: PointRef, b: PointRef, stiffness: F, rest_length: F) -> Result<Self, SimError> {
        if a == b {
            return Err(SimError::DegenerateForce { reason: "spring connects a point to itself" });
        }
        if !a.is_mass() && !b.is_mass() {
            return Err(SimError::StaticSpring);
        }
        if !(stiffness.is_finite() && stiffness > F::zero()) {
            return Err(SimError::InvalidParameter {
                name: "spring stiffness",
                value: stiffness.to_f64(),
            });
        }
        if !(rest_length.is_finite() && rest_length >= F::zero()) {
            return Err(SimError::InvalidParameter {
                name: "spring rest length",
                value: rest_length.to_f64(),
            });
        }
        Ok(Spring { a, b, stiffness, rest_length })
    }

    /// A spring whose natural length is the current distance between its ends.
    pub fn from_points(a: PointRef, b: PointRef, stiffness: F, points: &PointSet<F>) -> Result<Self, SimError> {
        let pa = points.position(a).ok_or(SimError::UnknownPoint(a))?;
        let pb = points.position(b).ok_or(SimError::UnknownPoint(b))?;
        let spring = Self::new(a, b, stiffness, pa.distance(pb))?;
        spring.check_geometry(points)?;
        Ok(spring)
    }

    /// Fail if both endpoints sit on the same spot and the rest length is
    /// zero: the spring then has no direction to push along.
    pub fn check_geometry(&self, points: &PointSet<F>) -> Result<(), SimError> {
        if self.rest_length == F::zero() && self.length(points) == Some(F::zero()) {
            return Err(SimError::DegenerateForce { reason: "spring endpoints coincide" });
        }
        Ok(())
    }

    pub fn a(&self) -> PointRef { self.a }
    pub fn b(&self) -> PointRef { self.b }
    pub fn stiffness(&self) -> F { self.stiffness }
    pub fn rest_length(&self) -> F { self.rest_length }

    pub fn endpoints(&self) -> [PointRef; 2] { [self.a, self.b] }

    /// Current length; `None` if an endpoint is not in `points`.
    pub fn length(&self, points: &PointSet<F>) -> Option<F> {
        Some(points.position(self.a)?.distance(points.position(self.b)?))
    }

    /// Force currently exerted on endpoint `a` (`b` gets its negation).
    pub fn force_on_a(&self, points: &PointSet<F>) -> Option<Vec2<F>> {
        let d = points.position(self.a)? - points.position(self.b)?;
        let len = d.guarded_length();
        Some(d.scale(-self.stiffness * (len - self.rest_length) / len))
    }

    pub fn apply(&self, points: &mut PointSet<F>) {
        if let Some(f) = self.force_on_a(points) {
            points.apply_force(self.a, f);
            points.apply_force(self.b, -f);
        }
    }

    /// Force this spring exerts on `target`, zero if it is not an endpoint.
    pub fn contribution(&self, points: &PointSet<F>, target: PointRef) -> Vec2<F> {
        let f = self.force_on_a(points).unwrap_or_default();
        if target == self.a {
            f
        } else if target == self.b {
            -f
        } else {
            Vec2::zero()
        }
    }

    /// Zig-zag polyline from `a` to `b` for drawing the spring.
    ///
    /// Softer and longer springs get more coils; stiffer springs are drawn
    /// wider. The perpendicular offset is the segment direction times `i`.
    pub fn coil_polyline(&self, points: &PointSet<F>) -> Vec<Vec2<F>> {
        let (Some(pa), Some(pb)) = (points.position(self.a), points.position(self.b)) else {
            return Vec::new();
        };
        let coils = (F::from_f64(COIL_DENSITY) * self.rest_length / self.stiffness)
            .floor()
            .to_usize()
            .saturating_add(2)
            .min(MAX_COILS);
        let step = (pb - pa) / F::from_u64(coils as u64);
        let width = F::from_f64(COIL_WIDTH_PER_STIFFNESS) * self.stiffness + F::from_f64(COIL_BASE_WIDTH);
        let mut offset = step.unit() * Vec2::i() * width;

        let mut line = Vec::with_capacity(coils + 1);
        line.push(pa);
        for i in 0..coils - 1 {
            let along = F::from_u64(i as u64) + F::from_f32(0.5);
            line.push(pa + step.scale(along) + offset);
            offset = -offset;
        }
        line.push(pb);
        line
    }
}
