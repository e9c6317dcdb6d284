//! Anchors, kinematic anchors and mass points.

use crate::clock::SimClock;
use crate::error::SimError;
use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to a point owned by a [`PointSet`].
///
/// The tag says which collection the index refers to. Only `Mass` handles
/// reach velocity, mass and the force accumulator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointRef {
    Anchor(usize),
    Mass(usize),
}

impl PointRef {
    /// Index into the mass collection, if this is a mass point.
    pub fn mass_index(self) -> Option<usize> {
        match self {
            PointRef::Mass(i) => Some(i),
            PointRef::Anchor(_) => None,
        }
    }

    pub fn is_mass(self) -> bool {
        matches!(self, PointRef::Mass(_))
    }
}

/// Prescribed motion `center + amplitude * (sin_factor * sin(wt) + cos_factor * cos(wt))`.
///
/// All products are complex, so `amplitude` scales and rotates the path.
/// With the default factors (`cos_factor = 1`, `sin_factor = i`) the point
/// runs counter-clockwise on a circle of radius `|amplitude|`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sinusoid<F: Float> {
    pub center: Vec2<F>,
    pub amplitude: Vec2<F>,
    /// Angular frequency in rad/s.
    pub pulsation: F,
    pub cos_factor: Vec2<F>,
    pub sin_factor: Vec2<F>,
}

impl<F: Float> Sinusoid<F> {
    pub fn new(center: Vec2<F>, amplitude: Vec2<F>, pulsation: F) -> Self {
        Sinusoid {
            center,
            amplitude,
            pulsation,
            cos_factor: Vec2::one(),
            sin_factor: Vec2::i(),
        }
    }

    /// Override the complex factors of the cosine and sine terms.
    ///
    /// `(Vec2::zero(), Vec2::one())` gives a straight back-and-forth along
    /// `amplitude`.
    pub fn with_factors(mut self, cos_factor: Vec2<F>, sin_factor: Vec2<F>) -> Self {
        self.cos_factor = cos_factor;
        self.sin_factor = sin_factor;
        self
    }

    pub fn position_at(&self, t: F) -> Vec2<F> {
        let phase = self.pulsation * t;
        self.center
            + self.amplitude * (self.sin_factor.scale(phase.sin()) + self.cos_factor.scale(phase.cos()))
    }
}

/// How an anchor moves, if at all.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Motion<F: Float> {
    Fixed,
    Sinusoidal(Sinusoid<F>),
}

/// A point with no dynamics: fixed, or driven by a function of time.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorPoint<F: Float> {
    position: Vec2<F>,
    motion: Motion<F>,
}

impl<F: Float> AnchorPoint<F> {
    pub fn fixed(position: Vec2<F>) -> Self {
        AnchorPoint { position, motion: Motion::Fixed }
    }

    /// An anchor following `path`, placed at its `t = 0` position.
    pub fn kinematic(path: Sinusoid<F>) -> Self {
        AnchorPoint {
            position: path.position_at(F::zero()),
            motion: Motion::Sinusoidal(path),
        }
    }

    pub fn position(&self) -> Vec2<F> { self.position }

    pub fn motion(&self) -> &Motion<F> { &self.motion }

    pub fn is_kinematic(&self) -> bool {
        !matches!(self.motion, Motion::Fixed)
    }

    /// Recompute a kinematic anchor's position for the clock's current time.
    /// Fixed anchors are left alone.
    pub fn drive(&mut self, clock: &SimClock<F>) {
        if let Motion::Sinusoidal(path) = &self.motion {
            self.position = path.position_at(clock.time());
        }
    }

    /// Move the anchor to the pointer while it is dragged.
    pub fn apply_pointer_override(&mut self, target: Vec2<F>) {
        self.position = target;
    }
}

/// A dynamic point integrated with semi-implicit Euler.
#[derive(Clone, Debug, PartialEq)]
pub struct MassPoint<F: Float> {
    position: Vec2<F>,
    velocity: Vec2<F>,
    mass: F,
    force: Vec2<F>,
    acceleration: Vec2<F>,
    initial_position: Vec2<F>,
    initial_velocity: Vec2<F>,
}

impl<F: Float> MassPoint<F> {
    pub fn new(position: Vec2<F>, velocity: Vec2<F>, mass: F) -> Result<Self, SimError> {
        if !(mass.is_finite() && mass > F::zero()) {
            return Err(SimError::InvalidMass { mass: mass.to_f64() });
        }
        Ok(MassPoint {
            position,
            velocity,
            mass,
            force: Vec2::zero(),
            acceleration: Vec2::zero(),
            initial_position: position,
            initial_velocity: velocity,
        })
    }

    /// A mass point starting at rest.
    pub fn at_rest(position: Vec2<F>, mass: F) -> Result<Self, SimError> {
        Self::new(position, Vec2::zero(), mass)
    }

    pub fn position(&self) -> Vec2<F> { self.position }
    pub fn velocity(&self) -> Vec2<F> { self.velocity }
    pub fn mass(&self) -> F { self.mass }

    /// Force accumulated so far in the current sub-step.
    pub fn force(&self) -> Vec2<F> { self.force }

    /// `force / mass` as it stood just before the last integration cleared it.
    pub fn acceleration(&self) -> Vec2<F> { self.acceleration }

    pub fn initial_position(&self) -> Vec2<F> { self.initial_position }
    pub fn initial_velocity(&self) -> Vec2<F> { self.initial_velocity }

    pub fn momentum(&self) -> Vec2<F> { self.velocity.scale(self.mass) }

    pub fn kinetic_energy(&self) -> F {
        self.mass * self.velocity.length_sq() / F::from_f32(2.0)
    }

    pub fn apply_force(&mut self, force: Vec2<F>) {
        self.force += force;
    }

    /// One semi-implicit Euler step.
    ///
    /// Position advances with the velocity from *before* this step's
    /// update, then velocity takes the accumulated force. Swapping the two
    /// changes every trajectory.
    pub fn integrate(&mut self, dt: F) {
        self.position += self.velocity.scale(dt);
        self.velocity += self.force.scale(dt / self.mass);
        self.acceleration = self.force / self.mass;
        self.force = Vec2::zero();
    }

    /// Pin to the pointer: the point behaves as kinematic for this sub-step.
    pub fn apply_pointer_override(&mut self, target: Vec2<F>) {
        self.position = target;
        self.velocity = Vec2::zero();
        self.force = Vec2::zero();
    }

    pub(crate) fn set_position(&mut self, position: Vec2<F>) {
        self.position = position;
    }

    pub(crate) fn set_velocity(&mut self, velocity: Vec2<F>) {
        self.velocity = velocity;
    }

    /// Back to the state captured at construction.
    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.velocity = self.initial_velocity;
        self.force = Vec2::zero();
        self.acceleration = Vec2::zero();
    }
}

/// Owner of every point in a simulation, anchors and masses kept apart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet<F: Float> {
    anchors: Vec<AnchorPoint<F>>,
    masses: Vec<MassPoint<F>>,
}

impl<F: Float> PointSet<F> {
    pub fn new() -> Self {
        PointSet { anchors: Vec::new(), masses: Vec::new() }
    }

    pub fn add_anchor(&mut self, position: Vec2<F>) -> PointRef {
        self.push_anchor(AnchorPoint::fixed(position))
    }

    pub fn add_kinematic(&mut self, path: Sinusoid<F>) -> PointRef {
        self.push_anchor(AnchorPoint::kinematic(path))
    }

    pub fn push_anchor(&mut self, anchor: AnchorPoint<F>) -> PointRef {
        let idx = self.anchors.len();
        self.anchors.push(anchor);
        PointRef::Anchor(idx)
    }

    /// Add a mass point; fails on a non-positive or non-finite mass.
    pub fn add_mass(&mut self, position: Vec2<F>, velocity: Vec2<F>, mass: F) -> Result<PointRef, SimError> {
        let point = MassPoint::new(position, velocity, mass)?;
        Ok(self.push_mass(point))
    }

    pub fn push_mass(&mut self, point: MassPoint<F>) -> PointRef {
        let idx = self.masses.len();
        self.masses.push(point);
        PointRef::Mass(idx)
    }

    pub fn contains(&self, point: PointRef) -> bool {
        match point {
            PointRef::Anchor(i) => i < self.anchors.len(),
            PointRef::Mass(i) => i < self.masses.len(),
        }
    }

    /// Fail with [`SimError::UnknownPoint`] unless `point` is in the set.
    pub fn check(&self, point: PointRef) -> Result<(), SimError> {
        if self.contains(point) { Ok(()) } else { Err(SimError::UnknownPoint(point)) }
    }

    pub fn position(&self, point: PointRef) -> Option<Vec2<F>> {
        match point {
            PointRef::Anchor(i) => self.anchors.get(i).map(AnchorPoint::position),
            PointRef::Mass(i) => self.masses.get(i).map(MassPoint::position),
        }
    }

    pub fn anchor(&self, index: usize) -> Option<&AnchorPoint<F>> { self.anchors.get(index) }
    pub fn mass(&self, index: usize) -> Option<&MassPoint<F>> { self.masses.get(index) }
    pub fn mass_mut(&mut self, index: usize) -> Option<&mut MassPoint<F>> { self.masses.get_mut(index) }

    pub fn anchors(&self) -> &[AnchorPoint<F>] { &self.anchors }
    pub fn masses(&self) -> &[MassPoint<F>] { &self.masses }

    pub(crate) fn anchors_mut(&mut self) -> &mut [AnchorPoint<F>] { &mut self.anchors }
    pub(crate) fn masses_mut(&mut self) -> &mut [MassPoint<F>] { &mut self.masses }

    /// Accumulate `force` on `point` if it is a mass point. Anchors are read-only.
    pub fn apply_force(&mut self, point: PointRef, force: Vec2<F>) {
        if let PointRef::Mass(i) = point {
            if let Some(m) = self.masses.get_mut(i) {
                m.apply_force(force);
            }
        }
    }

    pub fn anchor_count(&self) -> usize { self.anchors.len() }
    pub fn mass_count(&self) -> usize { self.masses.len() }
    pub fn len(&self) -> usize { self.anchors.len() + self.masses.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Nearest point of either kind within `radius` of `coord`.
    ///
    /// On an exact tie a mass point wins over an anchor.
    pub fn nearest(&self, coord: Vec2<F>, radius: F) -> Option<PointRef> {
        let masses = self.masses.iter().enumerate()
            .map(|(i, m)| (PointRef::Mass(i), m.position()));
        let anchors = self.anchors.iter().enumerate()
            .map(|(i, a)| (PointRef::Anchor(i), a.position()));

        let mut best: Option<(PointRef, F)> = None;
        for (point, pos) in masses.chain(anchors) {
            let d = pos.distance(coord);
            if !(d <= radius) {
                continue;
            }
            match best {
                Some((_, best_d)) if best_d <= d => {}
                _ => best = Some((point, d)),
            }
        }
        best.map(|(point, _)| point)
    }
}
