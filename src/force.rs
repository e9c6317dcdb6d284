//! Forces acting on mass points.
//!
//! A [`Force`] is either a [`FieldForce`], which adds to force accumulators
//! before integration, or a [`ConstraintForce`], which corrects positions
//! after the field pass. The simulation splits the two into separate
//! collections once, at construction.

use crate::config::STANDARD_GRAVITY;
use crate::constraint::CircleRestriction;
use crate::error::SimError;
use crate::float::Float;
use crate::point::{PointRef, PointSet};
use crate::spring::Spring;
use crate::vec::Vec2;
use alloc::vec::Vec;

/// Weight `(0, -g) * m` on every listed mass point.
#[derive(Clone, Debug, PartialEq)]
pub struct Weight<F: Float> {
    points: Vec<PointRef>,
    gravity: Option<F>,
}

impl<F: Float> Weight<F> {
    /// Weight using the simulation's configured gravity.
    pub fn new(points: impl IntoIterator<Item = PointRef>) -> Result<Self, SimError> {
        let points: Vec<PointRef> = points.into_iter().collect();
        if points.iter().any(|p| !p.is_mass()) {
            return Err(SimError::DegenerateForce { reason: "weight applied to an anchor" });
        }
        Ok(Weight { points, gravity: None })
    }

    /// Use `g` instead of the configured gravity.
    pub fn with_gravity(mut self, g: F) -> Self {
        self.gravity = Some(g);
        self
    }

    pub fn points(&self) -> &[PointRef] { &self.points }

    /// Gravitational acceleration; the standard value until the simulation
    /// fills in its configured one.
    pub fn gravity(&self) -> F {
        self.gravity.unwrap_or_else(|| F::from_f64(STANDARD_GRAVITY))
    }

    pub(crate) fn resolve_gravity(&mut self, default: F) {
        self.gravity.get_or_insert(default);
    }

    fn force_on(&self, mass: F) -> Vec2<F> {
        Vec2::new(F::zero(), -self.gravity()).scale(mass)
    }

    pub fn apply(&self, points: &mut PointSet<F>) {
        for &p in &self.points {
            if let Some(m) = p.mass_index().and_then(|i| points.mass_mut(i)) {
                let f = self.force_on(m.mass());
                m.apply_force(f);
            }
        }
    }

    pub fn contribution(&self, points: &PointSet<F>, target: PointRef) -> Vec2<F> {
        if !self.points.contains(&target) {
            return Vec2::zero();
        }
        target
            .mass_index()
            .and_then(|i| points.mass(i))
            .map(|m| self.force_on(m.mass()))
            .unwrap_or_default()
    }
}

/// Linear viscous drag `-k * v` on one mass point.
#[derive(Clone, Debug, PartialEq)]
pub struct Drag<F: Float> {
    point: PointRef,
    coefficient: F,
}

impl<F: Float> Drag<F> {
    pub fn new(point: PointRef, coefficient: F) -> Result<Self, SimError> {
        if !point.is_mass() {
            return Err(SimError::DegenerateForce { reason: "drag applied to an anchor" });
        }
        if !(coefficient.is_finite() && coefficient >= F::zero()) {
            return Err(SimError::InvalidParameter {
                name: "drag coefficient",
                value: coefficient.to_f64(),
            });
        }
        Ok(Drag { point, coefficient })
    }

    pub fn point(&self) -> PointRef { self.point }
    pub fn coefficient(&self) -> F { self.coefficient }

    pub fn apply(&self, points: &mut PointSet<F>) {
        if let Some(m) = self.point.mass_index().and_then(|i| points.mass_mut(i)) {
            let f = -m.velocity().scale(self.coefficient);
            m.apply_force(f);
        }
    }

    pub fn contribution(&self, points: &PointSet<F>, target: PointRef) -> Vec2<F> {
        if target != self.point {
            return Vec2::zero();
        }
        target
            .mass_index()
            .and_then(|i| points.mass(i))
            .map(|m| -m.velocity().scale(self.coefficient))
            .unwrap_or_default()
    }
}

/// A force evaluated in the pre-integration pass.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldForce<F: Float> {
    Weight(Weight<F>),
    Spring(Spring<F>),
    Drag(Drag<F>),
}

impl<F: Float> FieldForce<F> {
    /// Add this force's contributions to the accumulators of its points.
    pub fn apply(&self, points: &mut PointSet<F>) {
        match self {
            FieldForce::Weight(w) => w.apply(points),
            FieldForce::Spring(s) => s.apply(points),
            FieldForce::Drag(d) => d.apply(points),
        }
    }

    /// What this force currently exerts on `target` (zero if unrelated).
    pub fn contribution(&self, points: &PointSet<F>, target: PointRef) -> Vec2<F> {
        match self {
            FieldForce::Weight(w) => w.contribution(points, target),
            FieldForce::Spring(s) => s.contribution(points, target),
            FieldForce::Drag(d) => d.contribution(points, target),
        }
    }

    /// Every point this force reads or writes.
    pub fn references(&self) -> Vec<PointRef> {
        match self {
            FieldForce::Weight(w) => w.points().to_vec(),
            FieldForce::Spring(s) => s.endpoints().to_vec(),
            FieldForce::Drag(d) => alloc::vec![d.point()],
        }
    }
}

/// A geometric correction run after the field pass.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstraintForce<F: Float> {
    Circle(CircleRestriction<F>),
}

impl<F: Float> ConstraintForce<F> {
    pub fn apply(&self, points: &mut PointSet<F>, dt: F) {
        match self {
            ConstraintForce::Circle(c) => c.apply(points, dt),
        }
    }

    pub fn references(&self) -> Vec<PointRef> {
        match self {
            ConstraintForce::Circle(c) => {
                let mut refs = c.points().to_vec();
                refs.push(c.center());
                refs
            }
        }
    }
}

/// Any force, as handed to [`Simulation::new`](crate::simulation::Simulation::new).
#[derive(Clone, Debug, PartialEq)]
pub enum Force<F: Float> {
    Field(FieldForce<F>),
    Constraint(ConstraintForce<F>),
}

impl<F: Float> Force<F> {
    pub fn references(&self) -> Vec<PointRef> {
        match self {
            Force::Field(f) => f.references(),
            Force::Constraint(c) => c.references(),
        }
    }
}

impl<F: Float> From<Weight<F>> for Force<F> {
    fn from(w: Weight<F>) -> Self { Force::Field(FieldForce::Weight(w)) }
}

impl<F: Float> From<Spring<F>> for Force<F> {
    fn from(s: Spring<F>) -> Self { Force::Field(FieldForce::Spring(s)) }
}

impl<F: Float> From<Drag<F>> for Force<F> {
    fn from(d: Drag<F>) -> Self { Force::Field(FieldForce::Drag(d)) }
}

impl<F: Float> From<CircleRestriction<F>> for Force<F> {
    fn from(c: CircleRestriction<F>) -> Self { Force::Constraint(ConstraintForce::Circle(c)) }
}
