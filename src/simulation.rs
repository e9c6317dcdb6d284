//! The simulation engine: sub-stepped integration and pointer interaction.

use crate::clock::SimClock;
use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::float::Float;
use crate::force::{ConstraintForce, FieldForce, Force};
use crate::interaction::{Grab, MouseButton, MoveOutcome, PointerState};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::point::{PointRef, PointSet};
use crate::trail::{Trail, TrailSet};
use crate::vec::Vec2;
use alloc::vec::Vec;
use tracing::{debug, info, warn};

/// Owns every point and force and advances them frame by frame.
///
/// Each call to [`advance`](Self::advance) runs `sub_steps` sub-steps of
/// fixed duration `dt`. A sub-step drives kinematic anchors, runs the field
/// forces, then the constraints, pins the dragged point (if any), integrates
/// every mass point and ticks the clock.
#[derive(Clone, Debug)]
pub struct Simulation<F: Float> {
    points: PointSet<F>,
    field_forces: Vec<FieldForce<F>>,
    constraints: Vec<ConstraintForce<F>>,
    config: SimulationConfig<F>,
    clock: SimClock<F>,
    frame: u64,
    pointer: PointerState<F>,
    trails: TrailSet<F>,
}

impl<F: Float> Simulation<F> {
    /// Build a simulation, checking the configuration, that every force
    /// only references points in `points`, and that no zero-length spring
    /// starts with coincident endpoints.
    pub fn new(points: PointSet<F>, forces: Vec<Force<F>>, config: SimulationConfig<F>) -> Result<Self, SimError> {
        config.validate()?;
        for force in &forces {
            for point in force.references() {
                points.check(point)?;
            }
            if let Force::Field(FieldForce::Spring(spring)) = force {
                spring.check_geometry(&points)?;
            }
        }

        let mut field_forces = Vec::new();
        let mut constraints = Vec::new();
        for force in forces {
            match force {
                Force::Field(FieldForce::Weight(mut w)) => {
                    w.resolve_gravity(config.gravity);
                    field_forces.push(FieldForce::Weight(w));
                }
                Force::Field(f) => field_forces.push(f),
                Force::Constraint(c) => constraints.push(c),
            }
        }

        let clock = SimClock::new(config.dt());
        let trails = TrailSet::new(points.mass_count(), config.trail);
        info!(
            anchors = points.anchor_count(),
            masses = points.mass_count(),
            field_forces = field_forces.len(),
            constraints = constraints.len(),
            sub_steps = config.sub_steps,
            dt = %clock.dt(),
            "simulation built"
        );

        let mut sim = Simulation {
            points,
            field_forces,
            constraints,
            config,
            clock,
            frame: 0,
            pointer: PointerState::Idle,
            trails,
        };
        sim.record_trails();
        Ok(sim)
    }

    /// Run one rendered frame's worth of sub-steps.
    pub fn advance(&mut self) {
        self.advance_with(&mut NoOpStepObserver);
    }

    pub fn advance_with<O: StepObserver>(&mut self, observer: &mut O) {
        for _ in 0..self.config.sub_steps {
            self.sub_step(observer);
        }
        self.frame += 1;
        self.record_trails();
        observer.on_frame_complete(self.frame);
    }

    fn sub_step<O: StepObserver>(&mut self, observer: &mut O) {
        let step = self.clock.step();
        let dt = self.clock.dt();

        for anchor in self.points.anchors_mut() {
            anchor.drive(&self.clock);
        }

        for force in &self.field_forces {
            force.apply(&mut self.points);
        }
        observer.on_field_pass(step);

        for constraint in &self.constraints {
            constraint.apply(&mut self.points, dt);
        }
        observer.on_constraint_pass(step);

        self.pin_grabbed_point();

        for point in self.points.masses_mut() {
            point.integrate(dt);
        }
        observer.on_integrate(step);

        self.clock.tick();
    }

    fn pin_grabbed_point(&mut self) {
        let Some(grab) = self.pointer.grab().copied() else {
            return;
        };
        match grab.target {
            PointRef::Mass(i) => {
                if let Some(m) = self.points.mass_mut(i) {
                    m.apply_pointer_override(grab.current);
                }
            }
            PointRef::Anchor(i) => {
                if let Some(a) = self.points.anchors_mut().get_mut(i) {
                    a.apply_pointer_override(grab.current);
                }
            }
        }
    }

    fn record_trails(&mut self) {
        let positions = self.points.masses().iter().map(|m| m.position());
        self.trails.record(self.frame, positions);
    }

    /// Restore every mass point to its initial state and rewind time.
    ///
    /// Forces and topology are unchanged; fixed anchors stay where they are,
    /// kinematic anchors return to their `t = 0` position. A drag in
    /// progress is cancelled.
    pub fn reset(&mut self) {
        for point in self.points.masses_mut() {
            point.reset();
        }
        self.clock.rewind();
        self.frame = 0;
        for anchor in self.points.anchors_mut() {
            anchor.drive(&self.clock);
        }
        self.pointer.cancel();
        self.trails.clear();
        self.record_trails();
        debug!("simulation reset");
    }

    /// Pointer pressed at `(x, y)`. A primary press near a point grabs it.
    pub fn press(&mut self, x: F, y: F, button: MouseButton) {
        if self.pointer.is_dragging() {
            return;
        }
        let coord = Vec2::new(x, y);
        if let Some(point) = self.pointer.press(coord, button, &self.points, self.config.selection_radius) {
            debug!(?point, x = %x, y = %y, "point grabbed");
        }
    }

    /// Pointer moved to `(x, y)` with `button` held (`None` if no button is held).
    ///
    /// Moving without the primary button while dragging is taken as a lost
    /// release event and ends the drag there.
    pub fn move_pointer(&mut self, x: F, y: F, button: Option<MouseButton>) {
        let coord = Vec2::new(x, y);
        if let MoveOutcome::ImplicitRelease(grab) = self.pointer.move_to(coord, button) {
            warn!(point = ?grab.target, ?button, "pointer moved without primary button while dragging, releasing");
            self.throw(grab, coord);
        }
    }

    /// Pointer released at `(x, y)`. A primary release ends the drag and
    /// gives a grabbed mass point the pointer's velocity over the last frame.
    pub fn release(&mut self, x: F, y: F, button: MouseButton) {
        if let Some(grab) = self.pointer.release(button) {
            self.throw(grab, Vec2::new(x, y));
        }
    }

    /// Drop the current grab without changing any point's motion.
    pub fn cancel_selection(&mut self) {
        if let Some(grab) = self.pointer.cancel() {
            debug!(point = ?grab.target, "selection cancelled");
        }
    }

    fn throw(&mut self, grab: Grab<F>, coord: Vec2<F>) {
        let frame_time = self.clock.dt() * F::from_u64(self.config.sub_steps as u64);
        let velocity = (coord - grab.last) / frame_time;
        if let Some(m) = grab.target.mass_index().and_then(|i| self.points.mass_mut(i)) {
            m.set_velocity(velocity);
            debug!(point = ?grab.target, vx = %velocity.x, vy = %velocity.y, "point released");
        } else {
            debug!(point = ?grab.target, "anchor released");
        }
    }

    pub fn position(&self, point: PointRef) -> Option<Vec2<F>> {
        self.points.position(point)
    }

    /// Velocity of a mass point; `None` for anchors.
    pub fn velocity(&self, point: PointRef) -> Option<Vec2<F>> {
        let i = point.mass_index()?;
        self.points.mass(i).map(|m| m.velocity())
    }

    /// Acceleration of a mass point over its last sub-step; `None` for anchors.
    pub fn acceleration(&self, point: PointRef) -> Option<Vec2<F>> {
        let i = point.mass_index()?;
        self.points.mass(i).map(|m| m.acceleration())
    }

    /// Sum of what the field forces currently exert on `point`.
    pub fn field_force_on(&self, point: PointRef) -> Vec2<F> {
        self.field_forces
            .iter()
            .fold(Vec2::zero(), |acc, f| acc + f.contribution(&self.points, point))
    }

    /// Recorded positions of a mass point, oldest first.
    pub fn trail(&self, point: PointRef) -> Option<&Trail<F>> {
        self.trails.get(point.mass_index()?)
    }

    pub fn points(&self) -> &PointSet<F> { &self.points }
    pub fn field_forces(&self) -> &[FieldForce<F>] { &self.field_forces }
    pub fn constraints(&self) -> &[ConstraintForce<F>] { &self.constraints }
    pub fn config(&self) -> &SimulationConfig<F> { &self.config }
    pub fn clock(&self) -> &SimClock<F> { &self.clock }
    pub fn dt(&self) -> F { self.clock.dt() }

    /// Frames advanced since construction or the last reset.
    pub fn frame(&self) -> u64 { self.frame }

    pub fn is_dragging(&self) -> bool { self.pointer.is_dragging() }

    /// The point currently held by the pointer.
    pub fn selected(&self) -> Option<PointRef> {
        self.pointer.grab().map(|g| g.target)
    }

    pub fn kinetic_energy(&self) -> F {
        self.points.masses().iter().fold(F::zero(), |acc, m| acc + m.kinetic_energy())
    }

    /// Total linear momentum of the mass points.
    pub fn momentum(&self) -> Vec2<F> {
        self.points.masses().iter().fold(Vec2::zero(), |acc, m| acc + m.momentum())
    }
}
