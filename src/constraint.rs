//! Position constraints applied after the field-force pass.

use crate::error::SimError;
use crate::float::Float;
use crate::point::{PointRef, PointSet};
use crate::vec::Vec2;
use alloc::vec::Vec;

/// Keeps mass points within `radius` of `center`, like an inextensible string.
///
/// A point farther than `radius` is moved back onto the circle along the
/// center-to-point direction and loses the outward part of its velocity.
/// The reaction `m * correction / dt²` is subtracted from the center's
/// accumulator when the center is itself a mass point. Points inside or on
/// the circle are not touched.
///
/// The reaction lands after the field pass of the current sub-step, so it
/// trails the field forces by one pass. That lag is part of the model.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleRestriction<F: Float> {
    center: PointRef,
    radius: F,
    points: Vec<PointRef>,
}

impl<F: Float> CircleRestriction<F> {
    pub fn new(center: PointRef, points: impl IntoIterator<Item = PointRef>, radius: F) -> Result<Self, SimError> {
        if !(radius.is_finite() && radius > F::zero()) {
            return Err(SimError::InvalidParameter {
                name: "constraint radius",
                value: radius.to_f64(),
            });
        }
        let points: Vec<PointRef> = points.into_iter().collect();
        if points.contains(&center) {
            return Err(SimError::DegenerateForce { reason: "circle constrains its own center" });
        }
        if points.iter().any(|p| !p.is_mass()) {
            return Err(SimError::DegenerateForce { reason: "circle constrains an anchor" });
        }
        Ok(CircleRestriction { center, radius, points })
    }

    pub fn center(&self) -> PointRef { self.center }
    pub fn radius(&self) -> F { self.radius }
    pub fn points(&self) -> &[PointRef] { &self.points }

    pub fn apply(&self, points: &mut PointSet<F>, dt: F) {
        let Some(center) = points.position(self.center) else {
            return;
        };
        let inv_dt_sq = F::one() / (dt * dt);

        let mut reaction = Vec2::zero();
        for &p in &self.points {
            let Some(m) = p.mass_index().and_then(|i| points.mass_mut(i)) else {
                continue;
            };
            let rel = m.position() - center;
            let dist = rel.length();
            if !(dist > self.radius) {
                continue;
            }

            let outward = rel / dist;
            let target = center + outward.scale(self.radius);
            let correction = target - m.position();

            let radial_speed = m.velocity().dot(outward);
            if radial_speed > F::zero() {
                m.set_velocity(m.velocity() - outward.scale(radial_speed));
            }
            m.set_position(target);

            reaction += correction.scale(m.mass() * inv_dt_sq);
        }

        points.apply_force(self.center, -reaction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_point_clamped_to_radius() {
        let mut set = PointSet::<f64>::new();
        let c = set.add_anchor(Vec2::new(0.0, 0.0));
        let p = set.add_mass(Vec2::new(0.0, -3.0), Vec2::zero(), 1.0).unwrap();
        let circle = CircleRestriction::new(c, [p], 2.0).unwrap();

        circle.apply(&mut set, 0.01);
        assert_eq!(set.position(p), Some(Vec2::new(0.0, -2.0)));
    }

    #[test]
    fn inside_point_untouched() {
        let mut set = PointSet::<f64>::new();
        let c = set.add_anchor(Vec2::new(1.0, 1.0));
        let p = set.add_mass(Vec2::new(1.3, 0.2), Vec2::new(0.7, 0.1), 1.0).unwrap();
        let before = set.mass(0).unwrap().clone();
        let circle = CircleRestriction::new(c, [p], 2.0).unwrap();

        circle.apply(&mut set, 0.01);
        assert_eq!(set.mass(0).unwrap(), &before);
    }

    #[test]
    fn outward_velocity_removed_tangential_kept() {
        let mut set = PointSet::<f64>::new();
        let c = set.add_anchor(Vec2::zero());
        let p = set.add_mass(Vec2::new(3.0, 0.0), Vec2::new(4.0, 1.5), 1.0).unwrap();
        CircleRestriction::new(c, [p], 1.0).unwrap().apply(&mut set, 0.01);
        assert_eq!(set.mass(0).unwrap().velocity(), Vec2::new(0.0, 1.5));
    }

    #[test]
    fn reaction_pulls_mass_center_towards_point() {
        let mut set = PointSet::<f64>::new();
        let c = set.add_mass(Vec2::zero(), Vec2::zero(), 1.0).unwrap();
        let p = set.add_mass(Vec2::new(0.0, -1.5), Vec2::zero(), 2.0).unwrap();
        CircleRestriction::new(c, [p], 1.0).unwrap().apply(&mut set, 0.5);

        // correction (0, 0.5), reaction = 2 * 0.5 / 0.25 = 4 towards the center,
        // the center feels the opposite.
        assert_eq!(set.mass(0).unwrap().force(), Vec2::new(0.0, -4.0));
        assert_eq!(set.mass(1).unwrap().force(), Vec2::zero());
    }

    #[test]
    fn rejects_bad_configuration() {
        let mut set = PointSet::<f64>::new();
        let a = set.add_anchor(Vec2::zero());
        let b = set.add_anchor(Vec2::new(1.0, 0.0));
        let m = set.add_mass(Vec2::new(2.0, 0.0), Vec2::zero(), 1.0).unwrap();

        assert!(CircleRestriction::new(a, [m], 0.0).is_err());
        assert!(CircleRestriction::new(m, [m], 1.0).is_err());
        assert!(CircleRestriction::new(a, [b], 1.0).is_err());
    }
}
