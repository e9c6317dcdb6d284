//! Pointer drag state machine.
//!
//! `Idle --press(primary, near a point)--> Dragging --release--> Idle`.
//! This module only tracks pointer positions; the simulation turns the
//! transitions into pinning and throwing.

use crate::float::Float;
use crate::point::{PointRef, PointSet};
use crate::vec::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// A point held by the pointer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grab<F: Float> {
    pub target: PointRef,
    /// Latest pointer position; the target is pinned here.
    pub current: Vec2<F>,
    /// Pointer position before the latest move.
    pub last: Vec2<F>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum PointerState<F: Float> {
    #[default]
    Idle,
    Dragging(Grab<F>),
}

/// What a pointer move did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome<F: Float> {
    /// Nothing held.
    Ignored,
    /// The held point follows the pointer.
    Tracked,
    /// A move arrived without the primary button while dragging: the
    /// release event was lost, so this move ends the drag.
    ImplicitRelease(Grab<F>),
}

impl<F: Float> PointerState<F> {
    pub fn is_dragging(&self) -> bool {
        matches!(self, PointerState::Dragging(_))
    }

    pub fn grab(&self) -> Option<&Grab<F>> {
        match self {
            PointerState::Dragging(g) => Some(g),
            PointerState::Idle => None,
        }
    }

    /// Start dragging the nearest point within `radius` of `coord`.
    ///
    /// Only the primary button selects. Returns the grabbed point.
    pub fn press(&mut self, coord: Vec2<F>, button: MouseButton, points: &PointSet<F>, radius: F) -> Option<PointRef> {
        if button != MouseButton::Primary {
            return None;
        }
        let target = points.nearest(coord, radius)?;
        *self = PointerState::Dragging(Grab { target, current: coord, last: coord });
        Some(target)
    }

    /// `button` is the button held during the move, if any.
    pub fn move_to(&mut self, coord: Vec2<F>, button: Option<MouseButton>) -> MoveOutcome<F> {
        let PointerState::Dragging(grab) = self else {
            return MoveOutcome::Ignored;
        };
        if button != Some(MouseButton::Primary) {
            let released = *grab;
            *self = PointerState::Idle;
            return MoveOutcome::ImplicitRelease(released);
        }
        grab.last = grab.current;
        grab.current = coord;
        MoveOutcome::Tracked
    }

    /// End the drag on a primary release. Returns the released grab.
    pub fn release(&mut self, button: MouseButton) -> Option<Grab<F>> {
        if button != MouseButton::Primary {
            return None;
        }
        self.cancel()
    }

    /// Back to idle, whatever the state. Returns the grab that was dropped.
    pub fn cancel(&mut self) -> Option<Grab<F>> {
        match core::mem::take(self) {
            PointerState::Dragging(g) => Some(g),
            PointerState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_point() -> (PointSet<f64>, PointRef) {
        let mut set = PointSet::new();
        let p = set.add_mass(Vec2::new(1.0, 1.0), Vec2::zero(), 1.0).unwrap();
        (set, p)
    }

    #[test]
    fn press_selects_within_radius_only() {
        let (set, p) = one_point();
        let mut state = PointerState::Idle;
        assert_eq!(state.press(Vec2::new(3.0, 3.0), MouseButton::Primary, &set, 0.5), None);
        assert!(!state.is_dragging());
        assert_eq!(state.press(Vec2::new(1.2, 1.0), MouseButton::Primary, &set, 0.5), Some(p));
        let grab = state.grab().unwrap();
        assert_eq!(grab.current, Vec2::new(1.2, 1.0));
        assert_eq!(grab.last, Vec2::new(1.2, 1.0));
    }

    #[test]
    fn secondary_press_ignored() {
        let (set, _) = one_point();
        let mut state = PointerState::Idle;
        assert_eq!(state.press(Vec2::new(1.0, 1.0), MouseButton::Secondary, &set, 0.5), None);
        assert!(!state.is_dragging());
    }

    #[test]
    fn move_shifts_current_into_last() {
        let (set, _) = one_point();
        let mut state = PointerState::Idle;
        state.press(Vec2::new(1.0, 1.0), MouseButton::Primary, &set, 0.5);
        assert_eq!(state.move_to(Vec2::new(2.0, 1.0), Some(MouseButton::Primary)), MoveOutcome::Tracked);
        assert_eq!(state.move_to(Vec2::new(3.0, 1.5), Some(MouseButton::Primary)), MoveOutcome::Tracked);
        let grab = state.grab().unwrap();
        assert_eq!(grab.last, Vec2::new(2.0, 1.0));
        assert_eq!(grab.current, Vec2::new(3.0, 1.5));
    }

    #[test]
    fn move_without_primary_releases() {
        let (set, p) = one_point();
        let mut state = PointerState::Idle;
        state.press(Vec2::new(1.0, 1.0), MouseButton::Primary, &set, 0.5);
        match state.move_to(Vec2::new(2.0, 2.0), None) {
            MoveOutcome::ImplicitRelease(g) => assert_eq!(g.target, p),
            other => panic!("expected implicit release, got {:?}", other),
        }
        assert!(!state.is_dragging());
        assert_eq!(state.move_to(Vec2::new(2.0, 2.0), None), MoveOutcome::Ignored);
    }

    #[test]
    fn only_primary_release_ends_drag() {
        let (set, _) = one_point();
        let mut state = PointerState::Idle;
        state.press(Vec2::new(1.0, 1.0), MouseButton::Primary, &set, 0.5);
        assert!(state.release(MouseButton::Middle).is_none());
        assert!(state.is_dragging());
        assert!(state.release(MouseButton::Primary).is_some());
        assert!(!state.is_dragging());
        assert!(state.cancel().is_none());
    }
}
