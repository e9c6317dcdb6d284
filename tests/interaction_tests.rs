use approx::assert_relative_eq;
use pendula::{MouseButton, MoveOutcome, PointRef, PointSet, PointerState, Simulation, SimulationConfig, Vec2, Weight};

fn lone_point(velocity: Vec2<f64>) -> (Simulation<f64>, PointRef) {
    let mut points = PointSet::new();
    let p = points.add_mass(Vec2::zero(), velocity, 1.0).unwrap();
    let sim = Simulation::new(points, vec![], SimulationConfig::new()).unwrap();
    (sim, p)
}

#[test]
fn release_throws_with_pointer_velocity() {
    let (mut sim, p) = lone_point(Vec2::zero());

    sim.press(0.1, 0.0, MouseButton::Primary);
    assert_eq!(sim.selected(), Some(p));
    sim.advance();
    assert_eq!(sim.position(p), Some(Vec2::new(0.1, 0.0)));

    sim.move_pointer(0.6, 0.2, Some(MouseButton::Primary));
    sim.advance();
    assert_eq!(sim.position(p), Some(Vec2::new(0.6, 0.2)));

    sim.release(0.6, 0.2, MouseButton::Primary);
    assert!(!sim.is_dragging());

    let frame = sim.config().frame_duration();
    let v = sim.velocity(p).unwrap();
    assert_relative_eq!(v.x, 0.5 / frame, max_relative = 1e-9);
    assert_relative_eq!(v.y, 0.2 / frame, max_relative = 1e-9);

    sim.advance();
    let pos = sim.position(p).unwrap();
    assert_relative_eq!(pos.x, 1.1, max_relative = 1e-9);
    assert_relative_eq!(pos.y, 0.4, max_relative = 1e-9);
}

#[test]
fn dragged_point_ignores_forces() {
    let mut points = PointSet::new();
    let p = points.add_mass(Vec2::zero(), Vec2::new(3.0, 3.0), 1.0).unwrap();
    let forces = vec![Weight::new([p]).unwrap().into()];
    let mut sim = Simulation::new(points, forces, SimulationConfig::new()).unwrap();

    sim.press(0.2, -0.1, MouseButton::Primary);
    for _ in 0..5 {
        sim.advance();
        assert_eq!(sim.position(p), Some(Vec2::new(0.2, -0.1)));
        assert_eq!(sim.velocity(p), Some(Vec2::zero()));
        assert_eq!(sim.acceleration(p), Some(Vec2::zero()));
    }
}

#[test]
fn anchor_can_be_dragged_and_stays_put() {
    let mut points = PointSet::new();
    let a = points.add_anchor(Vec2::new(0.0, 4.0));
    let bob = points.add_mass(Vec2::new(3.0, 4.0), Vec2::zero(), 0.1).unwrap();
    let mut sim = Simulation::new(points, vec![], SimulationConfig::new()).unwrap();

    sim.press(0.1, 4.0, MouseButton::Primary);
    assert_eq!(sim.selected(), Some(a));
    sim.move_pointer(1.0, 4.5, Some(MouseButton::Primary));
    sim.advance();
    assert_eq!(sim.position(a), Some(Vec2::new(1.0, 4.5)));

    sim.release(1.0, 4.5, MouseButton::Primary);
    sim.advance();
    assert_eq!(sim.position(a), Some(Vec2::new(1.0, 4.5)));
    assert_eq!(sim.velocity(a), None);
    assert_eq!(sim.position(bob), Some(Vec2::new(3.0, 4.0)));
}

#[test]
fn move_without_button_releases_and_throws() {
    let (mut sim, p) = lone_point(Vec2::zero());

    sim.press(0.1, 0.0, MouseButton::Primary);
    sim.move_pointer(0.5, 0.0, Some(MouseButton::Primary));
    sim.advance();
    sim.move_pointer(0.9, 0.0, None);

    assert!(!sim.is_dragging());
    let frame = sim.config().frame_duration();
    let v = sim.velocity(p).unwrap();
    assert_relative_eq!(v.x, 0.8 / frame, max_relative = 1e-9);
    assert_eq!(v.y, 0.0);
}

#[test]
fn move_with_secondary_button_releases_and_throws() {
    let (mut sim, p) = lone_point(Vec2::zero());

    sim.press(0.0, 0.0, MouseButton::Primary);
    sim.move_pointer(0.0, 0.3, Some(MouseButton::Primary));
    sim.advance();
    sim.move_pointer(0.0, 0.6, Some(MouseButton::Secondary));

    assert!(!sim.is_dragging());
    assert_eq!(sim.selected(), None);
    let frame = sim.config().frame_duration();
    let v = sim.velocity(p).unwrap();
    assert_eq!(v.x, 0.0);
    assert_relative_eq!(v.y, 0.6 / frame, max_relative = 1e-9);

    // Later moves with the primary button no longer drag anything.
    sim.move_pointer(1.0, 1.0, Some(MouseButton::Primary));
    sim.advance();
    assert_ne!(sim.position(p), Some(Vec2::new(1.0, 1.0)));
}

#[test]
fn cancel_keeps_motion() {
    let (mut sim, p) = lone_point(Vec2::new(1.0, 0.0));

    sim.press(0.0, 0.0, MouseButton::Primary);
    assert!(sim.is_dragging());
    sim.cancel_selection();
    assert!(!sim.is_dragging());
    assert_eq!(sim.velocity(p), Some(Vec2::new(1.0, 0.0)));

    sim.release(0.0, 0.0, MouseButton::Primary);
    assert_eq!(sim.velocity(p), Some(Vec2::new(1.0, 0.0)));
}

#[test]
fn only_primary_button_grabs_and_releases() {
    let (mut sim, p) = lone_point(Vec2::zero());

    sim.press(0.0, 0.0, MouseButton::Secondary);
    assert_eq!(sim.selected(), None);

    sim.press(0.0, 0.0, MouseButton::Primary);
    sim.release(0.0, 0.0, MouseButton::Middle);
    assert_eq!(sim.selected(), Some(p));
}

#[test]
fn press_far_from_points_selects_nothing() {
    let (mut sim, _) = lone_point(Vec2::zero());
    sim.press(2.0, 2.0, MouseButton::Primary);
    assert!(!sim.is_dragging());

    let mut points = PointSet::new();
    points.add_mass(Vec2::zero(), Vec2::zero(), 1.0).unwrap();
    let config = SimulationConfig::new().with_selection_radius(3.0);
    let mut wide = Simulation::new(points, vec![], config).unwrap();
    wide.press(2.0, 2.0, MouseButton::Primary);
    assert!(wide.is_dragging());
}

#[test]
fn second_press_while_dragging_ignored() {
    let mut points = PointSet::new();
    let first = points.add_mass(Vec2::zero(), Vec2::zero(), 1.0).unwrap();
    points.add_mass(Vec2::new(2.0, 0.0), Vec2::zero(), 1.0).unwrap();
    let mut sim = Simulation::new(points, vec![], SimulationConfig::new()).unwrap();

    sim.press(0.0, 0.0, MouseButton::Primary);
    sim.press(2.0, 0.0, MouseButton::Primary);
    assert_eq!(sim.selected(), Some(first));
}

#[test]
fn nearest_point_wins_and_mass_breaks_ties() {
    let mut points = PointSet::new();
    let a = points.add_anchor(Vec2::new(1.0, 0.0));
    let m = points.add_mass(Vec2::new(1.0, 0.0), Vec2::zero(), 1.0).unwrap();
    let other = points.add_mass(Vec2::new(1.3, 0.0), Vec2::zero(), 1.0).unwrap();
    let mut sim = Simulation::new(points, vec![], SimulationConfig::new()).unwrap();

    sim.press(1.0, 0.0, MouseButton::Primary);
    assert_eq!(sim.selected(), Some(m));
    assert_ne!(sim.selected(), Some(a));
    sim.cancel_selection();

    sim.press(1.25, 0.0, MouseButton::Primary);
    assert_eq!(sim.selected(), Some(other));
}

#[test]
fn pointer_state_reports_move_outcomes() {
    let mut points = PointSet::new();
    let p = points.add_mass(Vec2::zero(), Vec2::zero(), 1.0).unwrap();
    let mut state = PointerState::<f64>::default();

    assert_eq!(state.move_to(Vec2::new(1.0, 0.0), Some(MouseButton::Primary)), MoveOutcome::Ignored);
    state.press(Vec2::zero(), MouseButton::Primary, &points, 0.5);
    assert_eq!(state.move_to(Vec2::new(0.2, 0.0), Some(MouseButton::Primary)), MoveOutcome::Tracked);
    match state.move_to(Vec2::new(0.4, 0.0), Some(MouseButton::Middle)) {
        MoveOutcome::ImplicitRelease(grab) => {
            assert_eq!(grab.target, p);
            assert_eq!(grab.last, Vec2::zero());
            assert_eq!(grab.current, Vec2::new(0.2, 0.0));
        }
        other => panic!("expected implicit release, got {:?}", other),
    }
}
