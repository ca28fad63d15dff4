//! Unit tests for navigation.

use horde_core::{AgentId, AgentRng, PathStatus, Vec3, WaypointId};

use crate::agent::NavAgent;
use crate::error::NavError;
use crate::kinematic::KinematicNav;
use crate::waypoints::{WaypointCursor, WaypointNetwork};

fn v(x: f32, z: f32) -> Vec3 {
    Vec3 { x, y: 0.0, z }
}

fn rng() -> AgentRng {
    AgentRng::new(42, AgentId(0))
}

mod waypoints {
    use super::*;

    fn square() -> WaypointNetwork {
        WaypointNetwork::from_points(vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)])
            .unwrap()
    }

    #[test]
    fn empty_network_is_rejected() {
        assert!(matches!(
            WaypointNetwork::from_points(vec![]),
            Err(NavError::EmptyNetwork)
        ));
    }

    #[test]
    fn out_of_range_lookup_errors() {
        let net = square();
        assert!(matches!(
            net.position(WaypointId(4)),
            Err(NavError::WaypointOutOfRange(WaypointId(4)))
        ));
    }

    #[test]
    fn sequential_advance_wraps() {
        let net = square();
        let mut cursor = WaypointCursor::new(WaypointId(2), false);
        let mut rng = rng();
        assert_eq!(cursor.advance(&net, &mut rng), WaypointId(3));
        assert_eq!(cursor.advance(&net, &mut rng), WaypointId(0));
    }

    #[test]
    fn random_advance_never_repeats() {
        let net = square();
        let mut cursor = WaypointCursor::new(WaypointId(0), true);
        let mut rng = rng();
        let mut prev = cursor.current();
        for _ in 0..200 {
            let next = cursor.advance(&net, &mut rng);
            assert_ne!(next, prev);
            assert!(next.index() < net.len());
            prev = next;
        }
    }

    #[test]
    fn random_advance_on_single_waypoint_stays_put() {
        let net = WaypointNetwork::from_points(vec![v(1.0, 1.0)]).unwrap();
        let mut cursor = WaypointCursor::new(WaypointId(0), true);
        let mut rng = rng();
        assert_eq!(cursor.advance(&net, &mut rng), WaypointId(0));
    }

    #[test]
    fn random_start_is_in_range() {
        let net = square();
        let mut rng = rng();
        for _ in 0..20 {
            let cursor = WaypointCursor::random_start(&net, true, &mut rng);
            assert!(cursor.current().index() < net.len());
        }
    }
}

mod kinematic {
    use super::*;

    #[test]
    fn moves_toward_destination_and_arrives() {
        let mut nav = KinematicNav::new(v(0.0, 0.0));
        nav.set_speed(2.0);
        nav.set_destination(v(0.0, 1.0));
        nav.advance(0.25);
        assert!((nav.position().z - 0.5).abs() < 1e-4);
        assert!((nav.remaining_distance() - 0.5).abs() < 1e-4);
        nav.advance(0.25);
        assert!((nav.remaining_distance()).abs() < 1e-4);
        assert_eq!(nav.path_status(), PathStatus::Complete);
    }

    #[test]
    fn final_step_does_not_overshoot() {
        let mut nav = KinematicNav::new(v(0.0, 0.0));
        nav.set_speed(10.0);
        nav.set_destination(v(0.0, 1.0));
        nav.advance(1.0);
        assert!((nav.position().z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn stop_freezes_resume_continues() {
        let mut nav = KinematicNav::new(v(0.0, 0.0));
        nav.set_speed(1.0);
        nav.set_destination(v(0.0, 10.0));
        nav.stop();
        nav.advance(1.0);
        assert_eq!(nav.position(), v(0.0, 0.0));
        assert_eq!(nav.desired_velocity(), Vec3::ZERO);
        nav.resume();
        nav.advance(1.0);
        assert!((nav.position().z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn released_position_control_freezes_movement() {
        let mut nav = KinematicNav::new(v(0.0, 0.0));
        nav.set_speed(1.0);
        nav.set_destination(v(0.0, 10.0));
        nav.set_control(false, false);
        nav.advance(1.0);
        assert_eq!(nav.position(), v(0.0, 0.0));
    }

    #[test]
    fn paths_go_stale_after_the_window() {
        let mut nav = KinematicNav::new(v(0.0, 0.0)).with_staleness(0.5);
        nav.set_speed(1.0);
        nav.set_destination(v(0.0, 10.0));
        nav.advance(0.4);
        assert!(!nav.is_path_stale());
        nav.advance(0.2);
        assert!(nav.is_path_stale());
        // Re-pathing resets the age.
        nav.set_destination(v(0.0, 10.0));
        assert!(!nav.is_path_stale());
    }

    #[test]
    fn no_path_reports_infinite_remaining_distance() {
        let nav = KinematicNav::new(v(3.0, 4.0));
        assert!(!nav.has_path());
        assert!(nav.remaining_distance().is_infinite());
        assert_eq!(nav.steering_target(), v(3.0, 4.0));
    }

    #[test]
    fn sample_surface_projects_to_the_plane() {
        let nav = KinematicNav::new(v(0.0, 0.0));
        let p = nav.sample_surface(Vec3 { x: 1.0, y: 5.0, z: 2.0 }).unwrap();
        assert_eq!(p, v(1.0, 2.0));
    }
}
