//! Speed levels, yaw and barrel elevation

use super::state::{Ship, Turret};
use crate::consts::{MAX_SPEED_LEVEL, MIN_SPEED_LEVEL};
use crate::normalize_angle;

/// Step the speed level by one in the direction of `delta`.
///
/// Saturates at the bounds. Returns whether the level changed.
pub fn change_speed(ship: &mut Ship, delta: i8) -> bool {
    let next = match delta.signum() {
        1 if ship.speed_level < MAX_SPEED_LEVEL => ship.speed_level + 1,
        -1 if ship.speed_level > MIN_SPEED_LEVEL => ship.speed_level - 1,
        _ => return false,
    };
    ship.speed_level = next;
    true
}

/// Jump straight to the top speed level
pub fn full_speed(ship: &mut Ship) {
    ship.speed_level = MAX_SPEED_LEVEL;
}

pub fn turn_ship(ship: &mut Ship, yaw_delta: f32) {
    ship.yaw = normalize_angle(ship.yaw + yaw_delta);
}

pub fn turn_turret(turret: &mut Turret, yaw_delta: f32) {
    turret.yaw = normalize_angle(turret.yaw + yaw_delta);
}

/// Raise or lower all barrels together.
///
/// The whole delta is rejected when the result would leave `[min, max]`.
/// Returns whether it was applied.
pub fn elevate_barrels(turret: &mut Turret, angle_delta: f32, min: f32, max: f32) -> bool {
    let next = turret.elevation + angle_delta;
    if next < min || next > max {
        return false;
    }
    turret.elevation = next;
    true
}

/// Advance a live ship along its heading for `dt` seconds
pub fn advance_ship(ship: &mut Ship, dt: f32, speed_per_level: f32) {
    if !ship.is_alive() {
        return;
    }
    let speed = ship.speed_level as f32 * speed_per_level;
    ship.position += ship.forward() * speed * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_ELEVATION, MIN_ELEVATION};
    use crate::sim::state::{Side, fixtures};
    use glam::Vec3;
    use proptest::prelude::*;

    #[test]
    fn test_speed_saturates() {
        let mut ship = fixtures::ship(1, Side::Player, Vec3::ZERO);
        assert_eq!(ship.speed_level, 1);
        assert!(!change_speed(&mut ship, -1));
        assert!(change_speed(&mut ship, 1));
        assert!(change_speed(&mut ship, 1));
        assert!(!change_speed(&mut ship, 1));
        assert_eq!(ship.speed_level, 3);
    }

    #[test]
    fn test_elevation_edges_reachable() {
        let mut ship = fixtures::ship(1, Side::Player, Vec3::ZERO);
        let turret = &mut ship.turrets[0];
        turret.elevation = 0.5;
        assert!(elevate_barrels(turret, 0.3, MIN_ELEVATION, MAX_ELEVATION));
        assert!((turret.elevation - 0.8).abs() < 1e-6);
        assert!(!elevate_barrels(turret, 0.01, MIN_ELEVATION, MAX_ELEVATION));
        assert!((turret.elevation - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_overshooting_delta_rejected_whole() {
        let mut ship = fixtures::ship(1, Side::Player, Vec3::ZERO);
        let turret = &mut ship.turrets[0];
        turret.elevation = 0.1;
        assert!(!elevate_barrels(turret, -0.5, MIN_ELEVATION, MAX_ELEVATION));
        assert_eq!(turret.elevation, 0.1);
    }

    #[test]
    fn test_turns_wrap() {
        let mut ship = fixtures::ship(1, Side::Player, Vec3::ZERO);
        for _ in 0..100 {
            turn_ship(&mut ship, 1.0);
            turn_turret(&mut ship.turrets[0], -1.0);
        }
        assert!(ship.yaw >= -std::f32::consts::PI && ship.yaw < std::f32::consts::PI);
        assert!(ship.turrets[0].yaw >= -std::f32::consts::PI);
    }

    #[test]
    fn test_advance_uses_speed_level() {
        let mut ship = fixtures::ship(1, Side::Player, Vec3::ZERO);
        full_speed(&mut ship);
        advance_ship(&mut ship, 1.0, 2.0);
        assert!((ship.position - Vec3::new(0.0, 0.0, -6.0)).length() < 1e-5);
    }

    #[test]
    fn test_dead_ship_does_not_move() {
        let mut ship = fixtures::ship(1, Side::Bot, Vec3::ZERO);
        ship.health = 0;
        advance_ship(&mut ship, 1.0, 2.0);
        assert_eq!(ship.position, Vec3::ZERO);
    }

    proptest! {
        #[test]
        fn prop_speed_level_stays_in_range(
            steps in proptest::collection::vec(prop_oneof![Just(1i8), Just(-1i8)], 0..64),
        ) {
            let mut ship = fixtures::ship(1, Side::Player, Vec3::ZERO);
            for step in steps {
                let before = ship.speed_level;
                let changed = change_speed(&mut ship, step);
                prop_assert!((1..=3).contains(&ship.speed_level));
                if changed {
                    prop_assert_eq!(ship.speed_level as i8 - before as i8, step);
                } else {
                    prop_assert_eq!(ship.speed_level, before);
                }
            }
        }

        #[test]
        fn prop_elevation_never_leaves_clamp(
            deltas in proptest::collection::vec(-1.0f32..1.0, 0..64),
        ) {
            let mut ship = fixtures::ship(1, Side::Player, Vec3::ZERO);
            let turret = &mut ship.turrets[0];
            for delta in deltas {
                elevate_barrels(turret, delta, MIN_ELEVATION, MAX_ELEVATION);
                prop_assert!((MIN_ELEVATION..=MAX_ELEVATION).contains(&turret.elevation));
            }
        }
    }
}
