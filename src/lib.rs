//! Broadside - naval combat simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ships, turrets, ballistics, hits, bot AI)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser host bindings
//! - `error`: Setup/integrity errors

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{SetupError, SetupResult};
pub use tuning::{BotPolicy, OrphanShotPolicy, Tuning};

use glam::{Quat, Vec3};

/// Game configuration constants
pub mod consts {
    /// Simulation tick period (one display refresh at ~60 Hz)
    pub const FRAME_PERIOD_MS: u64 = 16;
    /// Bot decision period
    pub const AI_PERIOD_MS: u64 = 1000;

    /// Minimum time between two shots from the same turret
    pub const TURRET_COOLDOWN_MS: u64 = 2000;
    /// Spawn offset below the turret origin so the bolt leaves at barrel height
    pub const MUZZLE_DROP: f32 = 1.0;

    /// Barrel elevation clamp (radians)
    pub const MIN_ELEVATION: f32 = 0.02;
    pub const MAX_ELEVATION: f32 = 0.80;

    /// Ship speed levels
    pub const MIN_SPEED_LEVEL: u8 = 1;
    pub const MAX_SPEED_LEVEL: u8 = 3;
    /// Distance units per second for each speed level
    pub const SHIP_SPEED_PER_LEVEL: f32 = 2.0;

    /// Ballistics: gravity, launch height, muzzle velocity, forward step per tick
    pub const GRAVITY: f32 = 9.81;
    pub const LAUNCH_HEIGHT: f32 = 5.0;
    pub const MUZZLE_VELOCITY: f32 = 50.0;
    pub const PROJECTILE_STEP: f32 = 2.0;

    /// Effective reach of the hit probe
    pub const PROBE_RANGE: f32 = 3.0;

    /// Intent step sizes (radians per key press)
    pub const SHIP_TURN_STEP: f32 = 0.05;
    pub const TURRET_TURN_STEP: f32 = 0.05;
    pub const ELEVATION_STEP: f32 = 0.02;

    /// Match setup
    pub const PLAYER_HEALTH: i32 = 5;
    pub const BOT_HEALTH: i32 = 3;
    pub const BOT_COUNT: usize = 3;
    pub const BOT_SPAWN_RADIUS: f32 = 120.0;

    /// Bot policy defaults
    pub const APPROACH_DISTANCE: f32 = 50.0;
    pub const FULL_SPEED_DISTANCE: f32 = 80.0;
    pub const SHARP_TURN_THRESHOLD: f32 = 0.7;
    pub const RANDOM_TURN_THRESHOLD: f32 = 0.4;
    pub const RANDOM_TURN_MAX_DEG: f32 = 40.0;
    pub const SHARP_TURN_JITTER_DEG: f32 = 10.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Rotation about the vertical axis
#[inline]
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

/// Horizontal unit vector for a yaw angle (yaw 0 faces -Z)
#[inline]
pub fn yaw_to_direction(yaw: f32) -> Vec3 {
    yaw_rotation(yaw) * Vec3::NEG_Z
}

/// Yaw that faces from `from` toward `to`, ignoring height
#[inline]
pub fn yaw_toward(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    (-d.x).atan2(-d.z)
}
