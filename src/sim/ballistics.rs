//! Closed-form projectile motion
//!
//! Height is a pure function of launch elevation and forward distance:
//!
//! `y(x) = y0 + tan(a)·x − g / (2·v0²·cos²(a)) · x²`
//!
//! so a shell's path is reproducible from `(a, x)` alone.

use super::state::{Projectile, ProjectileState};
use crate::tuning::Tuning;

/// Constants of the trajectory equation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistics {
    pub gravity: f32,
    pub launch_height: f32,
    pub muzzle_velocity: f32,
    pub step: f32,
}

impl Ballistics {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            gravity: tuning.gravity,
            launch_height: tuning.launch_height,
            muzzle_velocity: tuning.muzzle_velocity,
            step: tuning.projectile_step,
        }
    }

    /// Height after traveling `x` forward at elevation `alpha`
    pub fn height(&self, alpha: f32, x: f32) -> f32 {
        let x = x.abs();
        let cos = alpha.cos();
        let drop = self.gravity / (2.0 * self.muzzle_velocity * self.muzzle_velocity * cos * cos);
        self.launch_height + alpha.tan() * x - drop * x * x
    }

    /// Forward distance at which the trajectory meets the water
    pub fn landing_distance(&self, alpha: f32) -> f32 {
        // Positive root of y(x) = 0
        let cos = alpha.cos();
        let a = self.gravity / (2.0 * self.muzzle_velocity * self.muzzle_velocity * cos * cos);
        let b = alpha.tan();
        let c = self.launch_height;
        (b + (b * b + 4.0 * a * c).sqrt()) / (2.0 * a)
    }

    /// Elevation in `[min, max]` whose landing distance is closest to `range`
    pub fn elevation_for_range(&self, range: f32, min: f32, max: f32) -> f32 {
        const SAMPLES: usize = 64;
        let mut best = min;
        let mut best_err = f32::MAX;
        for i in 0..=SAMPLES {
            let alpha = min + (max - min) * i as f32 / SAMPLES as f32;
            let err = (self.landing_distance(alpha) - range).abs();
            if err < best_err {
                best_err = err;
                best = alpha;
            }
        }
        best
    }

    /// Upper bound on ticks a shell at `alpha` can stay airborne
    pub fn max_ticks(&self, alpha: f32) -> usize {
        (self.landing_distance(alpha) / self.step).ceil() as usize + 1
    }
}

/// Where a flying shell would be after one more step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// Trajectory reached the water; the shell is now grounded
    Grounded,
    /// Still airborne at the proposed distance and height, not yet committed
    Airborne { distance: f32, height: f32 },
}

/// Compute the next step of a flying shell.
///
/// Grounding is applied immediately. An airborne result is only a proposal:
/// the caller checks for hits first and then calls [`commit`].
pub fn advance(projectile: &mut Projectile, ballistics: &Ballistics) -> Option<Advance> {
    if !projectile.is_flying() {
        return None;
    }
    let distance = projectile.distance + ballistics.step;
    let height = ballistics.height(projectile.elevation, distance);
    if height <= 0.0 {
        projectile.state = ProjectileState::Grounded;
        return Some(Advance::Grounded);
    }
    Some(Advance::Airborne { distance, height })
}

/// Apply a proposed airborne step
pub fn commit(projectile: &mut Projectile, distance: f32, height: f32) {
    projectile.distance = distance;
    projectile.height = height;
}
