//! Hit detection
//!
//! A shell does not sweep its path. Each tick it looks toward every registered
//! target in turn and casts a short probe in that direction; the first probe
//! that touches something decides the hit. Shells moving faster than the
//! probe reach can skip past small parts between ticks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::parts::PartHandle;
use super::state::{Ship, ShipId};

/// A hit volume registered for probing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub ship: ShipId,
    pub part: PartHandle,
    pub center: Vec3,
    pub radius: f32,
}

/// Targets in registration order
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Register every hit-able part of a ship, in part order
    pub fn register_ship(&mut self, ship: &Ship) {
        for (part, center) in ship.hit_volumes() {
            self.register(Target {
                ship: ship.id,
                part: part.handle,
                center,
                radius: part.radius,
            });
        }
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn as_slice(&self) -> &[Target] {
        &self.targets
    }
}

/// Distance along a unit ray to the first contact with a sphere, within `max`.
///
/// An origin already inside the sphere touches at distance 0.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32, max: f32) -> Option<f32> {
    let to_center = center - origin;
    let dist_sq = to_center.length_squared();
    if dist_sq <= radius * radius {
        return Some(0.0);
    }

    let along = to_center.dot(dir);
    if along < 0.0 {
        return None; // Sphere is behind the probe
    }
    let perp_sq = dist_sq - along * along;
    if perp_sq > radius * radius {
        return None;
    }
    let t = along - (radius * radius - perp_sq).sqrt();
    (t <= max).then_some(t)
}

/// Cast one probe and return the lowest-index target it touches
pub fn probe(origin: Vec3, dir: Vec3, targets: &[Target], range: f32) -> Option<usize> {
    targets
        .iter()
        .position(|t| ray_sphere(origin, dir, t.center, t.radius, range).is_some())
}

/// Resolve the target hit by a shell at `position`, if any.
///
/// Candidates are visited in registration order; the first probe that
/// touches anything wins, and within that probe the earliest-registered
/// target wins.
pub fn detect_hit<'a>(position: Vec3, targets: &'a [Target], range: f32) -> Option<&'a Target> {
    for candidate in targets {
        let dir = (candidate.center - position).normalize_or_zero();
        if dir == Vec3::ZERO {
            // Sitting on the target's center
            return Some(candidate);
        }
        if let Some(index) = probe(position, dir, targets, range) {
            return Some(&targets[index]);
        }
    }
    None
}
