//! Cooldown-gated firing

use glam::Vec3;

use super::state::{Millis, Projectile, ProjectileId, ProjectileState, Ship};
use crate::tuning::Tuning;
use crate::yaw_to_direction;

/// Fire turret `turret_index` of `ship` at time `now`.
///
/// Returns `None` while the turret is reloading (or the index is out of
/// range). On success the turret's shot timestamp is updated before the
/// projectile is handed back, so a second call at the same instant fails.
pub fn fire(
    ship: &mut Ship,
    turret_index: usize,
    now: Millis,
    next_projectile_id: &mut u32,
    tuning: &Tuning,
) -> Option<Projectile> {
    let turret = ship.turrets.get(turret_index)?;
    if !turret.has_reloaded(now, tuning.cooldown_ms) {
        return None;
    }

    let spawn = ship.turret_world_position(turret) - Vec3::Y * tuning.muzzle_drop;
    let heading = yaw_to_direction(ship.turret_world_yaw(turret));
    let elevation = turret.elevation;

    // Stamp before building the shell
    ship.turrets[turret_index].last_shot_ms = Some(now);

    let id = ProjectileId(*next_projectile_id);
    *next_projectile_id = next_projectile_id.wrapping_add(1);

    log::debug!(
        "ship {:?} fired projectile {:?} at {} ms (elevation {:.3})",
        ship.id,
        id,
        now,
        elevation
    );

    Some(Projectile {
        id,
        owner: ship.id,
        side: ship.side,
        spawn,
        heading,
        elevation,
        distance: 0.0,
        height: spawn.y,
        state: ProjectileState::Flying,
    })
}
