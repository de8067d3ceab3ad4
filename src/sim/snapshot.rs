//! Read-only view of a match for the renderer

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{
    Bot, BotId, BotState, MatchPhase, Millis, Projectile, ProjectileId, Ship, ShipId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretSnapshot {
    pub world_position: Vec3,
    pub world_yaw: f32,
    pub elevation: f32,
    /// Whether the turret could fire right now
    pub ready: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipSnapshot {
    pub id: ShipId,
    pub position: Vec3,
    pub yaw: f32,
    pub speed_level: u8,
    pub health: i32,
    pub turrets: Vec<TurretSnapshot>,
}

impl ShipSnapshot {
    pub fn capture(ship: &Ship, now: Millis, cooldown_ms: Millis) -> Self {
        Self {
            id: ship.id,
            position: ship.position,
            yaw: ship.yaw,
            speed_level: ship.speed_level,
            health: ship.health,
            turrets: ship
                .turrets
                .iter()
                .map(|t| TurretSnapshot {
                    world_position: ship.turret_world_position(t),
                    world_yaw: ship.turret_world_yaw(t),
                    elevation: t.elevation,
                    ready: t.has_reloaded(now, cooldown_ms),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSnapshot {
    pub id: BotId,
    pub state: BotState,
    pub ship: ShipSnapshot,
}

impl BotSnapshot {
    pub fn capture(bot: &Bot, now: Millis, cooldown_ms: Millis) -> Self {
        Self {
            id: bot.id,
            state: bot.state,
            ship: ShipSnapshot::capture(&bot.ship, now, cooldown_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub id: ProjectileId,
    pub owner: ShipId,
    pub position: Vec3,
    pub heading: Vec3,
}

impl From<&Projectile> for ProjectileSnapshot {
    fn from(p: &Projectile) -> Self {
        Self {
            id: p.id,
            owner: p.owner,
            position: p.position(),
            heading: p.heading,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time_ms: Millis,
    pub phase: MatchPhase,
    pub player: ShipSnapshot,
    pub bots: Vec<BotSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
}
