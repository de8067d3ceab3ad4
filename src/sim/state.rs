//! Entity model
//!
//! Ships own their turrets; bots own their ship; projectiles keep only the
//! id and side of whoever fired them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::parts::{PartInfo, PartLookup, ShipParts, TurretParts};
use crate::consts::*;
use crate::error::SetupResult;
use crate::{normalize_angle, yaw_rotation, yaw_to_direction};

/// Milliseconds on the host clock
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BotId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Overall match progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Running,
    /// Every bot destroyed
    Won,
    /// Player ship destroyed
    Lost,
}

/// Which side of the fight an entity is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Bot,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Bot,
            Side::Bot => Side::Player,
        }
    }
}

/// A rotating, elevating weapon mount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    /// Mount position in ship space
    pub mount_offset: Vec3,
    /// Yaw relative to the hull (radians, normalized)
    pub yaw: f32,
    /// Shared elevation of all three barrels (radians)
    pub elevation: f32,
    pub parts: TurretParts,
    /// `None` until the first shot
    pub last_shot_ms: Option<Millis>,
}

impl Turret {
    pub fn new(parts: TurretParts, mount_offset: Vec3, elevation: f32) -> Self {
        Self {
            mount_offset,
            yaw: 0.0,
            elevation,
            parts,
            last_shot_ms: None,
        }
    }

    /// Whether the cooldown has elapsed at `now`
    pub fn has_reloaded(&self, now: Millis, cooldown_ms: Millis) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => now.saturating_sub(last) > cooldown_ms,
        }
    }
}

/// A controllable vessel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub side: Side,
    pub position: Vec3,
    /// Heading (radians, normalized); yaw 0 faces -Z
    pub yaw: f32,
    /// Discrete speed level in `MIN_SPEED_LEVEL..=MAX_SPEED_LEVEL`
    pub speed_level: u8,
    pub health: i32,
    pub turrets: Vec<Turret>,
    pub parts: ShipParts,
}

impl Ship {
    /// Build a ship from its hull and turret models.
    ///
    /// Fails if either model lacks a required sub-part.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        id: ShipId,
        side: Side,
        hull: &dyn PartLookup,
        turret_model: &dyn PartLookup,
        position: Vec3,
        yaw: f32,
        health: i32,
        elevation: f32,
    ) -> SetupResult<Self> {
        let parts = ShipParts::resolve(hull)?;
        let turret = Turret::new(
            TurretParts::resolve(turret_model)?,
            parts.turret.offset,
            elevation,
        );
        Ok(Self {
            id,
            side,
            position,
            yaw: normalize_angle(yaw),
            speed_level: MIN_SPEED_LEVEL,
            health,
            turrets: vec![turret],
            parts,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Remove one point of health; never increases it
    pub fn take_hit(&mut self) {
        self.health -= 1;
    }

    /// Unit heading on the water plane
    pub fn forward(&self) -> Vec3 {
        yaw_to_direction(self.yaw)
    }

    /// Transform a ship-space point to world space
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + yaw_rotation(self.yaw) * local
    }

    pub fn turret_world_position(&self, turret: &Turret) -> Vec3 {
        self.to_world(turret.mount_offset)
    }

    pub fn turret_world_yaw(&self, turret: &Turret) -> f32 {
        normalize_angle(self.yaw + turret.yaw)
    }

    /// World-space hit volumes in stable order
    pub fn hit_volumes(&self) -> impl Iterator<Item = (PartInfo, Vec3)> + '_ {
        self.parts
            .hit_parts()
            .into_iter()
            .map(move |part| (part, self.to_world(part.offset)))
    }
}

/// Projectile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileState {
    Flying,
    /// Trajectory reached the water
    Grounded,
    /// Struck a ship part
    Hit,
}

/// A fired shell following a closed-form trajectory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: ShipId,
    pub side: Side,
    pub spawn: Vec3,
    /// Horizontal unit heading, fixed at spawn
    pub heading: Vec3,
    /// Barrel elevation at spawn, fixed
    pub elevation: f32,
    /// Forward distance traveled so far
    pub distance: f32,
    /// Current height above the water
    pub height: f32,
    pub state: ProjectileState,
}

impl Projectile {
    pub fn is_flying(&self) -> bool {
        self.state == ProjectileState::Flying
    }

    /// World position for a given traveled distance and height
    pub fn position_at(&self, distance: f32, height: f32) -> Vec3 {
        let ground = self.spawn + self.heading * distance;
        Vec3::new(ground.x, height, ground.z)
    }

    pub fn position(&self) -> Vec3 {
        self.position_at(self.distance, self.height)
    }
}

/// Bot controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotState {
    Approaching,
    Engaging,
    Dead,
}

/// A computer-controlled ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    pub ship: Ship,
    pub state: BotState,
}

impl Bot {
    pub fn new(id: BotId, ship: Ship) -> Self {
        Self {
            id,
            ship,
            state: BotState::Approaching,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == BotState::Dead || !self.ship.is_alive()
    }
}
