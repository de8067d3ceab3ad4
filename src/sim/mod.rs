//! Deterministic simulation module
//!
//! All combat logic lives here. This module must be pure and deterministic:
//! - Host-supplied clock only
//! - Seeded RNG only
//! - Stable iteration order (registration order)
//! - No rendering or platform dependencies

pub mod ballistics;
pub mod bot;
pub mod collision;
pub mod combat;
pub mod movement;
pub mod parts;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod weapon;

pub use ballistics::{Advance, Ballistics};
pub use bot::{BotDecision, Steering};
pub use collision::{Target, TargetRegistry, detect_hit};
pub use combat::{GameEvent, resolve_hit};
pub use parts::{PartHandle, PartInfo, PartLookup, ShipParts, StaticModel, TurretParts};
pub use schedule::{Scheduler, TaskKey};
pub use snapshot::{BotSnapshot, MatchSnapshot, ProjectileSnapshot, ShipSnapshot, TurretSnapshot};
pub use state::{
    Bot, BotId, BotState, MatchPhase, Millis, Projectile, ProjectileId, ProjectileState, Ship,
    ShipId, Side, Turret,
};
pub use tick::{Intent, Match};
pub use weapon::fire;
