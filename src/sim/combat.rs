//! Damage, death and the end of the match

use serde::{Deserialize, Serialize};

use super::collision::Target;
use super::parts::PartHandle;
use super::state::{Bot, BotId, BotState, ProjectileId, Ship, ShipId};

/// Discrete things that happened during a tick, for the host to present
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ProjectileFired {
        projectile: ProjectileId,
        owner: ShipId,
    },
    ProjectileGrounded {
        projectile: ProjectileId,
    },
    ShipHit {
        ship: ShipId,
        part: PartHandle,
        health: i32,
    },
    PlayerDefeated,
    BotDefeated {
        bot: BotId,
    },
    PlayerVictorious,
}

impl GameEvent {
    /// Whether this event ends the match
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::PlayerDefeated | GameEvent::PlayerVictorious)
    }
}

/// Apply a confirmed hit on `target`.
///
/// Hits on ships that are already out of the fight are dropped.
pub fn resolve_hit(
    player: &mut Ship,
    roster: &mut Vec<Bot>,
    target: &Target,
    events: &mut Vec<GameEvent>,
) {
    if target.ship == player.id {
        if !player.is_alive() {
            return;
        }
        player.take_hit();
        events.push(GameEvent::ShipHit {
            ship: player.id,
            part: target.part,
            health: player.health,
        });
        if !player.is_alive() {
            log::info!("player ship destroyed");
            events.push(GameEvent::PlayerDefeated);
        }
        return;
    }

    let Some(index) = roster.iter().position(|b| b.ship.id == target.ship) else {
        return;
    };
    let bot = &mut roster[index];
    if bot.is_dead() {
        return;
    }
    bot.ship.take_hit();
    events.push(GameEvent::ShipHit {
        ship: bot.ship.id,
        part: target.part,
        health: bot.ship.health,
    });
    if bot.ship.is_alive() {
        return;
    }

    bot.state = BotState::Dead;
    let id = bot.id;
    roster.remove(index);
    log::info!("bot {:?} destroyed, {} remaining", id, roster.len());
    events.push(GameEvent::BotDefeated { bot: id });
    if roster.is_empty() {
        log::info!("all bots destroyed");
        events.push(GameEvent::PlayerVictorious);
    }
}
