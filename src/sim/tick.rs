//! Match loop
//!
//! Owns every entity and drives them from two clocks: the frame clock moves
//! ships and shells, the AI clock runs bot decisions. The host feeds intents
//! and wall-clock time in, and reads snapshots and events out.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ballistics::{self, Advance, Ballistics};
use super::bot;
use super::collision::{TargetRegistry, detect_hit};
use super::combat::{GameEvent, resolve_hit};
use super::movement::{advance_ship, change_speed, elevate_barrels, turn_ship, turn_turret};
use super::parts::{PartLookup, StaticModel};
use super::schedule::{Scheduler, TaskKey};
use super::snapshot::{BotSnapshot, MatchSnapshot, ProjectileSnapshot, ShipSnapshot};
use super::state::{
    Bot, BotId, MatchPhase, Millis, Projectile, ProjectileId, ProjectileState, Ship, ShipId, Side,
};
use super::weapon::fire;
use crate::error::SetupResult;
use crate::tuning::{OrphanShotPolicy, Tuning};
use crate::yaw_toward;

/// Player commands, one per key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Fire,
    AccelerateShip,
    DecelerateShip,
    TurnShipLeft,
    TurnShipRight,
    TurnTurretLeft,
    TurnTurretRight,
    ElevateBarrelsUp,
    ElevateBarrelsDown,
}

impl Intent {
    /// Stock key layout; accepts `KeyboardEvent.code` or `.key` values
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "space" | " " => Some(Intent::Fire),
            "keyw" | "w" | "arrowup" => Some(Intent::AccelerateShip),
            "keys" | "s" | "arrowdown" => Some(Intent::DecelerateShip),
            "keya" | "a" | "arrowleft" => Some(Intent::TurnShipLeft),
            "keyd" | "d" | "arrowright" => Some(Intent::TurnShipRight),
            "keyq" | "q" => Some(Intent::TurnTurretLeft),
            "keye" | "e" => Some(Intent::TurnTurretRight),
            "keyr" | "r" => Some(Intent::ElevateBarrelsUp),
            "keyf" | "f" => Some(Intent::ElevateBarrelsDown),
            _ => None,
        }
    }
}

/// A single match: one player ship against a roster of bots
pub struct Match {
    pub tuning: Tuning,
    pub ballistics: Ballistics,
    pub seed: u64,
    pub phase: MatchPhase,
    /// Host time of the last `advance`
    pub now_ms: Millis,
    pub player: Ship,
    /// Live bots only; destroyed bots are removed
    pub bots: Vec<Bot>,
    /// In-flight shells, in firing order
    pub projectiles: Vec<Projectile>,
    scheduler: Scheduler,
    registry: TargetRegistry,
    rng: Pcg32,
    events: Vec<GameEvent>,
    next_projectile_id: u32,
}

impl Match {
    /// Set up a match with the stock hull and turret models
    pub fn new(seed: u64, tuning: Tuning) -> SetupResult<Self> {
        Self::with_models(
            seed,
            tuning,
            &StaticModel::default_ship(),
            &StaticModel::default_turret(),
        )
    }

    /// Set up a match, resolving every named part up front.
    ///
    /// The player starts at the origin facing -Z; bots are spread evenly on a
    /// ring around it, each facing the player.
    pub fn with_models(
        seed: u64,
        tuning: Tuning,
        hull: &dyn PartLookup,
        turret: &dyn PartLookup,
    ) -> SetupResult<Self> {
        tuning.validate()?;

        let player = Ship::build(
            ShipId(1),
            Side::Player,
            hull,
            turret,
            Vec3::ZERO,
            0.0,
            tuning.player_health,
            tuning.min_elevation,
        )?;

        let mut bots = Vec::with_capacity(tuning.bot_count);
        for i in 0..tuning.bot_count {
            let angle = TAU * i as f32 / tuning.bot_count as f32;
            let position = Vec3::new(angle.sin(), 0.0, -angle.cos()) * tuning.bot_spawn_radius;
            let ship = Ship::build(
                ShipId(i as u32 + 2),
                Side::Bot,
                hull,
                turret,
                position,
                yaw_toward(position, player.position),
                tuning.bot_health,
                tuning.min_elevation,
            )?;
            bots.push(Bot::new(BotId(i as u32 + 1), ship));
        }

        let mut scheduler = Scheduler::new();
        scheduler.schedule(TaskKey::Motion, tuning.frame_period_ms, 0);
        for bot in &bots {
            scheduler.schedule(TaskKey::Bot(bot.id), tuning.ai_period_ms, tuning.ai_period_ms);
        }

        log::info!(
            "match set up: seed {}, {} bots, player health {}",
            seed,
            bots.len(),
            player.health
        );

        Ok(Self {
            ballistics: Ballistics::from_tuning(&tuning),
            tuning,
            seed,
            phase: MatchPhase::Running,
            now_ms: 0,
            player,
            bots,
            projectiles: Vec::new(),
            scheduler,
            registry: TargetRegistry::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_projectile_id: 1,
        })
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn bot(&self, id: BotId) -> Option<&Bot> {
        self.bots.iter().find(|b| b.id == id)
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    pub fn is_scheduled(&self, key: TaskKey) -> bool {
        self.scheduler.is_scheduled(key)
    }

    /// Apply a player command.
    ///
    /// Returns whether anything changed. Commands are ignored once the player
    /// ship is destroyed or the match is over.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if !self.is_running() || !self.player.is_alive() {
            return false;
        }

        let t = &self.tuning;
        let ship = &mut self.player;
        match intent {
            Intent::Fire => {
                let mut fired = Vec::new();
                for index in 0..ship.turrets.len() {
                    if let Some(p) = fire(ship, index, self.now_ms, &mut self.next_projectile_id, t)
                    {
                        fired.push(p);
                    }
                }
                let any = !fired.is_empty();
                for p in fired {
                    self.launch(p);
                }
                any
            }
            Intent::AccelerateShip => change_speed(ship, 1),
            Intent::DecelerateShip => change_speed(ship, -1),
            Intent::TurnShipLeft => {
                turn_ship(ship, t.ship_turn_step);
                true
            }
            Intent::TurnShipRight => {
                turn_ship(ship, -t.ship_turn_step);
                true
            }
            Intent::TurnTurretLeft | Intent::TurnTurretRight => {
                let step = if intent == Intent::TurnTurretLeft {
                    t.turret_turn_step
                } else {
                    -t.turret_turn_step
                };
                for turret in &mut ship.turrets {
                    turn_turret(turret, step);
                }
                true
            }
            Intent::ElevateBarrelsUp | Intent::ElevateBarrelsDown => {
                let step = if intent == Intent::ElevateBarrelsUp {
                    t.elevation_step
                } else {
                    -t.elevation_step
                };
                let mut moved = false;
                for turret in &mut ship.turrets {
                    moved |= elevate_barrels(turret, step, t.min_elevation, t.max_elevation);
                }
                moved
            }
        }
    }

    /// Run every task due at `now`.
    ///
    /// Each due task runs once. Tasks whose entity is no longer live are
    /// cancelled instead of run.
    pub fn advance(&mut self, now: Millis) {
        if !self.is_running() {
            return;
        }
        self.now_ms = self.now_ms.max(now);

        for key in self.scheduler.take_due(self.now_ms) {
            if !self.is_live(key) {
                self.retire(key);
                continue;
            }
            match key {
                TaskKey::Motion => self.move_ships(),
                TaskKey::Projectile(id) => self.fly(id),
                TaskKey::Bot(id) => self.think(id),
            }
            if !self.is_running() {
                self.scheduler.clear();
                break;
            }
        }
    }

    /// Events produced since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let cooldown = self.tuning.cooldown_ms;
        MatchSnapshot {
            time_ms: self.now_ms,
            phase: self.phase,
            player: ShipSnapshot::capture(&self.player, self.now_ms, cooldown),
            bots: self
                .bots
                .iter()
                .map(|b| BotSnapshot::capture(b, self.now_ms, cooldown))
                .collect(),
            projectiles: self.projectiles.iter().map(ProjectileSnapshot::from).collect(),
        }
    }

    fn is_live(&self, key: TaskKey) -> bool {
        match key {
            TaskKey::Motion => self.player.is_alive(),
            TaskKey::Bot(id) => self.bot(id).is_some_and(|b| !b.is_dead()),
            TaskKey::Projectile(id) => {
                let Some(p) = self.projectile(id) else {
                    return false;
                };
                if !p.is_flying() {
                    return false;
                }
                let orphaned =
                    p.side == Side::Bot && !self.bots.iter().any(|b| b.ship.id == p.owner);
                !(orphaned && self.tuning.orphan_shots == OrphanShotPolicy::Discard)
            }
        }
    }

    fn retire(&mut self, key: TaskKey) {
        self.scheduler.cancel(key);
        if let TaskKey::Projectile(id) = key {
            self.projectiles.retain(|p| p.id != id);
        }
    }

    fn launch(&mut self, projectile: Projectile) {
        let key = TaskKey::Projectile(projectile.id);
        self.events.push(GameEvent::ProjectileFired {
            projectile: projectile.id,
            owner: projectile.owner,
        });
        self.scheduler.schedule(
            key,
            self.tuning.frame_period_ms,
            self.now_ms + self.tuning.frame_period_ms,
        );
        self.projectiles.push(projectile);
    }

    fn move_ships(&mut self) {
        let dt = self.tuning.frame_dt();
        let speed = self.tuning.ship_speed_per_level;
        advance_ship(&mut self.player, dt, speed);
        for bot in &mut self.bots {
            advance_ship(&mut bot.ship, dt, speed);
        }
    }

    fn fly(&mut self, id: ProjectileId) {
        let Some(index) = self.projectiles.iter().position(|p| p.id == id) else {
            return;
        };

        let step = ballistics::advance(&mut self.projectiles[index], &self.ballistics);
        let Some(Advance::Airborne { distance, height }) = step else {
            // Grounded (advance already marked it)
            self.events.push(GameEvent::ProjectileGrounded { projectile: id });
            self.retire(TaskKey::Projectile(id));
            return;
        };

        // Probe from the proposed position before committing it
        let position = self.projectiles[index].position_at(distance, height);
        self.registry.clear();
        match self.projectiles[index].side.opponent() {
            Side::Player => self.registry.register_ship(&self.player),
            Side::Bot => {
                for bot in &self.bots {
                    self.registry.register_ship(&bot.ship);
                }
            }
        }

        let Some(target) =
            detect_hit(position, self.registry.as_slice(), self.tuning.probe_range).copied()
        else {
            ballistics::commit(&mut self.projectiles[index], distance, height);
            return;
        };

        log::debug!("projectile {:?} hit ship {:?}", id, target.ship);
        self.projectiles[index].state = ProjectileState::Hit;
        self.retire(TaskKey::Projectile(id));

        let events_before = self.events.len();
        resolve_hit(&mut self.player, &mut self.bots, &target, &mut self.events);
        for event in &self.events[events_before..] {
            match event {
                GameEvent::BotDefeated { bot } => self.scheduler.cancel(TaskKey::Bot(*bot)),
                GameEvent::PlayerDefeated => self.phase = MatchPhase::Lost,
                GameEvent::PlayerVictorious => self.phase = MatchPhase::Won,
                _ => {}
            }
        }
    }

    fn think(&mut self, id: BotId) {
        let Some(index) = self.bots.iter().position(|b| b.id == id) else {
            return;
        };
        let decision = bot::think(
            &mut self.bots[index],
            self.player.position,
            self.now_ms,
            &mut self.rng,
            &self.tuning,
            &self.ballistics,
            &mut self.next_projectile_id,
        );
        if let Some(projectile) = decision.projectile {
            self.launch(projectile);
        }
    }
}
