//! Gameplay tuning
//!
//! Every balance constant the simulation reads lives here. Defaults come from
//! [`crate::consts`]; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SetupError, SetupResult};

/// What happens to shots still in the air when the bot that fired them dies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrphanShotPolicy {
    /// Keep flying and resolve hits normally
    #[default]
    Resolve,
    /// Remove them on their next tick without resolving anything
    Discard,
}

/// Randomized bot behavior knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotPolicy {
    /// Beyond this distance the bot closes in; at or inside it engages
    pub approach_distance: f32,
    /// Beyond this distance the bot runs at full speed
    pub full_speed_distance: f32,
    /// Roll at or above this turns sharply toward the player
    pub sharp_turn_threshold: f32,
    /// Roll at or above this (and below sharp) makes a small random turn
    pub random_turn_threshold: f32,
    /// Largest random yaw change, degrees either side
    pub random_turn_max_deg: f32,
    /// Heading error left after a sharp turn, degrees either side
    pub sharp_turn_jitter_deg: f32,
}

impl Default for BotPolicy {
    fn default() -> Self {
        Self {
            approach_distance: APPROACH_DISTANCE,
            full_speed_distance: FULL_SPEED_DISTANCE,
            sharp_turn_threshold: SHARP_TURN_THRESHOLD,
            random_turn_threshold: RANDOM_TURN_THRESHOLD,
            random_turn_max_deg: RANDOM_TURN_MAX_DEG,
            sharp_turn_jitter_deg: SHARP_TURN_JITTER_DEG,
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Clocks ===
    pub frame_period_ms: u64,
    pub ai_period_ms: u64,

    // === Weapons ===
    pub cooldown_ms: u64,
    pub muzzle_drop: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,

    // === Ballistics ===
    pub gravity: f32,
    pub launch_height: f32,
    pub muzzle_velocity: f32,
    pub projectile_step: f32,

    // === Hit detection ===
    pub probe_range: f32,

    // === Movement ===
    pub ship_speed_per_level: f32,
    pub ship_turn_step: f32,
    pub turret_turn_step: f32,
    pub elevation_step: f32,

    // === Match setup ===
    pub player_health: i32,
    pub bot_health: i32,
    pub bot_count: usize,
    pub bot_spawn_radius: f32,

    // === Bots ===
    pub bot_policy: BotPolicy,
    pub orphan_shots: OrphanShotPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_period_ms: FRAME_PERIOD_MS,
            ai_period_ms: AI_PERIOD_MS,

            cooldown_ms: TURRET_COOLDOWN_MS,
            muzzle_drop: MUZZLE_DROP,
            min_elevation: MIN_ELEVATION,
            max_elevation: MAX_ELEVATION,

            gravity: GRAVITY,
            launch_height: LAUNCH_HEIGHT,
            muzzle_velocity: MUZZLE_VELOCITY,
            projectile_step: PROJECTILE_STEP,

            probe_range: PROBE_RANGE,

            ship_speed_per_level: SHIP_SPEED_PER_LEVEL,
            ship_turn_step: SHIP_TURN_STEP,
            turret_turn_step: TURRET_TURN_STEP,
            elevation_step: ELEVATION_STEP,

            player_health: PLAYER_HEALTH,
            bot_health: BOT_HEALTH,
            bot_count: BOT_COUNT,
            bot_spawn_radius: BOT_SPAWN_RADIUS,

            bot_policy: BotPolicy::default(),
            orphan_shots: OrphanShotPolicy::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> SetupResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (useful as a starting point for overrides)
    pub fn to_json(&self) -> SetupResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Frame period in seconds
    pub fn frame_dt(&self) -> f32 {
        self.frame_period_ms as f32 / 1000.0
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SetupResult<()> {
        positive("gravity", self.gravity)?;
        positive("muzzle_velocity", self.muzzle_velocity)?;
        positive("projectile_step", self.projectile_step)?;
        positive("probe_range", self.probe_range)?;
        positive("launch_height", self.launch_height)?;

        // Written so NaN fails too
        if !(self.min_elevation >= 0.0 && self.min_elevation < self.max_elevation) {
            return Err(SetupError::InvalidTuning {
                name: "min_elevation",
                value: self.min_elevation,
                expected: "0 <= min_elevation < max_elevation",
            });
        }
        if !(self.max_elevation < std::f32::consts::FRAC_PI_2) {
            return Err(SetupError::InvalidTuning {
                name: "max_elevation",
                value: self.max_elevation,
                expected: "max_elevation < PI/2",
            });
        }
        if self.frame_period_ms == 0 {
            return Err(SetupError::InvalidTuning {
                name: "frame_period_ms",
                value: 0.0,
                expected: "(0, inf)",
            });
        }
        if self.ai_period_ms == 0 {
            return Err(SetupError::InvalidTuning {
                name: "ai_period_ms",
                value: 0.0,
                expected: "(0, inf)",
            });
        }
        if self.player_health <= 0 {
            return Err(SetupError::InvalidTuning {
                name: "player_health",
                value: self.player_health as f32,
                expected: "(0, inf)",
            });
        }
        if self.bot_health <= 0 {
            return Err(SetupError::InvalidTuning {
                name: "bot_health",
                value: self.bot_health as f32,
                expected: "(0, inf)",
            });
        }
        if self.bot_count == 0 {
            return Err(SetupError::EmptyRoster);
        }

        let policy = &self.bot_policy;
        non_negative("bot_policy.approach_distance", policy.approach_distance)?;
        non_negative("bot_policy.full_speed_distance", policy.full_speed_distance)?;
        non_negative("bot_policy.random_turn_max_deg", policy.random_turn_max_deg)?;
        non_negative("bot_policy.sharp_turn_jitter_deg", policy.sharp_turn_jitter_deg)?;
        if policy.full_speed_distance < policy.approach_distance {
            return Err(SetupError::InvalidTuning {
                name: "bot_policy.full_speed_distance",
                value: policy.full_speed_distance,
                expected: ">= approach_distance",
            });
        }
        if !(0.0..=1.0).contains(&policy.random_turn_threshold)
            || !(policy.random_turn_threshold..=1.0).contains(&policy.sharp_turn_threshold)
        {
            return Err(SetupError::InvalidTuning {
                name: "bot_policy.sharp_turn_threshold",
                value: policy.sharp_turn_threshold,
                expected: "0 <= random_turn_threshold <= sharp_turn_threshold <= 1",
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> SetupResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SetupError::InvalidTuning {
            name,
            value,
            expected: "(0, inf)",
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> SetupResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SetupError::InvalidTuning {
            name,
            value,
            expected: "[0, inf)",
        })
    }
}
