//! Bot decision loop
//!
//! Runs once per AI period for each live bot. The turret always tracks the
//! player; beyond the approach distance the bot closes in with a weighted
//! random steering choice, inside it slows down, lays the guns and fires.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::ballistics::Ballistics;
use super::movement::{change_speed, full_speed, turn_ship};
use super::state::{Bot, BotState, Millis, Projectile, Ship};
use super::weapon::fire;
use crate::tuning::{BotPolicy, Tuning};
use crate::{normalize_angle, yaw_toward};

/// Steering outcome of an approach tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    TowardPlayer,
    RandomTurn,
    Hold,
}

/// What a bot did on one tick
#[derive(Debug, Clone)]
pub struct BotDecision {
    pub state: BotState,
    pub distance: f32,
    /// Set on approach ticks only
    pub steering: Option<Steering>,
    pub projectile: Option<Projectile>,
}

/// Point every turret of `ship` at `target` (yaw only)
pub fn track_target(ship: &mut Ship, target: Vec3) {
    let hull_yaw = ship.yaw;
    let origins: Vec<Vec3> = ship
        .turrets
        .iter()
        .map(|t| ship.turret_world_position(t))
        .collect();
    for (turret, origin) in ship.turrets.iter_mut().zip(origins) {
        turret.yaw = normalize_angle(yaw_toward(origin, target) - hull_yaw);
    }
}

/// Track `target` and set barrel elevation for its range
pub fn lay_guns(ship: &mut Ship, target: Vec3, ballistics: &Ballistics, tuning: &Tuning) {
    track_target(ship, target);
    let origins: Vec<Vec3> = ship
        .turrets
        .iter()
        .map(|t| ship.turret_world_position(t))
        .collect();
    for (turret, origin) in ship.turrets.iter_mut().zip(origins) {
        let range = (target - origin).with_y(0.0).length();
        turret.elevation =
            ballistics.elevation_for_range(range, tuning.min_elevation, tuning.max_elevation);
    }
}

fn steer(ship: &mut Ship, target: Vec3, policy: &BotPolicy, rng: &mut Pcg32) -> Steering {
    let roll: f32 = rng.random();
    if roll >= policy.sharp_turn_threshold {
        let jitter = policy.sharp_turn_jitter_deg;
        let error = rng.random_range(-jitter..=jitter).to_radians();
        ship.yaw = normalize_angle(yaw_toward(ship.position, target) + error);
        Steering::TowardPlayer
    } else if roll >= policy.random_turn_threshold {
        let max = policy.random_turn_max_deg;
        turn_ship(ship, rng.random_range(-max..=max).to_radians());
        Steering::RandomTurn
    } else {
        Steering::Hold
    }
}

/// Run one decision tick for `bot` against the player at `player_pos`
pub fn think(
    bot: &mut Bot,
    player_pos: Vec3,
    now: Millis,
    rng: &mut Pcg32,
    tuning: &Tuning,
    ballistics: &Ballistics,
    next_projectile_id: &mut u32,
) -> BotDecision {
    let distance = bot.ship.position.distance(player_pos);
    if bot.is_dead() {
        bot.state = BotState::Dead;
        return BotDecision {
            state: BotState::Dead,
            distance,
            steering: None,
            projectile: None,
        };
    }

    let policy = &tuning.bot_policy;
    let approaching = distance > policy.approach_distance;

    let mut steering = None;
    if approaching {
        bot.state = BotState::Approaching;
        change_speed(&mut bot.ship, 1);
        steering = Some(steer(&mut bot.ship, player_pos, policy, rng));
        if distance > policy.full_speed_distance {
            full_speed(&mut bot.ship);
        }
    }

    // Turret is laid relative to the hull, so track after steering
    track_target(&mut bot.ship, player_pos);

    let mut projectile = None;
    if !approaching {
        bot.state = BotState::Engaging;
        change_speed(&mut bot.ship, -1);
        lay_guns(&mut bot.ship, player_pos, ballistics, tuning);
        projectile = fire(&mut bot.ship, 0, now, next_projectile_id, tuning);
    }

    log::trace!(
        "bot {:?}: {:?} at distance {:.1}, speed {}",
        bot.id,
        bot.state,
        distance,
        bot.ship.speed_level
    );

    BotDecision {
        state: bot.state,
        distance,
        steering,
        projectile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BotId, Side, fixtures};
    use crate::yaw_to_direction;
    use rand::SeedableRng;

    fn setup(bot_pos: Vec3) -> (Bot, Tuning, Ballistics, Pcg32) {
        let tuning = Tuning::default();
        let ballistics = Ballistics::from_tuning(&tuning);
        let bot = Bot::new(BotId(1), fixtures::ship(2, Side::Bot, bot_pos));
        (bot, tuning, ballistics, Pcg32::seed_from_u64(7))
    }

    #[test]
    fn test_turret_tracks_every_tick() {
        let (mut bot, tuning, ballistics, mut rng) = setup(Vec3::new(0.0, 0.0, 200.0));
        let mut next_id = 1;
        think(&mut bot, Vec3::ZERO, 0, &mut rng, &tuning, &ballistics, &mut next_id);

        let turret = &bot.ship.turrets[0];
        let origin = bot.ship.turret_world_position(turret);
        let aim = yaw_to_direction(bot.ship.turret_world_yaw(turret));
        let want = (Vec3::ZERO - origin).with_y(0.0).normalize();
        assert!(aim.dot(want) > 0.999);
    }

    #[test]
    fn test_far_bot_goes_full_speed() {
        let (mut bot, tuning, ballistics, mut rng) = setup(Vec3::new(0.0, 0.0, 200.0));
        let mut next_id = 1;
        let decision = think(
            &mut bot,
            Vec3::ZERO,
            0,
            &mut rng,
            &tuning,
            &ballistics,
            &mut next_id,
        );
        assert_eq!(decision.state, BotState::Approaching);
        assert!(decision.steering.is_some());
        assert!(decision.projectile.is_none());
        assert_eq!(bot.ship.speed_level, 3);
    }

    #[test]
    fn test_mid_range_bot_speeds_up_one_step() {
        let (mut bot, tuning, ballistics, mut rng) = setup(Vec3::new(0.0, 0.0, 60.0));
        let mut next_id = 1;
        think(&mut bot, Vec3::ZERO, 0, &mut rng, &tuning, &ballistics, &mut next_id);
        assert_eq!(bot.ship.speed_level, 2);
    }

    #[test]
    fn test_close_bot_engages_and_fires_once_per_cooldown() {
        let (mut bot, tuning, ballistics, mut rng) = setup(Vec3::new(0.0, 0.0, 30.0));
        bot.ship.speed_level = 3;
        let mut next_id = 1;

        let first = think(

            &mut bot,

            Vec3::ZERO,

            1_000,

            &mut rng,

            &tuning,

            &ballistics,

            &mut next_id,

        );
        assert_eq!(first.state, BotState::Engaging);
        assert_eq!(bot.ship.speed_level, 2);
        assert!(first.projectile.is_some());
        assert!(bot.ship.turrets[0].elevation >= tuning.min_elevation);

        let second = think(

            &mut bot,

            Vec3::ZERO,

            2_000,

            &mut rng,

            &tuning,

            &ballistics,

            &mut next_id,

        );
        assert!(second.projectile.is_none());

        let third = think(

            &mut bot,

            Vec3::ZERO,

            3_001,

            &mut rng,

            &tuning,

            &ballistics,

            &mut next_id,

        );
        assert!(third.projectile.is_some());
    }

    #[test]
    fn test_dead_bot_does_nothing() {
        let (mut bot, tuning, ballistics, mut rng) = setup(Vec3::new(0.0, 0.0, 30.0));
        bot.ship.health = 0;
        let mut next_id = 1;
        let decision = think(
            &mut bot,
            Vec3::ZERO,
            5_000,
            &mut rng,
            &tuning,
            &ballistics,
            &mut next_id,
        );
        assert_eq!(decision.state, BotState::Dead);
        assert!(decision.projectile.is_none());
        assert_eq!(bot.ship.turrets[0].last_shot_ms, None);
    }

    #[test]
    fn test_steering_thresholds() {
        let mut policy = BotPolicy::default();
        let mut ship = fixtures::ship(2, Side::Bot, Vec3::new(0.0, 0.0, 100.0));
        let mut rng = Pcg32::seed_from_u64(1);

        // Every roll lands in the sharp-turn band
        policy.sharp_turn_threshold = 0.0;
        policy.random_turn_threshold = 0.0;
        policy.sharp_turn_jitter_deg = 0.0;
        assert_eq!(steer(&mut ship, Vec3::ZERO, &policy, &mut rng), Steering::TowardPlayer);
        assert!(ship.forward().dot(Vec3::NEG_Z) > 0.999);

        // No roll reaches either band
        policy.sharp_turn_threshold = 1.0;
        policy.random_turn_threshold = 1.0;
        let yaw = ship.yaw;
        assert_eq!(steer(&mut ship, Vec3::ZERO, &policy, &mut rng), Steering::Hold);
        assert_eq!(ship.yaw, yaw);
    }
}
