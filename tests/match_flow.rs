//! End-to-end match flow through the public API

use broadside::Tuning;
use broadside::sim::bot::lay_guns;
use broadside::sim::{BotState, GameEvent, Intent, Match, MatchPhase, TaskKey};
use glam::Vec3;

/// One bot that never closes in or shoots, and nobody moves
fn sitting_duck() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.bot_count = 1;
    tuning.bot_health = 3;
    tuning.ship_speed_per_level = 0.0;
    tuning.bot_policy.approach_distance = 0.0;
    tuning.bot_policy.full_speed_distance = 0.0;
    tuning.bot_policy.sharp_turn_threshold = 1.0;
    tuning.bot_policy.random_turn_threshold = 1.0;
    tuning
}

/// Lay the guns on the bot, fire, and let the shell play out past the cooldown
fn volley(m: &mut Match) -> Vec<GameEvent> {
    let target = m.bots[0].ship.position;
    lay_guns(&mut m.player, target, &m.ballistics, &m.tuning);
    assert!(m.apply_intent(Intent::Fire), "turret should be reloaded");

    let period = m.tuning.frame_period_ms;
    let frames = m.tuning.cooldown_ms / period + 2;
    for _ in 0..frames {
        m.advance(m.now_ms + period);
    }
    m.drain_events()
}

#[test]
fn bot_sinks_on_third_hit_and_player_wins_once() {
    let mut m = Match::new(7, sitting_duck()).unwrap();
    m.bots[0].ship.position = Vec3::new(0.0, 0.0, -40.0);
    let bot_id = m.bots[0].id;
    let bot_ship = m.bots[0].ship.id;

    for expected_health in [2, 1] {
        let events = volley(&mut m);
        assert!(events.contains(&GameEvent::ShipHit {
            ship: bot_ship,
            part: hit_part(&events),
            health: expected_health,
        }));
        assert_eq!(m.bots.len(), 1);
        assert_ne!(m.bots[0].state, BotState::Dead);
        assert!(m.is_scheduled(TaskKey::Bot(bot_id)));
    }

    let events = volley(&mut m);
    assert!(m.bots.is_empty());
    assert_eq!(m.phase, MatchPhase::Won);
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == GameEvent::BotDefeated { bot: bot_id })
            .count(),
        1
    );
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == GameEvent::PlayerVictorious)
            .count(),
        1
    );
    assert!(!m.is_scheduled(TaskKey::Bot(bot_id)));

    // Match is over: intents and time no longer do anything
    assert!(!m.apply_intent(Intent::AccelerateShip));
    let before = m.now_ms;
    m.advance(before + 10_000);
    assert!(m.drain_events().is_empty());
}

#[test]
fn snapshot_reflects_state() {
    let mut m = Match::new(11, sitting_duck()).unwrap();
    m.apply_intent(Intent::Fire);
    let snap = m.snapshot();
    assert_eq!(snap.phase, MatchPhase::Running);
    assert_eq!(snap.bots.len(), 1);
    assert_eq!(snap.projectiles.len(), 1);
    assert!(!snap.player.turrets[0].ready);
    assert_eq!(snap.player.health, m.tuning.player_health);

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"phase\":\"Running\""));
}

fn hit_part(events: &[GameEvent]) -> broadside::sim::PartHandle {
    events
        .iter()
        .find_map(|e| match e {
            GameEvent::ShipHit { part, .. } => Some(*part),
            _ => None,
        })
        .expect("volley should land a hit")
}
