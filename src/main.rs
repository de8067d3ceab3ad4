//! Broadside entry point
//!
//! On the web the page drives `platform::WebMatch`. Natively this runs a
//! headless match with an autopilot player and logs what happens.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use broadside::Tuning;
    use broadside::platform::init_logging;

    init_logging();
    log::info!("Broadside (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| broadside::SetupError::TuningParse(e.to_string()))
            .and_then(|json| Tuning::from_json(&json))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);

    match headless::run(seed, tuning) {
        Ok(phase) => log::info!("Match finished: {:?}", phase),
        Err(e) => {
            log::error!("Match setup failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use broadside::sim::bot::lay_guns;
    use broadside::sim::{GameEvent, Intent, Match, MatchPhase};
    use broadside::{SetupResult, Tuning, normalize_angle, yaw_toward};

    /// Simulated time limit
    const MAX_MATCH_MS: u64 = 10 * 60 * 1000;

    /// Play one match with a simple autopilot and return how it ended
    pub fn run(seed: u64, tuning: Tuning) -> SetupResult<MatchPhase> {
        let mut m = Match::new(seed, tuning)?;
        let period = m.tuning.frame_period_ms;
        let mut now = 0;

        while m.is_running() && now < MAX_MATCH_MS {
            autopilot(&mut m);
            m.advance(now);
            for event in m.drain_events() {
                report(&m, &event);
            }
            now += period;
        }

        if m.is_running() {
            log::warn!("Time limit reached with {} bots left", m.bots.len());
        }
        Ok(m.phase)
    }

    /// Steer toward the nearest bot and shoot at it whenever reloaded
    fn autopilot(m: &mut Match) {
        let me = m.player.position;
        let Some(target) = m
            .bots
            .iter()
            .map(|b| b.ship.position)
            .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me)))
        else {
            return;
        };

        let heading_error = normalize_angle(yaw_toward(me, target) - m.player.yaw);
        if heading_error > m.tuning.ship_turn_step {
            m.apply_intent(Intent::TurnShipLeft);
        } else if heading_error < -m.tuning.ship_turn_step {
            m.apply_intent(Intent::TurnShipRight);
        }

        let distance = me.distance(target);
        if distance > m.tuning.bot_policy.full_speed_distance {
            m.apply_intent(Intent::AccelerateShip);
        } else {
            m.apply_intent(Intent::DecelerateShip);
        }

        lay_guns(&mut m.player, target, &m.ballistics, &m.tuning);
        m.apply_intent(Intent::Fire);
    }

    fn report(m: &Match, event: &GameEvent) {
        match event {
            GameEvent::ShipHit { ship, health, .. } => {
                log::info!("[{:>6} ms] ship {:?} hit, health {}", m.now_ms, ship, health)
            }
            GameEvent::BotDefeated { bot } => {
                log::info!("[{:>6} ms] bot {:?} sunk", m.now_ms, bot)
            }
            e if e.is_terminal() => log::info!("[{:>6} ms] {:?}", m.now_ms, e),
            e => log::debug!("[{:>6} ms] {:?}", m.now_ms, e),
        }
    }
}
