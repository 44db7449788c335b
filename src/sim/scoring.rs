//! Health, score and the Running -> GameOver transition

use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, Pickup, PickupKind, colors};
use crate::audio::SoundCue;
use crate::consts::*;

/// Score as a pure function of distance flown and pickups taken
pub fn score_for(run_origin_z: f32, player_z: f32, pickups_collected: u32) -> u64 {
    let distance = ((run_origin_z as f64 - player_z as f64) * DISTANCE_SCORE_FACTOR).max(0.0);
    (distance + (pickups_collected as u64 * PICKUP_SCORE) as f64).floor() as u64
}

/// Recompute the score from the current position; raise the best if beaten
pub fn update_scoreboard(state: &mut GameState) {
    let score = score_for(
        state.run.run_origin_z,
        state.player.pos.z,
        state.run.pickups_collected,
    );
    if score != state.run.score {
        state.run.score = score;
        state.emit(GameEvent::ScoreChanged { score });
    }
    if score > state.run.best_score {
        state.run.best_score = score;
        state.emit(GameEvent::NewBest { best: score });
    }
}

/// The player flew into an obstacle
pub fn register_impact(state: &mut GameState) {
    if state.run.paused() {
        return;
    }
    let damage = state.rng.random_range(DAMAGE_MIN..DAMAGE_MAX) as f32;
    let remaining = state.health.change(-damage);
    let pos = state.player.pos;
    state.bursts.spawn(&mut state.rng, pos, colors::IMPACT);
    state.emit(GameEvent::Sound {
        cue: SoundCue::Impact,
    });
    state.emit(GameEvent::HealthChanged {
        current: remaining,
        max: state.health.max,
    });
    state.flash();

    if state.health.is_depleted() {
        state.set_status("Hull integrity failure! Rebooting systems...", 4.0);
        handle_death(state);
    } else {
        let text = format!("Hull hit! Integrity at {}%.", state.health.percent());
        state.set_status(text, 4.0);
    }
}

/// Freeze the run and announce the result
pub fn handle_death(state: &mut GameState) {
    update_scoreboard(state);
    let final_score = state.run.score;

    state.run.forward_speed = 0.0;
    state.run.speed_boost = 0.0;
    state.run.phase = GamePhase::GameOver;
    state.flash();

    log::info!(
        "Game over: score {} (best {})",
        final_score,
        state.run.best_score
    );
    state.emit(GameEvent::GameOver {
        final_score,
        best: state.run.best_score,
    });
}

/// Apply a collected pickup's effect
pub fn collect_pickup(state: &mut GameState, pickup: &Pickup) {
    state.run.pickups_collected += 1;
    state.emit(GameEvent::PickupCollected {
        id: pickup.id,
        kind: pickup.kind,
    });

    match pickup.kind {
        PickupKind::Heal => {
            state.bursts.spawn(&mut state.rng, pickup.pos, colors::HEAL);
            let current = state.health.change(HEAL_AMOUNT);
            state.emit(GameEvent::HealthChanged {
                current,
                max: state.health.max,
            });
            state.emit(GameEvent::Sound {
                cue: SoundCue::HealPickup,
            });
            state.set_status("Nanite canister acquired. Hull integrity recovering.", 3.5);
        }
        PickupKind::Speed => {
            state.bursts.spawn(&mut state.rng, pickup.pos, colors::SPEED);
            state.run.speed_boost = (state.run.speed_boost + BOOST_PER_PICKUP).min(BOOST_CAP);
            state.emit(GameEvent::Sound {
                cue: SoundCue::SpeedPickup,
            });
            state.set_status("Energy orb collected! Engines supercharged.", 3.5);
        }
    }
}
