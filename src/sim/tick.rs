//! Per-frame simulation tick
//!
//! Gameplay systems run only while the run is live; cosmetic systems always
//! run so the scene keeps settling after a game over.

use super::collision::{update_obstacles, update_pickups};
use super::player::{InputSource, update_player};
use super::scoring::update_scoreboard;
use super::state::{DEFAULT_STATUS, GameEvent, GameState};
use super::streamer::stream_hazards;
use crate::consts::*;
use crate::damp;

/// Clamp a raw frame delta into what one tick may simulate
#[inline]
pub fn clamp_delta(raw: f32) -> f32 {
    if raw.is_finite() {
        raw.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &dyn InputSource, dt: f32) {
    let dt = clamp_delta(dt);
    state.time += dt as f64;
    state.backdrop.nebula_time += dt;

    if !state.run.paused() {
        update_speed(state, dt);
        let speed = state.run.forward_speed;
        update_player(&mut state.player, input, speed, dt);
        stream_hazards(state);
        update_obstacles(state, dt);
        update_pickups(state, dt);
        update_scoreboard(state);
        update_status(state, dt);
    }

    update_camera(state, dt);
    update_crash_fx(state, dt);
    state.bursts.update(dt);
    super::pools::update_lasers(&mut state.lasers, dt);
    update_backdrop(state);
}

/// Decay the boost, then ease forward speed toward base + boost
fn update_speed(state: &mut GameState, dt: f32) {
    let run = &mut state.run;
    run.speed_boost = (run.speed_boost - dt * BOOST_DECAY).max(0.0);
    let target = (run.base_speed + run.speed_boost * BOOST_SPEED_FACTOR).min(run.max_speed);
    run.forward_speed = damp(run.forward_speed, target, SPEED_RATE, dt);
}

fn update_status(state: &mut GameState, dt: f32) {
    if state.status.timer > 0.0 {
        state.status.timer -= dt;
        if state.status.timer <= 0.0 {
            state.status.text = DEFAULT_STATUS.to_string();
            state.emit(GameEvent::Status {
                text: DEFAULT_STATUS.to_string(),
            });
        }
    }
}

fn update_camera(state: &mut GameState, dt: f32) {
    let player = state.player.pos;
    let camera = &mut state.camera;
    camera.pos.x = damp(camera.pos.x, player.x * 0.35, 1.4, dt);
    camera.pos.y = damp(camera.pos.y, 1.6 + player.y * 0.3, 2.2, dt);
    camera.pos.z = damp(camera.pos.z, player.z + 5.5, 2.5, dt);
    camera.look_at = player + glam::Vec3::new(0.0, 0.3, -4.0);
}

fn update_crash_fx(state: &mut GameState, dt: f32) {
    if state.run.crash_fx > 0.0 {
        state.run.crash_fx = (state.run.crash_fx - dt * CRASH_FX_DECAY).max(0.0);
    }
}

fn update_backdrop(state: &mut GameState) {
    state.backdrop.star_offset = (state.player.pos.z % 60.0) * 0.2;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::InputState;
    use crate::sim::state::{GamePhase, Obstacle};
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_delta_is_clamped() {
        assert_eq!(clamp_delta(5.0), MAX_FRAME_DT);
        assert_eq!(clamp_delta(-1.0), 0.0);
        assert_eq!(clamp_delta(f32::NAN), 0.0);
        assert_eq!(clamp_delta(0.01), 0.01);
    }

    #[test]
    fn test_long_pause_simulates_one_capped_step() {
        let mut state = GameState::new(1);
        let input = InputState::new();
        tick(&mut state, &input, 3.0);
        assert!((state.time - MAX_FRAME_DT as f64).abs() < 1e-6);
        assert!(state.player.pos.z > -BASE_SPEED * MAX_FRAME_DT - 0.01);
    }

    #[test]
    fn test_tick_advances_and_scores() {
        let mut state = GameState::new(12345);
        let input = InputState::new();
        for _ in 0..60 {
            tick(&mut state, &input, DT);
            if state.run.paused() {
                break;
            }
        }
        assert!(state.player.pos.z < -5.0);
        assert!(state.run.score > 0);
        assert!(!state.obstacles.is_empty());
        assert!(state.streamer.next_obstacle_z <= state.player.pos.z - OBSTACLE_LOOKAHEAD);
    }

    #[test]
    fn test_boost_raises_speed_then_decays() {
        let mut state = GameState::new(1);
        state.run.speed_boost = BOOST_CAP;
        let input = InputState::new();
        // Park the streamer far away so nothing can hit us
        state.streamer.next_obstacle_z = -1.0e6;
        state.streamer.next_pickup_z = -1.0e6;
        tick(&mut state, &input, 0.1);
        assert!(state.run.forward_speed > BASE_SPEED);
        assert!(state.run.speed_boost < BOOST_CAP);
        for _ in 0..100 {
            tick(&mut state, &input, 0.1);
        }
        assert_eq!(state.run.speed_boost, 0.0);
        assert!(state.run.forward_speed <= MAX_SPEED);
    }

    #[test]
    fn test_game_over_freezes_gameplay_but_not_cosmetics() {
        let mut state = GameState::new(1);
        let input = InputState::new();
        state.health.change(-99.0);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: state.player.pos,
            rotation: Vec3::ZERO,
            spin: Vec3::ZERO,
            size: 1.0,
        });
        tick(&mut state, &input, DT);
        assert_eq!(state.run.phase, GamePhase::GameOver);

        let z = state.player.pos.z;
        let score = state.run.score;
        let particles = state.bursts.len();
        assert!(particles > 0);
        for _ in 0..10 {
            tick(&mut state, &input, 0.1);
        }
        assert_eq!(state.player.pos.z, z);
        assert_eq!(state.run.score, score);
        assert!(state.bursts.is_empty(), "particles keep aging");
        assert_eq!(state.run.crash_fx, 0.0);
    }

    #[test]
    fn test_status_reverts_to_default() {
        let mut state = GameState::new(1);
        let input = InputState::new();
        state.streamer.next_obstacle_z = -1.0e6;
        state.set_status("hello", 0.05);
        tick(&mut state, &input, 0.1);
        assert_eq!(state.status.text, DEFAULT_STATUS);
    }

    #[test]
    fn test_camera_follows() {
        let mut state = GameState::new(1);
        let input = InputState::new();
        state.streamer.next_obstacle_z = -1.0e6;
        state.streamer.next_pickup_z = -1.0e6;
        for _ in 0..120 {
            tick(&mut state, &input, DT);
        }
        assert!(state.camera.pos.z < 6.5);
        assert!(state.camera.pos.z > state.player.pos.z);
        assert_eq!(state.camera.look_at.z, state.player.pos.z - 4.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let mut input = InputState::new();
        input.pointer_down(0.2, 0.7);
        for _ in 0..200 {
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.health.current, b.health.current);
        assert_eq!(a.run.score, b.run.score);
    }
}
