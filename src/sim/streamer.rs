//! Hazard streaming
//!
//! Two frontiers run ahead of the player, one for obstacles and one for
//! pickups. Each tick fills the lookahead window up to the frontier, so the
//! window is always populated no matter how fast the craft is moving.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::space::PLAY_BOUNDS;
use super::state::{GameEvent, GameState, Obstacle, Pickup, PickupKind};
use crate::consts::*;

/// Spawn frontiers for both hazard kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardStreamer {
    /// Depth of the next obstacle; only ever decreases within a run
    pub next_obstacle_z: f32,
    /// Depth of the next pickup cluster; only ever decreases within a run
    pub next_pickup_z: f32,
    /// Cross-section position of the last obstacle, for soft spacing
    last_obstacle: Vec2,
}

impl HazardStreamer {
    /// Frontiers for the first run of a session
    pub fn new(origin_z: f32) -> Self {
        Self::with_lead(origin_z, OBSTACLE_FIRST_LEAD)
    }

    /// Frontiers for a restarted run, which opens with a slightly longer gap
    pub fn reset(&mut self, origin_z: f32) {
        *self = Self::with_lead(origin_z, OBSTACLE_FRONTIER_LEAD);
    }

    fn with_lead(origin_z: f32, obstacle_lead: f32) -> Self {
        Self {
            next_obstacle_z: origin_z - obstacle_lead,
            next_pickup_z: origin_z - PICKUP_FRONTIER_LEAD,
            last_obstacle: Vec2::splat(999.0),
        }
    }
}

/// Fill both lookahead windows in front of the player
pub fn stream_hazards(state: &mut GameState) {
    let player_z = state.player.pos.z;

    while state.streamer.next_obstacle_z > player_z - OBSTACLE_LOOKAHEAD {
        let z = state.streamer.next_obstacle_z;
        spawn_obstacle(state, z);
        let step = state.rng.random_range(OBSTACLE_STEP_MIN..OBSTACLE_STEP_MAX);
        state.streamer.next_obstacle_z -= step;
    }

    while state.streamer.next_pickup_z > player_z - PICKUP_LOOKAHEAD {
        let z = state.streamer.next_pickup_z;
        spawn_pickup_cluster(state, z);
        // The frontier moves on even when the pool is full
        let step = state.rng.random_range(PICKUP_STEP_MIN..PICKUP_STEP_MAX);
        state.streamer.next_pickup_z -= step;
    }
}

/// Place an obstacle at depth `z`, trying a few times to keep clear of the previous one
pub fn spawn_obstacle(state: &mut GameState, z: f32) {
    let size = OBSTACLE_SIZE_MIN + state.rng.random::<f32>() * OBSTACLE_SIZE_SPAN;

    let last = state.streamer.last_obstacle;
    let pos = spaced_sample(last, || PLAY_BOUNDS.sample(&mut state.rng));
    state.streamer.last_obstacle = pos;

    let spin = Vec3::new(
        state.rng.random::<f32>() * 0.3,
        state.rng.random::<f32>() * 0.4,
        state.rng.random::<f32>() * 0.2,
    );
    let id = state.next_entity_id();
    let pos = Vec3::new(pos.x, pos.y, z);
    state.obstacles.push(Obstacle {
        id,
        pos,
        rotation: Vec3::ZERO,
        spin,
        size,
    });
    state.emit(GameEvent::ObstacleSpawned { id, pos, size });
}

/// Draw positions until one is clear of `last`. After the allowed resamples
/// the final draw is taken as is, so spacing is soft.
fn spaced_sample(last: Vec2, mut sample: impl FnMut() -> Vec2) -> Vec2 {
    let mut pos = sample();
    for _ in 0..OBSTACLE_RESAMPLE_ATTEMPTS {
        if last.distance_squared(pos) > OBSTACLE_SPACING_SQ {
            break;
        }
        pos = sample();
    }
    pos
}

/// One or two pickups in the 10 units before `frontier`, while the pool has room
pub fn spawn_pickup_cluster(state: &mut GameState, frontier: f32) {
    if state.pickups.len() >= MAX_PICKUPS {
        return;
    }
    let offset = state.rng.random::<f32>() * 8.0;
    spawn_pickup(state, frontier - offset);
    if state.pickups.len() < MAX_PICKUPS {
        let offset = state.rng.random::<f32>() * 8.0 + 2.0;
        spawn_pickup(state, frontier - offset);
    }
}

/// Place a pickup at depth `z`, kept away from the lane's top and bottom edges
pub fn spawn_pickup(state: &mut GameState, z: f32) {
    let kind = if state.rng.random::<f32>() < HEAL_PICKUP_CHANCE {
        PickupKind::Heal
    } else {
        PickupKind::Speed
    };
    let xy = PLAY_BOUNDS.sample(&mut state.rng);
    let y = xy.y.clamp(PLAY_BOUNDS.y_min * 0.8, PLAY_BOUNDS.y_max * 0.8);
    let id = state.next_entity_id();
    let pos = Vec3::new(xy.x, y, z);
    state.pickups.push(Pickup {
        id,
        kind,
        pos,
        spin_angle: 0.0,
    });
    state.emit(GameEvent::PickupSpawned { id, kind, pos });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fills_lookahead_window() {
        let mut state = GameState::new(42);
        stream_hazards(&mut state);

        let player_z = state.player.pos.z;
        assert!(state.streamer.next_obstacle_z <= player_z - OBSTACLE_LOOKAHEAD);
        assert!(state.streamer.next_pickup_z <= player_z - PICKUP_LOOKAHEAD);
        // 100 units of window at most 15 apart
        assert!(state.obstacles.len() >= 7);
        assert!(!state.pickups.is_empty());
        assert!(state.pickups.len() <= MAX_PICKUPS);
    }

    #[test]
    fn test_obstacles_spawn_in_lane_and_ahead() {
        let mut state = GameState::new(9);
        stream_hazards(&mut state);
        for o in state.obstacles.iter() {
            assert!(PLAY_BOUNDS.contains(o.pos.x, o.pos.y));
            assert!(o.pos.z < state.player.pos.z);
            assert!(o.size >= OBSTACLE_SIZE_MIN && o.size < OBSTACLE_SIZE_MIN + OBSTACLE_SIZE_SPAN);
        }
        for p in state.pickups.iter() {
            assert!(p.pos.y.abs() <= PLAY_Y_MAX * 0.8 + f32::EPSILON);
        }
    }

    #[test]
    fn test_second_pass_is_idle_without_movement() {
        let mut state = GameState::new(1);
        stream_hazards(&mut state);
        let obstacles = state.obstacles.len();
        let pickups = state.pickups.len();
        stream_hazards(&mut state);
        assert_eq!(state.obstacles.len(), obstacles);
        assert_eq!(state.pickups.len(), pickups);
    }

    #[test]
    fn test_pickup_cap_respected_but_frontier_advances() {
        let mut state = GameState::new(3);
        for i in 0..MAX_PICKUPS {
            spawn_pickup(&mut state, -1000.0 - i as f32);
        }
        let before = state.streamer.next_pickup_z;
        stream_hazards(&mut state);
        assert_eq!(state.pickups.len(), MAX_PICKUPS);
        assert!(state.streamer.next_pickup_z < before);
    }

    #[test]
    fn test_spawn_events_emitted() {
        let mut state = GameState::new(11);
        stream_hazards(&mut state);
        let spawned = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
            .count();
        assert_eq!(spawned, state.obstacles.len());
    }

    #[test]
    fn test_spacing_rejects_near_draw() {
        let last = Vec2::ZERO;
        let mut draws = vec![Vec2::new(0.5, 0.5), Vec2::new(3.0, 0.0)].into_iter();
        let mut calls = 0;
        let pos = spaced_sample(last, || {
            calls += 1;
            draws.next().unwrap_or(Vec2::splat(-9.0))
        });
        assert_eq!(pos, Vec2::new(3.0, 0.0));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_spacing_gives_up_after_resamples() {
        let last = Vec2::ZERO;
        let mut calls = 0;
        let pos = spaced_sample(last, || {
            calls += 1;
            Vec2::new(0.1 * calls as f32, 0.0)
        });
        assert_eq!(calls, OBSTACLE_RESAMPLE_ATTEMPTS + 1);
        // The last draw is accepted even though it is still too close
        assert_eq!(pos, Vec2::new(0.1 * calls as f32, 0.0));
        assert!(last.distance_squared(pos) <= OBSTACLE_SPACING_SQ);
    }

    #[test]
    fn test_spawned_obstacle_becomes_spacing_anchor() {
        let mut state = GameState::new(21);
        spawn_obstacle(&mut state, -30.0);
        let placed = state.obstacles.get(0).map(|o| o.pos).unwrap_or_default();
        assert_eq!(state.streamer.last_obstacle, Vec2::new(placed.x, placed.y));
    }

    #[test]
    fn test_pickup_mix_is_mostly_speed() {
        let mut state = GameState::new(2024);
        let draws = 4000;
        for i in 0..draws {
            spawn_pickup(&mut state, -(i as f32));
        }
        let heals = state
            .pickups
            .iter()
            .filter(|p| p.kind == PickupKind::Heal)
            .count();
        let share = heals as f32 / draws as f32;
        assert!((share - HEAL_PICKUP_CHANCE).abs() < 0.03, "heal share {share}");
    }

    #[test]
    fn test_pickup_cluster_lands_before_frontier() {
        for seed in 0..200 {
            let mut state = GameState::new(seed);
            let frontier = -40.0;
            spawn_pickup_cluster(&mut state, frontier);
            assert!(!state.pickups.is_empty() && state.pickups.len() <= 2);
            for p in state.pickups.iter() {
                assert!(p.pos.z <= frontier && p.pos.z >= frontier - 10.0, "z {}", p.pos.z);
            }
        }
    }

    #[test]
    fn test_pickup_cluster_skipped_when_full() {
        let mut state = GameState::new(8);
        for i in 0..MAX_PICKUPS - 1 {
            spawn_pickup(&mut state, -100.0 - i as f32);
        }
        spawn_pickup_cluster(&mut state, -20.0);
        assert_eq!(state.pickups.len(), MAX_PICKUPS);
        spawn_pickup_cluster(&mut state, -40.0);
        assert_eq!(state.pickups.len(), MAX_PICKUPS);
    }

    proptest! {
        #[test]
        fn frontiers_only_decrease(seed in any::<u64>(), steps in prop::collection::vec(0.0f32..3.0, 1..40)) {
            let mut state = GameState::new(seed);
            stream_hazards(&mut state);
            for step in steps {
                let (obstacle_z, pickup_z) = (state.streamer.next_obstacle_z, state.streamer.next_pickup_z);
                state.player.pos.z -= step;
                stream_hazards(&mut state);
                prop_assert!(state.streamer.next_obstacle_z <= obstacle_z);
                prop_assert!(state.streamer.next_pickup_z <= pickup_z);
                prop_assert!(state.streamer.next_obstacle_z <= state.player.pos.z - OBSTACLE_LOOKAHEAD);
            }
        }
    }
}
