//! Collision passes for the obstacle and pickup pools
//!
//! The player's box is taken once per pass from its post-motion position.
//! Both passes walk their pool back to front so removals don't disturb the
//! indices still to be visited.

use super::scoring::{collect_pickup, register_impact};
use super::space::Aabb;
use super::state::{DestroyCause, GameEvent, GameState, colors};
use crate::consts::*;

/// Entity is far enough behind the player to be out of view
#[inline]
pub fn is_behind(entity_z: f32, player_z: f32) -> bool {
    entity_z > player_z + RETIRE_BEHIND
}

/// Spin obstacles, resolve hits against the player, retire what was passed
pub fn update_obstacles(state: &mut GameState, dt: f32) {
    let player_box: Aabb = state.player.bounds();
    let player_z = state.player.pos.z;

    for i in (0..state.obstacles.len()).rev() {
        let Some(obstacle) = state.obstacles.get_mut(i) else {
            continue;
        };
        obstacle.rotate(dt);
        let hit = player_box.intersects(&obstacle.bounds());
        let passed = is_behind(obstacle.pos.z, player_z);

        if hit {
            register_impact(state);
            destroy_obstacle(state, i, DestroyCause::Impact, colors::IMPACT);
        } else if passed {
            destroy_obstacle(state, i, DestroyCause::Passed, colors::DEBRIS);
        }
    }
}

/// Remove the obstacle at `index` in a puff of debris
pub fn destroy_obstacle(state: &mut GameState, index: usize, cause: DestroyCause, color: u32) {
    let obstacle = state.obstacles.remove(index);
    state.bursts.spawn(&mut state.rng, obstacle.pos, color);
    state.emit(GameEvent::ObstacleDestroyed {
        id: obstacle.id,
        pos: obstacle.pos,
        cause,
    });
}

/// Animate pickups, collect the ones the player touches, retire what was passed
pub fn update_pickups(state: &mut GameState, dt: f32) {
    let player_box = state.player.bounds();
    let player_z = state.player.pos.z;
    let time = state.time as f32;
    // Nothing is collected once the hull has failed
    let collecting = !state.run.paused();

    for i in (0..state.pickups.len()).rev() {
        let Some(pickup) = state.pickups.get_mut(i) else {
            continue;
        };
        pickup.spin_angle += dt * 1.4;
        pickup.pos.y += (time + pickup.pos.z).sin() * 0.0008;

        if collecting && player_box.intersects(&pickup.bounds()) {
            let pickup = state.pickups.remove(i);
            collect_pickup(state, &pickup);
            continue;
        }
        if is_behind(pickup.pos.z, player_z) {
            let pickup = state.pickups.remove(i);
            state.emit(GameEvent::PickupRetired { id: pickup.id });
        }
    }
}
