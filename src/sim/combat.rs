//! Laser weapon: cooldown gate, beam lifetime and the carve
//!
//! A shot's damage is resolved entirely at fire time. The beam entity that
//! lingers afterwards is only there to be drawn.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{DestroyCause, GameEvent, GameState, LaserBeam, colors};
use crate::audio::SoundCue;
use crate::consts::*;

/// Cooldown clock for the laser
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Weapon {
    /// Simulation time of the last accepted shot
    pub last_fire: Option<f64>,
}

impl Weapon {
    pub fn ready(&self, now: f64) -> bool {
        match self.last_fire {
            Some(last) => now - last >= LASER_COOLDOWN as f64,
            None => true,
        }
    }

    /// Seconds until the next shot is accepted
    pub fn cooldown_remaining(&self, now: f64) -> f32 {
        match self.last_fire {
            Some(last) => (LASER_COOLDOWN as f64 - (now - last)).max(0.0) as f32,
            None => 0.0,
        }
    }
}

/// Whether `target` sits inside the reach box of a shot fired from `origin`
pub fn in_reach(origin: Vec3, target: Vec3) -> bool {
    let dz = target.z - origin.z;
    if dz >= -LASER_MUZZLE || dz <= -(LASER_LENGTH + 1.0) {
        return false;
    }
    (target.x - origin.x).abs() <= LASER_HALF_WIDTH && (target.y - origin.y).abs() <= LASER_HALF_HEIGHT
}

/// Host-facing trigger. Ignored while the run is over.
/// Returns true when a beam was created.
pub fn request_fire(state: &mut GameState) -> bool {
    if state.run.paused() {
        return false;
    }
    fire_laser(state)
}

fn fire_laser(state: &mut GameState) -> bool {
    if !state.weapon.ready(state.time) {
        return false;
    }
    state.weapon.last_fire = Some(state.time);

    let origin = state.player.pos;
    let beam_pos = origin - Vec3::new(0.0, 0.0, LASER_LENGTH / 2.0 + 0.5);
    state.lasers.push(LaserBeam {
        pos: beam_pos,
        ttl: LASER_TTL,
    });
    state.emit(GameEvent::LaserFired { origin });

    let carved = carve(state, origin);
    log::debug!("Laser fired at z={:.1}, carved {}", origin.z, carved);

    state.emit(GameEvent::Sound { cue: SoundCue::Fire });
    state.set_status("Laser burst engaged!", 1.6);
    true
}

/// Destroy every obstacle inside the beam's reach box. Returns how many went.
pub fn carve(state: &mut GameState, origin: Vec3) -> usize {
    let mut carved = 0;
    for i in (0..state.obstacles.len()).rev() {
        let hit = state
            .obstacles
            .get(i)
            .is_some_and(|o| in_reach(origin, o.pos));
        if hit {
            let obstacle = state.obstacles.remove(i);
            state.bursts.spawn(&mut state.rng, obstacle.pos, colors::LASER);
            state.emit(GameEvent::ObstacleDestroyed {
                id: obstacle.id,
                pos: obstacle.pos,
                cause: DestroyCause::Laser,
            });
            carved += 1;
        }
    }
    carved
}
