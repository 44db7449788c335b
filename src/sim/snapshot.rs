//! Read-only view of a frame for the presentation collaborator

use glam::Vec3;
use serde::Serialize;

use super::state::{Backdrop, Camera, GamePhase, GameState, Health, Obstacle, Pickup, Player};

#[derive(Debug, Clone, Serialize)]
pub struct BeamView {
    pub pos: Vec3,
    pub opacity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec3,
    pub color: u32,
    pub opacity: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub best: u64,
    pub pickups_collected: u32,
    pub health: Health,
    pub health_percent: u32,
    pub forward_speed: f32,
    pub crash_fx: f32,
    /// Seconds until the laser can fire again
    pub laser_cooldown: f32,
    pub status: &'a str,
    pub player: &'a Player,
    pub camera: &'a Camera,
    pub backdrop: &'a Backdrop,
    pub obstacles: &'a [Obstacle],
    pub pickups: &'a [Pickup],
    pub beams: Vec<BeamView>,
    pub particles: Vec<ParticleView>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        Self {
            phase: state.run.phase,
            score: state.run.score,
            best: state.run.best_score,
            pickups_collected: state.run.pickups_collected,
            health: state.health,
            health_percent: state.health.percent(),
            forward_speed: state.run.forward_speed,
            crash_fx: state.run.crash_fx,
            laser_cooldown: state.weapon.cooldown_remaining(state.time),
            status: &state.status.text,
            player: &state.player,
            camera: &state.camera,
            backdrop: &state.backdrop,
            obstacles: state.obstacles.as_slice(),
            pickups: state.pickups.as_slice(),
            beams: state
                .lasers
                .iter()
                .map(|b| BeamView {
                    pos: b.pos,
                    opacity: b.opacity(),
                })
                .collect(),
            particles: state
                .bursts
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    color: p.color,
                    opacity: p.opacity(),
                })
                .collect(),
        }
    }
}
