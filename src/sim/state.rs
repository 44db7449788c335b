//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; collaborators only see it
//! through [`GameEvent`]s and read access.

use glam::{EulerRot, Mat3, Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combat::Weapon;
use super::pools::{BurstPool, Pool};
use super::space::Aabb;
use super::streamer::HazardStreamer;
use crate::audio::SoundCue;
use crate::consts::*;

/// Message shown while nothing more interesting is happening
pub const DEFAULT_STATUS: &str = "Drag, tap, or use arrows to weave through the asteroid field.";

/// Player hull box relative to the craft position (nose cone plus shield ring)
pub const PLAYER_BOX_LO: Vec3 = Vec3::new(-0.53, -0.4, -0.68);
pub const PLAYER_BOX_HI: Vec3 = Vec3::new(0.53, 0.45, 0.55);

/// Burst colors (0xRRGGBB)
pub mod colors {
    pub const DEBRIS: u32 = 0xfff0a1;
    pub const LASER: u32 = 0x7df9ff;
    pub const IMPACT: u32 = 0xff4f70;
    pub const HEAL: u32 = 0x90fff4;
    pub const SPEED: u32 = 0xfff2a8;
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Flying
    Running,
    /// Hull failed; waiting for restart
    GameOver,
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Restores hull integrity
    Heal,
    /// Feeds the speed boost accumulator
    Speed,
}

/// Why an obstacle left the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyCause {
    Impact,
    Laser,
    /// Fell behind the player
    Passed,
}

/// An asteroid in the corridor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
    /// Euler angles, cosmetic
    pub rotation: Vec3,
    /// Radians per second around each axis
    pub spin: Vec3,
    /// Circumscribed radius
    pub size: f32,
}

impl Obstacle {
    /// World box of the rotated hull: the icosahedron's local box with its
    /// corners turned by `rotation`, boxed again
    pub fn bounds(&self) -> Aabb {
        let rot = Mat3::from_quat(Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        ));
        let abs = Mat3::from_cols(rot.x_axis.abs(), rot.y_axis.abs(), rot.z_axis.abs());
        let half = abs * Vec3::splat(self.size * OBSTACLE_HULL_EXTENT);
        Aabb::from_center(self.pos, half)
    }

    pub fn rotate(&mut self, dt: f32) {
        self.rotation += self.spin * dt;
    }
}

/// A collectible orb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec3,
    /// Spin around y, cosmetic
    pub spin_angle: f32,
}

impl Pickup {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec3::splat(PICKUP_RADIUS))
    }
}

/// Debris from a destruction or collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstParticle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Seconds remaining
    pub life: f32,
    /// Seconds at spawn
    pub ttl: f32,
    pub color: u32,
}

impl BurstParticle {
    pub fn opacity(&self) -> f32 {
        (self.life / self.ttl).max(0.0)
    }
}

/// A fired laser beam (visual only; its damage is applied at fire time)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserBeam {
    /// Center of the beam
    pub pos: Vec3,
    pub ttl: f32,
}

impl LaserBeam {
    pub fn opacity(&self) -> f32 {
        LASER_OPACITY * (self.ttl / LASER_TTL).max(0.0)
    }
}

/// Hull integrity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            current: HEALTH_MAX,
            max: HEALTH_MAX,
        }
    }
}

impl Health {
    /// The only mutation path: add `delta` and clamp to `[0, max]`
    pub fn change(&mut self, delta: f32) -> f32 {
        self.current = (self.current + delta).clamp(0.0, self.max);
        self.current
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }

    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }

    /// Rounded percentage for display
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

/// Per-run bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    /// Survives restarts
    pub best_score: u64,
    pub pickups_collected: u32,
    /// Depth at which the run started
    pub run_origin_z: f32,
    pub forward_speed: f32,
    pub base_speed: f32,
    pub max_speed: f32,
    pub speed_boost: f32,
    /// Crash flash intensity, 0-1
    pub crash_fx: f32,
    pub phase: GamePhase,
}

impl RunState {
    pub fn new(origin_z: f32, best_score: u64) -> Self {
        Self {
            score: 0,
            best_score,
            pickups_collected: 0,
            run_origin_z: origin_z,
            forward_speed: BASE_SPEED,
            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            speed_boost: 0.0,
            crash_fx: 0.0,
            phase: GamePhase::Running,
        }
    }

    /// Gameplay systems are frozen
    pub fn paused(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// The player craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Visual bank, derived from lateral position
    pub roll: f32,
    pub yaw: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::from_array(PLAYER_START),
            roll: 0.0,
            yaw: 0.0,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_offsets(self.pos, PLAYER_BOX_LO, PLAYER_BOX_HI)
    }
}

/// Chase camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec3,
    pub look_at: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, 1.4, 6.5),
            look_at: Vec3::new(0.0, 0.6, -4.0),
        }
    }
}

/// Background animation inputs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backdrop {
    pub nebula_time: f32,
    pub star_offset: f32,
}

/// HUD status text with an expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusLine {
    pub text: String,
    pub timer: f32,
}

/// Events for the presentation and audio collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ObstacleSpawned { id: u32, pos: Vec3, size: f32 },
    ObstacleDestroyed { id: u32, pos: Vec3, cause: DestroyCause },
    PickupSpawned { id: u32, kind: PickupKind, pos: Vec3 },
    PickupCollected { id: u32, kind: PickupKind },
    PickupRetired { id: u32 },
    LaserFired { origin: Vec3 },
    HealthChanged { current: f32, max: f32 },
    ScoreChanged { score: u64 },
    NewBest { best: u64 },
    Status { text: String },
    Sound { cue: SoundCue },
    GameOver { final_score: u64, best: u64 },
    Restarted,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation clock (seconds), advances every tick even when paused
    pub time: f64,
    pub run: RunState,
    pub health: Health,
    pub player: Player,
    pub camera: Camera,
    pub backdrop: Backdrop,
    pub status: StatusLine,
    pub weapon: Weapon,
    pub streamer: HazardStreamer,
    pub obstacles: Pool<Obstacle>,
    pub pickups: Pool<Pickup>,
    pub bursts: BurstPool,
    pub lasers: Pool<LaserBeam>,
    /// Pending events, drained by the host each frame
    pub events: Vec<GameEvent>,
    /// Crash flash disabled (reduced motion)
    pub calm_fx: bool,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_best(seed, 0)
    }

    /// Create a fresh run that already knows the persisted best score
    pub fn with_best(seed: u64, best_score: u64) -> Self {
        let player = Player::default();
        let origin_z = player.pos.z;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            run: RunState::new(origin_z, best_score),
            health: Health::default(),
            camera: Camera::default(),
            backdrop: Backdrop::default(),
            status: StatusLine {
                text: DEFAULT_STATUS.to_string(),
                timer: 4.0,
            },
            weapon: Weapon::default(),
            streamer: HazardStreamer::new(origin_z),
            obstacles: Pool::new(),
            pickups: Pool::new(),
            bursts: BurstPool::default(),
            lasers: Pool::new(),
            events: Vec::new(),
            calm_fx: false,
            player,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_status(&mut self, text: impl Into<String>, secs: f32) {
        let text = text.into();
        self.status.text.clone_from(&text);
        self.status.timer = secs;
        self.emit(GameEvent::Status { text });
    }

    /// Raise the crash flash unless reduced motion is on
    pub fn flash(&mut self) {
        if !self.calm_fx {
            self.run.crash_fx = 1.0;
        }
    }

    /// Back to a fresh run: everything but the best score, the clock and the RNG
    pub fn restart(&mut self) {
        self.obstacles.clear();
        self.pickups.clear();
        self.bursts.clear();
        self.lasers.clear();

        self.player = Player::default();
        let origin_z = self.player.pos.z;
        self.run = RunState::new(origin_z, self.run.best_score);
        self.health.reset();
        self.streamer.reset(origin_z);

        self.emit(GameEvent::Restarted);
        self.emit(GameEvent::HealthChanged {
            current: self.health.current,
            max: self.health.max,
        });
        self.emit(GameEvent::ScoreChanged { score: 0 });
        self.set_status("Drag, tap, or use arrows to drift through the asteroid field.", 3.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1);
        assert_eq!(state.run.phase, GamePhase::Running);
        assert!(!state.run.paused());
        assert_eq!(state.health.current, HEALTH_MAX);
        assert_eq!(state.run.forward_speed, BASE_SPEED);
        assert_eq!(state.run.run_origin_z, state.player.pos.z);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_health_clamps() {
        let mut health = Health::default();
        assert_eq!(health.change(-250.0), 0.0);
        assert!(health.is_depleted());
        assert_eq!(health.change(40.0), 40.0);
        assert_eq!(health.change(500.0), HEALTH_MAX);
        assert_eq!(health.percent(), 100);
    }

    #[test]
    fn test_player_box_surrounds_player() {
        let player = Player::default();
        assert!(player.bounds().contains(player.pos));
    }

    fn rock(size: f32, rotation: Vec3) -> Obstacle {
        Obstacle {
            id: 1,
            pos: Vec3::ZERO,
            rotation,
            spin: Vec3::ZERO,
            size,
        }
    }

    #[test]
    fn test_obstacle_box_unrotated_is_inside_radius() {
        let b = rock(1.0, Vec3::ZERO).bounds();
        assert!((b.max.x - 0.8507).abs() < 1e-3);
        assert!((b.min.y + 0.8507).abs() < 1e-3);
        assert!((b.max.z - 0.8507).abs() < 1e-3);
    }

    #[test]
    fn test_obstacle_box_grows_when_turned() {
        let quarter = std::f32::consts::FRAC_PI_4;
        let b = rock(1.0, Vec3::new(0.0, 0.0, quarter)).bounds();
        // Box corners swing out to h * (cos + sin) along x and y
        let expected = OBSTACLE_HULL_EXTENT * 2.0_f32.sqrt();
        assert!((b.max.x - expected).abs() < 1e-3);
        assert!((b.max.y - expected).abs() < 1e-3);
        assert!((b.max.z - OBSTACLE_HULL_EXTENT).abs() < 1e-3);
    }

    #[test]
    fn test_first_run_and_restart_frontiers() {
        let mut state = GameState::new(2);
        assert_eq!(state.streamer.next_obstacle_z, -OBSTACLE_FIRST_LEAD);
        assert_eq!(state.streamer.next_pickup_z, -PICKUP_FRONTIER_LEAD);
        state.player.pos.z = -50.0;
        state.restart();
        let z = state.player.pos.z;
        assert_eq!(state.streamer.next_obstacle_z, z - OBSTACLE_FRONTIER_LEAD);
        assert_eq!(state.streamer.next_pickup_z, z - PICKUP_FRONTIER_LEAD);
    }

    #[test]
    fn test_restart_keeps_best() {
        let mut state = GameState::with_best(3, 900);
        state.run.score = 500;
        state.run.pickups_collected = 3;
        state.health.change(-100.0);
        state.run.phase = GamePhase::GameOver;
        state.player.pos.z = -80.0;
        state.restart();

        assert_eq!(state.run.score, 0);
        assert_eq!(state.run.pickups_collected, 0);
        assert_eq!(state.health.current, state.health.max);
        assert!(!state.run.paused());
        assert_eq!(state.run.best_score, 900);
        assert_eq!(state.run.run_origin_z, state.player.pos.z);
        assert!(state.events.contains(&GameEvent::Restarted));
    }

    proptest! {
        #[test]
        fn obstacle_box_holds_the_hull(
            size in OBSTACLE_SIZE_MIN..(OBSTACLE_SIZE_MIN + OBSTACLE_SIZE_SPAN),
            rx in -10.0f32..10.0,
            ry in -10.0f32..10.0,
            rz in -10.0f32..10.0,
        ) {
            let b = rock(size, Vec3::new(rx, ry, rz)).bounds();
            let inner = size * OBSTACLE_HULL_EXTENT - 1e-4;
            let outer = size * OBSTACLE_HULL_EXTENT * 3.0_f32.sqrt() + 1e-4;
            for half in [b.max.x, b.max.y, b.max.z] {
                prop_assert!(half >= inner && half <= outer, "half extent {half}");
            }
            prop_assert_eq!(b.min, -b.max);
        }

        #[test]
        fn health_stays_in_range(deltas in prop::collection::vec(-200.0f32..200.0, 0..64)) {
            let mut health = Health::default();
            for delta in deltas {
                let now = health.change(delta);
                prop_assert!((0.0..=health.max).contains(&now));
            }
        }
    }
}
