//! Drift Runner - an endless-runner arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (streaming, motion, combat, collisions, scoring)
//! - `session`: Owns a run and wires it to storage and audio collaborators
//! - `persistence`: Key-value storage backends
//! - `platform`: Browser bindings (wasm32 only)
//! - `audio`: Sound cue sinks

pub mod audio;
pub mod best_score;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest delta a single tick may simulate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.12;

    /// Play bounds: lateral half width and vertical range
    pub const PLAY_X_HALF_WIDTH: f32 = 6.0;
    pub const PLAY_Y_MIN: f32 = -3.0;
    pub const PLAY_Y_MAX: f32 = 3.0;

    /// Player spawn point
    pub const PLAYER_START: [f32; 3] = [0.0, 0.3, 0.0];
    /// Lateral / vertical damping rates
    pub const PLAYER_X_RATE: f32 = 6.0;
    pub const PLAYER_Y_RATE: f32 = 4.0;
    /// Keyboard targets as fractions of the bounds
    pub const KEY_X_FRACTION: f32 = 0.7;
    pub const KEY_Y_FRACTION: f32 = 0.6;

    /// Forward speed (units/s)
    pub const BASE_SPEED: f32 = 12.0;
    pub const MAX_SPEED: f32 = 22.0;
    pub const SPEED_RATE: f32 = 1.2;
    /// Speed added per unit of boost
    pub const BOOST_SPEED_FACTOR: f32 = 3.0;
    pub const BOOST_DECAY: f32 = 0.8;
    pub const BOOST_PER_PICKUP: f32 = 0.6;
    pub const BOOST_CAP: f32 = 2.2;

    /// Health
    pub const HEALTH_MAX: f32 = 100.0;
    pub const HEAL_AMOUNT: f32 = 25.0;
    /// Impact damage, half-open range
    pub const DAMAGE_MIN: u32 = 24;
    pub const DAMAGE_MAX: u32 = 38;

    /// Scoring
    pub const DISTANCE_SCORE_FACTOR: f64 = 4.2;
    pub const PICKUP_SCORE: u64 = 50;

    /// Hazard streaming
    pub const OBSTACLE_LOOKAHEAD: f32 = 120.0;
    pub const PICKUP_LOOKAHEAD: f32 = 80.0;
    /// Obstacle frontier lead for the first run and for restarts
    pub const OBSTACLE_FIRST_LEAD: f32 = 18.0;
    pub const OBSTACLE_FRONTIER_LEAD: f32 = 20.0;
    pub const PICKUP_FRONTIER_LEAD: f32 = 12.0;
    pub const OBSTACLE_STEP_MIN: f32 = 8.0;
    pub const OBSTACLE_STEP_MAX: f32 = 15.0;
    pub const PICKUP_STEP_MIN: f32 = 12.0;
    pub const PICKUP_STEP_MAX: f32 = 18.0;
    pub const MAX_PICKUPS: usize = 16;
    pub const HEAL_PICKUP_CHANCE: f32 = 0.28;
    /// Soft spacing between consecutive obstacles (squared distance)
    pub const OBSTACLE_SPACING_SQ: f32 = 2.2;
    pub const OBSTACLE_RESAMPLE_ATTEMPTS: usize = 4;
    /// Entities further than this behind the player are retired
    pub const RETIRE_BEHIND: f32 = 5.0;

    /// Obstacle radius range
    pub const OBSTACLE_SIZE_MIN: f32 = 0.5;
    pub const OBSTACLE_SIZE_SPAN: f32 = 1.3;
    /// Half extent of the unrotated icosahedron hull per unit of radius
    pub const OBSTACLE_HULL_EXTENT: f32 = 0.850_650_8;
    pub const PICKUP_RADIUS: f32 = 0.28;

    /// Laser
    pub const LASER_LENGTH: f32 = 16.0;
    pub const LASER_HALF_WIDTH: f32 = 1.6;
    pub const LASER_HALF_HEIGHT: f32 = 1.3;
    pub const LASER_TTL: f32 = 0.23;
    pub const LASER_COOLDOWN: f32 = 0.4;
    /// Obstacles closer than this are behind the muzzle
    pub const LASER_MUZZLE: f32 = 0.4;
    pub const LASER_OPACITY: f32 = 0.85;

    /// Particles per burst
    pub const BURST_COUNT: usize = 16;
    pub const CRASH_FX_DECAY: f32 = 2.5;
}

/// Frame-rate independent exponential approach of `current` toward `target`
#[inline]
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    lerp(current, target, 1.0 - (-lambda * dt).exp())
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`
#[inline]
pub fn map_linear(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}
