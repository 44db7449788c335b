//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable delta, clamped per tick
//! - Seeded RNG only
//! - Pools scanned back to front when removing
//! - No rendering, audio or storage dependencies (collaborators consume events)

pub mod autopilot;
pub mod collision;
pub mod combat;
pub mod driver;
pub mod player;
pub mod pools;
pub mod scoring;
pub mod snapshot;
pub mod space;
pub mod state;
pub mod streamer;
pub mod tick;

pub use autopilot::Autopilot;
pub use combat::{Weapon, carve, in_reach, request_fire};
pub use driver::{FrameClock, run};
pub use player::{InputSource, InputState, Key};
pub use pools::{BurstPool, Pool};
pub use scoring::score_for;
pub use snapshot::Snapshot;
pub use space::{Aabb, PLAY_BOUNDS, PlayBounds};
pub use state::{
    BurstParticle, DestroyCause, GameEvent, GamePhase, GameState, Health, LaserBeam, Obstacle,
    Pickup, PickupKind, Player, RunState,
};
pub use streamer::HazardStreamer;
pub use tick::{clamp_delta, tick};
