//! Player motion controller and input state
//!
//! Input collaborators only need to answer two questions: where should the
//! craft be laterally, and where vertically.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::space::PLAY_BOUNDS;
use super::state::Player;
use crate::consts::*;
use crate::{damp, map_linear};

/// Steering targets in play-bounds coordinates
pub trait InputSource {
    fn desired_x(&self) -> f32;
    fn desired_y(&self) -> f32;
}

/// Named keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "ArrowUp" | "KeyW" => Some(Key::Up),
            "ArrowDown" | "KeyS" => Some(Key::Down),
            "Space" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Pointer + keyboard state, written by the host's event handlers
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub pointer_active: bool,
    /// Already mapped into play bounds
    pub pointer_x: f32,
    pub pointer_y: f32,
    keys: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Record a pointer position given in normalized screen space
    /// (`0,0` top-left, `1,1` bottom-right)
    pub fn set_pointer(&mut self, nx: f32, ny: f32) {
        self.pointer_x = PLAY_BOUNDS.clamp_x((nx - 0.5) * PLAY_BOUNDS.x_half_width * 2.0);
        self.pointer_y = PLAY_BOUNDS.clamp_y(map_linear(
            1.0 - ny,
            0.0,
            1.0,
            PLAY_BOUNDS.y_min,
            PLAY_BOUNDS.y_max,
        ));
    }

    pub fn pointer_down(&mut self, nx: f32, ny: f32) {
        self.pointer_active = true;
        self.set_pointer(nx, ny);
    }

    pub fn pointer_move(&mut self, nx: f32, ny: f32) {
        if self.pointer_active {
            self.set_pointer(nx, ny);
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer_active = false;
    }

    /// Forget held keys and pointer
    pub fn clear(&mut self) {
        self.pointer_active = false;
        self.keys.clear();
    }

    fn axis(&self, negative: Key, positive: Key) -> f32 {
        let mut dir = 0.0;
        if self.is_down(negative) {
            dir -= 1.0;
        }
        if self.is_down(positive) {
            dir += 1.0;
        }
        dir
    }
}

impl InputSource for InputState {
    fn desired_x(&self) -> f32 {
        if self.pointer_active {
            return self.pointer_x;
        }
        self.axis(Key::Left, Key::Right) * PLAY_BOUNDS.x_half_width * KEY_X_FRACTION
    }

    fn desired_y(&self) -> f32 {
        if self.pointer_active {
            return self.pointer_y;
        }
        let dir = self.axis(Key::Down, Key::Up);
        PLAY_BOUNDS.clamp_y(dir * PLAY_BOUNDS.y_max * KEY_Y_FRACTION)
    }
}

impl Player {
    /// Damp toward the steering target, then hard-clamp to the lane
    pub fn steer(&mut self, target_x: f32, target_y: f32, dt: f32) {
        self.pos.x = damp(self.pos.x, target_x, PLAYER_X_RATE, dt);
        self.pos.y = damp(self.pos.y, target_y, PLAYER_Y_RATE, dt);
        self.pos.x = PLAY_BOUNDS.clamp_x(self.pos.x);
        self.pos.y = PLAY_BOUNDS.clamp_y(self.pos.y);

        self.roll = damp(self.roll, -self.pos.x * 0.1, 8.0, dt);
        self.yaw = damp(self.yaw, self.pos.x * 0.02, 4.0, dt);
    }

    /// Fly forward (toward -z)
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.pos.z -= speed * dt;
    }
}

/// One tick of the motion controller
pub fn update_player(player: &mut Player, input: &dyn InputSource, forward_speed: f32, dt: f32) {
    player.steer(input.desired_x(), input.desired_y(), dt);
    player.advance(forward_speed, dt);
}
