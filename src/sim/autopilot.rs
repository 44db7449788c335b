//! Idle/demo pilot
//!
//! Dodges the nearest obstacle on a collision course, goes after pickups
//! when the way is clear, and fires whenever something sits in laser reach.

use super::combat::in_reach;
use super::player::InputSource;
use super::space::PLAY_BOUNDS;
use super::state::GameState;

/// How far ahead the pilot looks for trouble
const THREAT_RANGE: f32 = 30.0;
/// How far ahead the pilot will chase a pickup
const PICKUP_RANGE: f32 = 40.0;
/// Extra lateral room kept around an obstacle when dodging
const DODGE_MARGIN: f32 = 1.5;

/// Computer-controlled input
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    target_x: f32,
    target_y: f32,
    fire: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last plan wants the laser
    pub fn wants_fire(&self) -> bool {
        self.fire
    }

    /// Decide where to go for the coming tick
    pub fn plan(&mut self, state: &GameState) {
        let me = state.player.pos;

        self.fire = state.obstacles.iter().any(|o| in_reach(me, o.pos));

        // Closest obstacle ahead that overlaps our lane
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.pos.z < me.z && o.pos.z > me.z - THREAT_RANGE)
            .filter(|o| {
                (o.pos.x - me.x).abs() < o.size + DODGE_MARGIN
                    && (o.pos.y - me.y).abs() < o.size + 1.0
            })
            .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z));

        if let Some(o) = threat {
            // Slip past on whichever side has more room
            let left = o.pos.x - o.size - DODGE_MARGIN;
            let right = o.pos.x + o.size + DODGE_MARGIN;
            let left_room = left + PLAY_BOUNDS.x_half_width;
            let right_room = PLAY_BOUNDS.x_half_width - right;
            self.target_x = if left_room >= right_room { left } else { right };
            self.target_y = me.y;
        } else if let Some(p) = state
            .pickups
            .iter()
            .filter(|p| p.pos.z < me.z && p.pos.z > me.z - PICKUP_RANGE)
            .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
        {
            self.target_x = p.pos.x;
            self.target_y = p.pos.y;
        } else {
            self.target_x = 0.0;
            self.target_y = 0.0;
        }

        self.target_x = PLAY_BOUNDS.clamp_x(self.target_x);
        self.target_y = PLAY_BOUNDS.clamp_y(self.target_y);
    }
}

impl InputSource for Autopilot {
    fn desired_x(&self) -> f32 {
        self.target_x
    }

    fn desired_y(&self) -> f32 {
        self.target_y
    }
}
