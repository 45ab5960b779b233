/// Entities: the player, patrolling enemies, and the goal flagpole.
/// Each entity fully owns its rectangle; everything is a plain value type.

use super::geom::{Rect, Vec2};

pub const PLAYER_SIZE: f32 = 40.0;
pub const ENEMY_SIZE: f32 = 30.0;

/// Horizontal movement intent (continuous while the key is held).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Left,
    Right,
}

/// Input for one simulation tick.
/// Movement is level-triggered (key currently held); jump is edge-triggered
/// (true only on the tick of the initial press, never while held).
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub movement: Option<MoveDir>,
    pub jump: bool,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub jumping: bool,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Player {
            rect: Rect::new(x, y, PLAYER_SIZE, PLAYER_SIZE),
            vel: Vec2::ZERO,
            jumping: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub vel: Vec2,
    /// Set at spawn, never consulted. Kept as inert state until a
    /// deactivation rule exists to read it.
    #[allow(dead_code)]
    pub active: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32, vx: f32) -> Self {
        Enemy {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            vel: Vec2::new(vx, 0.0),
            active: true,
        }
    }
}

/// The level-end marker. Purely decorative: nothing checks for contact.
#[derive(Clone, Debug)]
pub struct Flagpole {
    pub rect: Rect,
}

impl Flagpole {
    pub const WIDTH: f32 = 10.0;
    pub const HEIGHT: f32 = 200.0;

    pub fn new(x: f32, y: f32) -> Self {
        Flagpole {
            rect: Rect::new(x, y, Self::WIDTH, Self::HEIGHT),
        }
    }
}
