/// World: the level and everything in it, plus the scroll camera.
///
/// Constructed once at startup; entities live for the process lifetime.
/// Nothing is added or removed mid-run. The world knows nothing about the
/// terminal — input arrives as `FrameInput` and drawing goes through
/// `sim::draw::Surface`, so the whole simulation runs headless in tests.

use rand::Rng;

use crate::config::GameConfig;
use crate::domain::color::Color;
use crate::domain::entity::{Enemy, Flagpole, Player, ENEMY_SIZE, PLAYER_SIZE};
use crate::domain::geom::Rect;
use crate::domain::physics::{self, ENEMY_MAX_SPEED, GROUND_HEIGHT};
use crate::domain::tile::Tile;

/// Horizontal scroll camera with a dead zone.
///
/// `offset` is the level-space x of the viewport's left edge. The player
/// roams freely inside the 40%–60% band of the viewport; the camera moves
/// only to keep them inside that band, and never scrolls past the level.
#[derive(Clone, Debug)]
pub struct Camera {
    pub offset: f32,
}

impl Camera {
    pub fn new() -> Self {
        Camera { offset: 0.0 }
    }

    /// Pull the viewport along so `target_x` stays inside the dead zone.
    pub fn follow(&mut self, target_x: f32, view_w: f32, level_w: f32) {
        if target_x > self.offset + view_w * 0.6 {
            self.offset = target_x - view_w * 0.6;
        }
        if target_x < self.offset + view_w * 0.4 {
            self.offset = target_x - view_w * 0.4;
        }
        self.offset = self.offset.clamp(0.0, (level_w - view_w).max(0.0));
    }
}

pub struct World {
    pub tiles: Vec<Tile>,
    pub enemies: Vec<Enemy>,
    pub player: Player,
    pub goal: Flagpole,
    pub background: Color,
    pub camera: Camera,
    pub level_w: f32,
    #[allow(dead_code)]
    pub level_h: f32,
    pub view_w: f32,
    pub view_h: f32,
    pub tick: u64,
}

impl World {
    /// Build the level: one ground slab spanning the full width, a random
    /// patrol population, the goal flagpole at the far end, and the player
    /// centered in the starting viewport, resting on the ground.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let level_w = config.level.width;
        let view_w = config.window.width;
        let view_h = config.window.height;
        let ground_y = physics::ground_line(view_h);

        let tiles = vec![Tile::ground(
            Rect::new(0.0, ground_y, level_w, GROUND_HEIGHT),
            Color::BROWN,
        )];

        let enemies = (0..config.level.enemies)
            .map(|_| {
                let x = rng.gen_range(0.0..=(level_w - ENEMY_SIZE));
                let vx = rng.gen_range(-ENEMY_MAX_SPEED..=ENEMY_MAX_SPEED);
                Enemy::new(x, ground_y - ENEMY_SIZE, vx as f32)
            })
            .collect();

        let goal = Flagpole::new(level_w - 20.0, ground_y - Flagpole::HEIGHT);
        let player = Player::new(view_w / 2.0 - PLAYER_SIZE / 2.0, ground_y - PLAYER_SIZE);

        World {
            tiles,
            enemies,
            player,
            goal,
            background: Color::SKY_BLUE,
            camera: Camera::new(),
            level_w,
            level_h: config.level.height,
            view_w,
            view_h,
            tick: 0,
        }
    }

    /// Y of the ground line for this world's viewport.
    #[inline]
    pub fn ground_y(&self) -> f32 {
        physics::ground_line(self.view_h)
    }
}
