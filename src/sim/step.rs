/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Tiles (static terrain, nothing to advance)
///   2. Enemy patrol + boundary reflection
///   3. Player: intent → jump → gravity → integrate → ground → clamp
///   4. Camera follow
///
/// Within the player pass, gravity lands before ground resolution, so the
/// player never renders inside the ground; the horizontal clamp runs after
/// integration, so the player never leaves the level even transiently.

use crate::domain::entity::{FrameInput, MoveDir};
use crate::domain::physics::{self, GRAVITY, JUMP_VELOCITY, RUN_SPEED};

use super::world::World;

pub fn step(world: &mut World, input: FrameInput) {
    world.tick += 1;

    resolve_tiles(world);
    resolve_enemies(world);
    resolve_player(world, input);

    world
        .camera
        .follow(world.player.rect.x, world.view_w, world.level_w);
}

fn resolve_tiles(world: &mut World) {
    for tile in &mut world.tiles {
        tile.tick();
    }
}

fn resolve_enemies(world: &mut World) {
    for enemy in &mut world.enemies {
        enemy.rect.x += enemy.vel.x;

        // Reflect on crossing, no positional correction: a fast enemy can
        // overshoot for one tick before the flipped velocity brings it back.
        if physics::hits_level_bounds(&enemy.rect, world.level_w) {
            enemy.vel.x = -enemy.vel.x;
        }
    }
}

fn resolve_player(world: &mut World, input: FrameInput) {
    let ground_y = world.ground_y();
    let p = &mut world.player;

    p.vel.x = match input.movement {
        Some(MoveDir::Right) => RUN_SPEED,
        Some(MoveDir::Left) => -RUN_SPEED,
        None => 0.0,
    };

    if input.jump && !p.jumping {
        p.vel.y = JUMP_VELOCITY;
        p.jumping = true;
    }

    // Applies even while grounded; the snap below undoes it.
    p.vel.y += GRAVITY;

    p.rect.x += p.vel.x;
    p.rect.y += p.vel.y;

    if physics::settle_on_ground(&mut p.rect, ground_y) {
        p.vel.y = 0.0;
        p.jumping = false;
    }

    physics::clamp_to_level(&mut p.rect, world.level_w);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GameConfig;
    use crate::domain::entity::{Enemy, ENEMY_SIZE, PLAYER_SIZE};

    fn build() -> World {
        World::new(&GameConfig::default(), &mut StdRng::seed_from_u64(7))
    }

    fn idle() -> FrameInput {
        FrameInput { movement: None, jump: false }
    }

    fn held(dir: MoveDir) -> FrameInput {
        FrameInput { movement: Some(dir), jump: false }
    }

    fn jump() -> FrameInput {
        FrameInput { movement: None, jump: true }
    }

    // ── Player ──

    #[test]
    fn grounded_player_stays_pinned() {
        let mut w = build();
        let y0 = w.player.rect.y;
        for _ in 0..5 {
            step(&mut w, idle());
            assert_eq!(w.player.rect.y, y0);
            assert_eq!(w.player.rect.bottom(), w.ground_y());
            assert_eq!(w.player.vel.y, 0.0);
            assert!(!w.player.jumping);
        }
    }

    #[test]
    fn run_speed_snaps_without_acceleration() {
        let mut w = build();
        let x0 = w.player.rect.x;

        step(&mut w, held(MoveDir::Right));
        assert_eq!(w.player.vel.x, RUN_SPEED);
        assert_eq!(w.player.rect.x, x0 + RUN_SPEED);

        step(&mut w, idle());
        assert_eq!(w.player.vel.x, 0.0);
        assert_eq!(w.player.rect.x, x0 + RUN_SPEED);

        step(&mut w, held(MoveDir::Left));
        assert_eq!(w.player.vel.x, -RUN_SPEED);
        assert_eq!(w.player.rect.x, x0);
    }

    #[test]
    fn gravity_accumulates_half_unit_per_airborne_tick() {
        let mut w = build();
        step(&mut w, jump());
        assert_eq!(w.player.vel.y, JUMP_VELOCITY + GRAVITY);

        for k in 1..=5 {
            step(&mut w, idle());
            assert_eq!(w.player.vel.y, JUMP_VELOCITY + GRAVITY * (k + 1) as f32);
            assert_eq!(w.player.vel.x, 0.0);
        }
    }

    #[test]
    fn jump_arc_returns_to_rest() {
        let mut w = build();
        let ground = w.ground_y();

        step(&mut w, jump());
        assert!(w.player.jumping);

        let mut ticks = 1;
        while w.player.jumping {
            assert!(w.player.rect.bottom() < ground);
            step(&mut w, idle());
            ticks += 1;
            assert!(ticks < 100, "never landed");
        }

        // -10 + 0.5k crosses zero displacement on the 39th step; the
        // continuous-time estimate 2·10/0.5 = 40 overshoots by the one
        // tick the impulse and the first gravity application share.
        assert_eq!(ticks, 39);
        assert_eq!(w.player.rect.bottom(), ground);
        assert_eq!(w.player.vel.y, 0.0);
    }

    #[test]
    fn jump_press_is_ignored_while_airborne() {
        let mut w = build();
        step(&mut w, jump());
        let vy = w.player.vel.y;

        // A second press mid-air must not re-apply the impulse.
        step(&mut w, jump());
        assert_eq!(w.player.vel.y, vy + GRAVITY);
        assert!(w.player.jumping);
    }

    #[test]
    fn player_is_clamped_at_both_walls() {
        let mut w = build();

        w.player.rect.x = 2.0;
        step(&mut w, held(MoveDir::Left));
        assert_eq!(w.player.rect.x, 0.0);
        step(&mut w, held(MoveDir::Left));
        assert_eq!(w.player.rect.x, 0.0);

        w.player.rect.x = w.level_w - PLAYER_SIZE - 2.0;
        for _ in 0..3 {
            step(&mut w, held(MoveDir::Right));
            assert!(w.player.rect.x >= 0.0);
            assert!(w.player.rect.right() <= w.level_w);
        }
        assert_eq!(w.player.rect.x, w.level_w - PLAYER_SIZE);
    }

    // ── Enemies ──

    #[test]
    fn enemy_reflects_at_left_wall() {
        let mut w = build();
        w.enemies = vec![Enemy::new(0.0, 340.0, -2.0)];

        step(&mut w, idle());
        let e = &w.enemies[0];
        assert_eq!(e.vel.x, 2.0);
        assert_eq!(e.rect.x, -2.0); // overshoot is not corrected this tick

        step(&mut w, idle());
        assert_eq!(w.enemies[0].rect.x, 0.0);
        assert_eq!(w.enemies[0].vel.x, 2.0);
    }

    #[test]
    fn enemy_reflects_at_right_wall() {
        let mut w = build();
        w.enemies = vec![Enemy::new(w.level_w - ENEMY_SIZE, 340.0, 2.0)];

        step(&mut w, idle());
        let e = &w.enemies[0];
        assert_eq!(e.vel.x, -2.0);
        assert_eq!(e.rect.right(), w.level_w + 2.0);
    }

    #[test]
    fn patrol_speed_magnitude_is_invariant() {
        let mut w = build();
        w.enemies = vec![Enemy::new(100.0, 340.0, 2.0)];

        for _ in 0..500 {
            step(&mut w, idle());
            let e = &w.enemies[0];
            assert_eq!(e.vel.x.abs(), 2.0);
            // overshoot never exceeds one tick of travel
            assert!(e.rect.x >= -2.0);
            assert!(e.rect.right() <= w.level_w + 2.0);
        }
    }

    #[test]
    fn stationary_enemy_never_moves() {
        let mut w = build();
        w.enemies = vec![Enemy::new(500.0, 340.0, 0.0)];

        for _ in 0..100 {
            step(&mut w, idle());
        }
        assert_eq!(w.enemies[0].rect.x, 500.0);
        assert_eq!(w.enemies[0].vel.x, 0.0);
    }

    // ── Camera through the full pipeline ──

    #[test]
    fn scroll_offset_tracks_a_rightward_run() {
        let mut w = build();
        let band = w.view_w * 0.6; // 480
        let max_offset = w.level_w - w.view_w; // 200

        for _ in 0..130 {
            step(&mut w, held(MoveDir::Right));
            let px = w.player.rect.x;
            let expected = (px - band).clamp(0.0, max_offset);
            assert_eq!(w.camera.offset, expected);
        }
        assert_eq!(w.camera.offset, max_offset);
    }

    #[test]
    fn scroll_offset_is_stable_while_resting() {
        let mut w = build();
        for _ in 0..30 {
            step(&mut w, held(MoveDir::Right));
        }
        let offset = w.camera.offset;

        step(&mut w, idle());
        assert_eq!(w.camera.offset, offset);
        step(&mut w, idle());
        assert_eq!(w.camera.offset, offset);
    }

    #[test]
    fn scroll_offset_follows_a_walk_back() {
        let mut w = build();
        for _ in 0..130 {
            step(&mut w, held(MoveDir::Right));
        }
        assert_eq!(w.camera.offset, 200.0);

        // Walk left until the player crosses the 40% band, then the camera
        // must track player.x - 0.4·view_w all the way to the left edge.
        let band = w.view_w * 0.4; // 320
        for _ in 0..200 {
            step(&mut w, held(MoveDir::Left));
            let px = w.player.rect.x;
            if px < 200.0 + band {
                assert_eq!(w.camera.offset, (px - band).clamp(0.0, 200.0));
            }
        }
        assert_eq!(w.player.rect.x, 0.0);
        assert_eq!(w.camera.offset, 0.0);
    }
}
