/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use rand::thread_rng;

use config::GameConfig;
use domain::entity::{FrameInput, MoveDir};
use sim::step;
use sim::world::World;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    let mut world = World::new(&config, &mut thread_rng());

    let mut renderer = Renderer::new(config.window.width, config.window.height);
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Sparky!");
}

fn game_loop(
    world: &mut World,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);

    let tick_rate = Duration::from_secs_f64(1.0 / config.speed.tick_hz.max(1) as f64);
    let mut last_tick = Instant::now();

    // Jump is edge-triggered: latch presses seen between ticks so a tap
    // that lands mid-frame still registers on the next simulation step.
    let mut pending_jump = false;

    loop {
        kb.drain_events();
        gp.update();

        if kb.quit_pressed() || gp.quit_pressed() {
            break;
        }
        if kb.jump_pressed() || gp.jump_pressed() {
            pending_jump = true;
        }

        if last_tick.elapsed() >= tick_rate {
            let input = FrameInput {
                movement: detect_movement(&kb, &gp),
                jump: std::mem::take(&mut pending_jump),
            };
            step::step(world, input);

            // One draw per update: simulation and render rates are coupled.
            renderer.render(world)?;
            last_tick = Instant::now();
        }

        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn detect_movement(kb: &InputState, gp: &GamepadState) -> Option<MoveDir> {
    // Right wins when both directions are held.
    if kb.right_held() || gp.right_held() {
        Some(MoveDir::Right)
    } else if kb.left_held() || gp.left_held() {
        Some(MoveDir::Left)
    } else {
        None
    }
}
