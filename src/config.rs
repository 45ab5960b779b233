/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub level: LevelConfig,
    pub window: WindowConfig,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub tick_hz: u32,
}

#[derive(Clone, Debug)]
pub struct LevelConfig {
    pub width: f32,
    pub height: f32,
    pub enemies: usize,
}

/// Simulated viewport, in level-space pixels. The level is deliberately
/// wider than the viewport — that difference is what makes it scroll.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub jump: Vec<String>,
    pub quit: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            speed: SpeedConfig { tick_hz: default_tick_hz() },
            level: LevelConfig {
                width: default_level_width(),
                height: default_level_height(),
                enemies: default_enemies(),
            },
            window: WindowConfig {
                width: default_window_width(),
                height: default_window_height(),
            },
            gamepad: GamepadConfig {
                jump: default_jump(),
                quit: default_quit(),
            },
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    level: TomlLevel,
    #[serde(default)]
    window: TomlWindow,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_hz")]
    tick_hz: u32,
}

#[derive(Deserialize, Debug)]
struct TomlLevel {
    #[serde(default = "default_level_width")]
    width: f32,
    #[serde(default = "default_level_height")]
    height: f32,
    #[serde(default = "default_enemies")]
    enemies: usize,
}

#[derive(Deserialize, Debug)]
struct TomlWindow {
    #[serde(default = "default_window_width")]
    width: f32,
    #[serde(default = "default_window_height")]
    height: f32,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_jump")]
    jump: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

// ── Defaults ──

fn default_tick_hz() -> u32 { 60 }
fn default_level_width() -> f32 { 1000.0 }
fn default_level_height() -> f32 { 500.0 }
fn default_enemies() -> usize { 8 }
fn default_window_width() -> f32 { 800.0 }
fn default_window_height() -> f32 { 450.0 }

fn default_jump() -> Vec<String> { vec!["A".into(), "B".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_hz: default_tick_hz() }
    }
}

impl Default for TomlLevel {
    fn default() -> Self {
        TomlLevel {
            width: default_level_width(),
            height: default_level_height(),
            enemies: default_enemies(),
        }
    }
}

impl Default for TomlWindow {
    fn default() -> Self {
        TomlWindow {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            jump: default_jump(),
            quit: default_quit(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());

        GameConfig {
            speed: SpeedConfig { tick_hz: toml_cfg.speed.tick_hz },
            level: LevelConfig {
                width: toml_cfg.level.width,
                height: toml_cfg.level.height,
                enemies: toml_cfg.level.enemies,
            },
            window: WindowConfig {
                width: toml_cfg.window.width,
                height: toml_cfg.window.height,
            },
            gamepad: GamepadConfig {
                jump: toml_cfg.gamepad.jump,
                quit: toml_cfg.gamepad.quit,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so data is found relative to the real binary.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
