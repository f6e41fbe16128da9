//! Wiggle Platformer - A tile-based side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game stages)
//! - `level`: Level data records and validation
//! - `input`: Keyboard bindings to per-tick input
//! - `audio`: Sound/music cues for the audio layer
//! - `view`: Read-only frame snapshot for the renderer
//! - `settings`: User configuration
//! - `demo`: Seeded auto-pilot for attract mode

pub mod audio;
pub mod demo;
pub mod input;
pub mod level;
pub mod settings;
pub mod sim;
pub mod view;

pub use level::{LevelData, LevelError, LevelSet};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Size of one grid cell in world units
    pub const GRID_SIZE: f32 = 64.0;
    /// Fixed simulation rate (ticks per second)
    pub const FPS: u32 = 60;

    /// Screen dimensions (23 x 12 cells)
    pub const SCREEN_WIDTH: f32 = 23.0 * GRID_SIZE;
    pub const SCREEN_HEIGHT: f32 = 12.0 * GRID_SIZE;

    /// Hero defaults
    pub const HERO_WIDTH: f32 = 56.0;
    pub const HERO_HEIGHT: f32 = 64.0;
    pub const HERO_SPEED: f32 = 5.0;
    pub const HERO_JUMP_POWER: f32 = 13.0;
    pub const HERO_MAX_HEARTS: u8 = 3;
    /// Invulnerability window after a hit (1 second)
    pub const HURT_COOLDOWN_TICKS: u32 = FPS;
    /// Knockback speed on enemy contact, applied per axis
    pub const KNOCKBACK_SPEED: f32 = 5.0;

    /// Downward probe distance for jump eligibility and ledge detection
    pub const LEDGE_PROBE: f32 = 2.0;

    /// Enemy defaults
    pub const PATROLLER_WIDTH: f32 = 50.0;
    pub const PATROLLER_HEIGHT: f32 = 28.0;
    pub const PATROLLER_SPEED: f32 = 2.0;
    pub const FLYER_WIDTH: f32 = 64.0;
    pub const FLYER_HEIGHT: f32 = 48.0;
    pub const FLYER_SPEED: f32 = 5.0;

    /// Currency pickup size
    pub const CURRENCY_SIZE: f32 = 32.0;
    pub const GOLD_POINTS: u64 = 10;
    pub const BRONZE_POINTS: u64 = 20;

    /// Level completion
    pub const LEVEL_COMPLETE_TICKS: u32 = 3 * FPS;
    pub const LEVEL_BONUS: u64 = 100;

    /// Animation cadence (ticks per frame)
    pub const ANIMATION_INTERVAL: u32 = 10;
    pub const FLYER_ANIMATION_INTERVAL: u32 = 8;

    /// Background parallax factor
    pub const PARALLAX_FACTOR: f32 = 0.05;
}

/// Convert a tile column/row to the world-space center of that cell
#[inline]
pub fn tile_center(x: i32, y: i32) -> Vec2 {
    use consts::GRID_SIZE;
    Vec2::new(
        x as f32 * GRID_SIZE + GRID_SIZE / 2.0,
        y as f32 * GRID_SIZE + GRID_SIZE / 2.0,
    )
}

/// Convert a tile count to world units
#[inline]
pub fn tiles_to_world(tiles: u32) -> f32 {
    tiles as f32 * consts::GRID_SIZE
}
