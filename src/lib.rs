//! Star Shooter - a browser arcade shooter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (entities, collisions, spawning, display list)
//! - `renderer`: Canvas 2D replay of a simulated frame
//! - `audio`: Sound effects through `HtmlAudioElement`
//! - `platform`: Keyboard input mapping and queueing
//! - `settings`: Startup configuration and validation

pub mod assets;
pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use error::GameError;
pub use settings::{ControlScheme, Settings, SpriteMetrics};

/// Game configuration constants
pub mod consts {
    /// Target enemy population of a full wave
    pub const NB_ENEMIES: u32 = 12;
    /// Magic threshold the per-frame gate values are compared against
    pub const RANDOM_NUMBER: i32 = 456;

    /// Gate ranges (exclusive upper bound)
    pub const FIRE_GATE_MAX: i32 = 500;
    pub const DESCEND_GATE_MAX: i32 = 1_000;
    pub const BONUS_GATE_MAX: i32 = 10_000;
    /// Width of the enemy fire window below RANDOM_NUMBER
    pub const FIRE_WINDOW: i32 = 10;
    /// Width of the double-point window above RANDOM_NUMBER
    pub const DOUBLE_POINT_WINDOW: i32 = 10;
    /// Width of the nuclear window above RANDOM_NUMBER * 10
    pub const NUCLEAR_WINDOW: i32 = 5;
    /// Events gated on score only fire once the score exceeds this
    pub const GATE_MIN_SCORE: u64 = 1;

    /// Laser vertical speed (pixels/frame)
    pub const LASER_SPEED: f32 = 5.0;
    /// Bonus fall speed (pixels/frame)
    pub const BONUS_FALL_SPEED: f32 = 2.0;
    /// Player starting horizontal velocity (pixels/frame)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Wave descent step (pixels)
    pub const DESCENT_STEP: f32 = 150.0;

    /// Wave layout
    pub const WAVE_START_Y: f32 = 20.0;
    pub const WAVE_ROW_STEP: f32 = 100.0;
    pub const WAVE_ROW_SIZE: usize = 4;
    pub const WAVE_LEFT_MARGIN: i32 = 50;
    pub const WAVE_RIGHT_MARGIN: i32 = 100;
    /// Enemy speed range (exclusive upper bound)
    pub const ENEMY_MIN_SPEED: i32 = 1;
    pub const ENEMY_MAX_SPEED: i32 = 10;

    /// Sprite variant ranges (exclusive upper bound)
    pub const ENEMY_VARIANTS: (i32, i32) = (1, 5);
    pub const PLAYER_VARIANTS: (i32, i32) = (1, 3);

    /// Player spawn position as divisors of the viewport size
    pub const PLAYER_SPAWN_X_DIVISOR: f32 = 2.2;
    pub const PLAYER_SPAWN_Y_DIVISOR: f32 = 1.2;

    /// Decorative stars
    pub const STARS_PER_FRAME: u32 = 2;
    pub const STAR_MIN_RADIUS: i32 = 1;
    pub const STAR_MAX_RADIUS: i32 = 5;
}
