//! Game settings
//!
//! Defaults reproduce the classic game. The web bootstrap may override them
//! with a JSON object placed on the canvas `data-settings` attribute.

use serde::{Deserialize, Serialize};

use crate::consts::{NB_ENEMIES, STARS_PER_FRAME};
use crate::error::GameError;

/// Largest wave the spawner will accept
pub const MAX_TARGET_POPULATION: u32 = 240;
/// Upper bound on decorative stars per frame
pub const MAX_STARS_PER_FRAME: u32 = 64;

/// How Left/Right keys and screen bounds act on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// Keys reverse the drift direction, bounds clamp the ship on screen
    #[default]
    #[serde(alias = "steer")]
    Steer,
    /// Keys and bounds negate the x coordinate (classic behavior)
    #[serde(alias = "legacy", alias = "classic")]
    Legacy,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Steer => "Steer",
            ControlScheme::Legacy => "Legacy",
        }
    }
}

/// Pixel size of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl SpriteSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Sprite sizes used by collision tests and edge bounces.
///
/// Must match the shipped artwork since sprites are blitted unscaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteMetrics {
    pub enemy: SpriteSize,
    pub player: SpriteSize,
    pub laser: SpriteSize,
    pub bonus: SpriteSize,
}

impl Default for SpriteMetrics {
    fn default() -> Self {
        Self {
            enemy: SpriteSize::new(64.0, 48.0),
            player: SpriteSize::new(64.0, 64.0),
            laser: SpriteSize::new(9.0, 33.0),
            bonus: SpriteSize::new(40.0, 40.0),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Enemies in a full wave
    pub target_population: u32,
    /// Player control behavior
    pub control_scheme: ControlScheme,
    /// Sprite sizes for collisions
    pub sprites: SpriteMetrics,
    /// Fixed RNG seed (None = seeded from the clock)
    pub seed: Option<u64>,

    // === Visuals ===
    /// Decorative stars drawn each frame
    pub stars_per_frame: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all sound effects
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_population: NB_ENEMIES,
            control_scheme: ControlScheme::default(),
            sprites: SpriteMetrics::default(),
            seed: None,

            stars_per_frame: STARS_PER_FRAME,

            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them. Missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| GameError::invalid(format!("settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the game cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        if self.target_population < 3 {
            return Err(GameError::invalid(format!(
                "target population {} is below 3, waves would never refill",
                self.target_population
            )));
        }
        if self.target_population > MAX_TARGET_POPULATION {
            return Err(GameError::invalid(format!(
                "target population {} exceeds {MAX_TARGET_POPULATION}",
                self.target_population
            )));
        }
        let sprites = [
            ("enemy", self.sprites.enemy),
            ("player", self.sprites.player),
            ("laser", self.sprites.laser),
            ("bonus", self.sprites.bonus),
        ];
        for (name, size) in sprites {
            if !size.is_valid() {
                return Err(GameError::invalid(format!(
                    "{name} sprite size {}x{} must be positive",
                    size.width, size.height
                )));
            }
        }
        if self.stars_per_frame > MAX_STARS_PER_FRAME {
            return Err(GameError::invalid(format!(
                "stars per frame {} exceeds {MAX_STARS_PER_FRAME}",
                self.stars_per_frame
            )));
        }
        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(GameError::invalid(format!(
                "master volume {} outside 0.0 - 1.0",
                self.master_volume
            )));
        }
        Ok(())
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Canvas attribute holding a JSON settings override
    pub const CANVAS_ATTRIBUTE: &'static str = "data-settings";

    /// Read settings from the canvas attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Result<Self, GameError> {
        match canvas.get_attribute(Self::CANVAS_ATTRIBUTE) {
            Some(json) if !json.trim().is_empty() => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", Self::CANVAS_ATTRIBUTE);
                Ok(settings)
            }
            _ => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }
}
