//! Sprite and sound identifiers and the paths they resolve to
//!
//! The simulation only names assets; loading and caching belong to the
//! renderer and audio manager.

use serde::{Deserialize, Serialize};

use crate::sim::ShipColor;

/// Something drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Enemy { color: ShipColor, variant: u8 },
    Player { color: ShipColor, variant: u8 },
    Laser { color: ShipColor },
    Blast,
    NuclearBomb,
    DoublePoint,
}

impl Sprite {
    /// Conventional asset path for this sprite
    pub fn path(&self) -> String {
        match self {
            Sprite::Enemy { color, variant } => {
                format!("assets/enemy-{}-{}.png", color.as_str(), variant)
            }
            Sprite::Player { color, variant } => {
                format!("assets/player-{}-{}.png", color.as_str(), variant)
            }
            Sprite::Laser { color } => format!("assets/laser-{}.png", color.as_str()),
            Sprite::Blast => "assets/blast.png".to_string(),
            Sprite::NuclearBomb => "assets/nuclear-bomb.png".to_string(),
            Sprite::DoublePoint => "assets/2.png".to_string(),
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Any ship fires a laser
    Laser,
    /// A ship is destroyed
    Explosion,
    /// Nuclear bomb bonus picked up
    Nuclear,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::Laser,
        SoundEffect::Explosion,
        SoundEffect::Nuclear,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            SoundEffect::Laser => "sounds/laser.mp3",
            SoundEffect::Explosion => "sounds/explosion.mp3",
            SoundEffect::Nuclear => "sounds/nuclear.mp3",
        }
    }
}
