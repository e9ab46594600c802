//! Game simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Seeded RNG only
//! - Drawing is recorded into a `Frame`, never performed
//! - Input arrives as an explicit event list per tick

pub mod collision;
pub mod frame;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{laser_hits_enemy, laser_hits_player, player_hits, within};
pub use frame::{DrawCommand, Frame};
pub use spawn::{add_enemies, random};
pub use state::{
    Bonus, BonusKind, ENEMY_COLORS, Enemy, GameEvent, GamePhase, GameState, Laser,
    LaserDirection, PLAYER_COLOR, Player, ShipColor, Spaceship, Star, Viewport,
};
pub use tick::{
    Gates, InputEvent, TickInput, apply_bonus, kill_enemies, tick, tick_with_gates,
};
