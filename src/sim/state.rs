//! Game state and entity types
//!
//! One `GameState` owns every live entity. It is created at startup, mutated
//! once per tick and dropped on exit.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::{add_enemies, random};
use crate::assets::Sprite;
use crate::consts::*;
use crate::error::GameError;
use crate::settings::{ControlScheme, Settings, SpriteSize};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Loop keeps rescheduling itself
    Running,
    /// Player died; terminal
    Lost,
}

/// Ship and laser colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipColor {
    Green,
    Red,
    Blue,
}

/// Colors an enemy can be spawned with
pub const ENEMY_COLORS: [ShipColor; 2] = [ShipColor::Green, ShipColor::Red];
/// Color of the player ship
pub const PLAYER_COLOR: ShipColor = ShipColor::Blue;

impl ShipColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipColor::Green => "green",
            ShipColor::Red => "red",
            ShipColor::Blue => "blue",
        }
    }
}

/// Drawing surface size, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, GameError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(GameError::invalid(format!(
                "viewport {width}x{height} must be positive"
            )));
        }
        Ok(Self { width, height })
    }
}

/// Shared ship behavior for enemies and the player.
///
/// `pos` is the top-left corner of the sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Spaceship {
    pub pos: Vec2,
    /// Horizontal velocity in pixels/frame; the sign is the direction
    pub vel_x: f32,
    pub color: ShipColor,
    /// Sprite variant index within the color's asset set
    pub variant: u8,
}

impl Spaceship {
    /// Bounce off either screen edge, then drift.
    ///
    /// The right edge tests the sprite's far side, the left edge its anchor.
    pub fn update(&mut self, viewport_width: f32, size: SpriteSize) {
        if self.pos.x + size.width >= viewport_width {
            self.vel_x = -self.vel_x;
        }
        if self.pos.x <= 0.0 {
            self.vel_x = -self.vel_x;
        }
        self.pos.x += self.vel_x;
    }

    /// Fire a laser from the ship's right edge into `lasers`
    pub fn shoot(&self, size: SpriteSize, direction: LaserDirection, lasers: &mut Vec<Laser>) {
        let origin = Vec2::new(self.pos.x + size.width, self.pos.y);
        lasers.push(Laser::new(origin, LASER_SPEED, direction, self.color));
    }
}

/// An enemy ship
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub ship: Spaceship,
}

impl Enemy {
    pub fn new(pos: Vec2, vel_x: f32, color: ShipColor, variant: u8) -> Self {
        Self {
            ship: Spaceship {
                pos,
                vel_x,
                color,
                variant,
            },
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.ship.pos
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Enemy {
            color: self.ship.color,
            variant: self.ship.variant,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub ship: Spaceship,
    /// Latch: once false it never turns true again
    alive: bool,
}

impl Player {
    pub fn new(pos: Vec2, variant: u8) -> Self {
        Self {
            ship: Spaceship {
                pos,
                vel_x: PLAYER_SPEED,
                color: PLAYER_COLOR,
                variant,
            },
            alive: true,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.ship.pos
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Player {
            color: self.ship.color,
            variant: self.ship.variant,
        }
    }

    /// React to Left (`toward_right == false`) or Right when the ship is
    /// currently drifting the other way.
    pub fn steer(&mut self, toward_right: bool, scheme: ControlScheme) {
        let disagrees = if toward_right {
            self.ship.vel_x < 0.0
        } else {
            self.ship.vel_x > 0.0
        };
        if !disagrees {
            return;
        }
        match scheme {
            ControlScheme::Steer => self.ship.vel_x = -self.ship.vel_x,
            ControlScheme::Legacy => self.ship.pos.x = -self.ship.pos.x,
        }
    }

    /// Keep the ship within the screen
    pub fn check_bounds(&mut self, viewport_width: f32, size: SpriteSize, scheme: ControlScheme) {
        match scheme {
            ControlScheme::Steer => {
                let max_x = (viewport_width - size.width).max(0.0);
                self.ship.pos.x = self.ship.pos.x.clamp(0.0, max_x);
            }
            ControlScheme::Legacy => {
                if self.ship.pos.x + size.width / 2.0 >= viewport_width {
                    self.ship.pos.x = -self.ship.pos.x;
                }
                if self.ship.pos.x + size.width <= 0.0 {
                    self.ship.pos.x = -self.ship.pos.x;
                }
            }
        }
    }

    /// Fire only if no laser is in flight or the latest one has cleared the
    /// lower third of the screen.
    pub fn can_fire(&self, lasers: &[Laser], viewport_height: f32) -> bool {
        match lasers.last() {
            None => true,
            Some(last) => last.pos.y < viewport_height - viewport_height / 3.0,
        }
    }
}

/// Which way a laser travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaserDirection {
    /// Player-fired
    Up,
    /// Enemy-fired
    Down,
}

/// A laser shot
#[derive(Debug, Clone, PartialEq)]
pub struct Laser {
    pub pos: Vec2,
    pub vel_y: f32,
    pub direction: LaserDirection,
    pub color: ShipColor,
    /// Latch: false after a hit, removed on the next sweep
    active: bool,
}

impl Laser {
    pub fn new(pos: Vec2, vel_y: f32, direction: LaserDirection, color: ShipColor) -> Self {
        Self {
            pos,
            vel_y,
            direction,
            color,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn update(&mut self) {
        match self.direction {
            LaserDirection::Up => self.pos.y -= self.vel_y,
            LaserDirection::Down => self.pos.y += self.vel_y,
        }
    }

    /// Left the screen in its direction of travel
    pub fn is_off_screen(&self, viewport_height: f32) -> bool {
        match self.direction {
            LaserDirection::Up => self.pos.y < 0.0,
            LaserDirection::Down => self.pos.y > viewport_height,
        }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Laser { color: self.color }
    }
}

/// Bonus variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Scores every enemy on screen, then replaces the wave
    NuclearBomb,
    /// Flat two points
    DoublePoint,
}

/// Points a double-point bonus is worth
pub const DOUBLE_POINT_VALUE: u64 = 2;

/// A falling bonus
#[derive(Debug, Clone, PartialEq)]
pub struct Bonus {
    pub kind: BonusKind,
    pub pos: Vec2,
}

impl Bonus {
    pub fn new(kind: BonusKind, pos: Vec2) -> Self {
        Self { kind, pos }
    }

    pub fn update(&mut self) {
        self.pos.y += BONUS_FALL_SPEED;
    }

    pub fn sprite(&self) -> Sprite {
        match self.kind {
            BonusKind::NuclearBomb => Sprite::NuclearBomb,
            BonusKind::DoublePoint => Sprite::DoublePoint,
        }
    }
}

/// A decorative star, regenerated every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
}

/// Side effects of a tick the platform layer must voice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A laser was fired
    LaserFired { direction: LaserDirection },
    /// A ship blew up at this point
    Explosion { pos: Vec2 },
    /// A nuclear bomb was picked up at this point
    NuclearBlast { pos: Vec2 },
    /// The player died this tick
    PlayerLost,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub viewport: Viewport,
    pub rng: Pcg32,
    /// Only ever increases
    pub score: u64,
    pub phase: GamePhase,
    /// Ticks simulated so far
    pub frame_count: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_lasers: Vec<Laser>,
    pub enemy_lasers: Vec<Laser>,
    pub bonuses: Vec<Bonus>,
}

impl GameState {
    /// Create a new run: validated settings, a player and a full wave
    pub fn new(settings: Settings, viewport: Viewport, seed: u64) -> Result<Self, GameError> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let spawn = Vec2::new(
            viewport.width / PLAYER_SPAWN_X_DIVISOR,
            viewport.height / PLAYER_SPAWN_Y_DIVISOR,
        );
        let variant = random(&mut rng, PLAYER_VARIANTS.0, PLAYER_VARIANTS.1) as u8;
        let player = Player::new(spawn, variant);

        let mut state = Self {
            settings,
            viewport,
            rng,
            score: 0,
            phase: GamePhase::Running,
            frame_count: 0,
            player,
            enemies: Vec::new(),
            player_lasers: Vec::new(),
            enemy_lasers: Vec::new(),
            bonuses: Vec::new(),
        };
        state.spawn_wave(state.settings.target_population);

        log::info!(
            "New game: {}x{} viewport, {} enemies, {} controls, seed {}",
            viewport.width,
            viewport.height,
            state.enemies.len(),
            state.settings.control_scheme.as_str(),
            seed
        );
        Ok(state)
    }

    /// Append `count` enemies in the staggered wave layout
    pub fn spawn_wave(&mut self, count: u32) {
        add_enemies(&mut self.rng, &mut self.enemies, count, self.viewport.width);
    }

    /// Enemy count at or below which a partial wave is added
    pub fn refill_threshold(&self) -> usize {
        (self.settings.target_population / 3) as usize
    }

    /// Size of the partial wave added on refill
    pub fn refill_count(&self) -> u32 {
        self.settings.target_population.div_ceil(3)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(x: f32, vel_x: f32) -> Spaceship {
        Spaceship {
            pos: Vec2::new(x, 100.0),
            vel_x,
            color: ShipColor::Green,
            variant: 1,
        }
    }

    const SIZE: SpriteSize = SpriteSize::new(64.0, 48.0);

    #[test]
    fn ship_bounces_off_right_edge() {
        let mut s = ship(740.0, 3.0);
        s.update(800.0, SIZE);
        assert_eq!(s.vel_x, -3.0);
        assert_eq!(s.pos.x, 737.0);
    }

    #[test]
    fn ship_bounces_off_left_edge() {
        let mut s = ship(0.0, -4.0);
        s.update(800.0, SIZE);
        assert_eq!(s.vel_x, 4.0);
        assert_eq!(s.pos.x, 4.0);
    }

    #[test]
    fn ship_drifts_freely_mid_screen() {
        let mut s = ship(300.0, 2.0);
        s.update(800.0, SIZE);
        assert_eq!(s.vel_x, 2.0);
        assert_eq!(s.pos.x, 302.0);
    }

    #[test]
    fn shoot_anchors_at_right_edge() {
        let s = ship(100.0, 2.0);
        let mut lasers = Vec::new();
        s.shoot(SIZE, LaserDirection::Down, &mut lasers);
        assert_eq!(lasers.len(), 1);
        assert_eq!(lasers[0].pos, Vec2::new(164.0, 100.0));
        assert_eq!(lasers[0].vel_y, LASER_SPEED);
        assert_eq!(lasers[0].color, ShipColor::Green);
        assert!(lasers[0].is_active());
    }

    #[test]
    fn laser_moves_by_direction() {
        let mut up = Laser::new(Vec2::new(0.0, 50.0), 5.0, LaserDirection::Up, ShipColor::Blue);
        let mut down = Laser::new(Vec2::new(0.0, 50.0), 5.0, LaserDirection::Down, ShipColor::Red);
        up.update();
        down.update();
        assert_eq!(up.pos.y, 45.0);
        assert_eq!(down.pos.y, 55.0);
    }

    #[test]
    fn laser_off_screen_depends_on_direction() {
        let up = Laser::new(Vec2::new(0.0, -1.0), 5.0, LaserDirection::Up, ShipColor::Blue);
        let down = Laser::new(Vec2::new(0.0, -1.0), 5.0, LaserDirection::Down, ShipColor::Red);
        assert!(up.is_off_screen(600.0));
        assert!(!down.is_off_screen(600.0));
        let low = Laser::new(Vec2::new(0.0, 601.0), 5.0, LaserDirection::Down, ShipColor::Red);
        assert!(low.is_off_screen(600.0));
    }

    #[test]
    fn player_alive_is_a_latch() {
        let mut player = Player::new(Vec2::new(10.0, 10.0), 1);
        assert!(player.is_alive());
        player.kill();
        player.kill();
        assert!(!player.is_alive());
    }

    #[test]
    fn steer_reverses_velocity_only_on_disagreement() {
        let mut player = Player::new(Vec2::new(200.0, 500.0), 1);
        player.steer(true, ControlScheme::Steer);
        assert_eq!(player.ship.vel_x, PLAYER_SPEED);
        player.steer(false, ControlScheme::Steer);
        assert_eq!(player.ship.vel_x, -PLAYER_SPEED);
        assert_eq!(player.ship.pos.x, 200.0);
    }

    #[test]
    fn legacy_steer_negates_position() {
        let mut player = Player::new(Vec2::new(200.0, 500.0), 1);
        player.steer(false, ControlScheme::Legacy);
        assert_eq!(player.ship.pos.x, -200.0);
        assert_eq!(player.ship.vel_x, PLAYER_SPEED);
        // Already agrees with Right, nothing happens
        player.steer(true, ControlScheme::Legacy);
        assert_eq!(player.ship.pos.x, -200.0);
    }

    #[test]
    fn legacy_bounds_negate_position() {
        let size = SpriteSize::new(64.0, 64.0);
        // Right edge negates, then the left test sees the negated x and
        // negates it back
        let mut player = Player::new(Vec2::new(770.0, 500.0), 1);
        player.check_bounds(800.0, size, ControlScheme::Legacy);
        assert_eq!(player.ship.pos.x, 770.0);

        let mut player = Player::new(Vec2::new(-70.0, 500.0), 1);
        player.check_bounds(800.0, size, ControlScheme::Legacy);
        assert_eq!(player.ship.pos.x, 70.0);
    }

    #[test]
    fn steer_bounds_clamp() {
        let size = SpriteSize::new(64.0, 64.0);
        let mut player = Player::new(Vec2::new(790.0, 500.0), 1);
        player.check_bounds(800.0, size, ControlScheme::Steer);
        assert_eq!(player.ship.pos.x, 736.0);
        player.ship.pos.x = -12.0;
        player.check_bounds(800.0, size, ControlScheme::Steer);
        assert_eq!(player.ship.pos.x, 0.0);
    }

    #[test]
    fn fire_is_rate_limited_by_last_laser_height() {
        let player = Player::new(Vec2::new(200.0, 500.0), 1);
        let height = 600.0;
        assert!(player.can_fire(&[], height));
        let fresh = Laser::new(Vec2::new(0.0, 450.0), 5.0, LaserDirection::Up, ShipColor::Blue);
        assert!(!player.can_fire(&[fresh], height));
        let cleared = Laser::new(Vec2::new(0.0, 399.0), 5.0, LaserDirection::Up, ShipColor::Blue);
        assert!(player.can_fire(&[cleared], height));
    }

    #[test]
    fn bonus_falls() {
        let mut bonus = Bonus::new(BonusKind::DoublePoint, Vec2::new(5.0, 5.0));
        bonus.update();
        assert_eq!(bonus.pos.y, 7.0);
        assert_eq!(bonus.sprite(), Sprite::DoublePoint);
    }

    #[test]
    fn viewport_rejects_empty_surface() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, f32::NAN).is_err());
        assert!(Viewport::new(800.0, 600.0).is_ok());
    }

    #[test]
    fn new_game_spawns_full_wave_and_player() {
        let viewport = Viewport::new(1100.0, 840.0).unwrap();
        let state = GameState::new(Settings::default(), viewport, 42).unwrap();
        assert_eq!(state.enemies.len(), 12);
        assert!(state.player.pos().distance(Vec2::new(500.0, 700.0)) < 1e-3);
        assert!((1..3).contains(&state.player.ship.variant));
        assert_eq!(state.score, 0);
        assert!(state.is_running());
        assert_eq!(state.refill_threshold(), 4);
        assert_eq!(state.refill_count(), 4);
    }

    #[test]
    fn new_game_rejects_invalid_settings() {
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        let settings = Settings {
            target_population: 1,
            ..Default::default()
        };
        assert!(GameState::new(settings, viewport, 1).is_err());
    }

    #[test]
    fn refill_rounds_like_real_division() {
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        let settings = Settings {
            target_population: 13,
            ..Default::default()
        };
        let state = GameState::new(settings, viewport, 3).unwrap();
        assert_eq!(state.refill_threshold(), 4);
        assert_eq!(state.refill_count(), 5);
    }
}
