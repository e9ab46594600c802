//! Per-frame simulation tick
//!
//! One call advances every entity by one frame, records the frame's display
//! list and decides whether the run goes on.

use glam::Vec2;
use rand::Rng;

use super::collision::{laser_hits_enemy, laser_hits_player, player_hits};
use super::frame::{DrawCommand, Frame};
use super::spawn::random;
use super::state::{
    Bonus, BonusKind, DOUBLE_POINT_VALUE, Enemy, GameEvent, GamePhase, GameState, Laser,
    LaserDirection, Star,
};
use crate::consts::*;
use crate::settings::SpriteMetrics;

/// A player command captured between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Input commands for a single tick, applied in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }
}

/// The three per-frame gate values, drawn fresh every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gates {
    /// Enemy fire, in `[0, FIRE_GATE_MAX)`
    pub fire: i32,
    /// Wave descent, in `[0, DESCEND_GATE_MAX)`
    pub descend: i32,
    /// Bonus spawn, in `[0, BONUS_GATE_MAX)`
    pub bonus: i32,
}

impl Gates {
    pub fn roll(rng: &mut impl Rng) -> Self {
        Self {
            fire: random(rng, 0, FIRE_GATE_MAX),
            descend: random(rng, 0, DESCEND_GATE_MAX),
            bonus: random(rng, 0, BONUS_GATE_MAX),
        }
    }
}

/// Enemy fire window, just below the magic number
pub fn fire_window(gate: i32) -> bool {
    (RANDOM_NUMBER - FIRE_WINDOW..=RANDOM_NUMBER).contains(&gate)
}

/// Wave descent, exactly the magic number
pub fn descend_window(gate: i32) -> bool {
    gate == RANDOM_NUMBER
}

/// Nuclear bomb spawn, just above ten times the magic number
pub fn nuclear_window(gate: i32) -> bool {
    gate > RANDOM_NUMBER * 10 && gate <= RANDOM_NUMBER * 10 + NUCLEAR_WINDOW
}

/// Double-point spawn, just above the magic number
pub fn double_point_window(gate: i32) -> bool {
    (RANDOM_NUMBER..=RANDOM_NUMBER + DOUBLE_POINT_WINDOW).contains(&gate)
}

/// Advance the game by one frame.
///
/// A lost game is frozen: the tick returns an empty frame and changes nothing.
pub fn tick(state: &mut GameState, input: &TickInput) -> Frame {
    if !state.is_running() {
        return Frame::new(state.score);
    }
    let gates = Gates::roll(&mut state.rng);
    tick_with_gates(state, input, gates)
}

/// Advance one frame with the gate values already drawn
pub fn tick_with_gates(state: &mut GameState, input: &TickInput, gates: Gates) -> Frame {
    let mut frame = Frame::new(state.score);
    if !state.is_running() {
        return frame;
    }
    state.frame_count += 1;

    let sprites = state.settings.sprites;
    let viewport = state.viewport;

    apply_input(state, input, &mut frame);

    let mut fire_gate = gates.fire;
    let descend_gate = gates.descend;
    let bonus_gate = gates.bonus;

    // Background
    frame.commands.push(DrawCommand::Clear);
    for _ in 0..state.settings.stars_per_frame {
        let x = random(&mut state.rng, 1, viewport.width as i32) as f32;
        let y = random(&mut state.rng, 1, viewport.height as i32) as f32;
        let radius = random(&mut state.rng, STAR_MIN_RADIUS, STAR_MAX_RADIUS) as f32;
        frame.commands.push(DrawCommand::Star(Star {
            pos: Vec2::new(x, y),
            radius,
        }));
    }

    // Enemies
    for i in 0..state.enemies.len() {
        let enemy = &mut state.enemies[i];
        frame.draw(enemy.sprite(), enemy.pos());
        enemy.ship.update(viewport.width, sprites.enemy);
        let enemy_pos = enemy.pos();

        let player_pos = state.player.pos();
        if player_hits(player_pos, sprites.player.height, enemy_pos, sprites.enemy.height) {
            state.player.kill();
            frame.explode(player_pos);
        }

        // The gate is replaced by the shooter index, which normally closes
        // the window for the rest of the frame.
        if fire_window(fire_gate) && state.score > GATE_MIN_SCORE {
            fire_gate = random(&mut state.rng, 0, state.enemies.len() as i32);
            let shooter = &state.enemies[fire_gate as usize];
            shooter
                .ship
                .shoot(sprites.enemy, LaserDirection::Down, &mut state.enemy_lasers);
            frame.events.push(GameEvent::LaserFired {
                direction: LaserDirection::Down,
            });
        }

        if enemy_pos.y + sprites.enemy.height >= viewport.height {
            state.player.kill();
        }
    }

    if descend_window(descend_gate) && state.score > GATE_MIN_SCORE {
        log::debug!("Wave descends {DESCENT_STEP}px");
        for enemy in &mut state.enemies {
            enemy.ship.pos.y += DESCENT_STEP;
        }
    }

    if state.enemies.len() <= state.refill_threshold() {
        let count = state.refill_count();
        log::debug!("{} enemies left, adding {count}", state.enemies.len());
        state.spawn_wave(count);
    }

    sweep_enemy_lasers(state, &mut frame);
    sweep_player_lasers(state, &mut frame);

    if nuclear_window(bonus_gate) && state.score > GATE_MIN_SCORE {
        spawn_bonus(state, BonusKind::NuclearBomb);
    }
    if double_point_window(bonus_gate) && state.score > GATE_MIN_SCORE {
        spawn_bonus(state, BonusKind::DoublePoint);
    }

    sweep_bonuses(state, &mut frame);

    // Player
    let scheme = state.settings.control_scheme;
    frame.draw(state.player.sprite(), state.player.pos());
    state.player.ship.update(viewport.width, sprites.player);
    state.player.check_bounds(viewport.width, sprites.player, scheme);

    if !state.player.is_alive() {
        state.phase = GamePhase::Lost;
        frame.events.push(GameEvent::PlayerLost);
        log::info!(
            "Player lost after {} frames with score {}",
            state.frame_count,
            state.score
        );
    }

    frame
}

fn apply_input(state: &mut GameState, input: &TickInput, frame: &mut Frame) {
    let scheme = state.settings.control_scheme;
    for event in &input.events {
        match event {
            InputEvent::MoveLeft => state.player.steer(false, scheme),
            InputEvent::MoveRight => state.player.steer(true, scheme),
            InputEvent::Fire => {
                if state
                    .player
                    .can_fire(&state.player_lasers, state.viewport.height)
                {
                    state.player.ship.shoot(
                        state.settings.sprites.player,
                        LaserDirection::Up,
                        &mut state.player_lasers,
                    );
                    frame.events.push(GameEvent::LaserFired {
                        direction: LaserDirection::Up,
                    });
                }
            }
        }
    }
}

/// Enemy lasers: drop spent ones, otherwise draw, fall and test the player
fn sweep_enemy_lasers(state: &mut GameState, frame: &mut Frame) {
    let height = state.viewport.height;
    let sprites = state.settings.sprites;
    let lasers = std::mem::take(&mut state.enemy_lasers);

    for mut laser in lasers {
        if laser.is_off_screen(height) || !laser.is_active() {
            continue;
        }
        frame.draw(laser.sprite(), laser.pos);
        laser.update();

        let player_pos = state.player.pos();
        if laser_hits_player(laser.pos, player_pos, &sprites) {
            frame.explode(player_pos);
            state.player.kill();
            laser.deactivate();
        }
        state.enemy_lasers.push(laser);
    }
}

/// Player lasers: drop spent ones, otherwise draw, rise and test every enemy
fn sweep_player_lasers(state: &mut GameState, frame: &mut Frame) {
    let height = state.viewport.height;
    let sprites = state.settings.sprites;
    let lasers = std::mem::take(&mut state.player_lasers);

    for mut laser in lasers {
        if laser.is_off_screen(height) || !laser.is_active() {
            continue;
        }
        frame.draw(laser.sprite(), laser.pos);
        laser.update();

        let kills = kill_enemies(&mut laser, &mut state.enemies, &sprites, frame);
        state.score += kills;
        state.player_lasers.push(laser);
    }
}

/// Remove every enemy in range of `laser`, returning the kill count.
///
/// Survivors keep their order and no enemy is skipped.
pub fn kill_enemies(
    laser: &mut Laser,
    enemies: &mut Vec<Enemy>,
    sprites: &SpriteMetrics,
    frame: &mut Frame,
) -> u64 {
    let mut kills = 0;
    enemies.retain(|enemy| {
        if laser_hits_enemy(laser.pos, enemy.pos(), sprites) {
            frame.explode(enemy.pos());
            kills += 1;
            false
        } else {
            true
        }
    });
    if kills > 0 {
        laser.deactivate();
    }
    kills
}

fn spawn_bonus(state: &mut GameState, kind: BonusKind) {
    let x = random(&mut state.rng, 0, state.viewport.width as i32) as f32;
    let y = random(&mut state.rng, 0, (state.viewport.height / 3.0) as i32) as f32;
    log::debug!("Spawned {kind:?} bonus at ({x}, {y})");
    state.bonuses.push(Bonus::new(kind, Vec2::new(x, y)));
}

/// Bonuses: apply on contact, drop below the screen, otherwise draw and fall
fn sweep_bonuses(state: &mut GameState, frame: &mut Frame) {
    let sprites = state.settings.sprites;
    let height = state.viewport.height;
    let bonuses = std::mem::take(&mut state.bonuses);

    for mut bonus in bonuses {
        let player_pos = state.player.pos();
        if player_hits(player_pos, sprites.player.height, bonus.pos, sprites.bonus.height) {
            apply_bonus(state, &bonus, frame);
        } else if bonus.pos.y > height {
            continue;
        } else {
            frame.draw(bonus.sprite(), bonus.pos);
            bonus.update();
            state.bonuses.push(bonus);
        }
    }
}

/// Apply a picked-up bonus. The bonus itself is consumed by the caller.
pub fn apply_bonus(state: &mut GameState, bonus: &Bonus, frame: &mut Frame) {
    match bonus.kind {
        BonusKind::NuclearBomb => {
            let destroyed = state.enemies.len() as u64;
            state.score += destroyed;
            state.enemies.clear();
            frame.events.push(GameEvent::NuclearBlast { pos: bonus.pos });
            state.spawn_wave(state.settings.target_population);
            log::info!("Nuclear bomb cleared {destroyed} enemies");
        }
        BonusKind::DoublePoint => {
            state.score += DOUBLE_POINT_VALUE;
            log::info!("Double point bonus collected");
        }
    }
}
