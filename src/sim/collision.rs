//! Distance-based hit tests
//!
//! Positions are sprite anchors (top-left corners), not centers. Every test
//! compares the anchor distance against a threshold built from sprite heights.

use glam::Vec2;

use crate::settings::SpriteMetrics;

/// Anchors closer than `threshold`
#[inline]
pub fn within(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Player touching an object: sum of both half-heights
pub fn player_hits(player: Vec2, player_height: f32, other: Vec2, other_height: f32) -> bool {
    within(player, other, player_height / 2.0 + other_height / 2.0)
}

/// Player laser touching an enemy: laser height plus enemy height
pub fn laser_hits_enemy(laser: Vec2, enemy: Vec2, sprites: &SpriteMetrics) -> bool {
    within(laser, enemy, sprites.laser.height + sprites.enemy.height)
}

/// Enemy laser touching the player: laser height only
pub fn laser_hits_player(laser: Vec2, player: Vec2, sprites: &SpriteMetrics) -> bool {
    within(laser, player, sprites.laser.height)
}
