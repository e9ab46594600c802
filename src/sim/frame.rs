//! Per-tick display list
//!
//! The tick records what to draw, in order, at the moment the classic loop
//! would have drawn it. Renderers replay the list verbatim.

use glam::Vec2;

use super::state::{GameEvent, Star};
use crate::assets::Sprite;

/// A single drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface black
    Clear,
    /// White filled circle
    Star(Star),
    /// Unscaled blit with the top-left corner at `pos`
    Sprite { sprite: Sprite, pos: Vec2 },
}

/// Output of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Score displayed this frame (value before this tick's changes)
    pub score: u64,
    pub commands: Vec<DrawCommand>,
    pub events: Vec<GameEvent>,
}

impl Frame {
    pub fn new(score: u64) -> Self {
        Self {
            score,
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Score readout shown in the HUD
    pub fn score_text(&self) -> String {
        format!("Score : {}", self.score)
    }

    pub fn draw(&mut self, sprite: Sprite, pos: Vec2) {
        self.commands.push(DrawCommand::Sprite { sprite, pos });
    }

    /// Explosions are drawn once and voiced once, never retained
    pub fn explode(&mut self, pos: Vec2) {
        self.draw(Sprite::Blast, pos);
        self.events.push(GameEvent::Explosion { pos });
    }

    /// Positions at which `sprite` was drawn
    pub fn sprites_of(&self, sprite: Sprite) -> impl Iterator<Item = Vec2> + '_ {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Sprite { sprite: s, pos } if *s == sprite => Some(*pos),
            _ => None,
        })
    }

    pub fn stars(&self) -> impl Iterator<Item = &Star> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Star(star) => Some(star),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explode_draws_blast_and_raises_event() {
        let mut frame = Frame::new(3);
        assert_eq!(frame.score_text(), "Score : 3");
        frame.explode(Vec2::new(4.0, 5.0));
        assert_eq!(frame.sprites_of(Sprite::Blast).count(), 1);
        assert_eq!(
            frame.events,
            vec![GameEvent::Explosion {
                pos: Vec2::new(4.0, 5.0)
            }]
        );
    }
}
