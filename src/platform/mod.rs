//! Platform abstraction layer
//!
//! Keyboard events are captured by browser callbacks, translated here and
//! queued until the next tick consumes them.

use crate::sim::{InputEvent, TickInput};

/// Map a `KeyboardEvent.key` value to a game command
pub fn key_to_event(key: &str) -> Option<InputEvent> {
    match key {
        "ArrowLeft" | "Left" => Some(InputEvent::MoveLeft),
        "ArrowRight" | "Right" => Some(InputEvent::MoveRight),
        " " | "Spacebar" => Some(InputEvent::Fire),
        _ => None,
    }
}

/// Events captured since the last tick
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Translate and queue a key press. Returns whether the key was bound.
    pub fn push_key(&mut self, key: &str) -> bool {
        match key_to_event(key) {
            Some(event) => {
                self.push(event);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Hand every pending event to the next tick
    pub fn drain(&mut self) -> TickInput {
        TickInput::new(std::mem::take(&mut self.pending))
    }
}
