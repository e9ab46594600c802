//! Audio system using `HtmlAudioElement`
//!
//! Each play spawns a fresh element so overlapping shots don't cut each other
//! off. One watcher element per effect loads the file at startup and reports
//! load failures; a missing sound is logged once and silenced from then on.

use std::collections::HashSet;

use crate::assets::SoundEffect;
use crate::error::GameError;
use crate::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Sound voicing a simulation event, if any
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::LaserFired { .. } => Some(SoundEffect::Laser),
        GameEvent::Explosion { .. } => Some(SoundEffect::Explosion),
        GameEvent::NuclearBlast { .. } => Some(SoundEffect::Nuclear),
        GameEvent::PlayerLost => None,
    }
}

/// Effects whose file failed to load
#[derive(Debug, Default)]
pub struct MissingSounds {
    missing: HashSet<SoundEffect>,
}

impl MissingSounds {
    pub fn contains(&self, effect: SoundEffect) -> bool {
        self.missing.contains(&effect)
    }

    /// Record a failed load. Only the first failure of an effect yields an
    /// error to report.
    pub fn mark(&mut self, effect: SoundEffect) -> Option<GameError> {
        if self.missing.insert(effect) {
            Some(GameError::MissingAsset {
                path: effect.path().to_string(),
            })
        } else {
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::HtmlAudioElement;

    use super::{MissingSounds, sound_for};
    use crate::assets::SoundEffect;
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    fn report(missing: &RefCell<MissingSounds>, effect: SoundEffect) {
        if let Some(err) = missing.borrow_mut().mark(effect) {
            log::warn!("{err}, sound disabled");
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        volume: f32,
        missing: Rc<RefCell<MissingSounds>>,
        /// Kept alive so their `error` listeners stay attached
        watchers: Vec<HtmlAudioElement>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            let mut manager = Self {
                volume: settings.effective_volume(),
                missing: Rc::new(RefCell::new(MissingSounds::default())),
                watchers: Vec::new(),
            };
            if manager.volume > 0.0 {
                for effect in SoundEffect::ALL {
                    manager.watch(effect);
                }
            }
            manager
        }

        /// Start loading `effect` and mark it missing if the load fails
        fn watch(&mut self, effect: SoundEffect) {
            let audio = match HtmlAudioElement::new_with_src(effect.path()) {
                Ok(audio) => audio,
                Err(_) => {
                    report(&self.missing, effect);
                    return;
                }
            };
            let missing = Rc::clone(&self.missing);
            let on_error = Closure::<dyn FnMut()>::new(move || report(&missing, effect));
            if audio
                .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
                .is_err()
            {
                log::debug!("Could not watch {}", effect.path());
            }
            on_error.forget();
            self.watchers.push(audio);
        }

        /// Voice the side effects of one tick
        pub fn handle_events(&self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(sound_for) {
                self.play(effect);
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 || self.missing.borrow().contains(effect) {
                return;
            }

            match HtmlAudioElement::new_with_src(effect.path()) {
                Ok(audio) => {
                    audio.set_volume(self.volume as f64);
                    // Autoplay may be refused before the first key press
                    let _ = audio.play();
                }
                Err(_) => report(&self.missing, effect),
            }
        }
    }
}
