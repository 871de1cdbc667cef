//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing session events through the `log`
//! facade (stderr via `env_logger` in the binary).

use log::{debug, info, warn};

use crate::app::events::PetEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`PetEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PetEvent) {
        match event {
            PetEvent::Started(pet) => {
                info!(
                    "START | hunger={} happiness={} mood={}",
                    pet.hunger, pet.happiness, pet.mood
                );
            }
            PetEvent::Ticked { age, mood, forced } => {
                debug!("TICK  | age={} mood={}{}", age, mood, if *forced { " (forced)" } else { "" });
            }
            PetEvent::MoodChanged { from, to } => {
                info!("MOOD  | {} -> {}", from, to);
            }
            PetEvent::ActionApplied(action) => {
                info!("ACT   | {:?} applied", action);
            }
            PetEvent::ActionRejected(action) => {
                debug!("ACT   | {:?} rejected", action);
            }
            PetEvent::Died { age } => {
                warn!("DEAD  | at age {}", age);
            }
            PetEvent::Stopped => {
                info!("STOP  | session ended");
            }
        }
    }
}
