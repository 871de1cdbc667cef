//! Outbound session events.
//!
//! The [`SessionLoop`](super::session::SessionLoop) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them (log them, record them in tests).

use crate::pet::{Action, Mood, PetSnapshot};

/// Structured events emitted by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum PetEvent {
    /// The session has started (carries the newborn pet).
    Started(PetSnapshot),

    /// A tick was applied.
    Ticked { age: u64, mood: Mood, forced: bool },

    /// The derived mood changed.
    MoodChanged { from: Mood, to: Mood },

    /// A button press was accepted and the action mutated the pet.
    ActionApplied(Action),

    /// A button press was accepted but the pet refused the action.
    ActionRejected(Action),

    /// The pet died at the given age.
    Died { age: u64 },

    /// The session loop has exited.
    Stopped,
}
