//! Inbound commands to the session.
//!
//! A [`Button`] is what an input adapter reports; the session maps it
//! onto the pet [`Action`] it triggers.

use serde::{Deserialize, Serialize};

use crate::pet::Action;

/// Physical (or simulated) buttons, in polling priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Feed,
    Play,
    Sleep,
}

impl Button {
    /// All buttons, highest priority first.
    pub const PRIORITY: [Self; 3] = [Self::Feed, Self::Play, Self::Sleep];

    pub fn action(self) -> Action {
        match self {
            Self::Feed => Action::Feed,
            Self::Play => Action::Play,
            Self::Sleep => Action::ToggleSleep,
        }
    }

    /// On-screen label, including the key that triggers it.
    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "Feed (1)",
            Self::Play => "Play (2)",
            Self::Sleep => "Sleep (3)",
        }
    }
}
