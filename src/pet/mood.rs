//! Mood classification and sprites.
//!
//! The mood is never stored independently of the stats: [`Mood::derive`]
//! is the single rule that maps `(hunger, happiness, asleep)` onto a
//! [`Mood`], and [`Pet`](super::Pet) calls it after every mutation.
//!
//! ```text
//!   asleep ───────────────────────────────▶ ASLEEP
//!   hunger > 85 || happiness < 15 ────────▶ DEAD
//!   hunger > 70 ──────────────────────────▶ HUNGRY
//!   happiness < 30 ───────────────────────▶ SAD
//!   happiness > 80 ───────────────────────▶ HAPPY
//!   otherwise ────────────────────────────▶ NEUTRAL
//! ```
//!
//! Rows are checked top to bottom, so a sleeping pet is never classified
//! as dead even with lethal stats.

use serde::{Deserialize, Serialize};

/// Hunger strictly above this is lethal.
pub const LETHAL_HUNGER: u8 = 85;
/// Happiness strictly below this is lethal.
pub const LETHAL_HAPPINESS: u8 = 15;
/// Hunger strictly above this makes the pet hungry.
pub const HUNGRY_ABOVE: u8 = 70;
/// Happiness strictly below this makes the pet sad.
pub const SAD_BELOW: u8 = 30;
/// Happiness strictly above this makes the pet happy.
pub const HAPPY_ABOVE: u8 = 80;

const BODY: &str = " ( (\") \n /    \\ \n";

/// Derived classification of the pet's condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Neutral,
    Happy,
    Sad,
    Hungry,
    Asleep,
    Dead,
}

impl Mood {
    /// Classify a set of stats. First matching rule wins.
    pub fn derive(hunger: u8, happiness: u8, asleep: bool) -> Self {
        if asleep {
            Self::Asleep
        } else if hunger > LETHAL_HUNGER || happiness < LETHAL_HAPPINESS {
            Self::Dead
        } else if hunger > HUNGRY_ABOVE {
            Self::Hungry
        } else if happiness < SAD_BELOW {
            Self::Sad
        } else if happiness > HAPPY_ABOVE {
            Self::Happy
        } else {
            Self::Neutral
        }
    }

    pub fn is_dead(self) -> bool {
        self == Self::Dead
    }

    /// Lower-case name, as shown in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Hungry => "hungry",
            Self::Asleep => "asleep",
            Self::Dead => "dead",
        }
    }

    /// Face line of the sprite.
    pub fn face(self) -> &'static str {
        match self {
            Self::Neutral => " (._.) ",
            Self::Happy => " (^_^) ",
            Self::Sad => " (T_T) ",
            Self::Hungry => " (>_<) ",
            Self::Asleep => " (z_z) ",
            Self::Dead => " (x_x) ",
        }
    }

    /// Full multi-line ASCII sprite (face + body).
    pub fn sprite(self) -> String {
        format!("\n{}\n{}", self.face(), BODY)
    }
}

impl core::fmt::Display for Mood {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
