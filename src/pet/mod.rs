//! The pet model: stats, ageing, stochastic decay and guarded actions.
//!
//! ```text
//!             feed / play (awake, alive)
//!        ┌──────────────────────────────┐
//!        ▼                              │
//!   ┌─────────┐   toggle_sleep    ┌──────────┐
//!   │  AWAKE  │ ◀───────────────▶ │  ASLEEP  │
//!   └────┬────┘                   └──────────┘
//!        │ lethal stats (checked only while awake)
//!        ▼
//!   ┌─────────┐
//!   │  DEAD   │  absorbing: tick/feed/play/toggle_sleep are no-ops
//!   └─────────┘
//! ```
//!
//! The model does no I/O and owns no randomness: [`Pet::tick`] takes the
//! random source as a parameter so callers (and tests) decide how it is
//! seeded.

pub mod mood;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use mood::Mood;

/// Upper bound for both stats.
pub const STAT_MAX: u8 = 100;

/// Starting value for both stats.
pub const INITIAL_STAT: u8 = 50;

const FEED_HUNGER_RELIEF: u8 = 25;
const FEED_HAPPINESS_GAIN: u8 = 5;
const PLAY_HAPPINESS_GAIN: u8 = 20;
const PLAY_HUNGER_COST: u8 = 10;

/// Asleep decay fires with probability `1 / ASLEEP_DECAY_ODDS`.
const ASLEEP_DECAY_ODDS: u32 = 6;
/// Awake decay fires with probability `1 / AWAKE_DECAY_ODDS`.
const AWAKE_DECAY_ODDS: u32 = 2;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The three user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Feed,
    Play,
    ToggleSleep,
}

impl Action {
    /// Message shown after the action was applied. `asleep_after` is the
    /// sleep flag once the action has run.
    pub fn confirmation(self, asleep_after: bool) -> &'static str {
        match self {
            Self::Feed => "Yum!",
            Self::Play => "Whee!",
            Self::ToggleSleep if asleep_after => "Zzz...",
            Self::ToggleSleep => "I'm awake!",
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Read-only copy of the pet handed to renderers and event sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSnapshot {
    pub hunger: u8,
    pub happiness: u8,
    pub age: u64,
    pub mood: Mood,
    pub asleep: bool,
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// A single virtual pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    hunger: u8,
    happiness: u8,
    age: u64,
    asleep: bool,
    mood: Mood,
}

impl Default for Pet {
    fn default() -> Self {
        Self::new()
    }
}

impl Pet {
    /// A newborn pet: hunger 50, happiness 50, age 0, awake, neutral.
    pub fn new() -> Self {
        Self::from_parts(INITIAL_STAT, INITIAL_STAT, 0, false)
    }

    /// Build a pet at arbitrary stats. Stats above [`STAT_MAX`] are clamped
    /// and the mood is derived from the result.
    pub fn from_parts(hunger: u8, happiness: u8, age: u64, asleep: bool) -> Self {
        let hunger = hunger.min(STAT_MAX);
        let happiness = happiness.min(STAT_MAX);
        Self {
            hunger,
            happiness,
            age,
            asleep,
            mood: Mood::derive(hunger, happiness, asleep),
        }
    }

    // ── Per-tick update ───────────────────────────────────────

    /// Advance the pet by one tick.
    ///
    /// Ages the pet and rolls for decay: while asleep there is a 1-in-6
    /// chance of `hunger += 0..=1, happiness += 1`; while awake a 1-in-2
    /// chance of `hunger += 1..=2, happiness -= 1..=2`.
    ///
    /// Returns `false` without touching anything if the pet is dead.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.is_dead() {
            return false;
        }
        self.age += 1;

        if self.asleep {
            if rng.random_ratio(1, ASLEEP_DECAY_ODDS) {
                let hunger_gain: u8 = rng.random_range(0..=1);
                self.hunger = self.hunger.saturating_add(hunger_gain);
                self.happiness = self.happiness.saturating_add(1);
            }
        } else if rng.random_ratio(1, AWAKE_DECAY_ODDS) {
            let hunger_gain: u8 = rng.random_range(1..=2);
            let happiness_loss: u8 = rng.random_range(1..=2);
            self.hunger = self.hunger.saturating_add(hunger_gain);
            self.happiness = self.happiness.saturating_sub(happiness_loss);
        }

        self.clamp_and_derive();
        true
    }

    // ── Actions ───────────────────────────────────────────────

    /// Dispatch an [`Action`] to its handler.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Feed => self.feed(),
            Action::Play => self.play(),
            Action::ToggleSleep => self.toggle_sleep(),
        }
    }

    /// Reduce hunger by 25 and raise happiness by 5.
    /// Rejected while asleep or dead.
    pub fn feed(&mut self) -> bool {
        if !self.can_interact() {
            return false;
        }
        self.hunger = self.hunger.saturating_sub(FEED_HUNGER_RELIEF);
        self.happiness = self.happiness.saturating_add(FEED_HAPPINESS_GAIN);
        self.clamp_and_derive();
        true
    }

    /// Raise happiness by 20 at the cost of 10 hunger.
    /// Rejected while asleep or dead.
    pub fn play(&mut self) -> bool {
        if !self.can_interact() {
            return false;
        }
        self.happiness = self.happiness.saturating_add(PLAY_HAPPINESS_GAIN);
        self.hunger = self.hunger.saturating_add(PLAY_HUNGER_COST);
        self.clamp_and_derive();
        true
    }

    /// Put the pet to sleep or wake it up. Rejected only when dead.
    ///
    /// Waking a pet whose stats drifted into the lethal range while it
    /// slept kills it on the spot.
    pub fn toggle_sleep(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.asleep = !self.asleep;
        self.clamp_and_derive();
        true
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn hunger(&self) -> u8 {
        self.hunger
    }

    pub fn happiness(&self) -> u8 {
        self.happiness
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn is_dead(&self) -> bool {
        self.mood.is_dead()
    }

    pub fn snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            hunger: self.hunger,
            happiness: self.happiness,
            age: self.age,
            mood: self.mood,
            asleep: self.asleep,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn can_interact(&self) -> bool {
        !self.asleep && !self.is_dead()
    }

    fn clamp_and_derive(&mut self) {
        self.hunger = self.hunger.min(STAT_MAX);
        self.happiness = self.happiness.min(STAT_MAX);
        self.mood = Mood::derive(self.hunger, self.happiness, self.asleep);
    }
}
