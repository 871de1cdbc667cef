//! Session configuration parameters
//!
//! All tunable timing parameters for the pet session loop, plus the GPIO
//! pin assignment used in hardware mode. Values can be overridden from a
//! JSON config file (see [`crate::adapters::config_file`]) or the command
//! line.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::commands::Button;
use crate::app::ports::ConfigError;

/// Core session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // --- Timing ---
    /// Seconds between pet ticks
    pub tick_interval_secs: f32,
    /// Minimum seconds between two accepted button presses
    pub debounce_secs: f32,
    /// Seconds a confirmation message stays on screen before the
    /// message-free redraw (0 = single draw)
    pub confirmation_hold_secs: f32,
    /// Sleep at the end of every loop iteration (0 = no throttle)
    pub poll_throttle_secs: f32,

    // --- Randomness ---
    /// Seed for the decay RNG. `None` seeds from the OS.
    pub seed: Option<u64>,

    // --- Buttons (BCM numbering) ---
    pub feed_pin: u8,
    pub play_pin: u8,
    pub sleep_pin: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_interval_secs: 10.0,
            debounce_secs: 0.2,
            confirmation_hold_secs: 2.0, // e-paper refresh is slow
            poll_throttle_secs: 0.05,    // 20 Hz polling

            seed: None,

            // Waveshare 2.13" HAT keys 1-3
            feed_pin: 5,
            play_pin: 6,
            sleep_pin: 13,
        }
    }
}

impl SessionConfig {
    /// Preset for the terminal simulation: faster ticks and no
    /// confirmation hold, since the terminal redraws instantly.
    pub fn simulation() -> Self {
        Self {
            tick_interval_secs: 5.0,
            confirmation_hold_secs: 0.0,
            ..Self::default()
        }
    }

    /// Range-check every field. Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_secs(self.tick_interval_secs, "tick_interval_secs")?;
        if self.tick_interval_secs == 0.0 {
            return Err(ConfigError::ValidationFailed(
                "tick_interval_secs must be greater than zero",
            ));
        }
        check_secs(self.debounce_secs, "debounce_secs")?;
        check_secs(self.confirmation_hold_secs, "confirmation_hold_secs")?;
        check_secs(self.poll_throttle_secs, "poll_throttle_secs")?;

        let pins = [self.feed_pin, self.play_pin, self.sleep_pin];
        if pins[0] == pins[1] || pins[1] == pins[2] || pins[0] == pins[2] {
            return Err(ConfigError::ValidationFailed(
                "feed_pin, play_pin and sleep_pin must be distinct",
            ));
        }
        Ok(())
    }

    /// BCM pin wired to `button`.
    pub fn pin_for(&self, button: Button) -> u8 {
        match button {
            Button::Feed => self.feed_pin,
            Button::Play => self.play_pin,
            Button::Sleep => self.sleep_pin,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        secs(self.tick_interval_secs)
    }

    pub fn debounce(&self) -> Duration {
        secs(self.debounce_secs)
    }

    pub fn confirmation_hold(&self) -> Duration {
        secs(self.confirmation_hold_secs)
    }

    pub fn poll_throttle(&self) -> Duration {
        secs(self.poll_throttle_secs)
    }
}

/// A field is valid when it converts to a [`Duration`]: finite, not
/// negative and not beyond `Duration::MAX`.
fn check_secs(value: f32, field: &'static str) -> Result<(), ConfigError> {
    if Duration::try_from_secs_f32(value).is_ok() {
        Ok(())
    } else {
        log::warn!("config: {} = {} rejected", field, value);
        Err(ConfigError::ValidationFailed(field))
    }
}

/// Too-large values saturate to `Duration::MAX`; negative and NaN map to
/// zero. `validate` rejects all of them.
fn secs(value: f32) -> Duration {
    match Duration::try_from_secs_f32(value) {
        Ok(d) => d,
        Err(_) if value > 0.0 => Duration::MAX,
        Err(_) => Duration::ZERO,
    }
}
