//! GPIO button adapter (real hardware).
//!
//! ## Hardware
//!
//! Three momentary switches to ground on the HAT's KEY1-KEY3 (BCM 5, 6,
//! 13 by default). Each line is claimed as an input with the internal
//! pull-up enabled, so an idle key reads high and a pressed key reads low.
//!
//! [`GpioButtons`] works with any `embedded-hal` 1.0 [`InputPin`];
//! [`open_pi_buttons`] builds it from `rppal` pins on the Pi.
//!
//! ## Priority
//!
//! Pins are sampled Feed, Play, Sleep; the first one found low wins and
//! the rest are not read in that poll.

use embedded_hal::digital::{Error as _, InputPin};
use log::{debug, info, warn};
use rppal::gpio::Gpio;

use crate::app::commands::Button;
use crate::app::ports::InputPort;
use crate::config::SessionConfig;
use crate::error::InitError;

/// A Pi GPIO line claimed as input.
pub type PiPin = rppal::gpio::InputPin;

// ═══════════════════════════════════════════════════════════════
//  Button adapter
// ═══════════════════════════════════════════════════════════════

/// Three active-low buttons implementing [`InputPort`].
pub struct GpioButtons<F, P, S> {
    feed: F,
    play: P,
    sleep: S,
}

impl<F: InputPin, P: InputPin, S: InputPin> GpioButtons<F, P, S> {
    pub fn new(feed: F, play: P, sleep: S) -> Self {
        Self { feed, play, sleep }
    }

    /// Check that no key reads pressed. A line that is low before anyone
    /// touches it (missing pull-up, shorted key) would otherwise fire its
    /// action on every debounce window.
    pub fn ensure_released(&mut self) -> Result<(), Button> {
        match self.poll_button() {
            Some(stuck) => Err(stuck),
            None => Ok(()),
        }
    }
}

impl<F: InputPin, P: InputPin, S: InputPin> InputPort for GpioButtons<F, P, S> {
    fn poll_button(&mut self) -> Option<Button> {
        if is_pressed(&mut self.feed, Button::Feed) {
            Some(Button::Feed)
        } else if is_pressed(&mut self.play, Button::Play) {
            Some(Button::Play)
        } else if is_pressed(&mut self.sleep, Button::Sleep) {
            Some(Button::Sleep)
        } else {
            None
        }
    }
}

/// Read errors are treated as "not pressed" so a flaky pin cannot
/// trigger actions.
fn is_pressed(pin: &mut impl InputPin, button: Button) -> bool {
    match pin.is_low() {
        Ok(low) => low,
        Err(e) => {
            warn!("GPIO read failed for {:?}: {:?}", button, e.kind());
            false
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Raspberry Pi acquisition
// ═══════════════════════════════════════════════════════════════

/// Claim the three button pins named in `config` with pull-ups enabled.
///
/// Fails if the GPIO controller is unavailable (not a Pi, no permission),
/// a pin is already in use, or a key reads pressed right after setup.
pub fn open_pi_buttons(
    config: &SessionConfig,
) -> Result<GpioButtons<PiPin, PiPin, PiPin>, InitError> {
    let gpio = Gpio::new().map_err(InitError::Controller)?;
    let claim = |pin: u8| -> Result<PiPin, InitError> {
        let input = gpio
            .get(pin)
            .map_err(|source| InitError::Gpio { pin, source })?
            .into_input_pullup();
        debug!("GPIO {} claimed as input (pull-up)", pin);
        Ok(input)
    };

    let mut buttons = GpioButtons::new(
        claim(config.feed_pin)?,
        claim(config.play_pin)?,
        claim(config.sleep_pin)?,
    );
    buttons.ensure_released().map_err(|button| InitError::StuckLow {
        pin: config.pin_for(button),
        button,
    })?;

    info!(
        "Buttons ready on GPIO {}/{}/{}",
        config.feed_pin, config.play_pin, config.sleep_pin
    );
    Ok(buttons)
}
