//! Error types for everything outside the pet core.
//!
//! The pet model itself never fails (actions report rejection with a
//! `bool`). What can fail is acquiring the outside world: reading the
//! config file and claiming GPIO pins. Both funnel into [`Error`] so the
//! binary can report them uniformly.

use core::fmt;

use crate::app::commands::Button;
use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),
    /// An input or display adapter could not be acquired.
    Init(InitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Init(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Adapter acquisition errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum InitError {
    /// The GPIO controller could not be opened (not a Pi, no permission).
    Controller(rppal::gpio::Error),
    /// A button pin could not be claimed.
    Gpio { pin: u8, source: rppal::gpio::Error },
    /// A key read pressed right after setup.
    StuckLow { pin: u8, button: Button },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Controller(e) => write!(f, "GPIO controller: {e}"),
            Self::Gpio { pin, source } => write!(f, "GPIO {pin}: {source}"),
            Self::StuckLow { pin, button } => {
                write!(f, "GPIO {pin} ({button:?}) reads pressed at startup; check the pull-up")
            }
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Controller(e) | Self::Gpio { source: e, .. } => Some(e),
            Self::StuckLow { .. } => None,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
