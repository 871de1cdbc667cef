//! Port traits — the boundary between the pet session and the outside world.
//!
//! ```text
//!   InputPort ──▶ ┌──────────────┐ ──▶ Renderer
//!       Clock ──▶ │ SessionLoop  │ ──▶ EventSink
//!                 └──────────────┘
//!                        ▲
//!                   ConfigPort (startup only)
//! ```
//!
//! Adapters in [`crate::adapters`] implement these traits for real
//! hardware (GPIO buttons) and for the terminal simulation. The
//! [`SessionLoop`](super::session::SessionLoop) consumes them via
//! generics, so the loop never touches a device directly and tests can
//! drive it with scripted mocks.

use core::fmt;
use core::time::Duration;

use crate::config::SessionConfig;
use crate::pet::PetSnapshot;

use super::commands::Button;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: buttons → session)
// ───────────────────────────────────────────────────────────────

/// Source of button presses.
///
/// `poll_button` must not block for longer than one polling period;
/// the loop services tick timing between calls.
pub trait InputPort {
    /// Return the pressed button, if any. When several are held the
    /// adapter reports Feed first, then Play, then Sleep.
    fn poll_button(&mut self) -> Option<Button>;

    /// Whether the user asked to force a tick right now (simulation only).
    fn force_tick_requested(&mut self) -> bool {
        false
    }

    /// `true` once the source can no longer produce input (EOF, quit key).
    fn is_closed(&self) -> bool {
        false
    }

    /// Give the underlying device back. Called once during shutdown.
    fn release(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Renderer port (driven adapter: session → display)
// ───────────────────────────────────────────────────────────────

/// Display sink. No feedback flows back into the pet logic.
pub trait Renderer {
    /// Draw the pet, optionally with a one-shot message line.
    fn render(&mut self, pet: &PetSnapshot, message: Option<&str>);

    /// Clear and power down the display. Called once during shutdown.
    fn shutdown(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed epoch.
    fn now(&self) -> Duration;

    /// Block the loop for `duration`. Mock clocks just advance.
    fn sleep(&mut self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: session → logging)
// ───────────────────────────────────────────────────────────────

/// The session emits structured [`PetEvent`](super::events::PetEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::PetEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads and persists the session configuration.
///
/// Implementations must call [`SessionConfig::validate`] on both paths;
/// out-of-range values are rejected, never clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<SessionConfig, ConfigError>;

    fn save(&self, config: &SessionConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config at the given location.
    NotFound,
    /// The config could not be read or written.
    Io(std::io::Error),
    /// The stored config is not valid JSON for [`SessionConfig`].
    Parse(serde_json::Error),
    /// A config field failed range validation.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Parse(e) => write!(f, "parse error: {}", e),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::NotFound | Self::ValidationFailed(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(e)
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
