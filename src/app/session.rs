//! Session loop — the polling loop that drives the pet.
//!
//! [`SessionLoop`] owns the [`Pet`] and the decay RNG. Each call to
//! [`SessionLoop::step`] is one iteration of the cooperative loop:
//!
//! ```text
//!  clock.now()
//!     │
//!     ├─▶ forced tick?      (simulation `t` key)
//!     ├─▶ tick due?         now - last_tick  > tick_interval
//!     ├─▶ input allowed?    now - last_input > debounce  ──▶ poll once
//!     ├─▶ redraw owed?      render(msg) [hold, render(None)]
//!     └─▶ throttle          clock.sleep(poll_throttle)
//! ```
//!
//! All I/O flows through the port traits passed into each call, so the
//! loop runs identically against GPIO + e-paper, the terminal
//! simulation, or the scripted mocks used in tests.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SessionConfig;
use crate::pet::{Mood, Pet};

use super::commands::Button;
use super::events::PetEvent;
use super::ports::{Clock, EventSink, InputPort, Renderer};

/// Greeting drawn on the very first frame.
pub const MSG_HELLO: &str = "Hello!";
/// Drawn after a regular tick while the pet is awake.
pub const MSG_TIME_PASSES: &str = "Time passes...";
/// Drawn after a tick forced from the simulation keyboard.
pub const MSG_FORCED_TICK: &str = "Tick!";

/// Build the decay RNG: deterministic when a seed is given, OS-seeded
/// otherwise.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}

// ───────────────────────────────────────────────────────────────
// Reports
// ───────────────────────────────────────────────────────────────

/// What happened during a single [`SessionLoop::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// A scheduled tick fired.
    pub ticked: bool,
    /// A forced tick fired.
    pub forced_tick: bool,
    /// The button accepted this iteration, if any.
    pub pressed: Option<Button>,
    /// The pressed button's action mutated the pet.
    pub action_applied: bool,
    /// Number of `render` calls made.
    pub draws: u8,
}

/// Running totals over the whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub iterations: u64,
    pub ticks: u64,
    pub presses: u64,
    pub actions_applied: u64,
    pub draws: u64,
}

// ───────────────────────────────────────────────────────────────
// SessionLoop
// ───────────────────────────────────────────────────────────────

pub struct SessionLoop<R: Rng = ChaCha8Rng> {
    pet: Pet,
    rng: R,

    tick_interval: Duration,
    debounce: Duration,
    confirmation_hold: Duration,
    poll_throttle: Duration,

    last_tick: Duration,
    last_input: Duration,

    needs_draw: bool,
    message: Option<&'static str>,
    /// The final (dead) frame has been drawn; further redraws are skipped.
    dead_drawn: bool,

    summary: SessionSummary,
}

impl<R: Rng> SessionLoop<R> {
    /// Start a session with a newborn pet. `now` is the clock reading at
    /// startup; both the tick and the debounce timers start from it.
    pub fn new(config: &SessionConfig, rng: R, now: Duration) -> Self {
        Self::with_pet(config, rng, Pet::new(), now)
    }

    /// Start a session around an existing pet.
    pub fn with_pet(config: &SessionConfig, rng: R, pet: Pet, now: Duration) -> Self {
        Self {
            pet,
            rng,
            tick_interval: config.tick_interval(),
            debounce: config.debounce(),
            confirmation_hold: config.confirmation_hold(),
            poll_throttle: config.poll_throttle(),
            last_tick: now,
            last_input: now,
            needs_draw: true,
            message: Some(MSG_HELLO),
            dead_drawn: false,
            summary: SessionSummary::default(),
        }
    }

    // ── Loop ──────────────────────────────────────────────────

    /// Run until `shutdown` is set or the input source closes.
    ///
    /// The display and input source are shut down exactly once on the
    /// way out, including when a port panics mid-iteration.
    pub fn run(
        &mut self,
        input: &mut impl InputPort,
        display: &mut impl Renderer,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
        shutdown: &AtomicBool,
    ) -> SessionSummary {
        let mut ports = PortGuard { input, display };

        info!(
            "Session started: tick={:?} debounce={:?} hold={:?}",
            self.tick_interval, self.debounce, self.confirmation_hold
        );
        sink.emit(&PetEvent::Started(self.pet.snapshot()));

        while !shutdown.load(Ordering::Acquire) && !ports.input.is_closed() {
            self.step(&mut *ports.input, &mut *ports.display, clock, sink);
        }

        drop(ports);
        info!(
            "Session stopped after {} iterations (age {}, {})",
            self.summary.iterations,
            self.pet.age(),
            self.pet.mood()
        );
        sink.emit(&PetEvent::Stopped);
        self.summary
    }

    /// One iteration: ticks, input, redraw, throttle.
    pub fn step(
        &mut self,
        input: &mut impl InputPort,
        display: &mut impl Renderer,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
    ) -> StepReport {
        let now = clock.now();
        let mut report = StepReport::default();
        self.summary.iterations += 1;

        // 1. Forced tick (simulation keyboard)
        if input.force_tick_requested() && !self.pet.is_dead() {
            debug!("Forced tick");
            self.apply_tick(now, true, sink);
            self.message = Some(MSG_FORCED_TICK);
            self.needs_draw = true;
            report.forced_tick = true;
        }

        // 2. Scheduled tick
        if !self.pet.is_dead() && now.saturating_sub(self.last_tick) > self.tick_interval {
            self.apply_tick(now, false, sink);
            if !self.pet.is_asleep() {
                self.message = Some(MSG_TIME_PASSES);
            }
            self.needs_draw = true;
            report.ticked = true;
        }

        // 3. Debounced input — at most one press per iteration
        if now.saturating_sub(self.last_input) > self.debounce {
            if let Some(button) = input.poll_button() {
                self.last_input = now;
                self.summary.presses += 1;
                report.pressed = Some(button);
                report.action_applied = self.apply_button(button, sink);
            }
        }
        if report.action_applied {
            self.needs_draw = true;
        }

        // 4. Redraw
        if self.needs_draw {
            report.draws = self.redraw(report.action_applied, display, clock);
        }

        // 5. Throttle
        if !self.poll_throttle.is_zero() {
            clock.sleep(self.poll_throttle);
        }

        report
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Whether a redraw is currently owed.
    pub fn needs_draw(&self) -> bool {
        self.needs_draw
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_tick(&mut self, now: Duration, forced: bool, sink: &mut impl EventSink) {
        let before = self.pet.mood();
        self.pet.tick(&mut self.rng);
        self.last_tick = now;
        self.summary.ticks += 1;

        debug!(
            "Tick: age={} hunger={} happiness={} mood={}",
            self.pet.age(),
            self.pet.hunger(),
            self.pet.happiness(),
            self.pet.mood()
        );
        sink.emit(&PetEvent::Ticked {
            age: self.pet.age(),
            mood: self.pet.mood(),
            forced,
        });
        self.note_mood_change(before, sink);
    }

    fn apply_button(&mut self, button: Button, sink: &mut impl EventSink) -> bool {
        let action = button.action();
        let before = self.pet.mood();

        if self.pet.apply(action) {
            self.message = Some(action.confirmation(self.pet.is_asleep()));
            self.summary.actions_applied += 1;
            info!("{:?} applied", action);
            sink.emit(&PetEvent::ActionApplied(action));
            self.note_mood_change(before, sink);
            true
        } else {
            debug!("{:?} rejected (mood={})", action, self.pet.mood());
            sink.emit(&PetEvent::ActionRejected(action));
            false
        }
    }

    fn note_mood_change(&mut self, before: Mood, sink: &mut impl EventSink) {
        let after = self.pet.mood();
        if after == before {
            return;
        }
        info!("Mood: {} -> {}", before, after);
        sink.emit(&PetEvent::MoodChanged {
            from: before,
            to: after,
        });
        if after.is_dead() {
            info!("Pet died at age {}", self.pet.age());
            sink.emit(&PetEvent::Died {
                age: self.pet.age(),
            });
        }
    }

    /// Returns the number of `render` calls made.
    fn redraw(
        &mut self,
        action_taken: bool,
        display: &mut impl Renderer,
        clock: &mut impl Clock,
    ) -> u8 {
        let message = self.message.take();
        self.needs_draw = false;

        if self.pet.is_dead() && !action_taken && self.dead_drawn {
            debug!("Skipping redraw: pet is dead and final frame is up");
            return 0;
        }

        let snapshot = self.pet.snapshot();
        debug!("Drawing (mood={}, msg={:?})", snapshot.mood, message);
        display.render(&snapshot, message);
        let mut draws = 1;

        // Two-phase confirmation: hold the message, then clear it.
        if action_taken && message.is_some() && !self.confirmation_hold.is_zero() {
            clock.sleep(self.confirmation_hold);
            display.render(&snapshot, None);
            draws += 1;
        }

        if snapshot.mood.is_dead() {
            self.dead_drawn = true;
        }
        self.summary.draws += u64::from(draws);
        draws
    }
}

// ───────────────────────────────────────────────────────────────
// Scoped cleanup
// ───────────────────────────────────────────────────────────────

/// Holds the device ports for the duration of [`SessionLoop::run`] and
/// shuts them down when dropped, whichever way the loop exits.
struct PortGuard<'a, I: InputPort, D: Renderer> {
    input: &'a mut I,
    display: &'a mut D,
}

impl<I: InputPort, D: Renderer> Drop for PortGuard<'_, I, D> {
    fn drop(&mut self) {
        info!("Releasing display and input");
        self.display.shutdown();
        self.input.release();
    }
}
