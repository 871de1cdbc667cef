//! Mock device adapters for integration tests.
//!
//! Every port call is recorded so tests can assert on the full history
//! (frames drawn, sleeps taken, events emitted) without a terminal, GPIO
//! or a real clock.

use std::collections::VecDeque;
use std::time::Duration;

use pitamagotchi::app::commands::Button;
use pitamagotchi::app::events::PetEvent;
use pitamagotchi::app::ports::{Clock, EventSink, InputPort, Renderer};
use pitamagotchi::pet::PetSnapshot;

// ── ScriptedInput ─────────────────────────────────────────────

/// Button source fed from a queue. Each `poll_button` call pops one entry,
/// so presses the loop never polls (debounce) stay queued.
#[derive(Default)]
pub struct ScriptedInput {
    pub presses: VecDeque<Button>,
    /// Forced ticks still to hand out, one per iteration.
    pub forced_ticks: u32,
    /// Report closed once this many iterations have started.
    pub close_after: Option<u64>,
    pub polls: u32,
    pub releases: u32,
    iterations: u64,
}

#[allow(dead_code)]
impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(mut self, button: Button) -> Self {
        self.presses.push_back(button);
        self
    }

    pub fn closing_after(mut self, iterations: u64) -> Self {
        self.close_after = Some(iterations);
        self
    }
}

impl InputPort for ScriptedInput {
    fn poll_button(&mut self) -> Option<Button> {
        self.polls += 1;
        self.presses.pop_front()
    }

    // Called exactly once at the top of every iteration.
    fn force_tick_requested(&mut self) -> bool {
        self.iterations += 1;
        if self.forced_ticks > 0 {
            self.forced_ticks -= 1;
            true
        } else {
            false
        }
    }

    fn is_closed(&self) -> bool {
        self.close_after.is_some_and(|n| self.iterations >= n)
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

// ── RecordingRenderer ─────────────────────────────────────────

#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<(PetSnapshot, Option<String>)>,
    pub shutdowns: u32,
    /// Panic on the n-th render call (1-based).
    pub panic_on: Option<usize>,
}

#[allow(dead_code)]
impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Option<&str>> {
        self.frames.iter().map(|(_, m)| m.as_deref()).collect()
    }

    pub fn last(&self) -> Option<&(PetSnapshot, Option<String>)> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, pet: &PetSnapshot, message: Option<&str>) {
        self.frames.push((*pet, message.map(str::to_owned)));
        if self.panic_on == Some(self.frames.len()) {
            panic!("display fault");
        }
    }

    fn shutdown(&mut self) {
        self.shutdowns += 1;
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock that only moves when told to (or when the loop sleeps on it).
#[derive(Default)]
pub struct ManualClock {
    pub now: Duration,
    pub sleeps: Vec<Duration>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_secs(&mut self, secs: f64) {
        self.now = Duration::from_secs_f64(secs);
    }

    pub fn advance_secs(&mut self, secs: f64) {
        self.now += Duration::from_secs_f64(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        self.now += duration;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<PetEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&PetEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &PetEvent) {
        self.events.push(event.clone());
    }
}
