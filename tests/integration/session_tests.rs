//! Session loop integration tests: tick gating, debounce, redraw phases,
//! the dead screen and scoped cleanup, all against the mock adapters.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use pitamagotchi::app::commands::Button;
use pitamagotchi::app::events::PetEvent;
use pitamagotchi::app::session::{
    MSG_FORCED_TICK, MSG_HELLO, MSG_TIME_PASSES, SessionLoop, StepReport, seeded_rng,
};
use pitamagotchi::config::SessionConfig;
use pitamagotchi::pet::{Action, Mood, Pet};
use rand_chacha::ChaCha8Rng;

use crate::mock_hw::{ManualClock, RecordingRenderer, RecordingSink, ScriptedInput};

// ── Harness ───────────────────────────────────────────────────

fn config(hold_secs: f32) -> SessionConfig {
    SessionConfig {
        tick_interval_secs: 10.0,
        debounce_secs: 0.2,
        confirmation_hold_secs: hold_secs,
        poll_throttle_secs: 0.0,
        seed: Some(1),
        ..SessionConfig::default()
    }
}

struct Rig {
    session: SessionLoop<ChaCha8Rng>,
    input: ScriptedInput,
    display: RecordingRenderer,
    clock: ManualClock,
    sink: RecordingSink,
}

impl Rig {
    fn new(cfg: &SessionConfig, pet: Pet) -> Self {
        Self {
            session: SessionLoop::with_pet(cfg, seeded_rng(cfg.seed), pet, Duration::ZERO),
            input: ScriptedInput::new(),
            display: RecordingRenderer::new(),
            clock: ManualClock::new(),
            sink: RecordingSink::new(),
        }
    }

    fn step_at(&mut self, secs: f64) -> StepReport {
        self.clock.set_secs(secs);
        self.session.step(
            &mut self.input,
            &mut self.display,
            &mut self.clock,
            &mut self.sink,
        )
    }
}

// ── First frame ───────────────────────────────────────────────

#[test]
fn first_iteration_draws_greeting_once() {
    let mut rig = Rig::new(&config(2.0), Pet::new());

    let report = rig.step_at(0.0);
    assert_eq!(report.draws, 1);
    assert_eq!(rig.display.messages(), vec![Some(MSG_HELLO)]);
    assert!(rig.clock.sleeps.is_empty(), "no hold without an action");

    let report = rig.step_at(0.01);
    assert_eq!(report.draws, 0);
    assert!(!rig.session.needs_draw());
}

// ── Tick gating ───────────────────────────────────────────────

#[test]
fn tick_requires_strictly_more_than_the_interval() {
    let mut rig = Rig::new(&config(2.0), Pet::new());
    rig.step_at(0.0);

    assert!(!rig.step_at(10.0).ticked);
    assert_eq!(rig.session.pet().age(), 0);

    let report = rig.step_at(10.001);
    assert!(report.ticked);
    assert_eq!(rig.session.pet().age(), 1);
    assert_eq!(report.draws, 1);
    assert_eq!(rig.display.last().and_then(|(_, m)| m.as_deref()), Some(MSG_TIME_PASSES));

    // The next tick is measured from the last one.
    assert!(!rig.step_at(20.0).ticked);
    assert!(rig.step_at(20.01).ticked);
    assert_eq!(rig.session.summary().ticks, 2);
}

#[test]
fn sleeping_pet_ticks_without_message() {
    let mut rig = Rig::new(&config(2.0), Pet::from_parts(50, 50, 0, true));
    rig.step_at(0.0);

    let report = rig.step_at(10.5);
    assert!(report.ticked);
    assert_eq!(report.draws, 1);
    let (pet, message) = rig.display.last().unwrap();
    assert_eq!(pet.mood, Mood::Asleep);
    assert_eq!(message, &None);
}

#[test]
fn forced_tick_resets_the_schedule() {
    let mut rig = Rig::new(&config(2.0), Pet::new());
    rig.step_at(0.0);

    rig.input.forced_ticks = 1;
    let report = rig.step_at(5.0);
    assert!(report.forced_tick);
    assert!(!report.ticked);
    assert_eq!(rig.session.pet().age(), 1);
    assert_eq!(rig.display.last().and_then(|(_, m)| m.as_deref()), Some(MSG_FORCED_TICK));

    assert!(!rig.step_at(14.9).ticked);
    assert!(rig.step_at(15.5).ticked);
    assert_eq!(rig.session.pet().age(), 2);
    assert_eq!(
        rig.sink.count(|e| matches!(e, PetEvent::Ticked { forced: true, .. })),
        1
    );
}

// ── Debounce ──────────────────────────────────────────────────

#[test]
fn presses_inside_the_debounce_window_are_not_polled() {
    let mut rig = Rig::new(&config(0.0), Pet::new());
    rig.input = ScriptedInput::new().press(Button::Feed).press(Button::Feed);

    assert_eq!(rig.step_at(0.1).pressed, None);
    assert_eq!(rig.step_at(0.2).pressed, None);
    assert_eq!(rig.input.polls, 0);

    let report = rig.step_at(0.25);
    assert_eq!(report.pressed, Some(Button::Feed));
    assert!(report.action_applied);
    assert_eq!(rig.session.pet().hunger(), 25);

    assert_eq!(rig.step_at(0.3).pressed, None);
    assert_eq!(rig.input.polls, 1);

    assert_eq!(rig.step_at(0.46).pressed, Some(Button::Feed));
    assert_eq!(rig.session.pet().hunger(), 0);
    assert_eq!(rig.session.summary().presses, 2);
}

#[test]
fn rejected_press_still_consumes_the_window() {
    let mut rig = Rig::new(&config(0.0), Pet::from_parts(50, 50, 0, true));
    rig.input = ScriptedInput::new().press(Button::Feed).press(Button::Sleep);
    rig.step_at(0.0);

    let report = rig.step_at(0.3);
    assert_eq!(report.pressed, Some(Button::Feed));
    assert!(!report.action_applied);
    assert_eq!(report.draws, 0, "rejected actions do not redraw");

    assert_eq!(rig.step_at(0.4).pressed, None);

    let report = rig.step_at(0.51);
    assert_eq!(report.pressed, Some(Button::Sleep));
    assert!(report.action_applied);
    assert!(!rig.session.pet().is_asleep());
    assert_eq!(rig.display.last().and_then(|(_, m)| m.as_deref()), Some("I'm awake!"));
    assert_eq!(
        rig.sink.count(|e| *e == PetEvent::ActionRejected(Action::Feed)),
        1
    );
}

// ── Redraw phases ─────────────────────────────────────────────

#[test]
fn confirmation_is_held_then_cleared() {
    let mut rig = Rig::new(&config(2.0), Pet::new());
    rig.input = ScriptedInput::new().press(Button::Play);
    rig.step_at(0.0);

    let report = rig.step_at(0.5);
    assert_eq!(report.draws, 2);
    assert_eq!(
        rig.display.messages(),
        vec![Some(MSG_HELLO), Some("Whee!"), None]
    );
    assert_eq!(rig.clock.sleeps, vec![Duration::from_secs(2)]);
    assert_eq!(rig.clock.now, Duration::from_millis(2500));
    assert_eq!(rig.session.summary().draws, 3);
}

#[test]
fn without_hold_confirmation_draws_once() {
    let mut rig = Rig::new(&config(0.0), Pet::new());
    rig.input = ScriptedInput::new().press(Button::Sleep);
    rig.step_at(0.0);

    let report = rig.step_at(0.3);
    assert_eq!(report.draws, 1);
    assert_eq!(rig.display.messages(), vec![Some(MSG_HELLO), Some("Zzz...")]);
    assert!(rig.clock.sleeps.is_empty());

    assert_eq!(rig.step_at(0.4).draws, 0);
}

// ── Death ─────────────────────────────────────────────────────

#[test]
fn dead_pet_is_drawn_once_then_left_alone() {
    let mut rig = Rig::new(&config(2.0), Pet::from_parts(90, 50, 3, false));
    rig.input = ScriptedInput::new().press(Button::Feed);

    let report = rig.step_at(0.0);
    assert_eq!(report.draws, 1);
    assert_eq!(rig.display.last().unwrap().0.mood, Mood::Dead);

    let report = rig.step_at(30.0);
    assert!(!report.ticked);
    assert_eq!(report.pressed, Some(Button::Feed));
    assert!(!report.action_applied);
    assert_eq!(report.draws, 0);
    assert_eq!(rig.display.frames.len(), 1);
    assert_eq!(rig.session.pet().age(), 3);
}

#[test]
fn dying_from_play_draws_the_final_frame() {
    let mut rig = Rig::new(&config(2.0), Pet::from_parts(80, 50, 4, false));
    rig.input = ScriptedInput::new().press(Button::Play).press(Button::Play);
    rig.step_at(0.0);

    let report = rig.step_at(0.3);
    assert!(report.action_applied);
    assert_eq!(report.draws, 2);
    assert_eq!(rig.display.last().unwrap().0.mood, Mood::Dead);
    assert!(rig.sink.events.contains(&PetEvent::MoodChanged {
        from: Mood::Hungry,
        to: Mood::Dead,
    }));
    assert!(rig.sink.events.contains(&PetEvent::Died { age: 4 }));

    let frames = rig.display.frames.len();
    rig.input.forced_ticks = 1;
    let report = rig.step_at(40.0);
    assert!(!report.forced_tick);
    assert!(!report.action_applied);
    assert_eq!(rig.display.frames.len(), frames);
}

// ── run() ─────────────────────────────────────────────────────

#[test]
fn run_stops_on_shutdown_flag_and_cleans_up() {
    let cfg = config(2.0);
    let mut session = SessionLoop::new(&cfg, seeded_rng(Some(5)), Duration::ZERO);
    let mut input = ScriptedInput::new();
    let mut display = RecordingRenderer::new();
    let mut clock = ManualClock::new();
    let mut sink = RecordingSink::new();
    let shutdown = AtomicBool::new(true);

    let summary = session.run(&mut input, &mut display, &mut clock, &mut sink, &shutdown);

    assert_eq!(summary.iterations, 0);
    assert!(display.frames.is_empty());
    assert_eq!(display.shutdowns, 1);
    assert_eq!(input.releases, 1);
    assert!(matches!(sink.events.first(), Some(PetEvent::Started(_))));
    assert_eq!(sink.events.last(), Some(&PetEvent::Stopped));
}

#[test]
fn run_stops_when_input_closes() {
    let cfg = SessionConfig {
        poll_throttle_secs: 0.05,
        ..config(2.0)
    };
    let mut session = SessionLoop::new(&cfg, seeded_rng(Some(5)), Duration::ZERO);
    let mut input = ScriptedInput::new().closing_after(3);
    let mut display = RecordingRenderer::new();
    let mut clock = ManualClock::new();
    let mut sink = RecordingSink::new();
    let shutdown = AtomicBool::new(false);

    let summary = session.run(&mut input, &mut display, &mut clock, &mut sink, &shutdown);

    assert_eq!(summary.iterations, 3);
    assert_eq!(summary.draws, 1);
    assert_eq!(clock.sleeps.len(), 3, "one throttle sleep per iteration");
    assert_eq!(display.shutdowns, 1);
    assert_eq!(input.releases, 1);
}

#[test]
fn ports_are_released_when_the_display_panics() {
    let cfg = config(2.0);
    let mut session = SessionLoop::new(&cfg, seeded_rng(Some(5)), Duration::ZERO);
    let mut input = ScriptedInput::new();
    let mut display = RecordingRenderer {
        panic_on: Some(1),
        ..RecordingRenderer::new()
    };
    let mut clock = ManualClock::new();
    let mut sink = RecordingSink::new();
    let shutdown = AtomicBool::new(false);

    let result = catch_unwind(AssertUnwindSafe(|| {
        session.run(&mut input, &mut display, &mut clock, &mut sink, &shutdown)
    }));

    assert!(result.is_err());
    assert_eq!(display.shutdowns, 1);
    assert_eq!(input.releases, 1);
    assert!(!sink.events.contains(&PetEvent::Stopped));
}

#[test]
fn same_seed_same_session() {
    let run = |seed| {
        let mut rig = Rig::new(&config(0.0), Pet::new());
        rig.session = SessionLoop::new(&config(0.0), seeded_rng(Some(seed)), Duration::ZERO);
        for i in 1..=40 {
            rig.step_at(f64::from(i) * 10.5);
        }
        rig.session.pet().clone()
    };
    assert_eq!(run(21), run(21));
}
