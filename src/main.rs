//! Pitamagotchi — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │  GpioButtons / KeyboardInput   TerminalRenderer          │
//! │  (InputPort)                   (Renderer)                │
//! │  MonotonicClock   LogEventSink   JsonConfigFile          │
//! │  (Clock)          (EventSink)    (ConfigPort)            │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │   SessionLoop (tick · debounce · redraw)       │      │
//! │  │   Pet (stats · mood · actions)                 │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use pitamagotchi::adapters::config_file::JsonConfigFile;
use pitamagotchi::adapters::gpio::open_pi_buttons;
use pitamagotchi::adapters::keyboard::KeyboardInput;
use pitamagotchi::adapters::log_sink::LogEventSink;
use pitamagotchi::adapters::terminal::TerminalRenderer;
use pitamagotchi::adapters::time::MonotonicClock;
use pitamagotchi::app::ports::{Clock, ConfigPort, InputPort};
use pitamagotchi::app::session::{SessionLoop, SessionSummary, seeded_rng};
use pitamagotchi::config::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Use the GPIO buttons if they can be claimed, else the keyboard.
    Auto,
    /// GPIO buttons only; fail if they are unavailable.
    Hardware,
    /// Keyboard and terminal only.
    Simulation,
}

#[derive(Debug, Parser)]
#[command(name = "pitamagotchi", version, about = "A tiny virtual pet")]
struct Cli {
    /// Input source selection
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// JSON config file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the decay RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Override the tick interval, in seconds
    #[arg(long)]
    tick: Option<f32>,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Write the effective config to PATH as JSON and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let preset = match cli.mode {
        Mode::Simulation => SessionConfig::simulation(),
        Mode::Auto | Mode::Hardware => SessionConfig::default(),
    };
    let config = effective_config(&cli, preset)?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }
    if let Some(path) = cli.write_config.as_deref() {
        JsonConfigFile::new(path)
            .save(&config)
            .map_err(pitamagotchi::Error::from)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        return Ok(());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        ctrlc::set_handler(move || flag.store(true, Ordering::Release))
            .context("failed to install Ctrl-C handler")?;
    }

    let summary = match cli.mode {
        Mode::Simulation => run_simulation(&config, &shutdown),
        Mode::Hardware => {
            let buttons = open_pi_buttons(&config)
                .map_err(pitamagotchi::Error::from)
                .context("failed to claim button pins")?;
            run_session(buttons, &config, &shutdown)
        }
        Mode::Auto => match open_pi_buttons(&config) {
            Ok(buttons) => {
                info!("Buttons found, running on hardware");
                run_session(buttons, &config, &shutdown)
            }
            Err(e) => {
                warn!("No button HAT ({}), falling back to simulation", e);
                let config = match cli.config {
                    Some(_) => config,
                    None => effective_config(&cli, SessionConfig::simulation())?,
                };
                run_simulation(&config, &shutdown)
            }
        },
    };

    info!(
        "Goodbye! {} ticks, {} presses ({} applied), {} draws",
        summary.ticks, summary.presses, summary.actions_applied, summary.draws
    );
    Ok(())
}

/// Config file (or `preset` when none is given) with CLI overrides applied.
fn effective_config(cli: &Cli, preset: SessionConfig) -> Result<SessionConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => preset,
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(tick) = cli.tick {
        config.tick_interval_secs = tick;
    }
    config
        .validate()
        .map_err(pitamagotchi::Error::from)
        .context("invalid configuration")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<SessionConfig> {
    JsonConfigFile::new(path)
        .load()
        .map_err(pitamagotchi::Error::from)
        .with_context(|| format!("failed to load config from {}", path.display()))
}

fn run_simulation(config: &SessionConfig, shutdown: &AtomicBool) -> SessionSummary {
    println!("Keys: 1 = Feed, 2 = Play, 3 = Sleep, t = tick, q = quit (then Enter)");
    run_session(KeyboardInput::stdin(), config, shutdown)
}

fn run_session(
    mut input: impl InputPort,
    config: &SessionConfig,
    shutdown: &AtomicBool,
) -> SessionSummary {
    let mut display = TerminalRenderer::stdout();
    let mut clock = MonotonicClock::new();
    let mut sink = LogEventSink::new();

    if config.seed.is_some() {
        info!("Decay RNG seeded with {:?}", config.seed);
    }
    let mut session = SessionLoop::new(config, seeded_rng(config.seed), clock.now());
    session.run(&mut input, &mut display, &mut clock, &mut sink, shutdown)
}
