//! Terminal renderer.
//!
//! Composes the same screen the e-paper panel shows (sprite, stats or
//! "GAME OVER", button labels, one-shot message) as plain text and writes
//! it to any [`Write`]. Used for the simulation and as the display
//! stand-in in hardware mode.
//!
//! Write failures are logged and dropped: the renderer is a pure sink and
//! must not stall or abort the session.

use std::io::Write;

use log::warn;

use crate::app::commands::Button;
use crate::app::ports::Renderer;
use crate::pet::PetSnapshot;

const RULE: &str = "==============================";

/// Lay out one screen as text lines.
pub fn compose_screen(pet: &PetSnapshot, message: Option<&str>) -> Vec<String> {
    let mut lines: Vec<String> = pet.mood.sprite().lines().map(str::to_owned).collect();

    if pet.mood.is_dead() {
        lines.push("GAME OVER".to_owned());
    } else {
        lines.push(format!("Hunger: {}/100", pet.hunger));
        lines.push(format!("Happy:  {}/100", pet.happiness));
        lines.push(format!("Age: {}", pet.age));
    }

    lines.push(String::new());
    let labels: Vec<&str> = Button::PRIORITY.iter().map(|b| b.label()).collect();
    lines.push(labels.join("  "));

    if let Some(msg) = message.filter(|m| !m.is_empty()) {
        lines.push(String::new());
        lines.push(msg.to_owned());
    }
    lines
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    frames: u64,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames successfully written so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, lines: &[String]) -> std::io::Result<()> {
        writeln!(self.out, "{RULE}")?;
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "{RULE}")?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, pet: &PetSnapshot, message: Option<&str>) {
        let lines = compose_screen(pet, message);
        match self.write_frame(&lines) {
            Ok(()) => self.frames += 1,
            Err(e) => warn!("terminal: frame dropped: {}", e),
        }
    }

    fn shutdown(&mut self) {
        let result = writeln!(self.out, "[display cleared]").and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!("terminal: shutdown write failed: {}", e);
        }
    }
}
