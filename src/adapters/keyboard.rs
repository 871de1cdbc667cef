//! Keyboard input adapter (simulation mode).
//!
//! Stands in for the GPIO buttons when no hardware is present. Lines are
//! read from any [`BufRead`] (stdin in the binary) on a dedicated reader
//! thread and handed to the loop through a channel, so
//! [`poll_button`](InputPort::poll_button) never blocks and ticks keep
//! firing while nobody types.
//!
//! | Line | Meaning          |
//! |------|------------------|
//! | `1`  | Feed button      |
//! | `2`  | Play button      |
//! | `3`  | Sleep button     |
//! | `t`  | Force a tick     |
//! | `q`  | Quit             |
//!
//! End of input closes the source, which ends the session.

use std::io::{BufRead, BufReader};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, warn};

use crate::app::commands::Button;
use crate::app::ports::InputPort;

/// One decoded keyboard line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Press(Button),
    ForceTick,
    Quit,
}

/// Decode a single line. Unknown input yields `None`.
pub fn parse_key(line: &str) -> Option<KeyCommand> {
    match line.trim() {
        "1" => Some(KeyCommand::Press(Button::Feed)),
        "2" => Some(KeyCommand::Press(Button::Play)),
        "3" => Some(KeyCommand::Press(Button::Sleep)),
        "t" | "T" => Some(KeyCommand::ForceTick),
        "q" | "Q" => Some(KeyCommand::Quit),
        _ => None,
    }
}

pub struct KeyboardInput {
    rx: Receiver<KeyCommand>,
    /// A command fetched from the channel but not yet consumed.
    pending: Option<KeyCommand>,
    closed: bool,
}

impl KeyboardInput {
    /// Read commands from stdin.
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(std::io::stdin()))
    }

    /// Read commands from `reader` on a background thread.
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("keyboard: read failed: {}", e);
                        break;
                    }
                };
                match parse_key(&line) {
                    Some(cmd) => {
                        let quit = cmd == KeyCommand::Quit;
                        if tx.send(cmd).is_err() || quit {
                            break;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => warn!("keyboard: unknown key {:?} (use 1, 2, 3, t or q)", line.trim()),
                }
            }
            debug!("keyboard: reader finished");
        });
        Self {
            rx,
            pending: None,
            closed: false,
        }
    }

    /// Make sure `pending` holds the next command if one is available.
    fn fill(&mut self) {
        if self.pending.is_some() || self.closed {
            return;
        }
        match self.rx.try_recv() {
            Ok(KeyCommand::Quit) => {
                debug!("keyboard: quit requested");
                self.closed = true;
            }
            Ok(cmd) => self.pending = Some(cmd),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                debug!("keyboard: input closed");
                self.closed = true;
            }
        }
    }
}

impl InputPort for KeyboardInput {
    fn poll_button(&mut self) -> Option<Button> {
        self.fill();
        match self.pending {
            Some(KeyCommand::Press(button)) => {
                self.pending = None;
                Some(button)
            }
            _ => None,
        }
    }

    fn force_tick_requested(&mut self) -> bool {
        self.fill();
        if self.pending == Some(KeyCommand::ForceTick) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn is_closed(&self) -> bool {
        self.closed && self.pending.is_none()
    }
}
