//! Terminal bell as the audio sink
//!
//! A terminal has one sound. The bell rings for the effects selected by
//! [`BellMode`]; everything else is silent.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tui_arcade_engine::{AudioSink, Sfx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BellMode {
    Off,
    /// Session outcomes and line clears
    #[default]
    Events,
    All,
}

impl BellMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "0" | "false" => Some(BellMode::Off),
            "events" | "1" | "true" => Some(BellMode::Events),
            "all" => Some(BellMode::All),
            _ => None,
        }
    }

    pub fn rings_for(&self, sfx: Sfx) -> bool {
        match self {
            BellMode::Off => false,
            BellMode::Events => matches!(sfx, Sfx::Fail | Sfx::Complete | Sfx::Clear),
            BellMode::All => true,
        }
    }
}

pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
    mode: BellMode,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout(mode: BellMode) -> Self {
        Self::new(io::stdout(), mode)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, mode: BellMode) -> Self {
        Self { out, mode }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play_sfx(&mut self, sfx: Sfx) -> Result<()> {
        if !self.mode.rings_for(sfx) {
            return Ok(());
        }
        self.out
            .write_all(b"\x07")
            .and_then(|_| self.out.flush())
            .with_context(|| format!("ring bell for {}", sfx))
    }
}
