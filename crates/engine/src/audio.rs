//! Sound effect hook
//!
//! Controllers name the effect; the host decides what (if anything) plays.

use std::fmt;

/// Effects raised by the controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    /// A tile merge (2048)
    Hit,
    /// A move without merges (2048) or a locked piece (falling blocks)
    Place,
    /// Food eaten (snake)
    Eat,
    /// Lines cleared (falling blocks)
    Clear,
    /// The session was lost
    Fail,
    /// The session was won
    Complete,
}

impl Sfx {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sfx::Hit => "hit",
            Sfx::Place => "place",
            Sfx::Eat => "eat",
            Sfx::Clear => "clear",
            Sfx::Fail => "fail",
            Sfx::Complete => "complete",
        }
    }
}

impl fmt::Display for Sfx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait AudioSink {
    fn play_sfx(&mut self, sfx: Sfx) -> anyhow::Result<()>;
}

/// Plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudio;

impl AudioSink for NoAudio {
    fn play_sfx(&mut self, _sfx: Sfx) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Play `sfx`, logging instead of failing
pub fn play_or_log(sink: &mut dyn AudioSink, sfx: Sfx) {
    if let Err(e) = sink.play_sfx(sfx) {
        log::warn!("failed to play sfx {}: {:#}", sfx, e);
    }
}
