//! Tick loop - turns host elapsed time into simulation steps
//!
//! The host calls [`TickLoop::advance`] every poll with the milliseconds since
//! the previous poll; the loop answers how many simulation steps are owed.

/// How owed time is converted into steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// At most one step per call; leftover time is discarded
    Frame,
    /// One step per whole interval owed; the remainder carries over
    Interval,
}

/// Cancellable step scheduler
#[derive(Debug, Clone)]
pub struct TickLoop {
    interval_ms: u32,
    pacing: Pacing,
    elapsed_ms: u32,
    running: bool,
}

impl TickLoop {
    pub fn new(interval_ms: u32, pacing: Pacing) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            pacing,
            elapsed_ms: 0,
            running: false,
        }
    }

    /// (Re)start with an empty accumulator
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed_ms = 0;
    }

    /// Stop yielding steps. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Account for `elapsed_ms` of host time and return the steps now due
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms < self.interval_ms {
            return 0;
        }

        match self.pacing {
            Pacing::Frame => {
                self.elapsed_ms = 0;
                1
            }
            Pacing::Interval => {
                let steps = self.elapsed_ms / self.interval_ms;
                self.elapsed_ms %= self.interval_ms;
                steps
            }
        }
    }
}
