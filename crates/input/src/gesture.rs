//! Pointer gestures - mouse drags standing in for touch swipes
//!
//! Positions are terminal cells. Trackers are pure state machines fed with
//! press/drag/release positions; gating on the app state is up to the caller.

use crate::types::{Direction, Point, DRAG_STEP_DISTANCE, MIN_SWIPE_DISTANCE, TAP_SLOP};

/// Resolves one press/release pair into a direction
#[derive(Debug, Clone, Copy)]
pub struct SwipeTracker {
    start: Option<Point>,
    min_distance: i32,
}

impl SwipeTracker {
    pub fn new(min_distance: i32) -> Self {
        Self {
            start: None,
            min_distance,
        }
    }

    pub fn press(&mut self, at: Point) {
        self.start = Some(at);
    }

    /// Direction of the dominant axis, if the pointer travelled far enough.
    ///
    /// Equal travel on both axes resolves vertically.
    pub fn release(&mut self, at: Point) -> Option<Direction> {
        let start = self.start.take()?;
        let dx = at.x - start.x;
        let dy = at.y - start.y;
        if dx.abs().max(dy.abs()) < self.min_distance {
            return None;
        }

        let direction = if dx.abs() > dy.abs() {
            if dx > 0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(direction)
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(MIN_SWIPE_DISTANCE)
    }
}

/// Steps owed by one drag update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragSteps {
    /// Signed horizontal steps (negative is left)
    pub horizontal: i32,
    /// Downward steps; upward travel never produces steps
    pub down: u32,
}

/// Converts a continuous drag into discrete steps, and a short press into a tap
#[derive(Debug, Clone, Copy)]
pub struct DragTracker {
    start: Point,
    anchor: Point,
    is_swipe: bool,
    active: bool,
    step: i32,
    slop: i32,
}

impl DragTracker {
    pub fn new(step: i32, slop: i32) -> Self {
        Self {
            start: Point::ZERO,
            anchor: Point::ZERO,
            is_swipe: false,
            active: false,
            step: step.max(1),
            slop,
        }
    }

    pub fn press(&mut self, at: Point) {
        self.start = at;
        self.anchor = at;
        self.is_swipe = false;
        self.active = true;
    }

    /// Steps owed since the last consumed step boundary
    pub fn drag(&mut self, at: Point) -> DragSteps {
        if !self.active {
            return DragSteps::default();
        }
        if (at.x - self.start.x).abs() > self.slop || (at.y - self.start.y).abs() > self.slop {
            self.is_swipe = true;
        }

        let mut steps = DragSteps::default();

        let dx = at.x - self.anchor.x;
        if dx.abs() >= self.step {
            let moves = dx.abs() / self.step;
            steps.horizontal = dx.signum() * moves;
            self.anchor.x += dx.signum() * moves * self.step;
        }

        let dy = at.y - self.anchor.y;
        if dy >= self.step {
            let moves = dy / self.step;
            steps.down = moves as u32;
            self.anchor.y += moves * self.step;
        }

        steps
    }

    /// End the drag; true when it never left the tap slop
    pub fn release(&mut self) -> bool {
        let was_active = std::mem::replace(&mut self.active, false);
        was_active && !self.is_swipe
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DRAG_STEP_DISTANCE, TAP_SLOP)
    }
}
