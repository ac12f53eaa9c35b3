//! Swipe handlers - pointer gestures on the game element
//!
//! The shell forwards pointer events over the game element to a
//! [`SwipeHandlers`] implementation together with the current [`AppState`],
//! so handlers can ignore gestures outside play.

use tui_arcade_input::{DragTracker, SwipeTracker};
use tui_arcade_types::{AppState, Direction, Point};

use crate::control::Action;

pub trait SwipeHandlers<G> {
    fn touch_start(&mut self, at: Point, state: AppState, game: &mut G);
    fn touch_move(&mut self, at: Point, state: AppState, game: &mut G);
    fn touch_end(&mut self, at: Point, state: AppState, game: &mut G);
}

/// One direction per press/release (2048, snake)
pub struct DirectionalSwipe<G> {
    tracker: SwipeTracker,
    on_swipe: fn(&mut G, Direction),
}

impl<G> DirectionalSwipe<G> {
    pub fn new(on_swipe: fn(&mut G, Direction)) -> Self {
        Self::with_tracker(SwipeTracker::default(), on_swipe)
    }

    pub fn with_tracker(tracker: SwipeTracker, on_swipe: fn(&mut G, Direction)) -> Self {
        Self { tracker, on_swipe }
    }
}

impl<G> SwipeHandlers<G> for DirectionalSwipe<G> {
    fn touch_start(&mut self, at: Point, _state: AppState, _game: &mut G) {
        self.tracker.press(at);
    }

    fn touch_move(&mut self, _at: Point, _state: AppState, _game: &mut G) {}

    fn touch_end(&mut self, at: Point, state: AppState, game: &mut G) {
        let direction = self.tracker.release(at);
        if state != AppState::Playing {
            return;
        }
        if let Some(direction) = direction {
            (self.on_swipe)(game, direction);
        }
    }
}

/// Continuous drag stepping plus tap (falling blocks)
pub struct DragStepper<G> {
    tracker: DragTracker,
    left: Action<G>,
    right: Action<G>,
    down: Action<G>,
    tap: Action<G>,
}

impl<G> DragStepper<G> {
    pub fn new(left: Action<G>, right: Action<G>, down: Action<G>, tap: Action<G>) -> Self {
        Self::with_tracker(DragTracker::default(), left, right, down, tap)
    }

    pub fn with_tracker(
        tracker: DragTracker,
        left: Action<G>,
        right: Action<G>,
        down: Action<G>,
        tap: Action<G>,
    ) -> Self {
        Self {
            tracker,
            left,
            right,
            down,
            tap,
        }
    }
}

impl<G> SwipeHandlers<G> for DragStepper<G> {
    fn touch_start(&mut self, at: Point, _state: AppState, _game: &mut G) {
        self.tracker.press(at);
    }

    fn touch_move(&mut self, at: Point, state: AppState, game: &mut G) {
        if state != AppState::Playing {
            return;
        }
        let steps = self.tracker.drag(at);
        let sideways = if steps.horizontal > 0 {
            self.right
        } else {
            self.left
        };
        for _ in 0..steps.horizontal.unsigned_abs() {
            sideways(game);
        }
        for _ in 0..steps.down {
            (self.down)(game);
        }
    }

    fn touch_end(&mut self, _at: Point, state: AppState, game: &mut G) {
        let tapped = self.tracker.release();
        if state == AppState::Playing && tapped {
            (self.tap)(game);
        }
    }
}
