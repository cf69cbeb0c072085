//! Callback surface for whatever draws or records the game.
//!
//! Observers are called synchronously from inside the controller call that
//! caused the change. Within one tick the order is: segment added, segment
//! removed or food moved, score changed, game over.

use std::cell::RefCell;
use std::rc::Rc;

use super::controller::GameState;
use super::engine::GameOverReason;
use super::state::{Cell, Segment};

pub trait GameObserver {
    fn on_segment_added(&mut self, _segment: &Segment) {}

    fn on_segment_removed(&mut self, _segment: &Segment) {}

    /// `None` when no free cell was left for food
    fn on_food_moved(&mut self, _food: Option<Cell>) {}

    fn on_score_changed(&mut self, _score: u32) {}

    fn on_game_over(&mut self, _reason: GameOverReason) {}

    fn on_state_changed(&mut self, _state: GameState) {}
}

/// Lets the host keep a handle on an observer it hands to the controller.
impl<T: GameObserver> GameObserver for Rc<RefCell<T>> {
    fn on_segment_added(&mut self, segment: &Segment) {
        self.borrow_mut().on_segment_added(segment);
    }

    fn on_segment_removed(&mut self, segment: &Segment) {
        self.borrow_mut().on_segment_removed(segment);
    }

    fn on_food_moved(&mut self, food: Option<Cell>) {
        self.borrow_mut().on_food_moved(food);
    }

    fn on_score_changed(&mut self, score: u32) {
        self.borrow_mut().on_score_changed(score);
    }

    fn on_game_over(&mut self, reason: GameOverReason) {
        self.borrow_mut().on_game_over(reason);
    }

    fn on_state_changed(&mut self, state: GameState) {
        self.borrow_mut().on_state_changed(state);
    }
}
