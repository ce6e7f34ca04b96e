//! Computer opponent for player 2
//!
//! Chases the ball's top edge with a randomized reaction delay. Decisions are
//! only intents; the tick applies them when no human is bound to the port.

use std::time::Duration;

use rand::Rng;

use super::state::GameState;
use crate::settings::Settings;
use crate::{Direction, Player};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputerOpponent {
    pub player: Player,
    min_delay: f32,
    max_delay: f32,
}

impl ComputerOpponent {
    pub fn new(settings: &Settings) -> Self {
        Self {
            player: Player::Right,
            min_delay: settings.computer_min_delay,
            max_delay: settings.computer_max_delay,
        }
    }

    /// Which way to move, or `None` to hold still
    pub fn decide(&self, state: &GameState) -> Option<Direction> {
        if state.is_waiting() {
            return None;
        }

        let paddle = state.paddle(self.player);
        let ball_y = state.ball.position().y;
        let paddle_y = paddle.top();

        let offset = ball_y - paddle_y;
        if 0 < offset && offset < paddle.height {
            None
        } else if ball_y < paddle_y {
            Some(Direction::Up)
        } else {
            Some(Direction::Down)
        }
    }

    /// Refresh the stored intent
    pub fn evaluate(&self, state: &mut GameState) {
        state.computer_intent = self.decide(state);
    }

    /// Reaction delay until the next evaluation
    pub fn next_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let secs = if self.max_delay > self.min_delay {
            rng.random_range(self.min_delay..self.max_delay)
        } else {
            self.min_delay
        };
        Duration::from_secs_f32(secs)
    }
}
