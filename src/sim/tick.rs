//! Gameplay tick
//!
//! Advances the match by one step of the gameplay task. While the match is
//! waiting for a confirm a tick only checks the confirm latch.

use super::physics::BallPhysics;
use super::rules::MatchPhase;
use super::state::{GameEvent, GameState};
use crate::Player;

/// External facts the tick needs from the input layer
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// A live gamepad is bound to each player's port
    pub gamepad_bound: [bool; 2],
}

impl TickInput {
    /// Whether the computer may move a player's paddle
    pub fn computer_may_drive(&self, player: Player) -> bool {
        !self.gamepad_bound[player.index()]
    }
}

/// Advance the game state by one gameplay step
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    match state.phase() {
        MatchPhase::Idle | MatchPhase::MatchWon => {
            if state.take_confirm() {
                state.rules.confirm(&mut events);
                if state.phase() == MatchPhase::Serving {
                    serve(state, &mut events);
                } else {
                    // Back to Idle: the next serve needs a fresh confirm
                    state.clear_confirm();
                }
            }
        }
        MatchPhase::Serving => serve(state, &mut events),
        MatchPhase::Rallying => rally(state, input, &mut events),
        MatchPhase::PointScored => {
            if state.rules.advance_delay() {
                serve(state, &mut events);
            }
        }
    }

    events
}

/// Center the ball, show it and start the rally
fn serve(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.center_ball();
    state.ball.visible = true;
    state.rules.start_rally();
    events.push(GameEvent::Served);
}

fn rally(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let physics = BallPhysics::from_settings(&state.settings);
    let start = events.len();
    {
        let (ball, paddles, rng) = state.physics_parts();
        physics.step(ball, paddles, rng, events);
    }

    // Computer moves after the paddle test, so the ball sees where it stood.
    // Same clamped move as human input.
    if state.settings.computer_enabled && input.computer_may_drive(Player::Right) {
        if let Some(direction) = state.computer_intent {
            state.paddle_mut(Player::Right).apply_move(direction);
        }
    }

    let scorer = events[start..].iter().find_map(|event| match event {
        GameEvent::OutOfBounds { scorer } => Some(*scorer),
        _ => None,
    });

    if let Some(scorer) = scorer {
        state.ball.visible = false;
        state.rules.record_point(scorer, events);
        if state.phase() == MatchPhase::MatchWon {
            state.clear_confirm();
        }
    }
}
