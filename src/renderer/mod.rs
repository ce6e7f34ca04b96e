//! Rendering contracts
//!
//! The game loop snapshots the state into a [`Frame`] and hands it to a
//! [`Renderer`] after every task that changed something. The optional
//! [`AmbientLight`] strip mirrors the ball's horizontal position.

use glam::IVec2;

use crate::Player;
use crate::sim::{GameState, MatchPhase, Rect};

pub mod headless;

pub use headless::{LogLights, LogRenderer};

/// Everything a display needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub field_width: i32,
    pub field_height: i32,
    pub paddles: [Rect; 2],
    /// Ball box, `None` while hidden
    pub ball: Option<Rect>,
    /// Scores indexed by player
    pub scores: [u32; 2],
    pub phase: MatchPhase,
    pub winner: Option<Player>,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            field_width: state.settings.field_width,
            field_height: state.settings.field_height,
            paddles: [
                state.paddle(Player::Left).rect(),
                state.paddle(Player::Right).rect(),
            ],
            ball: state.ball.visible.then(|| state.ball.rect()),
            scores: state.rules.score().as_array(),
            phase: state.phase(),
            winner: state.rules.winner(),
        }
    }

    /// Top-left pixel of the ball, if shown
    pub fn ball_position(&self) -> Option<IVec2> {
        self.ball.map(|b| IVec2::new(b.x, b.y))
    }
}

/// A display
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}

/// LED strip (or similar) tracking the ball along the x axis
pub trait AmbientLight {
    /// Light up around `ball_x`, a pixel column in `[0, field_width)`
    fn show(&mut self, ball_x: i32, field_width: i32);
    fn clear(&mut self);
}

/// Brightness of `count` evenly spaced lights for a ball at `ball_x`
///
/// Lights within one slot of the ball fade linearly with distance.
pub fn light_levels(ball_x: i32, field_width: i32, count: usize) -> Vec<f32> {
    if count == 0 || field_width <= 0 {
        return Vec::new();
    }
    let pos = ball_x.clamp(0, field_width) as f32 / field_width as f32 * (count - 1) as f32;
    (0..count)
        .map(|i| {
            let diff = (i as f32 - pos).abs();
            if diff < 1.0 { 1.0 - diff } else { 0.0 }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_capture_hides_ball_while_idle() {
        let state = GameState::new(Settings::default(), 1).unwrap();
        let frame = Frame::capture(&state);
        assert_eq!(frame.ball, None);
        assert_eq!(frame.scores, [0, 0]);
        assert_eq!(frame.phase, MatchPhase::Idle);
        assert_eq!(frame.paddles[0].x, 16);
        assert_eq!(frame.paddles[1].x, 300);
    }

    #[test]
    fn test_capture_shows_visible_ball() {
        let mut state = GameState::new(Settings::default(), 1).unwrap();
        state.ball.visible = true;
        let frame = Frame::capture(&state);
        assert_eq!(frame.ball_position(), Some(IVec2::new(156, 116)));
    }

    #[test]
    fn test_light_levels_follow_ball() {
        let left = light_levels(0, 320, 5);
        assert_eq!(left, vec![1.0, 0.0, 0.0, 0.0, 0.0]);

        let right = light_levels(320, 320, 5);
        assert_eq!(right, vec![0.0, 0.0, 0.0, 0.0, 1.0]);

        let between = light_levels(40, 320, 5);
        assert!((between[0] - 0.5).abs() < 1e-6);
        assert!((between[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_light_levels_empty_strip() {
        assert!(light_levels(10, 320, 0).is_empty());
    }
}
