//! Paddles and the clamped movement rules every input source goes through

use super::collision::Rect;
use crate::settings::Settings;
use crate::{Direction, Player};

/// A player's paddle. The top edge is always within `[0, max_y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub player: Player,
    /// Left edge (fixed column)
    pub x: i32,
    pub width: i32,
    pub height: i32,
    /// Pixels per move event
    pub speed: f32,
    y: f32,
    max_y: f32,
}

impl Paddle {
    /// Paddle in its column, vertically centered
    pub fn new(player: Player, settings: &Settings) -> Self {
        let max_y = settings.paddle_max_y();
        Self {
            player,
            x: settings.paddle_x(player),
            width: settings.paddle_width,
            height: settings.paddle_height,
            speed: settings.paddle_speed,
            y: max_y / 2.0,
            max_y,
        }
    }

    /// Top edge
    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    /// Top edge in whole pixels
    #[inline]
    pub fn top(&self) -> i32 {
        self.y as i32
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.top(), self.width, self.height)
    }

    /// Set the top edge, clamped to the playfield
    pub fn set_y(&mut self, y: f32) {
        self.y = if y.is_nan() { self.y } else { y.clamp(0.0, self.max_y) };
    }

    /// Move one step of `speed` pixels
    pub fn apply_move(&mut self, direction: Direction) {
        self.set_y(self.y + direction.sign() * self.speed);
    }

    /// Center the paddle on an absolute vertical position
    pub fn apply_absolute(&mut self, center_y: f32) {
        self.set_y(center_y - self.height as f32 / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle() -> Paddle {
        Paddle::new(Player::Left, &Settings::default())
    }

    #[test]
    fn test_starts_centered() {
        let p = paddle();
        assert_eq!(p.y(), 104.0);
        assert_eq!(p.x, 16);
    }

    #[test]
    fn test_move_up_decreases_y() {
        let mut p = paddle();
        p.apply_move(Direction::Up);
        assert_eq!(p.y(), 98.0);
        p.apply_move(Direction::Down);
        p.apply_move(Direction::Down);
        assert_eq!(p.y(), 110.0);
    }

    #[test]
    fn test_moves_clamp_at_edges() {
        let mut p = paddle();
        for _ in 0..100 {
            p.apply_move(Direction::Up);
        }
        assert_eq!(p.y(), 0.0);
        for _ in 0..100 {
            p.apply_move(Direction::Down);
        }
        assert_eq!(p.y(), 208.0);
    }

    #[test]
    fn test_absolute_centers_and_clamps() {
        let mut p = paddle();
        p.apply_absolute(120.0);
        assert_eq!(p.y(), 104.0);
        p.apply_absolute(0.0);
        assert_eq!(p.y(), 0.0);
        p.apply_absolute(500.0);
        assert_eq!(p.y(), 208.0);
        p.apply_absolute(f32::NAN);
        assert_eq!(p.y(), 208.0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Up,
        Down,
        Absolute(f32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Up),
            Just(Op::Down),
            (-1000.0f32..1000.0).prop_map(Op::Absolute),
        ]
    }

    proptest! {
        #[test]
        fn test_any_input_sequence_stays_in_bounds(ops in prop::collection::vec(op(), 0..200)) {
            let mut p = paddle();
            for op in ops {
                match op {
                    Op::Up => p.apply_move(Direction::Up),
                    Op::Down => p.apply_move(Direction::Down),
                    Op::Absolute(y) => p.apply_absolute(y),
                }
                prop_assert!(p.y() >= 0.0);
                prop_assert!(p.y() <= p.max_y());
            }
        }
    }
}
