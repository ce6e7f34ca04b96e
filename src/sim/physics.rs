//! Ball physics
//!
//! One call to [`BallPhysics::step`] is one tick: integrate, reflect off the
//! top/bottom walls, reflect off a paddle, then check whether the ball left
//! the field. All tests run on truncated pixel positions.

use glam::IVec2;
use rand::Rng;

use super::paddle::Paddle;
use super::state::{Ball, GameEvent, random_direction};
use crate::Player;
use crate::settings::Settings;

/// Field geometry and speed rules for the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPhysics {
    pub field_width: i32,
    pub field_height: i32,
    pub initial_speed: f32,
    pub speed_modifier: f32,
    pub speed_cap: Option<f32>,
}

impl BallPhysics {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            field_width: settings.field_width,
            field_height: settings.field_height,
            initial_speed: settings.initial_ball_speed,
            speed_modifier: settings.ball_speed_modifier,
            speed_cap: settings.ball_speed_cap,
        }
    }

    /// Advance the ball one tick, pushing anything that happened onto `events`
    pub fn step<R: Rng + ?Sized>(
        &self,
        ball: &mut Ball,
        paddles: &[Paddle; 2],
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        ball.integrate();

        // Walls: only reflect when still heading into the wall
        let pos = ball.position();
        let hit_top = ball.dir.y < 0 && pos.y <= 0;
        let hit_bottom = ball.dir.y > 0 && pos.y + ball.size >= self.field_height;
        if hit_top || hit_bottom {
            ball.dir.y = -ball.dir.y;
            events.push(GameEvent::WallBounce);
        }

        // Paddles: only the one the ball is heading toward
        let rect = ball.rect();
        for paddle in paddles {
            let approaching = match paddle.player {
                Player::Left => ball.dir.x < 0,
                Player::Right => ball.dir.x > 0,
            };
            if approaching && rect.intersects(&paddle.rect()) {
                ball.dir.x = -ball.dir.x;
                ball.speed = self.boosted_speed(ball.speed);
                events.push(GameEvent::PaddleBounce(paddle.player));
                break;
            }
        }

        if let Some(scorer) = self.scorer(ball.position(), ball) {
            events.push(GameEvent::OutOfBounds { scorer });
            self.reset(ball, rng);
        }
    }

    /// Who earns the point if the ball has fully left the field
    fn scorer(&self, pos: IVec2, ball: &Ball) -> Option<Player> {
        if ball.dir.x < 0 && pos.x + ball.size < 0 {
            Some(Player::Right)
        } else if ball.dir.x > 0 && pos.x >= self.field_width {
            Some(Player::Left)
        } else {
            None
        }
    }

    /// Speed after a paddle hit
    pub fn boosted_speed(&self, speed: f32) -> f32 {
        let boosted = speed * self.speed_modifier;
        match self.speed_cap {
            Some(cap) => boosted.min(cap),
            None => boosted,
        }
    }

    /// Center the ball with serve speed and a random direction
    pub fn reset<R: Rng + ?Sized>(&self, ball: &mut Ball, rng: &mut R) {
        let center = IVec2::new(
            (self.field_width - ball.size) / 2,
            (self.field_height - ball.size) / 2,
        );
        ball.set_position(center.as_vec2());
        ball.speed = self.initial_speed;
        ball.dir = random_direction(rng);
    }
}
