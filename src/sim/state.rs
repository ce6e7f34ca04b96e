//! Game state and core simulation types
//!
//! Everything the gameplay task mutates lives in [`GameState`]. It is owned by
//! the game loop and handed out by `&mut` to one task at a time.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::paddle::Paddle;
use super::physics::BallPhysics;
use super::rules::{MatchPhase, MatchState};
use crate::error::SimulationError;
use crate::settings::Settings;
use crate::{Direction, Player};

/// Discrete things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball reflected off the top or bottom wall
    WallBounce,
    /// Ball reflected off a paddle
    PaddleBounce(Player),
    /// Ball left the field; the given player earns the point
    OutOfBounds { scorer: Player },
    /// Score incremented
    PointScored(Player),
    /// Match decided
    MatchWon(Player),
    /// Scores cleared after a decided match was acknowledged
    MatchReset,
    /// Ball centered and launched
    Served,
}

/// The ball. Position is kept fractional and exposed truncated to pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pos: Vec2,
    /// Per-axis direction, each component is -1 or +1
    pub dir: IVec2,
    /// Pixels per tick along each axis
    pub speed: f32,
    pub size: i32,
    pub visible: bool,
}

impl Ball {
    pub fn new(size: i32) -> Self {
        Self {
            pos: Vec2::ZERO,
            dir: IVec2::ONE,
            speed: 0.0,
            size,
            visible: false,
        }
    }

    /// Position in whole pixels (top-left corner)
    #[inline]
    pub fn position(&self) -> IVec2 {
        self.pos.as_ivec2()
    }

    #[inline]
    pub fn exact_position(&self) -> Vec2 {
        self.pos
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.position(), self.size, self.size)
    }

    /// Advance one tick along the current direction
    pub fn integrate(&mut self) {
        self.pos += self.dir.as_vec2() * self.speed;
    }
}

/// Random serve direction, each axis independently
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> IVec2 {
    let mut axis = || if rng.random_bool(0.5) { 1 } else { -1 };
    IVec2::new(axis(), axis())
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated settings the state was built from
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    /// Phase, scores and winner
    pub rules: MatchState,
    /// Latest computer decision for player 2
    pub computer_intent: Option<Direction>,
    pending_confirm: bool,
    rng: Pcg32,
}

impl GameState {
    /// Build a fresh match. The ball starts hidden and the match waits for a confirm.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SimulationError> {
        settings.validate()?;
        let mut state = Self {
            paddles: [
                Paddle::new(Player::Left, &settings),
                Paddle::new(Player::Right, &settings),
            ],
            ball: Ball::new(settings.ball_size),
            rules: MatchState::new(&settings),
            settings,
            seed,
            time_ticks: 0,
            computer_intent: None,
            pending_confirm: false,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.center_ball();
        Ok(state)
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        &mut self.paddles[player.index()]
    }

    #[inline]
    pub fn phase(&self) -> MatchPhase {
        self.rules.phase()
    }

    /// Whether the match is gated on a confirm
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.rules.is_waiting()
    }

    /// Latch a confirm for the gameplay task
    pub fn request_confirm(&mut self) {
        self.pending_confirm = true;
    }

    /// Consume a latched confirm
    pub fn take_confirm(&mut self) -> bool {
        std::mem::take(&mut self.pending_confirm)
    }

    pub fn clear_confirm(&mut self) {
        self.pending_confirm = false;
    }

    #[inline]
    pub fn has_pending_confirm(&self) -> bool {
        self.pending_confirm
    }

    /// Center the ball with serve speed and a random direction
    pub fn center_ball(&mut self) {
        BallPhysics::from_settings(&self.settings).reset(&mut self.ball, &mut self.rng);
    }

    /// Split borrow for ball physics
    pub(crate) fn physics_parts(&mut self) -> (&mut Ball, &[Paddle; 2], &mut Pcg32) {
        (&mut self.ball, &self.paddles, &mut self.rng)
    }
}
