//! Jam Pong - a two-player Pong for small display/audio/input devices
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball physics, match rules, computer player)
//! - `input`: Device polling and normalization into input events
//! - `game_loop`: Cooperative fixed-cadence scheduler that owns the game state
//! - `renderer`, `audio`, `platform`: Contracts for the external collaborators
//! - `settings`: Data-driven configuration consumed at startup

pub mod audio;
pub mod error;
pub mod game_loop;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SimulationError};
pub use game_loop::{GameLoop, LoopStatus, Outputs};
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (display pixels)
    pub const FIELD_WIDTH: i32 = 320;
    pub const FIELD_HEIGHT: i32 = 240;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 4;
    pub const PADDLE_HEIGHT: i32 = 32;
    /// Gap between a paddle and its side wall
    pub const PADDLE_INSET: i32 = 16;
    /// Pixels per move
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 8;
    /// Pixels per tick at serve
    pub const INITIAL_BALL_SPEED: f32 = 1.0;
    /// Speed multiplier on paddle hit
    pub const BALL_SPEED_MODIFIER: f32 = 1.25;

    /// Match rules
    pub const WIN_SCORE: u32 = 11;
    pub const WIN_MARGIN: u32 = 2;
    /// Pause after a point before the next serve (seconds)
    pub const POINT_DELAY_SECS: f32 = 1.0;

    /// Computer reaction delay bounds (seconds)
    pub const COMPUTER_MIN_DELAY: f32 = 0.1;
    pub const COMPUTER_MAX_DELAY: f32 = 0.4;

    /// Consecutive empty pointer polls before the pointer counts as unplugged
    pub const POINTER_DISCONNECT_POLLS: u32 = 9999;
    pub const JOYSTICK_DEADZONE: f32 = 0.05;

    /// Gameplay and input polling rate
    pub const TICK_RATE_HZ: u32 = 30;
    /// Poll interval while the match waits for a confirm
    pub const WAIT_POLL_SECS: f32 = 0.5;
    /// Poll interval for absent devices (rediscovery, no gamepads)
    pub const IDLE_POLL_SECS: f32 = 1.0;

    /// Largest accepted playfield side (pixels)
    pub const MAX_FIELD_SIZE: i32 = 16384;
    /// Largest accepted paddle-hit speed multiplier
    pub const MAX_SPEED_MODIFIER: f32 = 4.0;
    /// Longest accepted delay or poll interval (seconds)
    pub const MAX_INTERVAL_SECS: f32 = 3600.0;
}

/// One of the two players. `Left` is player 1 (id 0), `Right` is player 2 (id 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Left,
    Right,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Left, Player::Right];

    /// Player id as an array index
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::Left => 0,
            Player::Right => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Left => Player::Right,
            Player::Right => Player::Left,
        }
    }
}

/// Vertical paddle direction (screen coordinates: up decreases y)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Sign applied to y when moving in this direction
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}
