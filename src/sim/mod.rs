//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One gameplay step per tick, no wall-clock reads
//! - Seeded RNG only
//! - No rendering, audio or device dependencies

pub mod collision;
pub mod computer;
pub mod paddle;
pub mod physics;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use computer::ComputerOpponent;
pub use paddle::Paddle;
pub use physics::BallPhysics;
pub use rules::{MatchPhase, MatchState, Score};
pub use state::{Ball, GameEvent, GameState};
pub use tick::{TickInput, tick};
