//! Error types
//!
//! The simulation itself has no recoverable failures: devices that vanish are
//! simply not polled and out-of-range input is clamped. What can go wrong is
//! misconfiguration, which is rejected up front instead of silently breaking
//! the paddle and ball invariants later.

use std::path::PathBuf;

use thiserror::Error;

/// Invariant violations caught while validating settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("playfield {width}x{height} must have a positive size")]
    EmptyField { width: i32, height: i32 },

    #[error("playfield {width}x{height} exceeds {max}x{max}")]
    FieldTooLarge { width: i32, height: i32, max: i32 },

    #[error(
        "paddle clamp bounds inverted: field height {field_height} is smaller than paddle height {paddle_height}"
    )]
    InvertedPaddleBounds { field_height: i32, paddle_height: i32 },

    #[error("paddle column {x}..{right} does not fit inside field width {field_width}")]
    PaddleOutsideField { x: i32, right: i32, field_width: i32 },

    #[error("ball of size {size} does not fit inside a {width}x{height} field")]
    BallTooLarge { size: i32, width: i32, height: i32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("{name} must be within {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("ball speed modifier {0} would slow the ball down on paddle hits")]
    ShrinkingModifier(f32),

    #[error("ball speed cap {cap} is below the initial ball speed {initial}")]
    CapBelowInitialSpeed { cap: f32, initial: f32 },

    #[error("computer reaction delay bounds inverted: min {min}s > max {max}s")]
    InvertedReactionDelay { min: f32, max: f32 },

    #[error("win score must be at least 1")]
    ZeroWinScore,

    #[error("pointer disconnect threshold must be at least one poll")]
    ZeroDisconnectThreshold,
}

/// Failures while loading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] SimulationError),
}
