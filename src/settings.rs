//! Game settings
//!
//! Loaded once at startup from a JSON file and validated before the
//! simulation is built. Missing keys fall back to the defaults in
//! [`crate::consts`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Player;
use crate::consts::*;
use crate::error::{SettingsError, SimulationError};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub field_width: i32,
    pub field_height: i32,

    // === Paddles ===
    pub paddle_width: i32,
    pub paddle_height: i32,
    /// Gap between each paddle and its side wall
    pub paddle_inset: i32,
    /// Pixels per move event
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_size: i32,
    /// Pixels per tick at serve
    pub initial_ball_speed: f32,
    /// Multiplier applied on every paddle hit
    pub ball_speed_modifier: f32,
    /// Upper bound on ball speed; `None` lets it grow without limit
    pub ball_speed_cap: Option<f32>,

    // === Rules ===
    pub win_score: u32,
    pub win_margin: u32,
    /// Pause between a point and the next serve
    pub point_delay_secs: f32,

    // === Computer opponent ===
    /// Drive player 2 when no gamepad is bound to that port
    pub computer_enabled: bool,
    pub computer_min_delay: f32,
    pub computer_max_delay: f32,

    // === Audio ===
    /// Cue volume (0.0 - 1.0)
    pub volume: f32,
    pub muted: bool,

    // === Input ===
    /// Consecutive empty pointer polls before the pointer is released
    pub pointer_disconnect_polls: u32,
    pub joystick_deadzone: f32,

    // === Scheduling ===
    pub tick_rate_hz: u32,
    /// Gameplay poll interval while waiting for a confirm
    pub wait_poll_secs: f32,
    /// Poll interval for absent devices
    pub idle_poll_secs: f32,

    /// RNG seed; `None` derives one from the clock at startup
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            paddle_speed: PADDLE_SPEED,

            ball_size: BALL_SIZE,
            initial_ball_speed: INITIAL_BALL_SPEED,
            ball_speed_modifier: BALL_SPEED_MODIFIER,
            // Never outrun the paddles
            ball_speed_cap: Some(PADDLE_SPEED),

            win_score: WIN_SCORE,
            win_margin: WIN_MARGIN,
            point_delay_secs: POINT_DELAY_SECS,

            computer_enabled: true,
            computer_min_delay: COMPUTER_MIN_DELAY,
            computer_max_delay: COMPUTER_MAX_DELAY,

            volume: 1.0,
            muted: false,

            pointer_disconnect_polls: POINTER_DISCONNECT_POLLS,
            joystick_deadzone: JOYSTICK_DEADZONE,

            tick_rate_hz: TICK_RATE_HZ,
            wait_poll_secs: WAIT_POLL_SECS,
            idle_poll_secs: IDLE_POLL_SECS,

            seed: None,
        }
    }
}

impl Settings {
    /// Environment variable naming a settings file
    pub const ENV_VAR: &'static str = "JAM_PONG_SETTINGS";

    /// Reject configurations that would break the paddle or ball invariants
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.field_width <= 0 || self.field_height <= 0 {
            return Err(SimulationError::EmptyField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.field_width > MAX_FIELD_SIZE || self.field_height > MAX_FIELD_SIZE {
            return Err(SimulationError::FieldTooLarge {
                width: self.field_width,
                height: self.field_height,
                max: MAX_FIELD_SIZE,
            });
        }

        positive("paddle_width", self.paddle_width as f32)?;
        positive("paddle_height", self.paddle_height as f32)?;
        positive("ball_size", self.ball_size as f32)?;
        positive("tick_rate_hz", self.tick_rate_hz as f32)?;

        // Anything faster than the field crosses it in one tick
        let max_speed = self.field_width.max(self.field_height) as f32;
        positive("paddle_speed", self.paddle_speed)?;
        at_most("paddle_speed", self.paddle_speed, max_speed)?;
        positive("initial_ball_speed", self.initial_ball_speed)?;
        at_most("initial_ball_speed", self.initial_ball_speed, max_speed)?;

        for (name, secs) in [
            ("wait_poll_secs", self.wait_poll_secs),
            ("idle_poll_secs", self.idle_poll_secs),
            ("computer_min_delay", self.computer_min_delay),
            ("computer_max_delay", self.computer_max_delay),
        ] {
            positive(name, secs)?;
            at_most(name, secs, MAX_INTERVAL_SECS)?;
        }

        if self.paddle_height > self.field_height {
            return Err(SimulationError::InvertedPaddleBounds {
                field_height: self.field_height,
                paddle_height: self.paddle_height,
            });
        }

        for player in Player::ALL {
            let x = self.paddle_x(player);
            let right = x + self.paddle_width;
            if x < 0 || right > self.field_width {
                return Err(SimulationError::PaddleOutsideField {
                    x,
                    right,
                    field_width: self.field_width,
                });
            }
        }

        if self.ball_size > self.field_width || self.ball_size > self.field_height {
            return Err(SimulationError::BallTooLarge {
                size: self.ball_size,
                width: self.field_width,
                height: self.field_height,
            });
        }

        finite("ball_speed_modifier", self.ball_speed_modifier)?;
        if self.ball_speed_modifier < 1.0 {
            return Err(SimulationError::ShrinkingModifier(self.ball_speed_modifier));
        }
        at_most("ball_speed_modifier", self.ball_speed_modifier, MAX_SPEED_MODIFIER)?;
        if let Some(cap) = self.ball_speed_cap {
            finite("ball_speed_cap", cap)?;
            if cap < self.initial_ball_speed {
                return Err(SimulationError::CapBelowInitialSpeed {
                    cap,
                    initial: self.initial_ball_speed,
                });
            }
            at_most("ball_speed_cap", cap, max_speed)?;
        }

        if self.win_score == 0 {
            return Err(SimulationError::ZeroWinScore);
        }
        finite("point_delay_secs", self.point_delay_secs)?;
        if self.point_delay_secs < 0.0 {
            return Err(SimulationError::NonPositive {
                name: "point_delay_secs",
                value: self.point_delay_secs,
            });
        }
        at_most("point_delay_secs", self.point_delay_secs, MAX_INTERVAL_SECS)?;

        if self.computer_min_delay > self.computer_max_delay {
            return Err(SimulationError::InvertedReactionDelay {
                min: self.computer_min_delay,
                max: self.computer_max_delay,
            });
        }

        in_range("volume", self.volume, 0.0, 1.0)?;
        // A full-width deadzone would divide by zero when rescaling
        in_range("joystick_deadzone", self.joystick_deadzone, 0.0, 0.99)?;

        if self.pointer_disconnect_polls == 0 {
            return Err(SimulationError::ZeroDisconnectThreshold);
        }

        Ok(())
    }

    /// Left edge of a player's paddle column
    pub fn paddle_x(&self, player: Player) -> i32 {
        match player {
            Player::Left => self.paddle_inset,
            Player::Right => self.field_width - self.paddle_inset - self.paddle_width,
        }
    }

    /// Largest legal paddle top edge
    pub fn paddle_max_y(&self) -> f32 {
        (self.field_height - self.paddle_height) as f32
    }

    /// Gameplay and input cadence
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz.max(1)))
    }

    pub fn wait_poll_interval(&self) -> Duration {
        Duration::from_secs_f32(self.wait_poll_secs)
    }

    pub fn idle_poll_interval(&self) -> Duration {
        Duration::from_secs_f32(self.idle_poll_secs)
    }

    /// Gameplay ticks spent in the post-point pause
    pub fn point_delay_ticks(&self) -> u32 {
        (self.point_delay_secs * self.tick_rate_hz as f32).round() as u32
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` when given, else use validated defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                let settings = Self::default();
                settings.validate()?;
                Ok(settings)
            }
        }
    }

    /// Settings file from the command line, falling back to [`Self::ENV_VAR`]
    pub fn resolve_path(arg: Option<String>) -> Option<PathBuf> {
        arg.or_else(|| std::env::var(Self::ENV_VAR).ok())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), SimulationError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::NonPositive { name, value })
    }
}

fn at_most(name: &'static str, value: f32, max: f32) -> Result<(), SimulationError> {
    if value <= max {
        Ok(())
    } else {
        Err(SimulationError::OutOfRange {
            name,
            value,
            min: 0.0,
            max,
        })
    }
}

fn in_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), SimulationError> {
    finite(name, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
