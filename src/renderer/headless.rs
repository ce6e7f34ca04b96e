//! Log-backed outputs for hosts without a display

use super::{AmbientLight, Frame, Renderer, light_levels};

/// Logs score and phase changes at info, every frame at trace
#[derive(Debug, Default)]
pub struct LogRenderer {
    last: Option<Frame>,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame) {
        let changed = self
            .last
            .as_ref()
            .is_none_or(|last| last.scores != frame.scores || last.phase != frame.phase);
        if changed {
            log::info!(
                "{:?}  {} - {}",
                frame.phase,
                frame.scores[0],
                frame.scores[1]
            );
        }
        log::trace!(
            "paddles y=({}, {}) ball={:?}",
            frame.paddles[0].y,
            frame.paddles[1].y,
            frame.ball_position()
        );
        self.last = Some(frame.clone());
    }
}

/// Logs the strip brightness levels at trace
#[derive(Debug)]
pub struct LogLights {
    count: usize,
    lit: bool,
}

impl LogLights {
    pub fn new(count: usize) -> Self {
        Self { count, lit: false }
    }
}

impl AmbientLight for LogLights {
    fn show(&mut self, ball_x: i32, field_width: i32) {
        self.lit = true;
        log::trace!("lights {:?}", light_levels(ball_x, field_width, self.count));
    }

    fn clear(&mut self) {
        if self.lit {
            log::trace!("lights off");
            self.lit = false;
        }
    }
}
