//! Collision detection on integer pixel boxes
//!
//! Ball and paddles are axis-aligned rectangles. Positions are truncated to
//! whole pixels before testing, so a ball moving at fractional speeds
//! collides exactly where it is drawn.

use glam::IVec2;

/// Axis-aligned box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(pos: IVec2, width: i32, height: i32) -> Self {
        Self::new(pos.x, pos.y, width, height)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Overlap test on closed intervals: boxes whose edges touch collide
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.x > other.right() || other.x > self.right() {
            return false;
        }
        if self.y > other.bottom() || other.y > self.bottom() {
            return false;
        }
        true
    }
}
