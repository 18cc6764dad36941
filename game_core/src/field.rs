use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangular playing field described by its four corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    bottom_left: Vec2,
    bottom_right: Vec2,
    top_right: Vec2,
    top_left: Vec2,
}

impl Field {
    pub fn new(bottom_left: Vec2, bottom_right: Vec2, top_right: Vec2, top_left: Vec2) -> Self {
        Self {
            bottom_left,
            bottom_right,
            top_right,
            top_left,
        }
    }

    /// Field of the given size centered on the origin
    pub fn centered(width: f32, height: f32) -> Self {
        let half = Vec2::new(width, height) * 0.5;
        Self::new(
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        )
    }

    pub fn bottom_left(&self) -> Vec2 {
        self.bottom_left
    }

    pub fn bottom_right(&self) -> Vec2 {
        self.bottom_right
    }

    pub fn top_right(&self) -> Vec2 {
        self.top_right
    }

    pub fn top_left(&self) -> Vec2 {
        self.top_left
    }

    /// Scoring edge on Player1's side
    pub fn left_x(&self) -> f32 {
        self.top_left.x
    }

    /// Scoring edge on Player2's side
    pub fn right_x(&self) -> f32 {
        self.top_right.x
    }

    pub fn bottom_y(&self) -> f32 {
        self.bottom_left.y
    }

    pub fn top_y(&self) -> f32 {
        self.top_left.y
    }

    pub fn width(&self) -> f32 {
        self.right_x() - self.left_x()
    }

    pub fn height(&self) -> f32 {
        self.top_y() - self.bottom_y()
    }

    /// Serve point for the ball
    pub fn center(&self) -> Vec2 {
        (self.bottom_left + self.bottom_right + self.top_right + self.top_left) * 0.25
    }

    /// Inclusive range a paddle center may occupy
    pub fn paddle_bounds(&self, paddle_length: f32) -> (f32, f32) {
        let half = paddle_length / 2.0;
        (self.bottom_y() + half, self.top_y() - half)
    }
}
