use serde::{Deserialize, Serialize};

use crate::error::{require_positive, DomainError};
use crate::field::Field;
use crate::params::Params;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub field: Field,
    pub paddle_speed: f32,
    pub paddle_length: f32,
    pub target_score: u32,
    pub ball_initial_speed: f32,
    pub ball_max_speed: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            field: Field::centered(Params::FIELD_WIDTH, Params::FIELD_HEIGHT),
            paddle_speed: Params::PADDLE_SPEED,
            paddle_length: Params::PADDLE_LENGTH,
            target_score: Params::TARGET_SCORE,
            ball_initial_speed: Params::BALL_SPEED_INITIAL,
            ball_max_speed: Params::BALL_SPEED_MAX,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every limit is strictly positive
    pub fn validate(&self) -> Result<(), DomainError> {
        require_positive(self.paddle_speed, "paddle_speed")?;
        require_positive(self.paddle_length, "paddle_length")?;
        if self.target_score == 0 {
            return Err(DomainError::NonPositive {
                field: "target_score",
            });
        }
        require_positive(self.ball_initial_speed, "ball_initial_speed")?;
        require_positive(self.ball_max_speed, "ball_max_speed")?;
        Ok(())
    }

    /// Inclusive paddle Y range for this field and paddle length
    pub fn paddle_bounds(&self) -> (f32, f32) {
        self.field.paddle_bounds(self.paddle_length)
    }
}
