use thiserror::Error;

use super::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlayerError {
    #[error("player side must be a positive finite number, got {0}")]
    InvalidSide(f32),
    #[error("player speed must be a non-negative finite number, got {0}")]
    InvalidSpeed(f32),
    #[error("player position must be finite, got ({x}, {y})")]
    InvalidPosition { x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerEntity {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub direction: Direction,
    side: f32,
    speed: f32,
}

impl PlayerEntity {
    pub fn new(x: f32, y: f32, side: f32, speed: f32) -> Result<Self, PlayerError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(PlayerError::InvalidPosition { x, y });
        }
        if !side.is_finite() || side <= 0.0 {
            return Err(PlayerError::InvalidSide(side));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(PlayerError::InvalidSpeed(speed));
        }
        Ok(Self {
            x,
            y,
            rotation: 0.0,
            direction: Direction::None,
            side,
            speed,
        })
    }

    pub fn side(&self) -> f32 {
        self.side
    }

    pub fn half_side(&self) -> f32 {
        self.side / 2.0
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}
