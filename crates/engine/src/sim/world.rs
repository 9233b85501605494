use thiserror::Error;

/// Horizontal world extent on each side of the origin, in screen widths.
pub const WORLD_WIDTH_SCREENS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldBoundsError {
    #[error("screen size must be non-zero, got {width}x{height}")]
    EmptyScreen { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldBounds {
    screen_max_width: u32,
    screen_max_height: u32,
}

impl WorldBounds {
    pub fn new(screen_max_width: u32, screen_max_height: u32) -> Result<Self, WorldBoundsError> {
        if screen_max_width == 0 || screen_max_height == 0 {
            return Err(WorldBoundsError::EmptyScreen {
                width: screen_max_width,
                height: screen_max_height,
            });
        }
        Ok(Self {
            screen_max_width,
            screen_max_height,
        })
    }

    pub fn screen_max_width(&self) -> u32 {
        self.screen_max_width
    }

    pub fn screen_max_height(&self) -> u32 {
        self.screen_max_height
    }

    pub fn screen_center_x(&self) -> f32 {
        (self.screen_max_width / 2) as f32
    }

    /// Inclusive x range for an actor's centre, given half its side.
    pub fn horizontal_limits(&self, half_side: f32) -> (f32, f32) {
        let extent = self.screen_max_width as f32 * WORLD_WIDTH_SCREENS;
        (half_side - extent, extent - half_side)
    }

    pub fn clamp_x(&self, x: f32, half_side: f32) -> f32 {
        let (min_x, max_x) = self.horizontal_limits(half_side);
        if x > max_x {
            max_x
        } else if x < min_x {
            min_x
        } else {
            x
        }
    }

    /// Background offset consumed by the parallax layers.
    pub fn parallax_shift(&self, player_x: f32) -> f32 {
        (self.screen_center_x() - player_x) / 3.0
    }
}
