use crate::sim::{PlayerEntity, WorldBounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRectPx {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Background band placed in y-up screen space, shifted by a fraction of the parallax offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    pub base_x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub shift_factor: f32,
    pub color: [u8; 4],
}

pub const MOUNTAINS_LAYER: ParallaxLayer = ParallaxLayer {
    base_x: 500.0,
    y: 500.0,
    width: 895.0,
    height: 378.0,
    shift_factor: 0.5,
    color: [178, 186, 201, 255],
};

pub const HOUSES_LAYER: ParallaxLayer = ParallaxLayer {
    base_x: 500.0,
    y: 300.0,
    width: 689.0,
    height: 333.0,
    shift_factor: 1.0,
    color: [132, 118, 108, 255],
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerQuad {
    pub center_x: f32,
    pub center_y: f32,
    pub half_side: f32,
    pub rotation_radians: f32,
}

/// Converts a y-up rectangle given by its bottom-left corner into framebuffer pixels.
pub fn rect_to_screen_px(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    viewport: Viewport,
) -> ScreenRectPx {
    let top = viewport.height as f32 - (y + height);
    ScreenRectPx {
        left: x.round() as i32,
        top: top.round() as i32,
        right: (x + width).round() as i32,
        bottom: (top + height).round() as i32,
    }
}

pub fn layer_rect(layer: &ParallaxLayer, parallax_shift: f32, viewport: Viewport) -> ScreenRectPx {
    rect_to_screen_px(
        layer.base_x + parallax_shift * layer.shift_factor,
        layer.y,
        layer.width,
        layer.height,
        viewport,
    )
}

/// The camera tracks the player, so the square always sits right of screen centre.
pub fn player_quad(
    player: &PlayerEntity,
    bounds: &WorldBounds,
    viewport: Viewport,
) -> PlayerQuad {
    let half_side = player.half_side();
    let left = bounds.screen_center_x();
    let bottom = player.y - half_side;
    PlayerQuad {
        center_x: left + half_side,
        center_y: viewport.height as f32 - (bottom + half_side),
        half_side,
        rotation_radians: player.rotation.to_radians(),
    }
}
