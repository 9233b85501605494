mod renderer;
mod transform;

pub use renderer::Renderer;
pub use transform::{
    layer_rect, player_quad, rect_to_screen_px, ParallaxLayer, PlayerQuad, ScreenRectPx,
    Viewport, HOUSES_LAYER, MOUNTAINS_LAYER,
};
