mod input;
mod loop_runner;
mod metrics;
mod rendering;

pub use loop_runner::{run_app, AppError, LoopConfig, PlayerConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    layer_rect, player_quad, rect_to_screen_px, ParallaxLayer, PlayerQuad, Renderer,
    ScreenRectPx, Viewport, HOUSES_LAYER, MOUNTAINS_LAYER,
};
