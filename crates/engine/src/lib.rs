pub mod app;
pub mod sim;

pub use app::{
    run_app, AppError, LoopConfig, LoopMetricsSnapshot, PlayerConfig, SLOW_FRAME_ENV_VAR,
};
pub use sim::{
    step, AxisSign, BoundKey, Direction, FixedTimestep, FrameOutcome, InputState, KeyEdge,
    KeyLevels, LogicalKey, PlayerEntity, PlayerError, Session, SessionConfig, SessionError,
    StepReport, WorldBounds, WorldBoundsError,
};
