mod direction;
mod input;
mod player;
mod session;
mod step;
mod timestep;
mod world;

pub use direction::{AxisSign, Direction};
pub use input::{BoundKey, InputState, KeyEdge, KeyLevels, LogicalKey};
pub use player::{PlayerEntity, PlayerError};
pub use session::{FrameOutcome, Session, SessionConfig, SessionError};
pub use step::step;
pub use timestep::{
    FixedTimestep, StepReport, DEFAULT_MAX_STEPS_PER_FRAME, DEFAULT_TICKS_PER_SECOND,
};
pub use world::{WorldBounds, WorldBoundsError, WORLD_WIDTH_SCREENS};
