use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use super::input::{BoundKey, InputState, KeyEdge, KeyLevels};
use super::player::{PlayerEntity, PlayerError};
use super::step::step;
use super::timestep::{FixedTimestep, StepReport};
use super::world::{WorldBounds, WorldBoundsError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub screen_max_width: u32,
    pub screen_max_height: u32,
    pub player_start_y: f32,
    pub player_side: f32,
    pub player_speed: f32,
}

impl SessionConfig {
    pub fn for_screen(screen_max_width: u32, screen_max_height: u32) -> Self {
        Self {
            screen_max_width,
            screen_max_height,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            screen_max_width: 1920,
            screen_max_height: 1000,
            player_start_y: 150.0,
            player_side: 100.0,
            player_speed: 550.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SessionError {
    #[error("invalid world bounds: {0}")]
    World(#[from] WorldBoundsError),
    #[error("invalid player: {0}")]
    Player(#[from] PlayerError),
    #[error("player side {side} puts spawn x={spawn_x} outside limits [{min_x}, {max_x}]")]
    PlayerWiderThanWorld {
        side: f32,
        spawn_x: f32,
        min_x: f32,
        max_x: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue(StepReport),
    ExitRequested,
}

/// One play session: owns the input latches, the player and the step clock.
#[derive(Debug, Clone)]
pub struct Session {
    bounds: WorldBounds,
    input: InputState,
    player: PlayerEntity,
    timestep: FixedTimestep,
    total_steps: u64,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let bounds = WorldBounds::new(config.screen_max_width, config.screen_max_height)?;
        let player = PlayerEntity::new(
            bounds.screen_center_x(),
            config.player_start_y,
            config.player_side,
            config.player_speed,
        )?;
        let (min_x, max_x) = bounds.horizontal_limits(player.half_side());
        if !(min_x..=max_x).contains(&player.x) {
            return Err(SessionError::PlayerWiderThanWorld {
                side: player.side(),
                spawn_x: player.x,
                min_x,
                max_x,
            });
        }
        Ok(Self {
            bounds,
            input: InputState::new(),
            player,
            timestep: FixedTimestep::default(),
            total_steps: 0,
        })
    }

    pub fn handle_key_edge(&mut self, key: BoundKey, edge: KeyEdge) {
        self.input.apply_edge(key, edge);
    }

    pub fn should_exit(&self) -> bool {
        self.input.exit_requested()
    }

    /// Exit check, movement refresh, then up to the step cap.
    pub fn run_frame(&mut self, frame_delta: Duration, levels: &impl KeyLevels) -> FrameOutcome {
        if self.should_exit() {
            return FrameOutcome::ExitRequested;
        }

        self.input.refresh_movement(levels);

        let input = &self.input;
        let bounds = &self.bounds;
        let player = &mut self.player;
        let report = self.timestep.advance(frame_delta, |fixed_dt_seconds| {
            *player = step(input, player, bounds, fixed_dt_seconds);
        });
        self.total_steps = self.total_steps.saturating_add(u64::from(report.steps_run));

        if report.cap_hit {
            debug!(
                steps_run = report.steps_run,
                backlog_ms = report.backlog.as_millis() as u64,
                "sim_iteration_cap_hit"
            );
        }

        FrameOutcome::Continue(report)
    }

    pub fn player(&self) -> &PlayerEntity {
        &self.player
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn accumulator(&self) -> Duration {
        self.timestep.accumulator()
    }

    pub fn fixed_dt(&self) -> Duration {
        self.timestep.fixed_dt()
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn parallax_shift(&self) -> f32 {
        self.bounds.parallax_shift(self.player.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::direction::Direction;
    use crate::sim::input::LogicalKey;

    fn session_960() -> Session {
        Session::new(SessionConfig::for_screen(960, 540)).expect("session")
    }

    fn holding(keys: &'static [BoundKey]) -> impl Fn(BoundKey) -> bool {
        move |key| keys.contains(&key)
    }

    #[test]
    fn player_spawns_at_screen_center() {
        let session = session_960();
        let player = session.player();

        assert_eq!(player.x, 480.0);
        assert_eq!(player.y, 150.0);
        assert_eq!(player.side(), 100.0);
        assert_eq!(player.speed(), 550.0);
        assert_eq!(player.direction, Direction::None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let zero_screen = Session::new(SessionConfig::for_screen(0, 540));
        assert!(matches!(zero_screen, Err(SessionError::World(_))));

        let bad_side = Session::new(SessionConfig {
            player_side: 0.0,
            ..SessionConfig::for_screen(960, 540)
        });
        assert!(matches!(bad_side, Err(SessionError::Player(_))));
    }

    #[test]
    fn player_too_wide_for_world_is_rejected() {
        let spawn_outside = Session::new(SessionConfig {
            player_side: 10_000.0,
            ..SessionConfig::for_screen(1920, 1000)
        });
        assert!(matches!(
            spawn_outside,
            Err(SessionError::PlayerWiderThanWorld { max_x, .. }) if max_x == 760.0
        ));

        let inverted_limits = Session::new(SessionConfig {
            player_side: 20_000.0,
            ..SessionConfig::for_screen(960, 540)
        });
        assert!(matches!(
            inverted_limits,
            Err(SessionError::PlayerWiderThanWorld { .. })
        ));

        // Largest side that still leaves the spawn point on the right limit.
        let snug = Session::new(SessionConfig {
            player_side: 4_800.0,
            ..SessionConfig::for_screen(960, 540)
        })
        .expect("session");
        assert_eq!(snug.player().x, 480.0);
    }

    #[test]
    fn step_rate_and_cap_are_fixed() {
        let mut session = session_960();
        assert_eq!(session.fixed_dt(), Duration::from_nanos(16_666_666));

        let outcome = session.run_frame(session.fixed_dt() * 10, &holding(&[]));
        assert!(matches!(outcome, FrameOutcome::Continue(report) if report.steps_run == 3));
    }

    #[test]
    fn literal_frame_durations_run_expected_steps() {
        let mut session = session_960();
        let tolerance = Duration::from_micros(1);

        let outcome = session.run_frame(Duration::from_secs_f64(3.0 / 60.0), &holding(&[]));
        assert!(matches!(outcome, FrameOutcome::Continue(report) if report.steps_run == 3));
        assert!(session.accumulator() < tolerance);

        let mut session = session_960();
        let outcome = session.run_frame(Duration::from_secs_f64(10.0 / 60.0), &holding(&[]));
        let FrameOutcome::Continue(report) = outcome else {
            panic!("expected frame to continue");
        };
        assert_eq!(report.steps_run, 3);
        assert!(report.cap_hit);
        let expected = Duration::from_secs_f64(7.0 / 60.0);
        let backlog = session.accumulator();
        let diff = if backlog > expected {
            backlog - expected
        } else {
            expected - backlog
        };
        assert!(diff < tolerance, "backlog={backlog:?}");
    }

    #[test]
    fn holding_left_for_one_second_reaches_expected_spot() {
        let mut session = session_960();
        let left = holding(&[BoundKey::A]);
        let fixed_dt = session.fixed_dt();

        for _ in 0..20 {
            let outcome = session.run_frame(fixed_dt * 3, &left);
            assert!(matches!(outcome, FrameOutcome::Continue(report) if report.steps_run == 3));
        }

        let player = session.player();
        assert_eq!(session.total_steps(), 60);
        assert!((player.x - -70.0).abs() < 0.01, "x={}", player.x);
        assert!((player.y - 150.0).abs() < 0.01);
        assert_eq!(player.rotation, 180.0);
        assert_eq!(player.direction, Direction::West);
    }

    #[test]
    fn slow_frame_runs_capped_steps_and_keeps_backlog() {
        let mut session = session_960();
        let fixed_dt = session.fixed_dt();

        let outcome = session.run_frame(fixed_dt * 10, &holding(&[BoundKey::ArrowLeft]));

        let FrameOutcome::Continue(report) = outcome else {
            panic!("expected frame to continue");
        };
        assert_eq!(report.steps_run, 3);
        assert!(report.cap_hit);
        assert_eq!(session.accumulator(), fixed_dt * 7);
        assert!((session.player().x - (480.0 - 550.0 * 3.0 / 60.0)).abs() < 0.01);
    }

    #[test]
    fn released_keys_stop_movement_on_next_frame() {
        let mut session = session_960();
        let fixed_dt = session.fixed_dt();
        session.run_frame(fixed_dt, &holding(&[BoundKey::D]));
        let after_move = *session.player();

        session.run_frame(fixed_dt * 3, &holding(&[]));

        assert_eq!(*session.player(), after_move);
        assert_eq!(session.player().direction, Direction::East);
    }

    #[test]
    fn escape_edge_ends_session_before_stepping() {
        let mut session = session_960();
        let fixed_dt = session.fixed_dt();
        session.handle_key_edge(BoundKey::Escape, KeyEdge::Pressed);

        let outcome = session.run_frame(fixed_dt * 3, &holding(&[BoundKey::A]));

        assert_eq!(outcome, FrameOutcome::ExitRequested);
        assert!(session.should_exit());
        assert_eq!(session.player().x, 480.0);
        assert_eq!(session.total_steps(), 0);
    }

    #[test]
    fn holding_escape_without_edge_does_not_exit() {
        let mut session = session_960();
        let outcome = session.run_frame(session.fixed_dt(), &holding(&[BoundKey::Escape]));

        assert!(matches!(outcome, FrameOutcome::Continue(_)));
        assert!(!session.should_exit());
    }

    #[test]
    fn action_latch_survives_frames_until_release_edge() {
        let mut session = session_960();
        let fixed_dt = session.fixed_dt();
        session.handle_key_edge(BoundKey::Space, KeyEdge::Pressed);

        session.run_frame(fixed_dt, &holding(&[BoundKey::Space]));
        session.run_frame(fixed_dt, &holding(&[]));
        assert!(session.input().is_pressed(LogicalKey::Action));

        session.handle_key_edge(BoundKey::Space, KeyEdge::Released);
        session.run_frame(fixed_dt, &holding(&[]));
        assert!(!session.input().is_pressed(LogicalKey::Action));
    }

    #[test]
    fn parallax_follows_player() {
        let mut session = session_960();
        assert_eq!(session.parallax_shift(), 0.0);

        session.run_frame(session.fixed_dt() * 3, &holding(&[BoundKey::ArrowRight]));
        assert!(session.parallax_shift() < 0.0);
    }
}
