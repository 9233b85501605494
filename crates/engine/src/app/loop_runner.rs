use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::sim::{FrameOutcome, Session, SessionConfig, SessionError, DEFAULT_MAX_STEPS_PER_FRAME};

use super::input::HeldKeys;
use super::metrics::MetricsAccumulator;
use super::Renderer;

pub const SLOW_FRAME_ENV_VAR: &str = "PERSPECTUS_SLOW_FRAME_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub start_y: f32,
    pub side: f32,
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_y: 150.0,
            side: 100.0,
            speed: 550.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub metrics_log_interval: Duration,
    pub simulated_slow_frame_ms: u64,
    pub max_render_fps: Option<u32>,
    pub player: PlayerConfig,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Start small and keep it fun!".to_string(),
            window_width: 1920,
            window_height: 1000,
            metrics_log_interval: Duration::from_secs(1),
            simulated_slow_frame_ms: 0,
            max_render_fps: None,
            player: PlayerConfig::default(),
        }
    }
}

impl LoopConfig {
    /// Session settings for a display surface of the given size.
    pub fn session_config(&self, screen_width: u32, screen_height: u32) -> SessionConfig {
        SessionConfig {
            screen_max_width: screen_width,
            screen_max_height: screen_height,
            player_start_y: self.player.start_y,
            player_side: self.player.side,
            player_speed: self.player.speed,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("failed to start session: {0}")]
    Session(#[from] SessionError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window)).map_err(AppError::CreateRenderer)?;

    // World bounds are fixed to the surface size at startup, even if the window is resized later.
    let surface_size = window.inner_size();
    let mut session =
        Session::new(config.session_config(surface_size.width, surface_size.height))?;
    info!(
        screen_max_width = session.bounds().screen_max_width(),
        screen_max_height = session.bounds().screen_max_height(),
        player_x = session.player().x,
        player_y = session.player().y,
        "session_started"
    );

    event_loop.set_control_flow(ControlFlow::Poll);

    let metrics_log_interval = if config.metrics_log_interval.is_zero() {
        Duration::from_secs(1)
    } else {
        config.metrics_log_interval
    };
    let slow_frame_delay = resolve_slow_frame_delay(config.simulated_slow_frame_ms);
    let render_frame_budget = render_frame_budget(config.max_render_fps);
    info!(
        fixed_dt_us = session.fixed_dt().as_micros() as u64,
        max_steps_per_frame = DEFAULT_MAX_STEPS_PER_FRAME,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        slow_frame_delay_ms = slow_frame_delay.as_millis() as u64,
        render_frame_budget_us = render_frame_budget.map(|budget| budget.as_micros() as u64),
        "loop_config"
    );

    let mut held_keys = HeldKeys::default();
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval, Instant::now());

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::Focused(false) => held_keys.release_all(),
                WindowEvent::KeyboardInput { event, .. } => {
                    if let Some((key, edge)) =
                        held_keys.handle_physical_key(event.physical_key, event.state)
                    {
                        session.handle_key_edge(key, edge);
                    }
                }
                WindowEvent::RedrawRequested => {
                    if slow_frame_delay > Duration::ZERO {
                        // Debug perturbation for exercising the step cap; not the FPS cap.
                        thread::sleep(slow_frame_delay);
                    }

                    let now = Instant::now();
                    let frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    let report = match session.run_frame(frame_dt, &held_keys) {
                        FrameOutcome::ExitRequested => {
                            info!(reason = "escape_key", "shutdown_requested");
                            window_target.exit();
                            return;
                        }
                        FrameOutcome::Continue(report) => report,
                    };

                    if let Some(budget) = render_frame_budget {
                        let since_present =
                            Instant::now().saturating_duration_since(last_present_instant);
                        if since_present < budget {
                            thread::sleep(budget - since_present);
                        }
                    }

                    if let Err(error) = renderer.render_session(&session) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();

                    metrics_accumulator.record_frame(frame_dt, &report);
                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            capped_frames = snapshot.capped_frames,
                            backlog_ms = snapshot.backlog_ms,
                            player_x = session.player().x,
                            direction = ?session.player().direction,
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!(total_steps = session.total_steps(), "shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Minimum time between presents; a missing or zero cap leaves rendering unthrottled.
fn render_frame_budget(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps
        .filter(|fps| *fps > 0)
        .map(|fps| Duration::from_nanos(1_000_000_000 / u64::from(fps)))
}

fn resolve_slow_frame_delay(config_slow_frame_ms: u64) -> Duration {
    parse_slow_frame_delay(env::var(SLOW_FRAME_ENV_VAR), config_slow_frame_ms)
}

fn parse_slow_frame_delay(
    raw: Result<String, env::VarError>,
    config_slow_frame_ms: u64,
) -> Duration {
    match raw {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!(
                    env_var = SLOW_FRAME_ENV_VAR,
                    value = value.as_str(),
                    "invalid slow-frame env var value; falling back to config"
                );
                Duration::from_millis(config_slow_frame_ms)
            }
        },
        Err(env::VarError::NotPresent) => Duration::from_millis(config_slow_frame_ms),
        Err(err) => {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                error = %err,
                "unable to read slow-frame env var; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_launcher_settings() {
        let config = LoopConfig::default();
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1000);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn session_config_takes_surface_size_and_player_settings() {
        let config = LoopConfig {
            player: PlayerConfig {
                start_y: 80.0,
                side: 40.0,
                speed: 300.0,
            },
            ..LoopConfig::default()
        };

        let session = config.session_config(1280, 720);

        assert_eq!(session.screen_max_width, 1280);
        assert_eq!(session.screen_max_height, 720);
        assert_eq!(session.player_start_y, 80.0);
        assert_eq!(session.player_side, 40.0);
        assert_eq!(session.player_speed, 300.0);
    }

    #[test]
    fn slow_frame_env_value_overrides_config() {
        assert_eq!(
            parse_slow_frame_delay(Ok("40".to_string()), 5),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn invalid_slow_frame_env_value_falls_back_to_config() {
        assert_eq!(
            parse_slow_frame_delay(Ok("soon".to_string()), 5),
            Duration::from_millis(5)
        );
        assert_eq!(
            parse_slow_frame_delay(Err(env::VarError::NotPresent), 7),
            Duration::from_millis(7)
        );
    }

    #[test]
    fn render_budget_is_off_without_a_positive_cap() {
        assert_eq!(render_frame_budget(None), None);
        assert_eq!(render_frame_budget(Some(0)), None);
    }

    #[test]
    fn render_budget_matches_cap_rate() {
        assert_eq!(
            render_frame_budget(Some(144)),
            Some(Duration::from_nanos(6_944_444))
        );
    }
}
