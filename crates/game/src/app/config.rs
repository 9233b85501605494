use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use perspectus_engine::{LoopConfig, PlayerConfig};
use serde::Deserialize;
use thiserror::Error;

pub(crate) const CONFIG_ENV_VAR: &str = "PERSPECTUS_CONFIG";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}{location}: {source}")]
    Parse {
        path: PathBuf,
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value at {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SettingsFile {
    window_title: Option<String>,
    window_width: Option<u32>,
    window_height: Option<u32>,
    max_render_fps: Option<u32>,
    metrics_log_interval_ms: Option<u64>,
    simulated_slow_frame_ms: Option<u64>,
    player: PlayerSettings,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PlayerSettings {
    start_y: Option<f32>,
    side: Option<f32>,
    speed: Option<f32>,
}

/// Defaults, overlaid with the JSON file named by `PERSPECTUS_CONFIG` when it is set.
pub(crate) fn resolve_loop_config() -> Result<(LoopConfig, Option<PathBuf>), ConfigError> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(raw) if raw.trim().is_empty() => Ok((LoopConfig::default(), None)),
        Ok(raw) => {
            let path = PathBuf::from(raw.trim());
            let settings = load_settings_file(&path)?;
            Ok((settings.apply_to(LoopConfig::default())?, Some(path)))
        }
        Err(env::VarError::NotPresent) => Ok((LoopConfig::default(), None)),
        Err(source) => Err(ConfigError::EnvVar {
            var: CONFIG_ENV_VAR,
            source,
        }),
    }
}

pub(crate) fn load_settings_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings_json(&raw, path)
}

fn parse_settings_json(raw: &str, path: &Path) -> Result<SettingsFile, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, SettingsFile>(&mut deserializer).map_err(|error| {
        let field_path = error.path().to_string();
        let location = if field_path.is_empty() || field_path == "." {
            String::new()
        } else {
            format!(" at {field_path}")
        };
        ConfigError::Parse {
            path: path.to_path_buf(),
            location,
            source: error.into_inner(),
        }
    })
}

impl SettingsFile {
    pub(crate) fn apply_to(self, base: LoopConfig) -> Result<LoopConfig, ConfigError> {
        let config = LoopConfig {
            window_title: self.window_title.unwrap_or(base.window_title),
            window_width: positive_u32("window_width", self.window_width, base.window_width)?,
            window_height: positive_u32("window_height", self.window_height, base.window_height)?,
            max_render_fps: self.max_render_fps.or(base.max_render_fps),
            metrics_log_interval: self
                .metrics_log_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(base.metrics_log_interval),
            simulated_slow_frame_ms: self
                .simulated_slow_frame_ms
                .unwrap_or(base.simulated_slow_frame_ms),
            player: self.player.apply_to(base.player)?,
        };
        Ok(config)
    }
}

impl PlayerSettings {
    fn apply_to(self, base: PlayerConfig) -> Result<PlayerConfig, ConfigError> {
        let start_y = self.start_y.unwrap_or(base.start_y);
        let side = self.side.unwrap_or(base.side);
        let speed = self.speed.unwrap_or(base.speed);

        if !start_y.is_finite() {
            return Err(invalid("player.start_y", format!("expected finite, got {start_y}")));
        }
        if !side.is_finite() || side <= 0.0 {
            return Err(invalid("player.side", format!("expected > 0, got {side}")));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(invalid("player.speed", format!("expected >= 0, got {speed}")));
        }
        Ok(PlayerConfig {
            start_y,
            side,
            speed,
        })
    }
}

fn positive_u32(
    field: &'static str,
    value: Option<u32>,
    fallback: u32,
) -> Result<u32, ConfigError> {
    match value {
        Some(0) => Err(invalid(field, "expected > 0, got 0")),
        Some(value) => Ok(value),
        None => Ok(fallback),
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.into(),
    }
}
