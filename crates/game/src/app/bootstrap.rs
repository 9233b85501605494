use std::process::ExitCode;

use perspectus_engine::LoopConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use super::config::{resolve_loop_config, CONFIG_ENV_VAR};

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
}

pub(crate) fn build_app() -> Result<AppWiring, ExitCode> {
    init_tracing();
    info!("=== Perspectus Startup ===");

    let (config, source) = match resolve_loop_config() {
        Ok(resolved) => resolved,
        Err(err) => {
            error!(error = %err, env_var = CONFIG_ENV_VAR, "config_invalid");
            return Err(ExitCode::FAILURE);
        }
    };

    let config_file = source
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    info!(
        config_file = config_file.as_str(),
        window_width = config.window_width,
        window_height = config.window_height,
        player_side = config.player.side,
        player_speed = config.player.speed,
        "startup"
    );

    Ok(AppWiring { config })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
