use std::path::PathBuf;

use afterglow_core::{ConfigError, TrailConfig};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const CONFIG_ENV: &str = "AFTERGLOW_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "afterglow.toml";

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        fn run(config: TrailConfig) -> afterglow_platform::Result<()> {
            afterglow_win::run_app(config)
        }
    } else {
        fn run(_config: TrailConfig) -> afterglow_platform::Result<()> {
            tracing::warn!("no desktop overlay backend here; run the afterglow-web build instead");
            Ok(())
        }
    }
}

/// First CLI argument, then `AFTERGLOW_CONFIG`, then `afterglow.toml` in the
/// working directory if present.
fn config_path() -> Option<PathBuf> {
    if let Some(arg) = std::env::args_os().nth(1) {
        return Some(PathBuf::from(arg));
    }
    if let Some(value) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(value));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.exists().then_some(fallback)
}

fn load_config() -> Result<TrailConfig, ConfigError> {
    match config_path() {
        Some(path) => {
            info!("loading trail config from {}", path.display());
            TrailConfig::load(&path)
        }
        None => Ok(TrailConfig::default()),
    }
}

fn main() {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Afterglow starting");
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };
    if let Err(e) = run(config) {
        eprintln!("Afterglow error: {e}");
        std::process::exit(1);
    }
}
