use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "polifilo=info,tower_http=info";

fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr, for the commands that do not own the terminal.
pub fn init_stderr() -> Result<()> {
  tracing_subscriber::registry()
    .with(env_filter())
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .try_init()
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))
}

/// Log to a file, for the terminal UI. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init_file() -> Result<(WorkerGuard, PathBuf)> {
  let dir = log_dir()?;
  std::fs::create_dir_all(&dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let appender = tracing_appender::rolling::never(&dir, "polifilo.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::registry()
    .with(env_filter())
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false),
    )
    .try_init()
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

  Ok((guard, dir.join("polifilo.log")))
}

fn log_dir() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("polifilo"))
}
