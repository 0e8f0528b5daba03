use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::cache::UnauthorizedBehavior;

/// Environment variable holding a bearer token for the live API
pub const API_TOKEN_VAR: &str = "POLIFILO_API_TOKEN";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Custom title for the header
  pub title: String,
  pub server: ServerConfig,
  pub source: SourceConfig,
  pub listing: ListingConfig,
  pub export: ExportConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      title: "Polifilo".to_string(),
      server: ServerConfig::default(),
      source: SourceConfig::default(),
      listing: ListingConfig::default(),
      export: ExportConfig::default(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub bind: SocketAddr,
  /// Directory of exported files served for any path the API does not handle
  pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
      static_dir: None,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
  /// Query the JSON API under `base_url`
  #[default]
  Live,
  /// Read exported snapshot files, from `snapshot_dir` or `{base_url}/data/`
  Static,
  /// Use the built-in catalog without any I/O
  Embedded,
}

impl std::str::FromStr for SourceMode {
  type Err = color_eyre::Report;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_lowercase().as_str() {
      "live" => Ok(SourceMode::Live),
      "static" => Ok(SourceMode::Static),
      "embedded" => Ok(SourceMode::Embedded),
      other => Err(eyre!(
        "Unknown source mode {:?} (expected live, static or embedded)",
        other
      )),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
  pub mode: SourceMode,
  pub base_url: String,
  pub snapshot_dir: Option<PathBuf>,
  pub on_unauthorized: UnauthorizedBehavior,
}

impl Default for SourceConfig {
  fn default() -> Self {
    Self {
      mode: SourceMode::default(),
      base_url: "http://127.0.0.1:5000".to_string(),
      snapshot_dir: None,
      on_unauthorized: UnauthorizedBehavior::default(),
    }
  }
}

impl SourceConfig {
  /// Get the API token from the environment, if one is set.
  pub fn api_token() -> Option<String> {
    std::env::var(API_TOKEN_VAR)
      .ok()
      .filter(|token| !token.trim().is_empty())
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
  /// Entries shown before "view all"
  pub page_size: usize,
}

impl Default for ListingConfig {
  fn default() -> Self {
    Self { page_size: 6 }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
  pub out_dir: PathBuf,
}

impl Default for ExportConfig {
  fn default() -> Self {
    Self {
      out_dir: PathBuf::from("dist").join("data"),
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./polifilo.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/polifilo/config.yaml
  ///
  /// Without a config file the defaults apply.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => {
        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
      }
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("polifilo.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("polifilo").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    if config.listing.page_size == 0 {
      return Err(eyre!(
        "Invalid config file {}: listing.page_size must be at least 1",
        path.display()
      ));
    }

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("polifilo.yaml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
  }

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server.bind.to_string(), "127.0.0.1:5000");
    assert_eq!(config.source.mode, SourceMode::Live);
    assert_eq!(config.source.on_unauthorized, UnauthorizedBehavior::Throw);
    assert_eq!(config.listing.page_size, 6);
  }

  #[test]
  fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = write_config(
      "title: My Studio\n\
       source:\n  mode: static\n  snapshot_dir: dist/data\n  on_unauthorized: return_null\n",
    );
    let config = Config::load(Some(&path)).unwrap();

    assert_eq!(config.title, "My Studio");
    assert_eq!(config.source.mode, SourceMode::Static);
    assert_eq!(config.source.snapshot_dir, Some(PathBuf::from("dist/data")));
    assert_eq!(
      config.source.on_unauthorized,
      UnauthorizedBehavior::ReturnNull
    );
    assert_eq!(config.source.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.listing.page_size, 6);
  }

  #[test]
  fn test_missing_explicit_path_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }

  #[test]
  fn test_zero_page_size_rejected() {
    let (_dir, path) = write_config("listing:\n  page_size: 0\n");
    assert!(Config::load(Some(&path)).is_err());
  }

  #[test]
  fn test_unknown_mode_rejected() {
    let (_dir, path) = write_config("source:\n  mode: carrier-pigeon\n");
    assert!(Config::load(Some(&path)).is_err());
    assert!("carrier-pigeon".parse::<SourceMode>().is_err());
    assert_eq!("Embedded".parse::<SourceMode>().unwrap(), SourceMode::Embedded);
  }
}
