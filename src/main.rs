mod app;
mod cache;
mod catalog;
mod commands;
mod config;
mod detail;
mod event;
mod listing;
mod logging;
mod query;
mod server;
mod source;
mod ui;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

use crate::catalog::{parse_record_id, CatalogStore, Collection};
use crate::config::{Config, SourceMode};

#[derive(Parser, Debug)]
#[command(name = "polifilo")]
#[command(about = "Portfolio and app store showcase: JSON API, static snapshots and a terminal client")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./polifilo.yaml, then $XDG_CONFIG_HOME/polifilo/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Serve the catalog API and snapshot files
  Serve {
    /// Address to listen on
    #[arg(short, long)]
    bind: Option<SocketAddr>,
  },
  /// Write apps.json and portfolio.json for static hosting
  Export {
    /// Output directory
    #[arg(short, long)]
    out: Option<PathBuf>,
  },
  /// Browse the catalog in the terminal
  Browse {
    /// Where records come from: live, static or embedded
    #[arg(short, long)]
    source: Option<SourceMode>,

    /// Base URL of the API or static site
    #[arg(long)]
    base_url: Option<String>,

    /// Open the detail page of this app on start
    #[arg(long, value_parser = parse_app_id)]
    app: Option<u32>,
  },
}

fn parse_app_id(raw: &str) -> std::result::Result<u32, String> {
  parse_record_id(Collection::Apps, raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let mut config = Config::load(args.config.as_deref())?;

  match args.command {
    Command::Serve { bind } => {
      logging::init_stderr()?;
      if let Some(bind) = bind {
        config.server.bind = bind;
      }
      server::serve(&config.server, CatalogStore::seeded()?).await
    }
    Command::Export { out } => {
      logging::init_stderr()?;
      let out = out.unwrap_or(config.export.out_dir);
      let written = catalog::write_snapshot(&CatalogStore::seeded()?, &out)?;
      info!(files = written.len(), dir = %out.display(), "export complete");
      Ok(())
    }
    Command::Browse {
      source: mode,
      base_url,
      app: open_app,
    } => {
      // Held until exit so buffered log lines get flushed
      let (_guard, log_path) = logging::init_file()?;
      info!(log = %log_path.display(), "starting browse session");

      if let Some(mode) = mode {
        config.source.mode = mode;
      }
      if let Some(base_url) = base_url {
        config.source.base_url = base_url;
      }

      let source = source::build_source(&config.source)?;
      let mut app = app::App::new(config, source, open_app);
      app.run().await
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_browse_rejects_zero_app_id() {
    let args = Args::try_parse_from(["polifilo", "browse", "--app", "2"]).unwrap();
    assert!(matches!(args.command, Command::Browse { app: Some(2), .. }));

    for raw in ["0", "-3", "two"] {
      assert!(Args::try_parse_from(["polifilo", "browse", "--app", raw]).is_err(), "{}", raw);
    }
  }
}
