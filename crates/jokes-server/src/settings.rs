//! Runtime configuration, read once at startup.
//!
//! Sources, lowest priority first: built-in defaults, the optional TOML file
//! given with `--config`, then `JOKES_*` environment variables
//! (`JOKES_DATABASE_PATH`, `JOKES_JOKE_API_URL`, ...).

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                  String,
  #[serde(default = "default_port")]
  pub port:                  u16,
  /// SQLite database file; a leading `~/` is expanded.
  #[serde(default = "default_database_path")]
  pub database_path:         PathBuf,
  #[serde(default = "default_busy_timeout_ms")]
  pub busy_timeout_ms:       u64,
  #[serde(default = "default_joke_api_url")]
  pub joke_api_url:          String,
  #[serde(default = "default_upstream_timeout_secs")]
  pub upstream_timeout_secs: u64,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8000 }
fn default_database_path() -> PathBuf { PathBuf::from("jokes.db") }
fn default_busy_timeout_ms() -> u64 { 5_000 }
fn default_joke_api_url() -> String {
  "https://official-joke-api.appspot.com/random_joke".to_owned()
}
fn default_upstream_timeout_secs() -> u64 { 10 }

impl ServerConfig {
  /// Layer the config file (if present) and the environment over defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("JOKES").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn busy_timeout(&self) -> Duration { Duration::from_millis(self.busy_timeout_ms) }

  pub fn upstream_timeout(&self) -> Duration {
    Duration::from_secs(self.upstream_timeout_secs)
  }

  /// `database_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
