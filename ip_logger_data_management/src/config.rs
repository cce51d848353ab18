use std::path::PathBuf;

use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Settings shared by the server and the CLI.
/// Read from an optional `config.toml`, overridden by `IP_LOGGER__SECTION__KEY` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub static_dir: String,
    #[serde(default)]
    pub tls_cert: Option<String>,
    #[serde(default)]
    pub tls_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

impl ServerConfig {
    /// Certificate and key, only when both are configured.
    pub fn tls(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.tls_cert, &self.tls_key) {
            (Some(cert), Some(key)) => Some((PathBuf::from(cert), PathBuf::from(key))),
            _ => None,
        }
    }
}

impl DatabaseConfig {
    /// Relative paths are taken from the project root when there is one.
    pub fn resolved_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.path);
        if path.is_absolute() {
            return path;
        }

        match project_root::get_project_root() {
            Ok(root) => root.join(path),
            Err(_) => path,
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("server.bind", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("server.static_dir", "frontend/dist")?
        .set_default("database.path", "data/ip_logs.db")
}

pub fn load() -> Result<Config, ConfigError> {
    let cfg: Config = defaults()?
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::with_prefix("IP_LOGGER").separator("__"))
        .build()?
        .try_deserialize()?;

    tracing::debug!("Configuration loaded: {cfg:?}");

    Ok(cfg)
}
