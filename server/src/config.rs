// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Used when `JWT_SECRET` is unset. Fine for local runs, never for a deployment.
pub const DEV_JWT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub jwt_secret: String,
  pub token_ttl_hours: i64,
  /// Directory holding the single-page front-end.
  pub static_dir: PathBuf,
  /// Load demo accounts and products on start-up.
  pub seed_data: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 3000,
      jwt_secret: DEV_JWT_SECRET.to_string(),
      token_ttl_hours: 24,
      static_dir: PathBuf::from("public"),
      seed_data: true,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let config = Self::from_lookup(|key| env::var(key).ok())?;
    tracing::info!("Application configuration loaded successfully.");
    Ok(config)
  }

  /// Builds the config from any key lookup, falling back to the defaults for
  /// absent keys.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let defaults = Self::default();

    let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = match lookup("SERVER_PORT") {
      Some(raw) => raw
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?,
      None => defaults.server_port,
    };

    let jwt_secret = match lookup("JWT_SECRET") {
      Some(secret) if !secret.is_empty() => secret,
      _ => {
        tracing::warn!("JWT_SECRET is not set; using the development secret.");
        defaults.jwt_secret
      }
    };

    let token_ttl_hours = match lookup("TOKEN_TTL_HOURS") {
      Some(raw) => match raw.parse::<i64>() {
        Ok(hours) if hours > 0 => hours,
        Ok(hours) => return Err(AppError::Config(format!("TOKEN_TTL_HOURS must be positive, got {}", hours))),
        Err(e) => return Err(AppError::Config(format!("Invalid TOKEN_TTL_HOURS: {}", e))),
      },
      None => defaults.token_ttl_hours,
    };

    let static_dir = lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir);

    let seed_data = match lookup("SEED_DATA") {
      Some(raw) => raw
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid SEED_DATA value: {}", e)))?,
      None => defaults.seed_data,
    };

    Ok(Self {
      server_host,
      server_port,
      jwt_secret,
      token_ttl_hours,
      static_dir,
      seed_data,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
