use std::env;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Listener address from `BACKEND_HOST` / `BACKEND_PORT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }
}
