// rest_api/src/config.rs

use std::env;

use anyhow::{Context, Result};

/// Port the server listens on when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Represents the configuration for the workflow server itself.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Loads the server configuration. The listening port can be overridden
/// through the `PORT` environment variable; everything else is fixed —
/// there is no durable state and no config file to point at.
pub fn load_server_config() -> Result<ServerConfig> {
    let port = match env::var("PORT") {
        Ok(raw) => raw
            .parse::<u16>()
            .with_context(|| format!("Invalid PORT value: {}", raw))?,
        Err(_) => DEFAULT_PORT,
    };

    Ok(ServerConfig {
        port,
        host: "0.0.0.0".to_string(),
    })
}
