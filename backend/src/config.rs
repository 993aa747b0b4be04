use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub admin_api_token: Option<String>,
    pub frontend_dist: Option<PathBuf>, // built site to serve, if any
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = optional_var("DATABASE_URL").unwrap_or_else(|| "database.db".to_string());
        let bind_addr = optional_var("BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3001".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 127.0.0.1:3001")?;

        Ok(Self {
            database_url,
            bind_addr,
            admin_api_token: optional_var("ADMIN_API_TOKEN"),
            frontend_dist: optional_var("FRONTEND_DIST").map(PathBuf::from),
        })
    }
}
