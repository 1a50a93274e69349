use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_PORT: u16 = 5876;
const DEFAULT_DB_PATH: &str = "todotracker.db";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match env::var("TODOTRACKER_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid TODOTRACKER_PORT {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };
        let db_path = env::var_os("TODOTRACKER_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        Ok(Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            db_path,
        })
    }
}
