use std::{
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    Port(String),
    #[error("JOURNAL_BIND must be an IP address, got {0:?}")]
    Bind(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub template_dir: PathBuf,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dir = |key: &str, default: &str| PathBuf::from(lookup(key).unwrap_or_else(|| default.to_string()));

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Port(value))?,
            None => DEFAULT_PORT,
        };
        let host: IpAddr = match lookup("JOURNAL_BIND") {
            Some(value) => value.parse().map_err(|_| ConfigError::Bind(value))?,
            None => IpAddr::from([127, 0, 0, 1]),
        };

        Ok(Self {
            data_dir: dir("JOURNAL_DATA_DIR", "records"),
            static_dir: dir("JOURNAL_STATIC_DIR", "static"),
            template_dir: dir("JOURNAL_TEMPLATE_DIR", "templates"),
            addr: SocketAddr::new(host, port),
        })
    }
}
