use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::endpoint::{EndpointList, EndpointListError};
use crate::fetcher::ATTEMPT_TIMEOUT;
use crate::watcher::POLL_INTERVAL;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read the configuration file `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse the configuration file `{path}`: {source}")]
    ParseFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid endpoints: {0}")]
    Endpoints(#[from] EndpointListError),

    #[error("the poll interval must be at least one second")]
    ZeroPollInterval,
}

#[derive(Parser, Debug, Default)]
#[command(name = "gas-watch", about = "Reports the current Ethereum gas price")]
pub struct CliConfig {
    /// Path to a JSON configuration file
    #[arg(long, env = "GAS_WATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint, in order of preference (repeatable)
    #[arg(long = "endpoint", env = "GAS_WATCH_ENDPOINTS", value_delimiter = ',')]
    pub endpoints: Vec<String>,

    /// Max time (secs) spent on a single endpoint, 0 disables the limit
    #[arg(long, env = "GAS_WATCH_ATTEMPT_TIMEOUT")]
    pub attempt_timeout: Option<u64>,

    /// Delay (secs) between readings, at least 1
    #[arg(long, env = "GAS_WATCH_POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Fetch a single reading and exit
    #[arg(long)]
    pub once: bool,
}

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub endpoints: Option<Vec<String>>,
    pub attempt_timeout: Option<u64>,
    pub poll_interval: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub endpoints: EndpointList,
    pub attempt_timeout: Option<Duration>,
    pub poll_interval: Duration,
    pub once: bool,
}

impl Config {
    pub fn initialize() -> Result<Self, ConfigError> {
        let cli_config = CliConfig::parse();
        let file_config = load_config_file(cli_config.config.as_deref())?;
        Config::merge(cli_config, file_config)
    }

    /// Command line and environment take precedence over the file, which
    /// takes precedence over the defaults.
    pub fn merge(cli_config: CliConfig, file_config: FileConfig) -> Result<Self, ConfigError> {
        let endpoints = if !cli_config.endpoints.is_empty() {
            EndpointList::new(&cli_config.endpoints)?
        } else if let Some(endpoints) = file_config.endpoints {
            EndpointList::new(&endpoints)?
        } else {
            EndpointList::default()
        };

        let attempt_timeout = match cli_config
            .attempt_timeout
            .or(file_config.attempt_timeout)
        {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(ATTEMPT_TIMEOUT),
        };

        let poll_interval = match cli_config.poll_interval.or(file_config.poll_interval) {
            Some(0) => return Err(ConfigError::ZeroPollInterval),
            Some(secs) => Duration::from_secs(secs),
            None => POLL_INTERVAL,
        };

        Ok(Config {
            endpoints,
            attempt_timeout,
            poll_interval,
            once: cli_config.once,
        })
    }
}

pub fn load_config_file(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match path {
        Some(path) => path,
        None => return Ok(FileConfig::default()),
    };

    let s = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&s).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}
