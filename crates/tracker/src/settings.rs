use crate::refresh::DEFAULT_MAX_REFRESH_WORKERS;
use crate::stores::json_file_favorites_store::FAVORITES_FILE_NAME;
use crate::stores::json_file_order_store::ORDERS_FILE_NAME;
use anyhow::{bail, Context, Result};
use status_apis::photoprintit_status_api::{DEFAULT_API_CONFIG, DEFAULT_API_URL};
use status_apis::ApiSettings;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ORDERS_FILE_ENV: &str = "ORDERS_FILE";
pub const FAVORITES_FILE_ENV: &str = "FAVORITES_FILE";
pub const STATUS_API_URL_ENV: &str = "STATUS_API_URL";
pub const STATUS_API_CONFIG_ENV: &str = "STATUS_API_CONFIG";
pub const REQUEST_TIMEOUT_SECS_ENV: &str = "REQUEST_TIMEOUT_SECS";
pub const REFRESH_INTERVAL_SECS_ENV: &str = "REFRESH_INTERVAL_SECS";
pub const MAX_REFRESH_WORKERS_ENV: &str = "MAX_REFRESH_WORKERS";

pub const APP_DIR_NAME: &str = "fotoparadies";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
/// The status page is polled every five minutes by default.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    pub orders_file: PathBuf,
    pub favorites_file: PathBuf,
    pub api: ApiSettings,
    pub request_timeout: Duration,
    /// `None` disables the periodic refresh.
    pub refresh_interval: Option<Duration>,
    pub max_refresh_workers: usize,
}

/// Directory for the tracker's files inside the user's data directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn parse_var<T>(name: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(value) => value
            .trim()
            .parse()
            .context(format!("invalid value of {}: {:?}", name, value)),
        None => Ok(default),
    }
}

impl TrackerSettings {
    /// Reads the settings from the environment and an optional `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| dotenv::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = default_data_dir();

        let orders_file = lookup(ORDERS_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(ORDERS_FILE_NAME));
        let favorites_file = lookup(FAVORITES_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(FAVORITES_FILE_NAME));

        let api = ApiSettings {
            url: lookup(STATUS_API_URL_ENV).unwrap_or_else(|| String::from(DEFAULT_API_URL)),
            config_id: lookup(STATUS_API_CONFIG_ENV)
                .unwrap_or_else(|| String::from(DEFAULT_API_CONFIG)),
        };

        let request_timeout_secs: u64 = parse_var(
            REQUEST_TIMEOUT_SECS_ENV,
            lookup(REQUEST_TIMEOUT_SECS_ENV),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        if request_timeout_secs == 0 || request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            bail!(
                "{} must be between 1 and {}, got {}",
                REQUEST_TIMEOUT_SECS_ENV,
                MAX_REQUEST_TIMEOUT_SECS,
                request_timeout_secs
            );
        }

        let refresh_interval_secs: u64 = parse_var(
            REFRESH_INTERVAL_SECS_ENV,
            lookup(REFRESH_INTERVAL_SECS_ENV),
            DEFAULT_REFRESH_INTERVAL_SECS,
        )?;

        let max_refresh_workers: usize = parse_var(
            MAX_REFRESH_WORKERS_ENV,
            lookup(MAX_REFRESH_WORKERS_ENV),
            DEFAULT_MAX_REFRESH_WORKERS,
        )?;
        if max_refresh_workers == 0 {
            bail!("{} must be at least 1", MAX_REFRESH_WORKERS_ENV);
        }

        Ok(Self {
            orders_file,
            favorites_file,
            api,
            request_timeout: Duration::from_secs(request_timeout_secs),
            refresh_interval: match refresh_interval_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            max_refresh_workers,
        })
    }
}
