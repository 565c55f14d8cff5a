use crate::modules::time_tracking::adapters::outbound::timesheet_store_rest::DEFAULT_REQUEST_TIMEOUT;
use crate::shared::core::clock::EntryDateConvention;
use crate::shared::infrastructure::tick_scheduler::DEFAULT_TICK_INTERVAL;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub tick_interval: Duration,
    pub date_convention: EntryDateConvention,
    /// Remote timesheet API; the in memory store is used when absent.
    pub timesheet_api_url: Option<String>,
    pub timesheet_api_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080),
            tick_interval: DEFAULT_TICK_INTERVAL,
            date_convention: EntryDateConvention::default(),
            timesheet_api_url: None,
            timesheet_api_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn positive_millis(key: &'static str, value: String) -> Result<Duration, ConfigError> {
    match parse::<u64>(key, value.clone())? {
        0 => Err(ConfigError::Invalid { key, value }),
        ms => Ok(Duration::from_millis(ms)),
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(v) => parse::<IpAddr>("HOST", v)?,
            None => defaults.addr.ip(),
        };
        let port = match lookup("PORT") {
            Some(v) => parse::<u16>("PORT", v)?,
            None => defaults.addr.port(),
        };
        let tick_interval = match lookup("TIMER_TICK_INTERVAL_MS") {
            Some(v) => positive_millis("TIMER_TICK_INTERVAL_MS", v)?,
            None => defaults.tick_interval,
        };
        let date_convention = match lookup("TIMESHEET_DATE_CONVENTION") {
            Some(v) => parse::<EntryDateConvention>("TIMESHEET_DATE_CONVENTION", v)?,
            None => defaults.date_convention,
        };
        let timesheet_api_url = lookup("TIMESHEET_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let timesheet_api_timeout = match lookup("TIMESHEET_API_TIMEOUT_MS") {
            Some(v) => positive_millis("TIMESHEET_API_TIMEOUT_MS", v)?,
            None => defaults.timesheet_api_timeout,
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            tick_interval,
            date_convention,
            timesheet_api_url,
            timesheet_api_timeout,
        })
    }
}
