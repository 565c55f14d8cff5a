// Wall clock abstraction.
//
// Every duration in the crate is derived from two millisecond reads of a Clock,
// never from counting ticks. Tests swap in a controllable clock.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Which calendar a timesheet entry's date is taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryDateConvention {
    Utc,
    #[default]
    Local,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown date convention: {0} (expected `utc` or `local`)")]
pub struct UnknownDateConvention(pub String);

impl FromStr for EntryDateConvention {
    type Err = UnknownDateConvention;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            other => Err(UnknownDateConvention(other.to_string())),
        }
    }
}

pub fn calendar_date(millis: i64, convention: EntryDateConvention) -> NaiveDate {
    let instant = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH);
    match convention {
        EntryDateConvention::Utc => instant.date_naive(),
        EntryDateConvention::Local => instant.with_timezone(&Local).date_naive(),
    }
}
