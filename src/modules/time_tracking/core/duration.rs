// Elapsed-time arithmetic and `HH:MM:SS` formatting.

const MILLIS_PER_SECOND: i64 = 1_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DurationFormatError {
    #[error("expected HH:MM:SS, got `{0}`")]
    Malformed(String),

    #[error("{field} out of range in `{input}`")]
    OutOfRange { field: &'static str, input: String },
}

/// Whole seconds between two millisecond instants. A `to` before `from`
/// yields zero.
pub fn whole_seconds_between(from_ms: i64, to_ms: i64) -> u64 {
    let delta = to_ms.saturating_sub(from_ms).max(0);
    (delta / MILLIS_PER_SECOND) as u64
}

pub fn format_time(elapsed_seconds: u64) -> String {
    let hours = elapsed_seconds / 3_600;
    let minutes = (elapsed_seconds % 3_600) / 60;
    let seconds = elapsed_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn parse_time(input: &str) -> Result<u64, DurationFormatError> {
    let malformed = || DurationFormatError::Malformed(input.to_string());
    let mut parts = input.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let hours: u64 = hours.parse().map_err(|_| malformed())?;
    let minutes: u64 = minutes.parse().map_err(|_| malformed())?;
    let seconds: u64 = seconds.parse().map_err(|_| malformed())?;

    if minutes >= 60 {
        return Err(DurationFormatError::OutOfRange {
            field: "minutes",
            input: input.to_string(),
        });
    }
    if seconds >= 60 {
        return Err(DurationFormatError::OutOfRange {
            field: "seconds",
            input: input.to_string(),
        });
    }
    hours
        .checked_mul(3_600)
        .and_then(|total| total.checked_add(minutes * 60 + seconds))
        .ok_or_else(|| DurationFormatError::OutOfRange {
            field: "hours",
            input: input.to_string(),
        })
}
