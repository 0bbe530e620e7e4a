//! Human-readable durations, paces, and clock times.

use time::Time;
use time::macros::format_description;

use crate::errors::PlanError;

/// `HH:MM:SS`, rounded to the nearest second. Negative input reads as zero.
pub fn format_duration(minutes: f64) -> String {
    let total = (minutes.max(0.0) * 60.0).round() as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// `M:SS` per km. Seconds that round up to 60 carry into the minute.
pub fn format_pace(min_per_km: f64) -> String {
    let pace = min_per_km.max(0.0);
    let mut minutes = pace.trunc() as u64;
    let mut seconds = ((pace - pace.trunc()) * 60.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{minutes}:{seconds:02}")
}

/// Parses `HH:MM` or `HH:MM:SS` into minutes. Hours may exceed 24.
pub fn parse_duration(input: &str) -> Result<f64, PlanError> {
    let invalid = || PlanError::configuration(format!("invalid duration '{input}'"));
    let parts = input
        .trim()
        .split(':')
        .map(|p| p.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m] => (*h, *m, 0),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }
    Ok(f64::from(hours) * 60.0 + f64::from(minutes) + f64::from(seconds) / 60.0)
}

/// Parses a `HH:MM` start-of-day time.
pub fn parse_clock(input: &str) -> Result<Time, PlanError> {
    Time::parse(input.trim(), format_description!("[hour]:[minute]"))
        .map_err(|e| PlanError::configuration(format!("invalid clock time '{input}': {e}")))
}
