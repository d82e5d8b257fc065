//! Observation parsing
//!
//! Each input line is either `value` or `time,value`. Fields may also be
//! separated by whitespace. Times are integer ticks or RFC 3339 timestamps,
//! the latter converted to epoch milliseconds.

use anyhow::{bail, Context};
use chrono::DateTime;
use rolling_core::Timestamp;

/// A single parsed input line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub time: Option<Timestamp>,
    pub value: f64,
}

/// Parse one non-empty input line
pub fn parse_line(line: &str) -> anyhow::Result<Observation> {
    let mut fields = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty());

    match (fields.next(), fields.next(), fields.next()) {
        (Some(value), None, None) => Ok(Observation {
            time: None,
            value: parse_value(value)?,
        }),
        (Some(time), Some(value), None) => Ok(Observation {
            time: Some(parse_time(time)?),
            value: parse_value(value)?,
        }),
        _ => bail!("expected `value` or `time,value`, got {:?}", line),
    }
}

fn parse_value(field: &str) -> anyhow::Result<f64> {
    field
        .parse::<f64>()
        .with_context(|| format!("invalid value: {}", field))
}

fn parse_time(field: &str) -> anyhow::Result<Timestamp> {
    if let Ok(ticks) = field.parse::<Timestamp>() {
        return Ok(ticks);
    }

    let time = DateTime::parse_from_rfc3339(field)
        .with_context(|| format!("invalid time: {}", field))?;
    Ok(time.timestamp_millis())
}
