//! Output rendering

use clap::ValueEnum;
use rolling_core::Timestamp;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Tab separated `time value`, `-` while no value is reported
    Text,
    /// One JSON object per line
    Json,
}

/// Result reported for one observation
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    pub value: Option<f64>,
    pub window_size: usize,
    pub full: bool,
}

/// Render a record as a single newline-terminated line
pub fn render(record: &OutputRecord, format: Format) -> anyhow::Result<String> {
    let value = match record.value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    };

    let line = match format {
        Format::Text => match record.time {
            Some(time) => format!("{}\t{}\n", time, value),
            None => format!("{}\n", value),
        },
        Format::Json => {
            let mut json = serde_json::to_string(record)?;
            json.push('\n');
            json
        }
    };
    Ok(line)
}
