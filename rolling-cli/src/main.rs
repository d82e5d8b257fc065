//! Rolling CLI - rolling aggregates over observations read from stdin

mod input;
mod output;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use output::{Format, OutputRecord};
use rolling_core::{EmitPolicy, OperatorKind, RollingAggregate, Timestamp, WindowConfig, WindowSpec};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// When to report a value
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Emit {
    /// After every observation
    Always,
    /// Only once the window is full
    #[value(name = "when_full")]
    WhenFull,
}

impl From<Emit> for EmitPolicy {
    fn from(emit: Emit) -> Self {
        match emit {
            Emit::Always => EmitPolicy::Always,
            Emit::WhenFull => EmitPolicy::WhenFull,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rolling", version, about = "Rolling aggregates over a stream of observations")]
struct Cli {
    /// Aggregation operator: sum, product, min, max or mean
    #[arg(short, long)]
    op: Option<OperatorKind>,

    /// Aggregate over the last N observations
    #[arg(short = 'n', long, conflicts_with = "span")]
    size: Option<usize>,

    /// Aggregate over observations less than SPAN ticks older than the newest;
    /// input lines must then be `time,value`
    #[arg(short, long)]
    span: Option<Timestamp>,

    /// When to report a value
    #[arg(short, long, value_enum)]
    emit: Option<Emit>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// JSON window configuration file, overridden by the flags above
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Load the base configuration: the JSON file when given, defaults otherwise
async fn load_config(path: Option<&Path>) -> anyhow::Result<WindowConfig> {
    match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading config {:?}", path))?;
            WindowConfig::from_json(&json).with_context(|| format!("parsing config {:?}", path))
        }
        None => Ok(WindowConfig::default()),
    }
}

/// Apply command line flags over a base configuration, then validate
fn apply_overrides(mut config: WindowConfig, cli: &Cli) -> anyhow::Result<WindowConfig> {
    if let Some(op) = cli.op {
        config.operator = op;
    }
    if let Some(size) = cli.size {
        config.window = WindowSpec::Count { size };
    }
    if let Some(span) = cli.span {
        config.window = WindowSpec::Duration { span };
    }
    if let Some(emit) = cli.emit {
        config.emit = emit.into();
    }

    config.validate()?;
    Ok(config)
}

async fn resolve_config(cli: &Cli) -> anyhow::Result<WindowConfig> {
    let base = load_config(cli.config.as_deref()).await?;
    apply_overrides(base, cli)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries results
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli).await?;
    info!(
        "Rolling {} over {:?}, emit {:?}",
        config.operator, config.window, config.emit
    );

    let mut aggregate = RollingAggregate::new(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = BufWriter::new(tokio::io::stdout());
    let mut line_no = 0usize;
    let mut observations = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let observation = match input::parse_line(line) {
            Ok(observation) => observation,
            Err(e) => {
                warn!("Skipping line {}: {:#}", line_no, e);
                continue;
            }
        };

        aggregate
            .push(observation.value, observation.time)
            .with_context(|| format!("line {}", line_no))?;
        observations += 1;

        let record = OutputRecord {
            time: observation.time,
            value: aggregate.output()?,
            window_size: aggregate.window_size(),
            full: aggregate.window_full(),
        };
        stdout
            .write_all(output::render(&record, cli.format)?.as_bytes())
            .await?;
    }

    stdout.flush().await?;
    info!("Processed {} observations", observations);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rolling").chain(args.iter().copied())).unwrap()
    }

    fn file_config() -> WindowConfig {
        WindowConfig::from_json(
            r#"{"operator": "sum", "window": {"kind": "count", "size": 5}, "emit": "always"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_file_config_without_flags() {
        let config = apply_overrides(file_config(), &cli(&[])).unwrap();
        assert_eq!(config, file_config());
    }

    #[test]
    fn test_flags_override_file() {
        let config = apply_overrides(file_config(), &cli(&["--op", "max", "--emit", "when_full"]))
            .unwrap();
        assert_eq!(config.operator, OperatorKind::Max);
        assert_eq!(config.window, WindowSpec::Count { size: 5 });
        assert_eq!(config.emit, EmitPolicy::WhenFull);
    }

    #[test]
    fn test_span_replaces_count_window() {
        let config = apply_overrides(file_config(), &cli(&["--span", "1000"])).unwrap();
        assert_eq!(config.window, WindowSpec::Duration { span: 1000 });
        assert_eq!(config.operator, OperatorKind::Sum);
    }

    #[test]
    fn test_overrides_are_validated() {
        assert!(apply_overrides(file_config(), &cli(&["--size", "0"])).is_err());
        assert!(apply_overrides(WindowConfig::default(), &cli(&["--span=-5"])).is_err());
    }

    #[test]
    fn test_emit_flag_matches_config_spelling() {
        assert!(Cli::try_parse_from(["rolling", "--emit", "when_full"]).is_ok());
        assert!(Cli::try_parse_from(["rolling", "--emit", "when-full"]).is_err());
        assert!(Cli::try_parse_from(["rolling", "--size", "3", "--span", "3"]).is_err());
    }

    #[tokio::test]
    async fn test_load_config() {
        assert_eq!(load_config(None).await.unwrap(), WindowConfig::default());
        assert!(load_config(Some(Path::new("/nonexistent/rolling.json")))
            .await
            .is_err());

        let path = std::env::temp_dir().join(format!("rolling-config-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"{"operator": "min", "window": {"kind": "duration", "span": 60}}"#)
            .await
            .unwrap();
        let loaded = load_config(Some(path.as_path())).await;
        tokio::fs::remove_file(&path).await.unwrap();

        let config = apply_overrides(loaded.unwrap(), &cli(&["--size", "4"])).unwrap();
        assert_eq!(config.operator, OperatorKind::Min);
        assert_eq!(config.window, WindowSpec::Count { size: 4 });
        assert_eq!(config.emit, EmitPolicy::WhenFull);
    }
}
