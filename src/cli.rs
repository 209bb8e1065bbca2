use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

/// Verbosity of the diagnostics written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Silent => LevelFilter::OFF,
        }
    }
}

/// Learn file management by escaping from a simulated file system.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Plain sandbox shell, without the tutorial
    #[clap(long)]
    pub free: bool,

    /// Tutorial task to start at (1-based)
    #[clap(long, short, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub task: u8,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub tutorial: bool,
    pub first_task: usize,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            tutorial: !cli.free,
            first_task: usize::from(cli.task) - 1,
        }
    }
}
