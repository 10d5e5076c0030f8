//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::TimerState;

/// CLI argument parsing structure.
///
/// Duration and interval flags carry the same ranges the settings UI
/// exposes; the timer core itself performs no bounds validation.
#[derive(Parser)]
#[command(name = "tomato-timer")]
#[command(about = "A state-managed HTTP server driving a Pomodoro focus timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "25253")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Work session duration in minutes
    #[arg(short, long, default_value = "25", value_parser = clap::value_parser!(u64).range(1..=60))]
    pub work: u64,

    /// Short break duration in minutes
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..=15))]
    pub short_break: u64,

    /// Long break duration in minutes
    #[arg(short, long, default_value = "15", value_parser = clap::value_parser!(u64).range(5..=30))]
    pub long_break: u64,

    /// Number of work sessions before a long break
    #[arg(short = 'i', long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..=8))]
    pub long_break_interval: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the initial timer machine from the configured minutes
    pub fn initial_timer(&self) -> TimerState {
        TimerState::with_durations(
            self.work * 60,
            self.short_break * 60,
            self.long_break * 60,
            self.long_break_interval,
        )
    }
}
