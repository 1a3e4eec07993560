use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

pub const DEFAULT_TICK_MS: u64 = 800;
pub const DEFAULT_LOG_FILE: &str = "blockfall.log";

#[derive(Debug, Clone, Parser)]
#[command(name = "blockfall", about = "Falling-block puzzle in the terminal")]
pub struct Config {
    #[arg(long, default_value_t = DEFAULT_TICK_MS, help = "Milliseconds between gravity steps")]
    pub tick_ms: u64,

    #[arg(long, help = "Seed for a reproducible piece sequence")]
    pub seed: Option<u64>,

    #[arg(long, default_value = DEFAULT_LOG_FILE, help = "File the log is written to")]
    pub log_file: PathBuf,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    pub verbose: u8,
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
