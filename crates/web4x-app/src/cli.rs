use std::path::PathBuf;

use clap::Parser;

/// Web4x: a tabbed browser whose pages can reach native capabilities.
#[derive(Parser, Debug)]
#[command(name = "web4x", version, about)]
pub struct Args {
    /// URLs to open after the restored session.
    pub urls: Vec<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error or an EnvFilter directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Start without reopening the tabs of the last session.
    #[arg(long)]
    pub no_restore: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
