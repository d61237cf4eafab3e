use std::path::PathBuf;
use std::time::Duration;

use crate::args::Args;
use crate::controller::logos::DirLogoStore;
use crate::controller::stats::{ScriptStatsSource, StatsCache};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub table_path: PathBuf,
    pub logos_dir: PathBuf,
    pub fetch_command: Vec<String>,
    pub fetch_timeout: Duration,
    pub fetch_retries: u32,
}

impl AppConfig {
    #[must_use]
    pub fn from_args(args: &Args) -> Self {
        Self {
            table_path: args.stats_file.clone(),
            logos_dir: args.logos_dir.clone(),
            fetch_command: args
                .fetch_command
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            fetch_timeout: Duration::from_secs(args.fetch_timeout_secs),
            fetch_retries: args.fetch_retries,
        }
    }
}

/// Everything a request handler needs, built once at startup and passed
/// explicitly; there is no process-wide mutable state.
pub struct AppContext {
    pub config: AppConfig,
    pub source: ScriptStatsSource,
    pub logos: DirLogoStore,
    pub cache: StatsCache,
}

impl AppContext {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let source = ScriptStatsSource::new(
            config.fetch_command.clone(),
            config.table_path.clone(),
            config.fetch_timeout,
            config.fetch_retries,
        );
        let logos = DirLogoStore::new(config.logos_dir.clone());
        Self {
            config,
            source,
            logos,
            cache: StatsCache::new(),
        }
    }
}
