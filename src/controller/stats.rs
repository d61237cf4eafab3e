use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::process::Command;
use tokio::sync::RwLock;
use tokio::time::{sleep, timeout};

use crate::error::AppError;
use crate::model::table::StatsTable;

const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Producer of a fresh stats table. Slow (external process) and fallible.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self) -> Result<StatsTable, AppError>;
}

/// Runs the external stats-fetching script and reads the CSV it writes.
/// Retries timeouts and process failures with a doubling backoff; parse and
/// schema problems are returned immediately.
#[derive(Debug, Clone)]
pub struct ScriptStatsSource {
    command: Vec<String>,
    table_path: PathBuf,
    timeout: Duration,
    retries: u32,
}

impl ScriptStatsSource {
    #[must_use]
    pub fn new(command: Vec<String>, table_path: PathBuf, timeout: Duration, retries: u32) -> Self {
        Self {
            command,
            table_path,
            timeout,
            retries,
        }
    }

    async fn run_script_once(&self) -> Result<StatsTable, AppError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| AppError::FetchFailure("no fetch command configured".to_string()))?;
        log::info!("running stats fetch: {}", self.command.join(" "));
        let status = timeout(
            self.timeout,
            // kill_on_drop so a timed-out script does not outlive the request
            Command::new(program)
                .args(args)
                .kill_on_drop(true)
                .status(),
        )
        .await
        .map_err(|_| AppError::FetchTimeout(self.timeout))?
        .map_err(|err| AppError::FetchFailure(format!("could not run {program}: {err}")))?;
        if !status.success() {
            return Err(AppError::FetchFailure(format!(
                "{program} exited with {status}"
            )));
        }
        if !self.table_path.exists() {
            return Err(AppError::FetchFailure(format!(
                "fetch produced no stats table at {}",
                self.table_path.display()
            )));
        }
        StatsTable::from_csv_path(&self.table_path)
    }
}

#[async_trait]
impl StatsSource for ScriptStatsSource {
    async fn fetch(&self) -> Result<StatsTable, AppError> {
        let mut last_error = AppError::FetchFailure("stats fetch never ran".to_string());
        for attempt in 0..=self.retries {
            if attempt > 0 {
                let backoff = RETRY_BACKOFF * 2u32.pow(attempt - 1);
                log::warn!("stats fetch failed ({last_error}), retrying in {backoff:?}");
                sleep(backoff).await;
            }
            match self.run_script_once().await {
                Ok(table) => return Ok(table),
                Err(err @ (AppError::FetchFailure(_) | AppError::FetchTimeout(_))) => {
                    last_error = err;
                }
                // A malformed table will not fix itself on retry.
                Err(err) => return Err(err),
            }
        }
        Err(last_error)
    }
}

#[derive(Debug, Clone)]
struct CachedTable {
    table: Arc<StatsTable>,
    refreshed_at: DateTime<Utc>,
}

/// In-memory snapshot of the stats table, loaded from the CSV cache file or
/// a fresh fetch. The write lock spans refreshes so a concurrent render
/// never observes a torn table.
#[derive(Debug, Default)]
pub struct StatsCache {
    inner: RwLock<Option<CachedTable>>,
}

impl StatsCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// The cached snapshot, else the CSV cache file, else a fresh fetch.
    ///
    /// # Errors
    /// Returns whatever the CSV parse or the fetch returns.
    pub async fn get_or_load(
        &self,
        source: &dyn StatsSource,
        table_path: &Path,
    ) -> Result<Arc<StatsTable>, AppError> {
        if let Some(cached) = self.inner.read().await.as_ref() {
            return Ok(Arc::clone(&cached.table));
        }
        let mut guard = self.inner.write().await;
        // Another request may have loaded the table while we waited.
        if let Some(cached) = guard.as_ref() {
            return Ok(Arc::clone(&cached.table));
        }
        let table = if table_path.exists() {
            Arc::new(StatsTable::from_csv_path(table_path)?)
        } else {
            Arc::new(source.fetch().await?)
        };
        *guard = Some(CachedTable {
            table: Arc::clone(&table),
            refreshed_at: Utc::now(),
        });
        Ok(table)
    }

    /// Re-fetch and replace the snapshot.
    ///
    /// # Errors
    /// Returns the fetch error; the previous snapshot is kept in that case.
    pub async fn refresh(&self, source: &dyn StatsSource) -> Result<Arc<StatsTable>, AppError> {
        let mut guard = self.inner.write().await;
        let table = Arc::new(source.fetch().await?);
        *guard = Some(CachedTable {
            table: Arc::clone(&table),
            refreshed_at: Utc::now(),
        });
        Ok(table)
    }

    pub async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.as_ref().map(|cached| cached.refreshed_at)
    }
}
