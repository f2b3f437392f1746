use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::kernel::service::ServiceHandle;
use crate::storage::error::StorageSystemError;
use crate::storage::OfflineSyncConfig;
use crate::utils::fs::list_files_with_extension;

const QUEUE_EXTENSION: &str = "json";

/// `tokio::time::interval` rejects a zero period.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Keeps changes made without connectivity in an on-disk queue and checks
/// it on a fixed interval while running.
#[derive(Debug)]
pub struct OfflineSyncService {
    queue_dir: PathBuf,
    interval: Duration,
    worker: Mutex<Option<JoinHandle<()>>>,
    ticks: Arc<AtomicU64>,
    sequence: AtomicU64,
}

impl OfflineSyncService {
    pub fn new(config: &OfflineSyncConfig) -> Self {
        Self {
            queue_dir: config.queue_dir.clone(),
            interval: Duration::from_secs(config.interval_secs.max(1)),
            worker: Mutex::new(None),
            ticks: Arc::new(AtomicU64::new(0)),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_INTERVAL);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn queue_dir(&self) -> &Path {
        &self.queue_dir
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Number of sync ticks the worker has run.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Store a change for later upload. Returns the queued file.
    pub async fn enqueue(&self, kind: &str, payload: &serde_json::Value) -> Result<PathBuf> {
        let millis = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let path = self.queue_dir.join(format!("{:020}-{:06}-{}.{}", millis, seq, kind, QUEUE_EXTENSION));

        let json = serde_json::to_vec(payload).map_err(|e| StorageSystemError::serialization("json", e))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| Error::io(e, "enqueue_change", path.clone()))?;
        Ok(path)
    }

    pub async fn pending_items(&self) -> Result<usize> {
        let files = list_files_with_extension(&self.queue_dir, QUEUE_EXTENSION)
            .await
            .map_err(|e| Error::io(e, "list_queue", self.queue_dir.clone()))?;
        Ok(files.len())
    }
}

#[async_trait]
impl ServiceHandle for OfflineSyncService {
    fn name(&self) -> &str {
        constants::OFFLINE_SYNC_SERVICE
    }

    async fn initialize(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.queue_dir)
            .await
            .map_err(|e| Error::io(e, "create_dir_all", self.queue_dir.clone()))?;

        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if worker.as_ref().is_some_and(|task| !task.is_finished()) {
            log::debug!("Offline sync worker already running");
            return Ok(());
        }

        let queue_dir = self.queue_dir.clone();
        let period = self.interval;
        let ticks = Arc::clone(&self.ticks);
        *worker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                ticks.fetch_add(1, Ordering::SeqCst);
                match list_files_with_extension(&queue_dir, QUEUE_EXTENSION).await {
                    Ok(files) if !files.is_empty() => {
                        log::debug!("{} change(s) waiting for connectivity", files.len())
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("Failed to inspect sync queue {}: {}", queue_dir.display(), e),
                }
            }
        }));
        log::info!(
            "Offline sync started (queue: {}, every {:?})",
            self.queue_dir.display(),
            self.interval
        );
        Ok(())
    }

    async fn cleanup(&self) -> Result<()> {
        let task = self.worker.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(task) = task {
            task.abort();
            log::info!("Offline sync stopped");
        }
        Ok(())
    }
}
