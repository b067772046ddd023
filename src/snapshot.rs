//! In-memory dataset snapshots
//!
//! `DatasetStore` keeps the most recently loaded dataset behind an `Arc` so
//! concurrent queries share it read-only. Whether a request triggers a reload
//! is decided by the store's `RefreshPolicy`. Reloads run on the blocking
//! pool and are serialized by the write lock; a failed reload leaves the
//! previous snapshot in place and reports the error to the caller.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::util::modified_time;
use crate::error::{DirectoryError, Result};
use crate::loader::load_patients;
use crate::models::PatientRecord;
use crate::utils::log_dataset_reload;

/// When a snapshot is considered stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Load once, never reload
    #[default]
    Once,
    /// Reload when the snapshot is older than the interval
    Interval(Duration),
    /// Reload when the file's modification time changes
    OnChange,
    /// Reload on every request
    Always,
}

impl FromStr for RefreshPolicy {
    type Err = DirectoryError;

    /// Accepts `once`, `always`, `on-change` and `interval:<seconds>`
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "once" => Ok(Self::Once),
            "always" => Ok(Self::Always),
            "on-change" | "on_change" => Ok(Self::OnChange),
            other => other
                .strip_prefix("interval:")
                .and_then(|secs| secs.parse::<u64>().ok())
                .filter(|&secs| secs > 0)
                .map(|secs| Self::Interval(Duration::from_secs(secs)))
                .ok_or_else(|| {
                    DirectoryError::Config(format!(
                        "invalid refresh policy '{s}', expected once, always, on-change or interval:<seconds>"
                    ))
                }),
        }
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Once => f.write_str("once"),
            Self::Interval(d) => write!(f, "interval:{}", d.as_secs()),
            Self::OnChange => f.write_str("on-change"),
            Self::Always => f.write_str("always"),
        }
    }
}

/// One loaded copy of the dataset
#[derive(Debug)]
pub struct Snapshot {
    records: Vec<PatientRecord>,
    loaded_at: DateTime<Utc>,
    loaded_instant: Instant,
    source_modified: Option<SystemTime>,
}

impl Snapshot {
    /// Wrap records loaded from a file with the given modification time
    #[must_use]
    pub fn new(records: Vec<PatientRecord>, source_modified: Option<SystemTime>) -> Self {
        Self {
            records,
            loaded_at: Utc::now(),
            loaded_instant: Instant::now(),
            source_modified,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Wall-clock time of the load
    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Modification time of the file this snapshot was read from
    #[must_use]
    pub const fn source_modified(&self) -> Option<SystemTime> {
        self.source_modified
    }
}

/// Owner of the current snapshot and its refresh policy
#[derive(Debug)]
pub struct DatasetStore {
    path: PathBuf,
    policy: RefreshPolicy,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl DatasetStore {
    /// Create a store that loads on first use
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, policy: RefreshPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            current: RwLock::new(None),
        }
    }

    /// Create a store and load the dataset immediately
    pub async fn open(path: impl Into<PathBuf>, policy: RefreshPolicy) -> Result<Self> {
        let store = Self::new(path, policy);
        store.reload().await?;
        Ok(store)
    }

    /// Create a store over records already in memory; it never reloads
    #[must_use]
    pub fn from_records(records: Vec<PatientRecord>) -> Self {
        Self {
            path: PathBuf::new(),
            policy: RefreshPolicy::Once,
            current: RwLock::new(Some(Arc::new(Snapshot::new(records, None)))),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// The snapshot to serve a request from, reloading first if it is stale
    pub async fn current(&self) -> Result<Arc<Snapshot>> {
        if let Some(snapshot) = self.peek().await {
            if !self.is_stale(&snapshot).await {
                return Ok(snapshot);
            }
        }

        let mut guard = self.current.write().await;
        // Another request may have reloaded while this one waited for the lock
        if let Some(snapshot) = guard.as_ref() {
            if !self.is_stale(snapshot).await {
                return Ok(Arc::clone(snapshot));
            }
            log_dataset_reload(&self.path, &self.policy.to_string());
        }

        let snapshot = Arc::new(load_snapshot(&self.path).await?);
        *guard = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Force a reload regardless of policy
    pub async fn reload(&self) -> Result<Arc<Snapshot>> {
        let mut guard = self.current.write().await;
        let snapshot = Arc::new(load_snapshot(&self.path).await?);
        *guard = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// The current snapshot without refreshing, if one was ever loaded
    pub async fn peek(&self) -> Option<Arc<Snapshot>> {
        self.current.read().await.clone()
    }

    /// Whether `snapshot` must be replaced under this store's policy
    async fn is_stale(&self, snapshot: &Snapshot) -> bool {
        match self.policy {
            RefreshPolicy::Once => false,
            RefreshPolicy::Always => true,
            RefreshPolicy::Interval(max_age) => snapshot.loaded_instant.elapsed() >= max_age,
            RefreshPolicy::OnChange => {
                // A failed stat reads as "no timestamp", which differs from a loaded file
                stat_modified(&self.path).await != snapshot.source_modified
            }
        }
    }
}

/// Read a file's modification time on the blocking pool
async fn stat_modified(path: &Path) -> Option<SystemTime> {
    let owned = path.to_path_buf();
    tokio::task::spawn_blocking(move || modified_time(&owned))
        .await
        .unwrap_or(None)
}

/// Load a snapshot on the blocking pool
async fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let owned = path.to_path_buf();
    let (records, modified) = tokio::task::spawn_blocking(move || {
        // Stat before reading so a concurrent write is seen as a change next time
        let modified = modified_time(&owned);
        load_patients(&owned).map(|records| (records, modified))
    })
    .await
    .map_err(|e| DirectoryError::io(path, std::io::Error::other(e)))??;

    Ok(Snapshot::new(records, modified))
}
