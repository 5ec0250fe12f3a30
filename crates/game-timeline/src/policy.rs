use chrono::{Datelike, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the snapshot fetcher does when one timecode cannot be fetched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingSnapshotPolicy {
    /// Abort the whole run on the first failed snapshot.
    #[default]
    FailFast,
    /// Keep going and record an empty event for the missing timecode.
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelinePolicyView {
    /// Upper bound on concurrent snapshot requests. `None` sizes the pool to
    /// the available parallelism of the host.
    pub max_in_flight: Option<usize>,
    pub missing_snapshots: MissingSnapshotPolicy,
    /// Season used when the caller does not name one. `None` means the
    /// current calendar year.
    pub default_season: Option<String>,
    pub max_line_bytes: usize,
}

impl Default for TimelinePolicyView {
    fn default() -> Self {
        Self {
            max_in_flight: None,
            missing_snapshots: MissingSnapshotPolicy::FailFast,
            default_season: None,
            max_line_bytes: 64 * 1024,
        }
    }
}

impl TimelinePolicyView {
    pub fn resolved_max_in_flight(&self) -> usize {
        self.max_in_flight
            .filter(|limit| *limit > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            })
    }

    pub fn resolve_season(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.default_season.clone())
            .unwrap_or_else(|| Utc::now().year().to_string())
    }
}

/// Shared, hot-swappable policy. Each service owns its own handle.
#[derive(Clone, Default)]
pub struct TimelinePolicyHandle {
    inner: Arc<RwLock<TimelinePolicyView>>,
}

impl TimelinePolicyHandle {
    pub fn new_with(view: TimelinePolicyView) -> Self {
        Self {
            inner: Arc::new(RwLock::new(view)),
        }
    }

    pub fn snapshot(&self) -> TimelinePolicyView {
        self.inner.read().clone()
    }

    pub fn update(&self, view: TimelinePolicyView) {
        *self.inner.write() = view;
    }
}
