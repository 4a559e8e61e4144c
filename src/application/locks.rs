//! Per-assessment mutual exclusion.
//!
//! Two concurrent turns on the same conversation could both read the same
//! pre-append transcript and interleave their writes, corrupting the strict
//! user/system alternation. The registry hands out one async mutex per
//! assessment id; turn-processing operations hold it for their full
//! read-modify-write sequence. Entries are never evicted; the map is
//! bounded by the number of distinct assessments this process has touched.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::AssessmentId;

/// Registry of per-assessment locks.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<AssessmentId, Arc<Mutex<()>>>>,
}

impl LockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for an assessment, waiting if another operation on
    /// the same assessment holds it. Operations on different assessments do
    /// not contend.
    pub async fn acquire(&self, id: AssessmentId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
