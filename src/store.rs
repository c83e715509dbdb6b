// 🗄️ Score Store - id → points
// In-memory, process-lifetime map. Cloning the store clones the handle, not
// the data: every clone sees the same records.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No receipt found for id {0}")]
    NotFound(String),
}

/// A scored receipt as it lives in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub id: String,
    pub points: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    records: Arc<RwLock<HashMap<String, u64>>>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the points for `id`, replacing any previous value
    pub fn put(&self, id: impl Into<String>, points: u64) {
        // A poisoned lock still guards a consistent map: writers only ever
        // perform a single insert.
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(id.into(), points);
    }

    pub fn get(&self, id: &str) -> Result<u64, StoreError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records
            .get(id)
            .copied()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn record(&self, id: &str) -> Result<ScoreRecord, StoreError> {
        self.get(id).map(|points| ScoreRecord {
            id: id.to_string(),
            points,
        })
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
