// ⚙️ Receipt Processor - score, name, remember
// The one place where the engine, the id generator and the store meet.
// Handlers hold a clone of this and nothing else.

use crate::ids::{IdGenerator, UuidGenerator};
use crate::receipt::Receipt;
use crate::rules::ScoringEngine;
use crate::store::{ScoreRecord, ScoreStore, StoreError};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct ReceiptProcessor {
    engine: ScoringEngine,
    ids: Arc<dyn IdGenerator>,
    store: ScoreStore,
}

impl Default for ReceiptProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptProcessor {
    /// Processor with random UUID ids and an empty store
    pub fn new() -> Self {
        Self::with_parts(Arc::new(UuidGenerator), ScoreStore::new())
    }

    pub fn with_parts(ids: Arc<dyn IdGenerator>, store: ScoreStore) -> Self {
        ReceiptProcessor {
            engine: ScoringEngine::new(),
            ids,
            store,
        }
    }

    /// Score a receipt and store the result under a new id
    pub fn process(&self, receipt: &Receipt) -> ScoreRecord {
        let points = self.engine.compute(receipt);
        let id = self.ids.next_id();
        self.store.put(id.clone(), points);

        info!(id = %id, retailer = %receipt.retailer, points, "Receipt processed");
        ScoreRecord { id, points }
    }

    /// Points previously stored for `id`
    pub fn points(&self, id: &str) -> Result<u64, StoreError> {
        let result = self.store.get(id);
        if result.is_err() {
            debug!(id, "Lookup for unknown receipt id");
        }
        result
    }

    pub fn receipt_count(&self) -> usize {
        self.store.len()
    }
}
