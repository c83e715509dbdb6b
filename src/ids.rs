// 🔑 Receipt identifiers
// Opaque keys handed back to callers. Nothing depends on their order.

use std::sync::atomic::{AtomicU64, Ordering};

pub trait IdGenerator: Send + Sync {
    /// A fresh identifier, never returned before by this generator
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs, e.g. `7fb1377b-b223-49d9-a31a-5a02701dd310`
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Predictable `<prefix>-<n>` ids for tests and local tooling
#[derive(Debug)]
pub struct SequentialGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialGenerator {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_are_unique_and_parse() {
        let generator = UuidGenerator;
        let ids: HashSet<String> = (0..1000).map(|_| generator.next_id()).collect();

        assert_eq!(ids.len(), 1000);
        for id in &ids {
            let parsed = uuid::Uuid::parse_str(id).unwrap();
            assert_eq!(parsed.get_version_num(), 4);
        }
    }

    #[test]
    fn test_sequential_ids() {
        let generator = SequentialGenerator::new("receipt");
        assert_eq!(generator.next_id(), "receipt-1");
        assert_eq!(generator.next_id(), "receipt-2");
    }
}
