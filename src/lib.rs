// Receipt Processor - Core Library
// Exposes all modules for use in the CLI, the API server, and tests

pub mod config;
pub mod ids;
pub mod processor;
pub mod receipt;
pub mod rules;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::{CorsMode, ServerConfig};
pub use ids::{IdGenerator, SequentialGenerator, UuidGenerator};
pub use processor::ReceiptProcessor;
pub use receipt::{Item, Receipt};
pub use rules::{Rule, RuleContribution, ScoreBreakdown, ScoringEngine};
pub use store::{ScoreRecord, ScoreStore, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
