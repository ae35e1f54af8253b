//! Trial catalog ingestion and shared in-memory storage.
//!
//! The parser canonicalizes the CSV export's heterogeneous cells (numeric
//! strings like `"18 Years"`, boolean-ish flags, delimited state lists) into
//! typed [`TrialCriteria`](crate::matching::TrialCriteria) once, at the
//! boundary; the scoring engine never performs coercion.

mod parser;
mod store;

pub use parser::{load_trials, parse_trials};
pub use store::TrialCatalog;

/// Catalog ingestion failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("trial CSV not found at '{path}'; set CSV_PATH to your trial export")]
    NotFound { path: String },
    #[error("failed to read trial CSV: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse trial CSV: {0}")]
    Csv(#[from] csv::Error),
}
