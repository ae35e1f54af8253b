use std::path::Path;
use std::sync::{Arc, RwLock};

use super::{parser, CatalogError};
use crate::matching::TrialCriteria;

/// Immutably-shared trial collection.
///
/// Readers take a cheap `Arc` snapshot that stays consistent for the whole
/// ranking call; reload builds a fresh vector and swaps the `Arc`, so
/// in-flight rankings never observe a partial update.
#[derive(Debug, Default)]
pub struct TrialCatalog {
    trials: RwLock<Arc<Vec<TrialCriteria>>>,
}

impl TrialCatalog {
    pub fn new(trials: Vec<TrialCriteria>) -> Self {
        Self {
            trials: RwLock::new(Arc::new(trials)),
        }
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogError> {
        Ok(Self::new(parser::load_trials(path)?))
    }

    /// Current snapshot of the catalog.
    pub fn snapshot(&self) -> Arc<Vec<TrialCriteria>> {
        let guard = self
            .trials
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the catalog wholesale. Never mutates in place.
    pub fn reload(&self, trials: Vec<TrialCriteria>) {
        let fresh = Arc::new(trials);
        let mut guard = self
            .trials
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = fresh;
    }

    /// Re-read the catalog from a CSV path and swap it in atomically.
    pub fn reload_from_csv_path(&self, path: &Path) -> Result<usize, CatalogError> {
        let trials = parser::load_trials(path)?;
        let count = trials.len();
        self.reload(trials);
        Ok(count)
    }

    pub fn find(&self, nct_id: &str) -> Option<TrialCriteria> {
        self.snapshot()
            .iter()
            .find(|trial| trial.nct_id == nct_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(nct_id: &str) -> TrialCriteria {
        TrialCriteria {
            nct_id: nct_id.to_string(),
            title: format!("Trial {nct_id}"),
            ..TrialCriteria::default()
        }
    }

    #[test]
    fn snapshot_survives_reload() {
        let catalog = TrialCatalog::new(vec![trial("NCT001")]);
        let before = catalog.snapshot();

        catalog.reload(vec![trial("NCT002"), trial("NCT003")]);

        assert_eq!(before.len(), 1, "old snapshot is untouched");
        assert_eq!(before[0].nct_id, "NCT001");
        assert_eq!(catalog.len(), 2);
        assert!(catalog.find("NCT002").is_some());
        assert!(catalog.find("NCT001").is_none());
    }

    #[test]
    fn find_returns_none_for_unknown_id() {
        let catalog = TrialCatalog::new(vec![trial("NCT001")]);
        assert!(catalog.find("NCT999").is_none());
    }
}
