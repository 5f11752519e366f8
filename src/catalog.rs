use std::collections::HashMap;

use tracing::{info, warn};

use crate::api::{CatalogEntry, CatalogSource};
use crate::problems::normalize_name;

/// Whether the catalog could be fetched for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Fetched { entries: usize },
    Unavailable { reason: String },
}

/// `(INDEX, normalized name) -> entry`, built once and passed to every
/// resolution of the run.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    by_key: HashMap<String, CatalogEntry>,
    status: CatalogStatus,
}

fn key(index: &str, normalized_name: &str) -> String {
    format!("{}::{}", index.to_uppercase(), normalized_name)
}

impl CatalogIndex {
    /// Fetches from `source` once. Any failure is logged and yields an empty
    /// index marked unavailable.
    pub fn load(source: &dyn CatalogSource) -> Self {
        match source.fetch() {
            Ok(entries) => {
                let index = Self::from_entries(entries);
                info!(problems = index.len(), "catalog loaded");
                index
            }
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(%reason, "could not fetch problem catalog");
                Self::unavailable(reason)
            }
        }
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut by_key = HashMap::with_capacity(entries.len());
        for entry in entries {
            by_key.insert(key(&entry.index, &normalize_name(&entry.name)), entry);
        }
        let status = CatalogStatus::Fetched {
            entries: by_key.len(),
        };
        Self { by_key, status }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            by_key: HashMap::new(),
            status: CatalogStatus::Unavailable {
                reason: reason.into(),
            },
        }
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn is_available(&self) -> bool {
        matches!(self.status, CatalogStatus::Fetched { .. })
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// `normalized_name` must already be normalized.
    pub fn lookup(&self, index: &str, normalized_name: &str) -> Option<&CatalogEntry> {
        self.by_key.get(&key(index, normalized_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StaticCatalog;
    use anyhow::{Result, bail};

    struct Broken;

    impl CatalogSource for Broken {
        fn fetch(&self) -> Result<Vec<CatalogEntry>> {
            bail!("connection refused")
        }
    }

    #[test]
    fn lookup_matches_on_index_and_normalized_name() {
        let index = CatalogIndex::load(&StaticCatalog::new(vec![
            CatalogEntry::new(263, "A", "Beautiful Matrix", Some(800)),
            CatalogEntry::new(4, "a", "Watermelon", Some(800)),
        ]));
        assert!(index.is_available());
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.lookup("A", "beautiful matrix").and_then(|e| e.contest_id),
            Some(263)
        );
        assert!(index.lookup("a", "watermelon").is_some());
        assert!(index.lookup("B", "beautiful matrix").is_none());
        assert!(index.lookup("A", "beautiful  matrix").is_none());
    }

    #[test]
    fn failed_fetch_yields_empty_unavailable_index() {
        let index = CatalogIndex::load(&Broken);
        assert!(index.is_empty());
        assert!(!index.is_available());
        match index.status() {
            CatalogStatus::Unavailable { reason } => assert!(reason.contains("refused")),
            other => panic!("unexpected status {other:?}"),
        }
    }
}
