//! Off-chain publication store and verification result cache.

use std::{
    collections::HashMap,
    io,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use lru::LruCache;
use momoka_primitives::{ProofOutcome, PublicationRecord};
use parking_lot::{Mutex, RwLock};
use tracing::*;

use crate::{CacheError, StoreError};

/// Source of publication records, keyed by transaction (data availability) id.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait PublicationStore: Send + Sync {
    /// Returns the record, or `None` if the store has no bundle with this id.
    async fn get_publication_by_id(
        &self,
        tx_id: &str,
    ) -> Result<Option<PublicationRecord>, StoreError>;
}

/// Terminal verification outcomes, keyed by transaction id.
///
/// Only permanent outcomes are ever stored here.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ResultCache: Send + Sync {
    async fn get(&self, tx_id: &str) -> Result<Option<ProofOutcome>, CacheError>;

    async fn put(&self, tx_id: &str, outcome: ProofOutcome) -> Result<(), CacheError>;
}

/// Store backed by a map, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryPublicationStore {
    records: RwLock<HashMap<String, PublicationRecord>>,
}

impl InMemoryPublicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record under its own data availability id.
    pub fn insert(&self, record: PublicationRecord) {
        self.records
            .write()
            .insert(record.data_availability_id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl FromIterator<PublicationRecord> for InMemoryPublicationStore {
    fn from_iter<I: IntoIterator<Item = PublicationRecord>>(iter: I) -> Self {
        let store = Self::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

#[async_trait]
impl PublicationStore for InMemoryPublicationStore {
    async fn get_publication_by_id(
        &self,
        tx_id: &str,
    ) -> Result<Option<PublicationRecord>, StoreError> {
        Ok(self.records.read().get(tx_id).cloned())
    }
}

/// Store reading one `<tx_id>.json` file per bundle from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryPublicationStore {
    root: PathBuf,
}

impl DirectoryPublicationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ids are opaque content addresses; anything that could leave the
    /// directory is treated as absent.
    fn path_for(&self, tx_id: &str) -> Option<PathBuf> {
        let valid = !tx_id.is_empty()
            && tx_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| self.root.join(format!("{tx_id}.json")))
    }
}

#[async_trait]
impl PublicationStore for DirectoryPublicationStore {
    async fn get_publication_by_id(
        &self,
        tx_id: &str,
    ) -> Result<Option<PublicationRecord>, StoreError> {
        let Some(path) = self.path_for(tx_id) else {
            debug!(%tx_id, "rejecting malformed transaction id");
            return Ok(None);
        };

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| StoreError::Malformed {
                tx_id: tx_id.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Bounded in-process result cache with least recently used eviction.
#[derive(Debug)]
pub struct LruResultCache {
    inner: Mutex<LruCache<String, ProofOutcome>>,
}

impl LruResultCache {
    /// Creates a cache holding at most `capacity` outcomes (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[async_trait]
impl ResultCache for LruResultCache {
    async fn get(&self, tx_id: &str) -> Result<Option<ProofOutcome>, CacheError> {
        Ok(self.inner.lock().get(tx_id).cloned())
    }

    async fn put(&self, tx_id: &str, outcome: ProofOutcome) -> Result<(), CacheError> {
        self.inner.lock().put(tx_id.to_owned(), outcome);
        Ok(())
    }
}
