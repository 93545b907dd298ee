//! In-process store, used by tests and when embedding the API without a
//! data directory.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::resource::ResourceKind;
use crate::store::Store;

/// A [`Store`] that keeps every collection in memory.
///
/// Loads hand out clones, so handlers still follow the
/// load/mutate/save cycle and concurrent writers can lose updates
/// exactly as they would against [`FileStore`](crate::FileStore).
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<ResourceKind, Collection>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `collection` for `kind`.
    pub fn with_collection(kind: ResourceKind, collection: Collection) -> Self {
        let mut collections = BTreeMap::new();
        collections.insert(kind, collection);
        Self {
            collections: RwLock::new(collections),
        }
    }

    /// Whether anything has ever been stored for `kind`.
    pub async fn has_document(&self, kind: ResourceKind) -> bool {
        self.collections.read().await.contains_key(&kind)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self, kind: ResourceKind) -> Collection {
        self.collections
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    async fn save(&self, kind: ResourceKind, collection: &Collection) -> Result<(), StoreError> {
        self.collections
            .write()
            .await
            .insert(kind, collection.clone());
        tracing::debug!(resource = %kind, records = collection.len(), "Collection stored in memory");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn absent_collection_loads_empty() {
        let store = MemoryStore::new();
        assert!(store.load(ResourceKind::Posts).await.is_empty());
        assert!(!store.has_document(ResourceKind::Posts).await);
    }

    #[tokio::test]
    async fn save_replaces_whole_collection() {
        let store = MemoryStore::with_collection(
            ResourceKind::Users,
            Collection::from_values(vec![json!({"id": 1}), json!({"id": 2})]),
        );

        let replacement = Collection::from_values(vec![json!({"id": 3})]);
        store.save(ResourceKind::Users, &replacement).await.unwrap();

        assert_eq!(store.load(ResourceKind::Users).await, replacement);
    }

    #[tokio::test]
    async fn last_save_wins_between_interleaved_writers() {
        let store = MemoryStore::new();

        let mut first = store.load(ResourceKind::Users).await;
        let mut second = store.load(ResourceKind::Users).await;
        first.push(json!({"id": 1}).as_object().unwrap().clone());
        second.push(json!({"id": 2}).as_object().unwrap().clone());
        store.save(ResourceKind::Users, &first).await.unwrap();
        store.save(ResourceKind::Users, &second).await.unwrap();

        let stored = store.load(ResourceKind::Users).await;
        assert_eq!(stored.len(), 1);
        assert!(stored.contains("id", 2));
    }
}
