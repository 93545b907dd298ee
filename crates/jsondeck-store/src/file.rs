//! Flat-file store: one JSON array document per resource type.
//!
//! Documents live at `{root}/{kind}.json`. Writes go to a uniquely named
//! temporary sibling which is synced and then renamed over the document,
//! so a reader never sees a half-written file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::resource::ResourceKind;
use crate::store::Store;

/// A [`Store`] backed by JSON documents in a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on the
    /// first write if it does not exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the backing document for `kind`.
    pub fn document_path(&self, kind: ResourceKind) -> PathBuf {
        self.root.join(kind.document_name())
    }

    /// Read and parse the backing document.
    ///
    /// Returns `Ok(None)` when the document does not exist.
    async fn read_document(&self, kind: ResourceKind) -> Result<Option<Collection>, StoreError> {
        let path = self.document_path(kind);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Array(values) => Ok(Some(Collection::from_values(values))),
            other => Err(StoreError::Malformed {
                path,
                reason: format!("expected a JSON array, found {}", json_type_name(&other)),
            }),
        }
    }

    async fn write_document(
        &self,
        kind: ResourceKind,
        collection: &Collection,
    ) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(collection)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::io(&self.root, e))?;

        let path = self.document_path(kind);
        let tmp_path = self
            .root
            .join(format!(".{}.{}.tmp", kind.document_name(), Uuid::new_v4()));

        if let Err(e) = write_synced(&tmp_path, &bytes).await {
            discard(&tmp_path).await;
            return Err(e);
        }

        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            discard(&tmp_path).await;
            return Err(StoreError::io(path, e));
        }

        Ok(())
    }
}

#[async_trait]
impl Store for FileStore {
    async fn load(&self, kind: ResourceKind) -> Collection {
        match self.read_document(kind).await {
            Ok(Some(collection)) => {
                debug!(resource = %kind, records = collection.len(), "Loaded document");
                collection
            }
            Ok(None) => {
                debug!(
                    resource = %kind,
                    path = %self.document_path(kind).display(),
                    "Document absent, starting empty"
                );
                Collection::new()
            }
            Err(e) => {
                warn!(resource = %kind, error = %e, "Failed to read document, starting empty");
                Collection::new()
            }
        }
    }

    async fn save(&self, kind: ResourceKind, collection: &Collection) -> Result<(), StoreError> {
        match self.write_document(kind, collection).await {
            Ok(()) => {
                debug!(resource = %kind, records = collection.len(), "Document written");
                Ok(())
            }
            Err(e) => {
                error!(resource = %kind, error = %e, "Failed to write document");
                Err(e)
            }
        }
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    file.sync_all().await.map_err(|e| StoreError::io(path, e))
}

/// Best-effort removal of a leftover temporary file.
async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove temporary file");
        }
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn collection_of(values: Vec<Value>) -> Collection {
        Collection::from_values(values)
    }

    #[tokio::test]
    async fn load_absent_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let users = store.load(ResourceKind::Users).await;
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn load_malformed_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.document_path(ResourceKind::Users), b"{not json").unwrap();

        assert!(store.load(ResourceKind::Users).await.is_empty());
    }

    #[tokio::test]
    async fn load_non_array_document_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.document_path(ResourceKind::Posts), br#"{"post_id": 1}"#).unwrap();

        assert!(store.load(ResourceKind::Posts).await.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_preserves_order_and_fields() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));
        let users = collection_of(vec![
            json!({"id": 2, "name": "B", "age": 30}),
            json!({"id": 1, "name": "A"}),
        ]);

        store.save(ResourceKind::Users, &users).await.unwrap();
        let loaded = store.load(ResourceKind::Users).await;

        assert_eq!(loaded, users);
        let text = std::fs::read_to_string(store.document_path(ResourceKind::Users)).unwrap();
        assert_eq!(text, r#"[{"id":2,"name":"B","age":30},{"id":1,"name":"A"}]"#);
    }

    #[tokio::test]
    async fn save_of_unmodified_load_keeps_content() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let original = r#"[ {"post_id": "3", "title": "x"}, 7, {"post_id": 4} ]"#;
        std::fs::write(store.document_path(ResourceKind::Posts), original).unwrap();

        let loaded = store.load(ResourceKind::Posts).await;
        store.save(ResourceKind::Posts, &loaded).await.unwrap();

        let rewritten = std::fs::read_to_string(store.document_path(ResourceKind::Posts)).unwrap();
        let before: Value = serde_json::from_str(original).unwrap();
        let after: Value = serde_json::from_str(&rewritten).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn resources_use_separate_documents() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let posts = collection_of(vec![json!({"post_id": 1})]);

        store.save(ResourceKind::Posts, &posts).await.unwrap();

        assert!(store.load(ResourceKind::Users).await.is_empty());
        assert_eq!(store.load(ResourceKind::Posts).await.len(), 1);
    }

    #[tokio::test]
    async fn save_leaves_no_temporary_files() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        let users = collection_of(vec![json!({"id": 1})]);

        store.save(ResourceKind::Users, &users).await.unwrap();
        store.save(ResourceKind::Users, &users).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![String::from("users.json")]);
    }

    #[tokio::test]
    async fn save_into_unwritable_root_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let store = FileStore::new(&blocker);

        let result = store
            .save(ResourceKind::Users, &collection_of(vec![json!({"id": 1})]))
            .await;

        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
