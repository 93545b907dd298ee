//! The [`Store`] abstraction injected into resource handlers.

use async_trait::async_trait;

use crate::collection::Collection;
use crate::error::StoreError;
use crate::resource::ResourceKind;

/// Whole-collection persistence for one or more resource types.
///
/// Implementations hold no per-request state: every [`load`] returns the
/// current content and every [`save`] replaces it in full.
///
/// [`load`]: Store::load
/// [`save`]: Store::save
#[async_trait]
pub trait Store: Send + Sync {
    /// Load the full collection for `kind`.
    ///
    /// Never fails. A missing or unreadable backing document is logged
    /// and treated as an empty collection.
    async fn load(&self, kind: ResourceKind) -> Collection;

    /// Replace the collection for `kind`.
    ///
    /// The previous content must never be observable as a partial write.
    /// Failures are logged by the implementation before being returned;
    /// callers decide whether the failure reaches the client.
    async fn save(&self, kind: ResourceKind, collection: &Collection) -> Result<(), StoreError>;
}
