//! Shared application state for the API server.
//!
//! [`AppState`] carries the injected [`Store`]. Nothing else is shared
//! between requests: every handler loads its collection fresh.

use std::sync::Arc;

use jsondeck_store::Store;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn Store>,
}

impl AppState {
    /// Create application state around a store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}

impl core::fmt::Debug for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
