//! Shared state for request handlers.

use std::sync::Arc;

use marquee_store::BookingStore;

/// Shared application state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The booking store handlers execute against.
    pub store: Arc<BookingStore>,
}

impl AppState {
    /// Creates state around the given store.
    #[must_use]
    pub fn new(store: Arc<BookingStore>) -> Self {
        Self { store }
    }

    /// Creates state around the process-wide shared store.
    #[must_use]
    pub fn shared() -> Self {
        Self::new(BookingStore::shared())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &"<BookingStore>")
            .finish()
    }
}
