//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::RecordStore;
use crate::service::QrService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record service for all request handling.
    pub qr_service: Arc<QrService>,
}

impl AppState {
    /// Builds the state around a record store.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            qr_service: Arc::new(QrService::new(store)),
        }
    }
}
