//! Application State

use std::sync::Arc;

use crate::store::{LicenseStore, MemoryLicenseStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// License persistence
    pub store: Arc<dyn LicenseStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn LicenseStore>) -> Self {
        Self { store }
    }

    /// State backed by the fixture-seeded in-memory store
    pub fn seeded() -> Self {
        Self::new(Arc::new(MemoryLicenseStore::seeded()))
    }
}
