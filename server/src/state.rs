use std::sync::Arc;

use crate::store::{DevEventStore, MemoryDevEventStore};

/// Router state; every request gets a clone of the store handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DevEventStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DevEventStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDevEventStore::new()))
    }
}
