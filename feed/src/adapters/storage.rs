//! In-memory client storage

use std::collections::HashMap;

use crate::domain::ports::ClientStorage;

/// `ClientStorage` backed by a plain map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an item
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.set_item(key, value);
        self
    }

    pub fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

impl ClientStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}
