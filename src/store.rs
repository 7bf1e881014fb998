use std::sync::{Arc, Mutex, MutexGuard};

use crate::model::Item;

/// Ordered in-memory collection of items, shared across handlers.
///
/// A single mutex serializes all access so concurrent requests never observe
/// a torn collection. Lookups are linear scans over insertion order; the
/// collection is small enough that no index is warranted.
#[derive(Clone, Default)]
pub struct ItemStore {
    items: Arc<Mutex<Vec<Item>>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Item>> {
        self.items.lock().expect("item store mutex poisoned")
    }

    /// All items in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.lock().clone()
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<Item> {
        self.lock().iter().find(|item| item.id == id).cloned()
    }

    /// Add a new item at the end of the collection.
    pub fn append(&self, item: Item) {
        self.lock().push(item);
    }

    /// Overwrite the item with the given id in place, keeping its position.
    /// Returns the previous item, or `None` if no item has that id.
    pub fn replace(&self, id: &str, item: Item) -> Option<Item> {
        let mut items = self.lock();
        let slot = items.iter_mut().find(|existing| existing.id == id)?;
        Some(std::mem::replace(slot, item))
    }

    /// Delete and return the item with the given id, or `None` if absent.
    pub fn remove(&self, id: &str) -> Option<Item> {
        let mut items = self.lock();
        let index = items.iter().position(|item| item.id == id)?;
        Some(items.remove(index))
    }
}
