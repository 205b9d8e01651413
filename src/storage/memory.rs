use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::query::{remove_first, update_first, Document, Filter, Update};
use super::DocumentStore;
use crate::error::{Result, TodoError};

/// In-memory document store, used for `memory://` and in tests.
///
/// Uses `RefCell` for interior mutability since the CLI is single-threaded.
#[derive(Default)]
pub struct MemoryStore {
    collections: RefCell<HashMap<String, Vec<Document>>>,
    round_trips: Cell<usize>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following read fail with [`TodoError::StoreRead`].
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Make every following write fail with [`TodoError::StoreWrite`].
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of operations issued against the store so far (pings excluded).
    pub fn round_trips(&self) -> usize {
        self.round_trips.get()
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections.borrow().get(collection).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn begin_read(&self) -> Result<()> {
        self.round_trips.set(self.round_trips.get() + 1);
        if self.simulate_read_error.get() {
            return Err(TodoError::StoreRead("simulated read error".to_string()));
        }
        Ok(())
    }

    fn begin_write(&self) -> Result<()> {
        self.round_trips.set(self.round_trips.get() + 1);
        if self.simulate_write_error.get() {
            return Err(TodoError::StoreWrite("simulated write error".to_string()));
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn insert_one(&self, collection: &str, doc: Document) -> Result<()> {
        self.begin_write()?;
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        Ok(())
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        self.begin_read()?;
        let collections = self.collections.borrow();
        let docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();
        Ok(docs)
    }

    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<Option<Document>> {
        self.begin_write()?;
        let mut collections = self.collections.borrow_mut();
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| update_first(docs, filter, update)))
    }

    fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64> {
        self.begin_write()?;
        let mut collections = self.collections.borrow_mut();
        Ok(collections
            .get_mut(collection)
            .map_or(0, |docs| remove_first(docs, filter)))
    }
}
