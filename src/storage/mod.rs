//! Document store client.
//!
//! A store holds named collections of JSON documents inside one database
//! namespace. [`DocumentStore`] covers the handful of operations the task
//! repository needs. Backends are picked from a connection string by
//! [`connect`]:
//!
//! * `file:///path/to/dir` or a bare path: [`JsonStore`], one JSON file per
//!   collection under `<dir>/<database>/`.
//! * `mongodb://host:port` or `mongodb+srv://...`: [`MongoStore`], one
//!   server collection per collection.
//! * `memory://`: [`MemoryStore`], gone when the process exits.

mod json;
mod memory;
mod mongo;
mod query;

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use query::{Document, Filter, Update};

use crate::error::{Result, TodoError};

/// Abstract interface for the document store.
///
/// Every method is one round trip to the store. Methods take `&self`;
/// backends that keep state in memory use interior mutability.
pub trait DocumentStore {
    /// Verifies the store is reachable.
    fn ping(&self) -> Result<()>;

    /// Persists a new document.
    fn insert_one(&self, collection: &str, doc: Document) -> Result<()>;

    /// Returns every document matching `filter`, in store order.
    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    /// Applies `update` to the first document matching `filter`.
    /// Returns the document as it was before the update, or `None` when
    /// nothing matched.
    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<Option<Document>>;

    /// Deletes the first document matching `filter`. Returns the number of
    /// documents deleted.
    fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn ping(&self) -> Result<()> {
        (**self).ping()
    }

    fn insert_one(&self, collection: &str, doc: Document) -> Result<()> {
        (**self).insert_one(collection, doc)
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        (**self).find(collection, filter)
    }

    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<Option<Document>> {
        (**self).find_one_and_update(collection, filter, update)
    }

    fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64> {
        (**self).delete_one(collection, filter)
    }
}

const FILE_SCHEME: &str = "file://";
const MEMORY_SCHEME: &str = "memory://";
const MONGO_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

/// Opens the store named by `uri`, selects `database` and pings it.
///
/// Any failure here is reported as [`TodoError::Connection`].
#[tracing::instrument]
pub fn connect(uri: &str, database: &str) -> Result<Box<dyn DocumentStore>> {
    let store: Box<dyn DocumentStore> = if uri.starts_with(MEMORY_SCHEME) {
        Box::new(MemoryStore::new())
    } else if let Some(path) = uri.strip_prefix(FILE_SCHEME) {
        Box::new(JsonStore::new(path, database))
    } else if MONGO_SCHEMES.iter().any(|scheme| uri.starts_with(scheme)) {
        Box::new(MongoStore::new(uri, database)?)
    } else if uri.contains("://") {
        return Err(TodoError::Connection {
            uri: uri.to_string(),
            reason: "unsupported connection scheme".to_string(),
        });
    } else {
        Box::new(JsonStore::new(uri, database))
    };

    store.ping().map_err(|e| TodoError::Connection {
        uri: uri.to_string(),
        reason: e.to_string(),
    })?;
    tracing::info!(uri, database, "connected to store");
    Ok(store)
}
