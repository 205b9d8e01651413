use mongodb::bson::{self, doc, Document as BsonDocument};
use mongodb::options::ReturnDocument;
use mongodb::sync::{Client, Collection, Database};

use super::query::{Document, Filter, Update};
use super::DocumentStore;
use crate::error::{Result, TodoError};

/// Document store backed by a MongoDB server, through the driver's
/// blocking API.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Parses `uri` and selects `database`. The server is not contacted
    /// until [`ping`].
    ///
    /// [`ping`]: DocumentStore::ping
    pub fn new(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).map_err(|e| TodoError::Connection {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            db: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.db.collection(name)
    }
}

fn read_err(e: impl std::fmt::Display) -> TodoError {
    TodoError::StoreRead(e.to_string())
}

fn write_err(e: impl std::fmt::Display) -> TodoError {
    TodoError::StoreWrite(e.to_string())
}

/// Equality filter, e.g. `{ "name": "buy milk" }`. Empty matches all.
fn filter_document(filter: &Filter) -> Result<BsonDocument> {
    let mut doc = BsonDocument::new();
    for (key, value) in filter.conditions() {
        doc.insert(key.clone(), bson::to_bson(value).map_err(read_err)?);
    }
    Ok(doc)
}

/// `{ "$set": { ... } }` for the update's assignments.
fn update_document(update: &Update) -> Result<BsonDocument> {
    let mut set = BsonDocument::new();
    for (key, value) in update.assignments() {
        set.insert(key.clone(), bson::to_bson(value).map_err(write_err)?);
    }
    Ok(doc! { "$set": set })
}

fn to_bson_document(doc: &Document) -> Result<BsonDocument> {
    bson::to_document(doc).map_err(write_err)
}

/// Converts a server document back, dropping the server's `_id`.
fn from_bson_document(mut doc: BsonDocument) -> Result<Document> {
    doc.remove("_id");
    bson::from_document(doc).map_err(read_err)
}

impl DocumentStore for MongoStore {
    fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).run().map_err(read_err)?;
        Ok(())
    }

    fn insert_one(&self, collection: &str, doc: Document) -> Result<()> {
        self.collection(collection)
            .insert_one(to_bson_document(&doc)?)
            .run()
            .map_err(write_err)?;
        Ok(())
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let cursor = self
            .collection(collection)
            .find(filter_document(filter)?)
            .run()
            .map_err(read_err)?;
        cursor
            .map(|doc| doc.map_err(read_err).and_then(from_bson_document))
            .collect()
    }

    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<Option<Document>> {
        let before = self
            .collection(collection)
            .find_one_and_update(filter_document(filter)?, update_document(update)?)
            .return_document(ReturnDocument::Before)
            .run()
            .map_err(write_err)?;
        before.map(from_bson_document).transpose()
    }

    fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let result = self
            .collection(collection)
            .delete_one(filter_document(filter)?)
            .run()
            .map_err(write_err)?;
        Ok(result.deleted_count)
    }
}
