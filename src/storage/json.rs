use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::query::{remove_first, update_first, Document, Filter, Update};
use super::DocumentStore;
use crate::error::{Result, TodoError};

/// Document store kept on the local filesystem.
///
/// The database is a directory; each collection is `<collection>.json`
/// inside it, holding a JSON array of documents in insertion order.
/// A collection file that does not exist is an empty collection.
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Points at `<root>/<database>`. Nothing is touched until [`ping`].
    ///
    /// [`ping`]: DocumentStore::ping
    pub fn new(root: impl Into<PathBuf>, database: &str) -> Self {
        let mut dir = root.into();
        dir.push(database);
        Self { dir }
    }

    /// Directory holding the collection files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    /// Loads every document of a collection.
    fn load(&self, collection: &str) -> Result<Vec<Document>> {
        let path = self.collection_path(collection);
        let s = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(TodoError::StoreRead(format!("{}: {}", path.display(), e))),
        };
        serde_json::from_str(&s)
            .map_err(|e| TodoError::StoreRead(format!("{}: {}", path.display(), e)))
    }

    /// Loads a collection that is about to be rewritten. Any failure counts
    /// as a failed write.
    fn load_for_write(&self, collection: &str) -> Result<Vec<Document>> {
        self.load(collection).map_err(|e| match e {
            TodoError::StoreRead(msg) => TodoError::StoreWrite(msg),
            other => other,
        })
    }

    /// Overwrites a collection. Writes a temp file first and renames it over
    /// the old one so a crash never leaves a half-written collection.
    fn save(&self, collection: &str, docs: &[Document]) -> Result<()> {
        let path = self.collection_path(collection);
        let tmp = path.with_extension("json.tmp");
        let write_err = |e: std::io::Error| TodoError::StoreWrite(format!("{}: {}", path.display(), e));

        let s = serde_json::to_string_pretty(docs)
            .map_err(|e| TodoError::StoreWrite(e.to_string()))?;
        fs::write(&tmp, s).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        Ok(())
    }
}

impl DocumentStore for JsonStore {
    fn ping(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let meta = fs::metadata(&self.dir)?;
        if meta.permissions().readonly() {
            return Err(TodoError::StoreWrite(format!("{} is read-only", self.dir.display())));
        }
        Ok(())
    }

    fn insert_one(&self, collection: &str, doc: Document) -> Result<()> {
        let mut docs = self.load_for_write(collection)?;
        docs.push(doc);
        self.save(collection, &docs)
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let mut docs = self.load(collection)?;
        docs.retain(|d| filter.matches(d));
        Ok(docs)
    }

    fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<Option<Document>> {
        let mut docs = self.load_for_write(collection)?;
        let before = update_first(&mut docs, filter, update);
        if before.is_some() {
            self.save(collection, &docs)?;
        }
        Ok(before)
    }

    fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let mut docs = self.load_for_write(collection)?;
        let deleted = remove_first(&mut docs, filter);
        if deleted > 0 {
            self.save(collection, &docs)?;
        }
        Ok(deleted)
    }
}
