use serde_json::{Map, Value};

/// A stored record: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Selects documents whose fields equal the given values.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Vec<(String, Value)>,
}

impl Filter {
    /// Matches all documents in a collection.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches documents where `key` equals `value` exactly.
    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(key, value)
    }

    /// Adds another equality condition.
    pub fn and(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Field/value pairs that must all be equal.
    pub(crate) fn conditions(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.fields.iter().all(|(key, value)| doc.get(key) == Some(value))
    }
}

/// Field assignments applied to a matched document, like a `$set`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    set: Vec<(String, Value)>,
}

impl Update {
    pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::default().and_set(key, value)
    }

    pub fn and_set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.push((key.into(), value.into()));
        self
    }

    pub(crate) fn assignments(&self) -> &[(String, Value)] {
        &self.set
    }

    pub fn apply(&self, doc: &mut Document) {
        for (key, value) in &self.set {
            doc.insert(key.clone(), value.clone());
        }
    }
}

/// Updates the first matching document in place.
///
/// Returns the document as it was before the update.
pub(crate) fn update_first(docs: &mut [Document], filter: &Filter, update: &Update) -> Option<Document> {
    let doc = docs.iter_mut().find(|d| filter.matches(d))?;
    let before = doc.clone();
    update.apply(doc);
    Some(before)
}

/// Removes the first matching document. Returns how many were removed (0 or 1).
pub(crate) fn remove_first(docs: &mut Vec<Document>, filter: &Filter) -> u64 {
    match docs.iter().position(|d| filter.matches(d)) {
        Some(idx) => {
            docs.remove(idx);
            1
        }
        None => 0,
    }
}
