//! Document Query Module
//!
//! Topic lookup over a document collection. The helper only builds the
//! filter; matching is the collection's job.

use serde_json::{Map, Value};

/// A schemaless document, as a JSON object.
pub type Document = Map<String, Value>;

// == Filter ==
/// Single-field equality filter, `{field: value}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Document-store equality: the field equals the value, or the field is an
    /// array containing it.
    pub fn matches(&self, document: &Document) -> bool {
        match document.get(&self.field) {
            Some(Value::Array(items)) => {
                items.contains(&self.value)
                    || matches!(&self.value, Value::Array(wanted) if wanted == items)
            }
            Some(field) => *field == self.value,
            None => false,
        }
    }
}

// == Collection ==
/// A queryable document collection.
pub trait Collection {
    /// Lazily yields documents matching `filter`.
    fn find<'a>(&'a self, filter: Filter) -> Box<dyn Iterator<Item = &'a Document> + 'a>;
}

// == Memory Collection ==
/// Vec-backed collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    documents: Vec<Document>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document; non-object values are rejected and returned.
    pub fn insert(&mut self, document: Value) -> Result<(), Value> {
        match document {
            Value::Object(map) => {
                self.documents.push(map);
                Ok(())
            }
            other => Err(other),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Collection for MemoryCollection {
    fn find<'a>(&'a self, filter: Filter) -> Box<dyn Iterator<Item = &'a Document> + 'a> {
        Box::new(self.documents.iter().filter(move |doc| filter.matches(doc)))
    }
}

// == Schools By Topic ==
/// Documents whose `topics` array contains `topic`.
pub fn schools_by_topic<'a, C>(
    collection: &'a C,
    topic: &str,
) -> Box<dyn Iterator<Item = &'a Document> + 'a>
where
    C: Collection + ?Sized,
{
    collection.find(Filter::eq("topics", topic))
}
