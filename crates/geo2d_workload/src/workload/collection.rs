//! The collection seam between generated workloads and a database driver.
use serde_json::Value;

use crate::error::Result;

/// The subset of a document collection that setup steps need.
///
/// Implemented by the harness's driver; [`RecordingCollection`] records calls
/// for tests and dry runs.
pub trait Collection {
    fn insert(&mut self, doc: Value) -> Result<()>;

    fn ensure_index(&mut self, keys: &Value, options: Option<&Value>) -> Result<()>;

    fn drop_collection(&mut self) -> Result<()>;

    fn remove(&mut self, query: &Value) -> Result<()>;
}

impl<C: Collection + ?Sized> Collection for &mut C {
    fn insert(&mut self, doc: Value) -> Result<()> {
        (**self).insert(doc)
    }

    fn ensure_index(&mut self, keys: &Value, options: Option<&Value>) -> Result<()> {
        (**self).ensure_index(keys, options)
    }

    fn drop_collection(&mut self) -> Result<()> {
        (**self).drop_collection()
    }

    fn remove(&mut self, query: &Value) -> Result<()> {
        (**self).remove(query)
    }
}

/// A collection call captured by [`RecordingCollection`].
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionCall {
    Insert(Value),
    EnsureIndex {
        keys: Value,
        options: Option<Value>,
    },
    Drop,
    Remove(Value),
}

/// A collection that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingCollection {
    calls: Vec<CollectionCall>,
}

impl RecordingCollection {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn calls(&self) -> &[CollectionCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<CollectionCall> {
        self.calls
    }

    /// Documents passed to `insert`, in order.
    pub fn inserted(&self) -> impl Iterator<Item = &Value> {
        self.calls.iter().filter_map(|call| match call {
            CollectionCall::Insert(doc) => Some(doc),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Collection for RecordingCollection {
    fn insert(&mut self, doc: Value) -> Result<()> {
        self.calls.push(CollectionCall::Insert(doc));
        Ok(())
    }

    fn ensure_index(&mut self, keys: &Value, options: Option<&Value>) -> Result<()> {
        self.calls.push(CollectionCall::EnsureIndex {
            keys: keys.clone(),
            options: options.cloned(),
        });
        Ok(())
    }

    fn drop_collection(&mut self) -> Result<()> {
        self.calls.push(CollectionCall::Drop);
        Ok(())
    }

    fn remove(&mut self, query: &Value) -> Result<()> {
        self.calls.push(CollectionCall::Remove(query.clone()));
        Ok(())
    }
}
