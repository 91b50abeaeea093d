use std::sync::Arc;

use agrocoop_core::Record;

/// CRUD contract shared by every record kind.
///
/// All operations are total: absence, duplication and not-found come back as
/// `false` / `None`, never as a panic.
pub trait Repository<T: Record>: Send + Sync {
    /// Append `record` unless its key is already taken.
    fn create(&self, record: T) -> bool;

    /// Snapshot of the record stored under `key`.
    fn find(&self, key: &str) -> Option<T>;

    /// Replace the record stored under `key`.
    ///
    /// The stored key stays `key` even if `record` carries a different one.
    fn update(&self, key: &str, record: T) -> bool;

    /// Remove the record stored under `key`.
    fn delete(&self, key: &str) -> bool;

    /// Independent copy of the whole collection, in insertion order.
    fn list(&self) -> Vec<T>;

    /// Number of records held.
    fn total(&self) -> usize;

    /// Next free sequential code for this kind.
    fn next_id(&self) -> String;
}

impl<T, R> Repository<T> for Arc<R>
where
    T: Record,
    R: Repository<T> + ?Sized,
{
    fn create(&self, record: T) -> bool {
        (**self).create(record)
    }

    fn find(&self, key: &str) -> Option<T> {
        (**self).find(key)
    }

    fn update(&self, key: &str, record: T) -> bool {
        (**self).update(key, record)
    }

    fn delete(&self, key: &str) -> bool {
        (**self).delete(key)
    }

    fn list(&self) -> Vec<T> {
        (**self).list()
    }

    fn total(&self) -> usize {
        (**self).total()
    }

    fn next_id(&self) -> String {
        (**self).next_id()
    }
}
