//! Storage abstractions for the service layer.
//!
//! Every project backend talks to a `ResourceStore`: an ordered collection
//! of records with a unique id. Two implementations cover the whole suite:
//! a process-memory store and a JSON-array-file store with the same
//! contract, so services can be tested against memory and deployed against
//! either.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod json_array_store;
pub mod memory_store;

pub use json_array_store::JsonArrayStore;
pub use memory_store::MemoryStore;

/// A record that knows its own identifier.
pub trait Keyed {
    type Id: Clone + PartialEq + Send + Sync;
    fn id(&self) -> Self::Id;
}

/// CRUD contract shared by all stores.
///
/// Mutations serialize through a single write lock inside each
/// implementation; a store never holds two records with the same id.
#[async_trait]
pub trait ResourceStore<T: Keyed + Clone + Send + Sync + 'static>: Send + Sync {
    /// Insert a record. Fails with `Conflict` if the id is already taken.
    async fn insert(&self, item: T) -> Result<T::Id, ServiceError>;

    /// Snapshot of all records in insertion order.
    async fn list(&self) -> Result<Vec<T>, ServiceError>;

    /// Filtered scan.
    async fn find(&self, pred: Box<dyn for<'a> Fn(&'a T) -> bool + Send + 'static>) -> Result<Vec<T>, ServiceError>;

    /// Lookup by id; linear scan.
    async fn get(&self, id: &T::Id) -> Result<Option<T>, ServiceError>;

    /// Apply a patch in place; returns the updated record, or `None` if absent.
    async fn update(
        &self,
        id: &T::Id,
        patch: Box<dyn for<'a> FnOnce(&'a mut T) + Send + 'static>,
    ) -> Result<Option<T>, ServiceError>;

    /// Delete by id; returns whether a record was removed.
    async fn remove(&self, id: &T::Id) -> Result<bool, ServiceError>;

    /// Keep only records matching the predicate; returns how many were dropped.
    async fn retain(&self, keep: Box<dyn for<'a> Fn(&'a T) -> bool + Send + 'static>) -> Result<usize, ServiceError>;

    /// Number of records.
    async fn count(&self) -> Result<usize, ServiceError>;
}

/// Monotonic id source for the relational-style stores.
#[derive(Debug, Default)]
pub struct IdCounter(AtomicU64);

impl IdCounter {
    pub fn starting_at(next: u64) -> Self {
        Self(AtomicU64::new(next.saturating_sub(1)))
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::IdCounter;

    #[test]
    fn counter_is_monotonic_and_never_zero() {
        let c = IdCounter::default();
        assert_eq!(c.next(), 1);
        assert_eq!(c.next(), 2);

        let c = IdCounter::starting_at(10);
        assert_eq!(c.next(), 10);
        assert_eq!(c.next(), 11);
    }
}
