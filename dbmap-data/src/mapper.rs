use crate::entity::Entity;
use crate::error::DataError;
use crate::query::{Predicate, Selection};
use crate::value::Value;
use std::future::Future;

/// The CRUD contract of a single-table data mapper.
///
/// One mapper instance is bound to exactly one table and one entity type
/// for its lifetime. Every method issues one statement (two round trips
/// for insert-with-id on some drivers) over a shared connection handle the
/// mapper does not own; there is no internal concurrency, caching, or
/// retry.
///
/// Uses RPITIT (return-position `impl Trait` in traits) — no `async-trait`
/// needed.
///
/// Miss semantics: single-row lookups return `Ok(None)`, multi-row lookups
/// an empty `Vec`, `count` zero. See [`DataError`] for the error taxonomy.
pub trait Mapper<E: Entity>: Send + Sync {
    /// Select one row by primary key.
    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<Option<E>, DataError>> + Send;

    /// Conditional select with ordering, limit, and offset.
    fn get_by(
        &self,
        predicate: &Predicate,
        selection: &Selection,
    ) -> impl Future<Output = Result<Vec<E>, DataError>> + Send;

    /// Conditional select with default selection; an empty `Vec` (never an
    /// error) when nothing matches.
    fn get_all_by(
        &self,
        predicate: &Predicate,
    ) -> impl Future<Output = Result<Vec<E>, DataError>> + Send;

    /// `SELECT COUNT(*)` under the predicate.
    fn count(&self, predicate: &Predicate)
        -> impl Future<Output = Result<u64, DataError>> + Send;

    /// Persist the entity and return it.
    ///
    /// Without a primary-key value this inserts all non-key fields
    /// (structured values serialized via [`Value::into_stored`]) and sets
    /// the driver-generated id on the returned entity. With one, it
    /// updates all non-key fields filtered by the key and fails with
    /// [`DataError::NotFound`] if no row was affected.
    fn save(&self, entity: E) -> impl Future<Output = Result<E, DataError>> + Send;

    /// Bulk UPDATE under the predicate; returns the affected-row count.
    fn update_by(
        &self,
        predicate: &Predicate,
        set: Vec<(String, Value)>,
    ) -> impl Future<Output = Result<u64, DataError>> + Send;

    /// Delete the entity's row by primary key.
    ///
    /// Fails with [`DataError::Precondition`] — before any statement is
    /// issued — when the entity has no primary-key value. `Ok(true)` iff a
    /// row was affected.
    fn delete(&self, entity: &E) -> impl Future<Output = Result<bool, DataError>> + Send;

    /// Bulk DELETE under the predicate; returns the affected-row count.
    /// Ordering/limit in `selection` are only meaningful on engines that
    /// support them on DELETE.
    fn delete_by(
        &self,
        predicate: &Predicate,
        selection: &Selection,
    ) -> impl Future<Output = Result<u64, DataError>> + Send;

    /// Lookup by a secondary unique column. `Ok(None)` when no row
    /// matches; with several matches, the first row in
    /// implementation-defined order is returned.
    fn get_by_unique(
        &self,
        column: &str,
        value: Value,
    ) -> impl Future<Output = Result<Option<E>, DataError>> + Send;
}
