use crate::query::QueryError;

/// Errors produced by the data layer.
///
/// Lookup misses are not errors: single-row lookups yield `Ok(None)`,
/// multi-row lookups an empty `Vec`, and `count` zero. The variants here
/// cover everything else:
///
/// - [`NotFound`](DataError::NotFound) — a row that was required to exist
///   did not (updating a persisted entity whose row has disappeared).
/// - [`Precondition`](DataError::Precondition) — the operation was refused
///   before any statement was issued (deleting an entity with no
///   primary-key value).
/// - [`Hydration`](DataError::Hydration) — a result row could not be
///   mapped onto the entity type.
/// - [`Query`](DataError::Query) — invalid query input, e.g. a rejected
///   identifier.
/// - [`Database`](DataError::Database) — a driver error, propagated
///   unmodified; no retry or recovery is attempted.
#[derive(Debug)]
pub enum DataError {
    NotFound(String),
    Precondition(String),
    Hydration(String),
    Query(QueryError),
    Database(Box<dyn std::error::Error + Send + Sync>),
}

impl DataError {
    /// Construct a `Database` variant from any error type.
    ///
    /// Used by backend crates to wrap driver-specific errors.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        DataError::Precondition(msg.into())
    }

    pub fn hydration(msg: impl Into<String>) -> Self {
        DataError::Hydration(msg.into())
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::NotFound(msg) => write!(f, "Not found: {msg}"),
            DataError::Precondition(msg) => write!(f, "Precondition failed: {msg}"),
            DataError::Hydration(msg) => write!(f, "Hydration error: {msg}"),
            DataError::Query(err) => write!(f, "Query error: {err}"),
            DataError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            DataError::Query(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QueryError> for DataError {
    fn from(err: QueryError) -> Self {
        DataError::Query(err)
    }
}
