use crate::mapper::SqliteMapper;
use dbmap_data::entity::Entity;
use sqlx::SqlitePool;

/// Trait for application states that contain the shared database pool.
///
/// Implement this for your app state so mappers can be built from it:
///
/// ```ignore
/// impl HasPool for AppState {
///     fn pool(&self) -> &SqlitePool {
///         &self.pool
///     }
/// }
/// ```
pub trait HasPool {
    fn pool(&self) -> &SqlitePool;
}

/// Typed mapper factory: holds the shared pool and builds a
/// [`SqliteMapper`] for any entity type.
///
/// This is the dependency-injection seam of the crate. The factory is
/// handed the connection handle once, by its constructor; every mapper it
/// produces shares that handle. There is no by-name service lookup — the
/// entity type parameter is the only "requested name".
#[derive(Clone)]
pub struct MapperFactory {
    pool: SqlitePool,
}

impl MapperFactory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Build a factory from any state exposing the pool.
    pub fn from_state<S: HasPool>(state: &S) -> Self {
        Self::new(state.pool().clone())
    }

    /// Mapper for `E`'s declared table.
    pub fn mapper<E: Entity>(&self) -> SqliteMapper<E> {
        SqliteMapper::new(self.pool.clone())
    }

    /// Mapper binding `E` to an explicitly named table.
    pub fn mapper_for_table<E: Entity>(&self, table: &str) -> SqliteMapper<E> {
        SqliteMapper::with_table(self.pool.clone(), table)
    }
}

impl HasPool for MapperFactory {
    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
