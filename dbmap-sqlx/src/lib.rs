//! # dbmap-sqlx — SQLx/SQLite backend for dbmap
//!
//! This crate provides the [SQLx](https://github.com/launchbadge/sqlx)-specific
//! implementation of the dbmap data layer. It depends on [`dbmap-data`] for
//! the abstract traits and types, and adds the mapper implementation, the
//! pool configuration, and the error bridging needed to talk to a real
//! database.
//!
//! # What's in this crate
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SqliteMapper`] | `Mapper<E>` implementation over an `sqlx::SqlitePool` |
//! | [`MapperFactory`] | Typed factory holding the shared pool, yielding mappers per entity type |
//! | [`HasPool`] | Trait for application states that contain the database pool |
//! | [`DatabaseConfig`] | Deserializable connection settings with an async `connect()` |
//! | [`SqlxErrorExt`] | Extension trait to convert `sqlx::Error` → `DataError` (`.into_data_error()`) |
//! | [`SqlxResult<T>`] | Type alias for `Result<T, DataError>` |
//!
//! # Quick start
//!
//! ```ignore
//! use dbmap_data::prelude::*;
//! use dbmap_sqlx::{DatabaseConfig, MapperFactory};
//!
//! let pool = DatabaseConfig::new("sqlite:app.db").connect().await?;
//! let factory = MapperFactory::new(pool);
//!
//! let users = factory.mapper::<User>();
//! let user = users.save(User::new("abc", "Sam")).await?;
//! let found = users.get_by_id(user.id().unwrap()).await?;
//! ```
//!
//! # Error bridging
//!
//! Due to Rust's orphan rules, `From<sqlx::Error> for DataError` can't be
//! implemented here. Use the [`SqlxErrorExt`] trait instead:
//!
//! ```ignore
//! use dbmap_sqlx::SqlxErrorExt;
//!
//! let n = sqlx::query("...").execute(&pool).await
//!     .map_err(|e| e.into_data_error())?;
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod mapper;

pub use config::DatabaseConfig;
pub use error::{SqlxErrorExt, SqlxResult};
pub use factory::{HasPool, MapperFactory};
pub use mapper::SqliteMapper;

/// Re-exports of the most commonly used types from both `dbmap-data` and
/// this crate.
pub mod prelude {
    pub use crate::{DatabaseConfig, HasPool, MapperFactory, SqliteMapper, SqlxErrorExt};
    pub use dbmap_data::prelude::*;
}
