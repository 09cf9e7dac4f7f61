//! # dbmap-data — driver-independent data-mapper core
//!
//! This crate defines the abstract half of the dbmap data layer: the
//! [`Entity`] trait describing one table row, the tagged [`Value`] type,
//! [`Row`] hydration source, the [`Predicate`]/[`SqlBuilder`] SQL
//! generation pair, and the [`Mapper`] trait that backends implement.
//!
//! Driver-specific code lives in backend crates (e.g. `dbmap-sqlx`).

pub mod entity;
pub mod error;
pub mod mapper;
pub mod query;
pub mod row;
pub mod value;

pub use entity::Entity;
pub use error::DataError;
pub use mapper::Mapper;
pub use query::{Dialect, Predicate, QueryError, Selection, SqlBuilder};
pub use row::Row;
pub use value::Value;

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{Entity, Mapper, Predicate, Row, Selection, Value};
}
