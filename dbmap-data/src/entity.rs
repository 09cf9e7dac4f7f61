use crate::error::DataError;
use crate::row::Row;
use crate::value::Value;

/// Trait representing one row of a table: its table name, primary key,
/// column list, and the explicit field mapping used for persistence and
/// hydration.
///
/// The primary key is a driver-generated integer; `id()` is `None` until
/// the entity has been persisted by an insert.
///
/// # Example
///
/// ```ignore
/// impl Entity for User {
///     fn table_name() -> &'static str { "users" }
///     fn columns() -> &'static [&'static str] { &["id", "guid", "name"] }
///     fn id(&self) -> Option<i64> { self.id }
///     fn set_id(&mut self, id: i64) { self.id = Some(id); }
///     fn fields(&self) -> Vec<(&'static str, Value)> {
///         vec![
///             ("id", Value::from(self.id)),
///             ("guid", Value::from(self.guid.as_str())),
///             ("name", Value::from(self.name.as_str())),
///         ]
///     }
///     fn from_row(row: &Row) -> Result<Self, DataError> {
///         Ok(User {
///             id: row.opt_integer("id")?,
///             guid: row.text("guid")?,
///             name: row.text("name")?,
///         })
///     }
/// }
/// ```
pub trait Entity: Send + Sync + Sized + 'static {
    fn table_name() -> &'static str;

    /// Primary key column name; overridable per entity type.
    fn primary_key() -> &'static str {
        "id"
    }

    /// All column names, in declaration order.
    fn columns() -> &'static [&'static str];

    /// Current primary-key value; `None` until persisted.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Every column the row holds as `(column, value)` pairs, in
    /// declaration order, primary key included.
    fn fields(&self) -> Vec<(&'static str, Value)>;

    /// Populate a new instance from a result row. Columns the entity
    /// does not know are ignored.
    fn from_row(row: &Row) -> Result<Self, DataError>;
}
