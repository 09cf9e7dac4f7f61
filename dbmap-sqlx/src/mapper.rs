use crate::error::SqlxErrorExt;
use dbmap_data::entity::Entity;
use dbmap_data::error::DataError;
use dbmap_data::mapper::Mapper;
use dbmap_data::query::{Dialect, Predicate, Selection, SqlBuilder};
use dbmap_data::row::Row;
use dbmap_data::value::Value;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Column as _, Row as _, SqlitePool, TypeInfo as _, ValueRef as _};
use std::marker::PhantomData;

/// [`Mapper`] implementation for SQLite over an `sqlx::SqlitePool`.
///
/// The pool is a shared handle owned by the surrounding application; the
/// mapper only issues queries over it and never opens or closes
/// connections itself. One instance is bound to one table and one entity
/// type for its lifetime.
///
/// # Example
///
/// ```ignore
/// let users = SqliteMapper::<User>::new(pool.clone());
/// let user = users.save(User::new("abc", "Sam")).await?;
/// ```
pub struct SqliteMapper<E: Entity> {
    pool: SqlitePool,
    table: String,
    _marker: PhantomData<E>,
}

impl<E: Entity> SqliteMapper<E> {
    /// Mapper for the entity's declared table.
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_table(pool, E::table_name())
    }

    /// Mapper binding the entity type to a differently named table
    /// (e.g. the same shape stored under an archive table).
    pub fn with_table(pool: SqlitePool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_string(),
            _marker: PhantomData,
        }
    }

    /// Get the underlying pool reference.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn builder(&self) -> SqlBuilder {
        SqlBuilder::new(&self.table).dialect(Dialect::Sqlite)
    }

    async fn fetch(&self, sql: String, params: Vec<Value>) -> Result<Vec<E>, DataError> {
        tracing::debug!(table = %self.table, sql = %sql, "select");
        let rows = bind_params(sqlx::query(&sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.into_data_error())?;
        rows.iter()
            .map(|row| decode_row(row).and_then(|row| E::from_row(&row)))
            .collect()
    }

    async fn execute(
        &self,
        sql: String,
        params: Vec<Value>,
    ) -> Result<sqlx::sqlite::SqliteQueryResult, DataError> {
        tracing::debug!(table = %self.table, sql = %sql, "execute");
        bind_params(sqlx::query(&sql), params)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_data_error())
    }

    /// Non-key fields in stored form, ready for INSERT/UPDATE binding.
    fn write_fields(entity: &E) -> Vec<(&'static str, Value)> {
        let key = E::primary_key();
        entity
            .fields()
            .into_iter()
            .filter(|(name, _)| *name != key)
            .map(|(name, value)| (name, value.into_stored()))
            .collect()
    }
}

impl<E: Entity> Clone for SqliteMapper<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            table: self.table.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E: Entity> Mapper<E> for SqliteMapper<E> {
    async fn get_by_id(&self, id: i64) -> Result<Option<E>, DataError> {
        let predicate = Predicate::new().eq(E::primary_key(), id);
        let (sql, params) =
            self.builder()
                .select(E::columns(), &predicate, &Selection::new().limit(1))?;
        let mut found = self.fetch(sql, params).await?;
        Ok(found.pop())
    }

    async fn get_by(
        &self,
        predicate: &Predicate,
        selection: &Selection,
    ) -> Result<Vec<E>, DataError> {
        let (sql, params) = self.builder().select(E::columns(), predicate, selection)?;
        self.fetch(sql, params).await
    }

    async fn get_all_by(&self, predicate: &Predicate) -> Result<Vec<E>, DataError> {
        self.get_by(predicate, &Selection::new()).await
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64, DataError> {
        let (sql, params) = self.builder().count(predicate)?;
        tracing::debug!(table = %self.table, sql = %sql, "count");
        let row = bind_params(sqlx::query(&sql), params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.into_data_error())?;
        let count: i64 = row.try_get(0).map_err(DataError::database)?;
        Ok(count as u64)
    }

    async fn save(&self, mut entity: E) -> Result<E, DataError> {
        let fields = Self::write_fields(&entity);

        match entity.id() {
            None => {
                let (sql, params) = self.builder().insert(&fields)?;
                let result = self.execute(sql, params).await?;
                entity.set_id(result.last_insert_rowid());
                Ok(entity)
            }
            Some(id) => {
                let predicate = Predicate::new().eq(E::primary_key(), id);
                let (sql, params) = self.builder().update(&fields, &predicate)?;
                let result = self.execute(sql, params).await?;
                if result.rows_affected() == 0 {
                    return Err(DataError::NotFound(format!(
                        "{} row {id} does not exist",
                        self.table
                    )));
                }
                Ok(entity)
            }
        }
    }

    async fn update_by(
        &self,
        predicate: &Predicate,
        set: Vec<(String, Value)>,
    ) -> Result<u64, DataError> {
        let set: Vec<(&str, Value)> = set
            .iter()
            .map(|(column, value)| (column.as_str(), value.clone().into_stored()))
            .collect();
        let (sql, params) = self.builder().update(&set, predicate)?;
        let result = self.execute(sql, params).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, entity: &E) -> Result<bool, DataError> {
        let id = entity.id().ok_or_else(|| {
            DataError::precondition("cannot delete an entity with no primary-key value")
        })?;
        let predicate = Predicate::new().eq(E::primary_key(), id);
        let (sql, params) = self.builder().delete(&predicate, &Selection::new())?;
        let result = self.execute(sql, params).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by(
        &self,
        predicate: &Predicate,
        selection: &Selection,
    ) -> Result<u64, DataError> {
        let (sql, params) = self.builder().delete(predicate, selection)?;
        let result = self.execute(sql, params).await?;
        Ok(result.rows_affected())
    }

    async fn get_by_unique(&self, column: &str, value: Value) -> Result<Option<E>, DataError> {
        let predicate = Predicate::new().eq(column, value);
        let (sql, params) =
            self.builder()
                .select(E::columns(), &predicate, &Selection::new().limit(1))?;
        let mut found = self.fetch(sql, params).await?;
        Ok(found.pop())
    }
}

fn bind_params<'q>(
    mut query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    params: Vec<Value>,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in params {
        query = match value {
            Value::Null => query.bind(None::<String>),
            Value::Integer(i) => query.bind(i),
            Value::Real(r) => query.bind(r),
            Value::Text(s) => query.bind(s),
            // Stored form: write paths have already run into_stored, but a
            // structured predicate operand binds as its serialized text too.
            Value::Json(j) => query.bind(j.to_string()),
        };
    }
    query
}

/// Decode a driver row into the generic [`Row`] hydration source, keyed by
/// the column's declared SQLite storage class.
fn decode_row(row: &SqliteRow) -> Result<Row, DataError> {
    let mut out = Row::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx).map_err(DataError::database)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => {
                    Value::Integer(row.try_get::<i64, _>(idx).map_err(DataError::database)?)
                }
                "REAL" | "NUMERIC" => {
                    Value::Real(row.try_get::<f64, _>(idx).map_err(DataError::database)?)
                }
                _ => Value::Text(row.try_get::<String, _>(idx).map_err(DataError::database)?),
            }
        };
        out.push(column.name(), value);
    }
    Ok(out)
}
