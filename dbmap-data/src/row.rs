use crate::error::DataError;
use crate::value::Value;

/// One raw result row: column name → [`Value`], in driver order.
///
/// Backends build a `Row` from the driver's result row; entities consume
/// it in `Entity::from_row`. Columns an entity does not ask for are
/// simply ignored.
#[derive(Debug, Clone, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.columns.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(col, value)| (col.as_str(), value))
    }

    /// Required INTEGER column.
    pub fn integer(&self, name: &str) -> Result<i64, DataError> {
        match self.require(name)? {
            Value::Integer(i) => Ok(*i),
            other => Err(Self::mismatch(name, "INTEGER", other)),
        }
    }

    /// Nullable INTEGER column.
    pub fn opt_integer(&self, name: &str) -> Result<Option<i64>, DataError> {
        match self.require(name)? {
            Value::Null => Ok(None),
            Value::Integer(i) => Ok(Some(*i)),
            other => Err(Self::mismatch(name, "INTEGER", other)),
        }
    }

    /// Required REAL column. INTEGER is accepted and widened, matching
    /// SQLite's numeric affinity.
    pub fn real(&self, name: &str) -> Result<f64, DataError> {
        match self.require(name)? {
            Value::Real(r) => Ok(*r),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(Self::mismatch(name, "REAL", other)),
        }
    }

    /// Required TEXT column.
    pub fn text(&self, name: &str) -> Result<String, DataError> {
        match self.require(name)? {
            Value::Text(s) => Ok(s.clone()),
            other => Err(Self::mismatch(name, "TEXT", other)),
        }
    }

    /// Nullable TEXT column.
    pub fn opt_text(&self, name: &str) -> Result<Option<String>, DataError> {
        match self.require(name)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            other => Err(Self::mismatch(name, "TEXT", other)),
        }
    }

    /// Structured column: either a `Json` value, or a TEXT column holding
    /// serialized JSON (the stored form written by `Value::into_stored`).
    pub fn json(&self, name: &str) -> Result<serde_json::Value, DataError> {
        match self.require(name)? {
            Value::Json(v) => Ok(v.clone()),
            Value::Text(s) => serde_json::from_str(s).map_err(|e| {
                DataError::Hydration(format!("column `{name}`: invalid JSON text: {e}"))
            }),
            other => Err(Self::mismatch(name, "JSON", other)),
        }
    }

    fn require(&self, name: &str) -> Result<&Value, DataError> {
        self.get(name)
            .ok_or_else(|| DataError::Hydration(format!("column `{name}` missing from row")))
    }

    fn mismatch(name: &str, expected: &str, found: &Value) -> DataError {
        DataError::Hydration(format!(
            "column `{name}`: expected {expected}, found {}",
            found.type_name()
        ))
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
