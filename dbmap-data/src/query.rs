use crate::value::Value;

/// SQL dialect, affecting placeholder style.
#[derive(Debug, Clone, Copy, Default)]
pub enum Dialect {
    /// SQLite-style `?` placeholders (default).
    #[default]
    Sqlite,
    /// MySQL-style `?` placeholders.
    MySql,
    /// Postgres-style `$1, $2, ...` placeholders.
    Postgres,
}

impl Dialect {
    fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::Sqlite | Dialect::MySql => "?".to_string(),
        }
    }
}

/// A conjunction of row conditions, mapping to a parameterized WHERE
/// clause. An empty predicate matches every row.
///
/// # Example
///
/// ```ignore
/// let p = Predicate::new()
///     .eq("status", "active")
///     .like("name", "%alice%");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

#[derive(Debug, Clone)]
enum Condition {
    Eq(String, Value),
    NotEq(String, Value),
    Like(String, Value),
    Gt(String, Value),
    Lt(String, Value),
    In(String, Vec<Value>),
    IsNull(String),
    IsNotNull(String),
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Eq(column.to_string(), value.into()));
        self
    }

    pub fn not_eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::NotEq(column.to_string(), value.into()));
        self
    }

    pub fn like(mut self, column: &str, pattern: &str) -> Self {
        self.conditions
            .push(Condition::Like(column.to_string(), Value::from(pattern)));
        self
    }

    pub fn gt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Gt(column.to_string(), value.into()));
        self
    }

    pub fn lt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Lt(column.to_string(), value.into()));
        self
    }

    pub fn is_in<V>(mut self, column: &str, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        self.conditions.push(Condition::In(
            column.to_string(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn is_null(mut self, column: &str) -> Self {
        self.conditions.push(Condition::IsNull(column.to_string()));
        self
    }

    pub fn is_not_null(mut self, column: &str) -> Self {
        self.conditions
            .push(Condition::IsNotNull(column.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }
}

/// Ordering, limit, and offset for a statement that returns or touches
/// multiple rows.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    order: Vec<(String, bool)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order.push((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Per-table SQL statement generator.
///
/// Every method returns `(sql, bind_values)`; the bind values are in
/// placeholder order. Identifiers (table, columns) are validated against
/// a conservative pattern and rejected with [`QueryError`] before any SQL
/// text is produced.
///
/// # Example
///
/// ```ignore
/// let builder = SqlBuilder::new("users");
/// let (sql, params) = builder.select(
///     &["id", "name"],
///     &Predicate::new().eq("status", "active"),
///     &Selection::new().order_by("id", true).limit(10),
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct SqlBuilder {
    table: String,
    dialect: Dialect,
}

impl SqlBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            dialect: Dialect::Sqlite,
        }
    }

    /// Set the SQL dialect (affects placeholder style).
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Build a SELECT statement.
    pub fn select(
        &self,
        columns: &[&str],
        predicate: &Predicate,
        selection: &Selection,
    ) -> Result<(String, Vec<Value>), QueryError> {
        let table = check_identifier(&self.table, false, "table")?;
        let columns = self.column_list(columns)?;

        let mut sql = format!("SELECT {columns} FROM {table}");
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx, predicate)?;
        self.append_order(&mut sql, selection)?;
        self.append_limit_offset(&mut sql, selection);
        Ok((sql, params))
    }

    /// Build a SELECT COUNT(*) statement.
    pub fn count(&self, predicate: &Predicate) -> Result<(String, Vec<Value>), QueryError> {
        let table = check_identifier(&self.table, false, "table")?;
        let mut sql = format!("SELECT COUNT(*) FROM {table}");
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx, predicate)?;
        Ok((sql, params))
    }

    /// Build an INSERT statement from `(column, value)` pairs.
    pub fn insert(&self, fields: &[(&str, Value)]) -> Result<(String, Vec<Value>), QueryError> {
        if fields.is_empty() {
            return Err(QueryError::NoColumns { statement: "INSERT" });
        }
        let table = check_identifier(&self.table, false, "table")?;

        let mut columns = Vec::with_capacity(fields.len());
        let mut placeholders = Vec::with_capacity(fields.len());
        let mut params = Vec::with_capacity(fields.len());
        for (idx, (column, value)) in fields.iter().enumerate() {
            columns.push(check_identifier(column, false, "column")?);
            placeholders.push(self.dialect.placeholder(idx + 1));
            params.push(value.clone());
        }

        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );
        Ok((sql, params))
    }

    /// Build an UPDATE statement from `(column, value)` assignments and a
    /// predicate. Assignment bind values come before predicate ones.
    pub fn update(
        &self,
        set: &[(&str, Value)],
        predicate: &Predicate,
    ) -> Result<(String, Vec<Value>), QueryError> {
        if set.is_empty() {
            return Err(QueryError::NoColumns { statement: "UPDATE" });
        }
        let table = check_identifier(&self.table, false, "table")?;

        let mut params = Vec::with_capacity(set.len() + predicate.len());
        let mut placeholder_idx = 1usize;
        let mut assignments = Vec::with_capacity(set.len());
        for (column, value) in set {
            let column = check_identifier(column, false, "column")?;
            let placeholder = self.dialect.placeholder(placeholder_idx);
            placeholder_idx += 1;
            assignments.push(format!("{column} = {placeholder}"));
            params.push(value.clone());
        }

        let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));
        self.append_where(&mut sql, &mut params, &mut placeholder_idx, predicate)?;
        Ok((sql, params))
    }

    /// Build a DELETE statement.
    ///
    /// ORDER BY / LIMIT / OFFSET clauses are emitted only when set; they
    /// are meaningful only on engines compiled with support for ordered,
    /// limited deletes.
    pub fn delete(
        &self,
        predicate: &Predicate,
        selection: &Selection,
    ) -> Result<(String, Vec<Value>), QueryError> {
        let table = check_identifier(&self.table, false, "table")?;
        let mut sql = format!("DELETE FROM {table}");
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx, predicate)?;
        self.append_order(&mut sql, selection)?;
        self.append_limit_offset(&mut sql, selection);
        Ok((sql, params))
    }

    fn append_where(
        &self,
        sql: &mut String,
        params: &mut Vec<Value>,
        placeholder_idx: &mut usize,
        predicate: &Predicate,
    ) -> Result<(), QueryError> {
        if predicate.conditions.is_empty() {
            return Ok(());
        }
        sql.push_str(" WHERE ");
        let mut first = true;
        for cond in &predicate.conditions {
            if !first {
                sql.push_str(" AND ");
            }
            first = false;
            match cond {
                Condition::Eq(col, val) => {
                    self.push_comparison(sql, params, placeholder_idx, col, "=", val)?;
                }
                Condition::NotEq(col, val) => {
                    self.push_comparison(sql, params, placeholder_idx, col, "!=", val)?;
                }
                Condition::Like(col, pat) => {
                    self.push_comparison(sql, params, placeholder_idx, col, "LIKE", pat)?;
                }
                Condition::Gt(col, val) => {
                    self.push_comparison(sql, params, placeholder_idx, col, ">", val)?;
                }
                Condition::Lt(col, val) => {
                    self.push_comparison(sql, params, placeholder_idx, col, "<", val)?;
                }
                Condition::In(col, vals) => {
                    let col = check_identifier(col, false, "column")?;
                    let placeholders: Vec<_> = vals
                        .iter()
                        .map(|_| {
                            let placeholder = self.dialect.placeholder(*placeholder_idx);
                            *placeholder_idx += 1;
                            placeholder
                        })
                        .collect();
                    sql.push_str(&format!("{col} IN ({})", placeholders.join(", ")));
                    params.extend(vals.iter().cloned());
                }
                Condition::IsNull(col) => {
                    let col = check_identifier(col, false, "column")?;
                    sql.push_str(&format!("{col} IS NULL"));
                }
                Condition::IsNotNull(col) => {
                    let col = check_identifier(col, false, "column")?;
                    sql.push_str(&format!("{col} IS NOT NULL"));
                }
            }
        }
        Ok(())
    }

    fn push_comparison(
        &self,
        sql: &mut String,
        params: &mut Vec<Value>,
        placeholder_idx: &mut usize,
        column: &str,
        op: &str,
        value: &Value,
    ) -> Result<(), QueryError> {
        let column = check_identifier(column, false, "column")?;
        let placeholder = self.dialect.placeholder(*placeholder_idx);
        *placeholder_idx += 1;
        sql.push_str(&format!("{column} {op} {placeholder}"));
        params.push(value.clone());
        Ok(())
    }

    fn append_order(&self, sql: &mut String, selection: &Selection) -> Result<(), QueryError> {
        if selection.order.is_empty() {
            return Ok(());
        }
        sql.push_str(" ORDER BY ");
        let mut clauses = Vec::with_capacity(selection.order.len());
        for (col, asc) in &selection.order {
            let col = check_identifier(col, false, "column")?;
            if *asc {
                clauses.push(format!("{col} ASC"));
            } else {
                clauses.push(format!("{col} DESC"));
            }
        }
        sql.push_str(&clauses.join(", "));
        Ok(())
    }

    fn append_limit_offset(&self, sql: &mut String, selection: &Selection) {
        if let Some(limit) = selection.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = selection.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
    }

    fn column_list(&self, columns: &[&str]) -> Result<String, QueryError> {
        let mut out = Vec::with_capacity(columns.len());
        for col in columns {
            out.push(check_identifier(col, true, "column")?);
        }
        Ok(out.join(", "))
    }
}

#[derive(Debug, Clone)]
pub enum QueryError {
    InvalidIdentifier { kind: &'static str, ident: String },
    NoColumns { statement: &'static str },
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidIdentifier { kind, ident } => {
                write!(f, "Invalid {kind} identifier: {ident}")
            }
            QueryError::NoColumns { statement } => {
                write!(f, "{statement} statement has no columns")
            }
        }
    }
}

impl std::error::Error for QueryError {}

fn check_identifier(
    ident: &str,
    allow_star: bool,
    kind: &'static str,
) -> Result<String, QueryError> {
    if is_valid_identifier(ident, allow_star) {
        Ok(ident.to_string())
    } else {
        Err(QueryError::InvalidIdentifier {
            kind,
            ident: ident.to_string(),
        })
    }
}

fn is_valid_identifier(ident: &str, allow_star: bool) -> bool {
    if ident.is_empty() {
        return false;
    }
    let parts: Vec<&str> = ident.split('.').collect();
    for (idx, part) in parts.iter().enumerate() {
        if allow_star && *part == "*" {
            return idx + 1 == parts.len();
        }
        if !is_valid_segment(part) {
            return false;
        }
    }
    true
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_select() {
        let (sql, params) = SqlBuilder::new("users")
            .select(&["*"], &Predicate::new(), &Selection::new())
            .unwrap();
        assert_eq!(sql, "SELECT * FROM users");
        assert!(params.is_empty());
    }

    #[test]
    fn select_with_conditions_and_selection() {
        let (sql, params) = SqlBuilder::new("users")
            .select(
                &["id", "name"],
                &Predicate::new().eq("status", "active").like("name", "%alice%"),
                &Selection::new().order_by("id", true).limit(10).offset(20),
            )
            .unwrap();
        assert_eq!(
            sql,
            "SELECT id, name FROM users WHERE status = ? AND name LIKE ? ORDER BY id ASC LIMIT 10 OFFSET 20"
        );
        assert_eq!(
            params,
            vec![Value::Text("active".into()), Value::Text("%alice%".into())]
        );
    }

    #[test]
    fn count_query() {
        let (sql, params) = SqlBuilder::new("users")
            .count(&Predicate::new().eq("active", true))
            .unwrap();
        assert_eq!(sql, "SELECT COUNT(*) FROM users WHERE active = ?");
        assert_eq!(params, vec![Value::Integer(1)]);
    }

    #[test]
    fn insert_statement() {
        let (sql, params) = SqlBuilder::new("users")
            .insert(&[
                ("guid", Value::Text("abc".into())),
                ("name", Value::Text("Sam".into())),
            ])
            .unwrap();
        assert_eq!(sql, "INSERT INTO users (guid, name) VALUES (?, ?)");
        assert_eq!(
            params,
            vec![Value::Text("abc".into()), Value::Text("Sam".into())]
        );
    }

    #[test]
    fn insert_without_columns_is_rejected() {
        let err = SqlBuilder::new("users").insert(&[]).unwrap_err();
        assert!(matches!(err, QueryError::NoColumns { statement: "INSERT" }));
    }

    #[test]
    fn update_statement_orders_params() {
        let (sql, params) = SqlBuilder::new("users")
            .dialect(Dialect::Postgres)
            .update(
                &[("name", Value::Text("Kim".into()))],
                &Predicate::new().eq("id", 7i64),
            )
            .unwrap();
        assert_eq!(sql, "UPDATE users SET name = $1 WHERE id = $2");
        assert_eq!(params, vec![Value::Text("Kim".into()), Value::Integer(7)]);
    }

    #[test]
    fn delete_statement() {
        let (sql, params) = SqlBuilder::new("users")
            .delete(&Predicate::new().eq("id", 3i64), &Selection::new())
            .unwrap();
        assert_eq!(sql, "DELETE FROM users WHERE id = ?");
        assert_eq!(params, vec![Value::Integer(3)]);
    }

    #[test]
    fn delete_with_order_and_limit() {
        let (sql, _) = SqlBuilder::new("logs")
            .delete(
                &Predicate::new().lt("id", 100i64),
                &Selection::new().order_by("id", true).limit(10),
            )
            .unwrap();
        assert_eq!(
            sql,
            "DELETE FROM logs WHERE id < ? ORDER BY id ASC LIMIT 10"
        );
    }

    #[test]
    fn postgres_placeholders() {
        let (sql, params) = SqlBuilder::new("users")
            .dialect(Dialect::Postgres)
            .select(
                &["*"],
                &Predicate::new()
                    .eq("status", "active")
                    .is_in("role", ["admin", "user"]),
                &Selection::new(),
            )
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM users WHERE status = $1 AND role IN ($2, $3)"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn null_conditions_bind_nothing() {
        let (sql, params) = SqlBuilder::new("users")
            .select(
                &["*"],
                &Predicate::new().is_null("deleted_at").is_not_null("email"),
                &Selection::new(),
            )
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM users WHERE deleted_at IS NULL AND email IS NOT NULL"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn invalid_identifier_is_rejected() {
        let err = SqlBuilder::new("users;drop")
            .select(&["*"], &Predicate::new(), &Selection::new())
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidIdentifier { .. }));

        let err = SqlBuilder::new("users")
            .select(
                &["*"],
                &Predicate::new().eq("name = '' OR 1=1 --", "x"),
                &Selection::new(),
            )
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidIdentifier { .. }));
    }
}
