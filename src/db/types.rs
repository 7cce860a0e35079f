use alloy_primitives::U256;

/// A value that can be stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbValue {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed 64-bit integer
    Int64(i64),
    /// Text (unlimited length)
    Text(String),
    /// Arbitrary-precision integer as a decimal string (stored as NUMERIC).
    /// `None` is a NULL that still binds through the NUMERIC cast.
    Numeric(Option<String>),
}

impl DbValue {
    pub fn text(value: &Option<String>) -> Self {
        value.clone().map(DbValue::Text).unwrap_or(DbValue::Null)
    }

    pub fn numeric(value: &Option<U256>) -> Self {
        DbValue::Numeric(value.map(|v| v.to_string()))
    }

    pub fn bool(value: &Option<bool>) -> Self {
        value.map(DbValue::Bool).unwrap_or(DbValue::Null)
    }
}

/// Database operation produced for a decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbOperation {
    /// INSERT with ON CONFLICT DO UPDATE (upsert)
    Upsert {
        table: String,
        columns: Vec<String>,
        values: Vec<DbValue>,
        /// Columns that form the unique constraint
        conflict_columns: Vec<String>,
        /// Columns to update on conflict
        update_columns: Vec<String>,
    },
}

impl DbOperation {
    pub fn table(&self) -> &str {
        match self {
            DbOperation::Upsert { table, .. } => table,
        }
    }

    /// The value bound to `column`, if the operation writes it.
    pub fn value(&self, column: &str) -> Option<&DbValue> {
        match self {
            DbOperation::Upsert {
                columns, values, ..
            } => columns
                .iter()
                .position(|c| c == column)
                .and_then(|i| values.get(i)),
        }
    }
}
