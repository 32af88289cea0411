use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use sqlx::{sqlite::SqliteRow, Column, FromRow, Row, TypeInfo, ValueRef};
use std::fmt::Display;

/// Stored column holding the movie identifier
pub const ID_COLUMN: &str = "ID";

/// Stored column holding the display title
pub const NAME_COLUMN: &str = "Movie Name";

/// A movie record exactly as stored in the dataset
///
/// The dataset is loosely typed, so the record is kept as a JSON object keyed
/// by the stored column names (`ID`, `Movie Name`, `Genre`, `Stars`, ...).
/// Clients receive every column, including ones the catalog never reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Movie(Map<String, Value>);

impl Movie {
    /// Raw value of a stored column
    pub fn field(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Identifier rendered as text, regardless of the stored type
    pub fn id(&self) -> Option<String> {
        match self.field(ID_COLUMN)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.field(NAME_COLUMN).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Movie {
    fn from(columns: Map<String, Value>) -> Self {
        Self(columns)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Movie {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mut columns = Map::with_capacity(row.columns().len());

        for column in row.columns() {
            let idx = column.ordinal();
            let raw = row.try_get_raw(idx)?;

            // SQLite types values, not columns: decode by the value's own type.
            let value = if raw.is_null() {
                Value::Null
            } else {
                match raw.type_info().name() {
                    "INTEGER" => Value::from(row.try_get::<i64, _>(idx)?),
                    "REAL" => Number::from_f64(row.try_get::<f64, _>(idx)?)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    "BLOB" => Value::Null,
                    _ => Value::String(row.try_get::<String, _>(idx)?),
                }
            };

            columns.insert(column.name().to_string(), value);
        }

        Ok(Self(columns))
    }
}

/// Movie identifier as sent by clients, either a JSON string or number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Number(i64),
    Text(String),
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieId::Number(id) => write!(f, "{}", id),
            MovieId::Text(id) => write!(f, "{}", id),
        }
    }
}
