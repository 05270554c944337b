use serde::Serialize;
use serde_json::{Map, Number, Value};
use sqlx::{
    error::BoxDynError,
    sqlite::{Sqlite, SqliteRow, SqliteValueRef},
    Column, Decode, Row, TypeInfo, ValueRef,
};

/// One row of `restaurants`, every column as stored.
pub type Restaurant = Record;

/// One row of `dishes`, every column as stored.
pub type Dish = Record;

/// A table row keyed by column name, in column order.
///
/// The schema belongs to the dataset, so nothing here assumes which columns exist or
/// what they hold: INTEGER and REAL become numbers, TEXT a string, NULL null.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Value {
        Value::Object(record.0)
    }
}

fn column_value(raw: SqliteValueRef<'_>) -> Result<Value, BoxDynError> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let kind = raw.type_info().name().to_owned();
    let value = match kind.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(<i64 as Decode<Sqlite>>::decode(raw)?),
        // sqlite never stores NaN; an infinity has no JSON form
        "REAL" | "NUMERIC" => Number::from_f64(<f64 as Decode<Sqlite>>::decode(raw)?)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => Value::from(<Vec<u8> as Decode<Sqlite>>::decode(raw)?),
        _ => Value::from(<String as Decode<Sqlite>>::decode(raw)?),
    };
    Ok(value)
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for Record {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mut map = Map::with_capacity(row.columns().len());
        for column in row.columns() {
            let raw = row.try_get_raw(column.ordinal())?;
            let value = column_value(raw).map_err(|source| sqlx::Error::ColumnDecode {
                index: column.name().to_string(),
                source,
            })?;
            map.insert(column.name().to_string(), value);
        }
        Ok(Self(map))
    }
}
