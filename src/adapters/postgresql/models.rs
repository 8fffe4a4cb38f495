//! PostgreSQL value binding
//!
//! Converts serialized rows (JSON objects) into typed SQL parameters using
//! the table column metadata, and builds the multi-row insert statements.

use crate::domain::errors::RelationalError;
use crate::domain::tables::{Column, ColumnType, TableKind};
use crate::domain::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tokio_postgres::types::ToSql;

/// A JSON cell converted to its typed SQL form
///
/// Each variant wraps an `Option` so NULLs bind naturally for nullable
/// columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Date(Option<NaiveDate>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlValue {
    /// Convert a JSON value according to the column's declared type
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON value does not match the column type,
    /// which would indicate a bug in the row serialization.
    pub fn from_json(value: &Value, column: &Column) -> Result<Self> {
        if value.is_null() {
            return Ok(match column.ty {
                ColumnType::Text => SqlValue::Text(None),
                ColumnType::Int => SqlValue::Int(None),
                ColumnType::Float => SqlValue::Float(None),
                ColumnType::Bool => SqlValue::Bool(None),
                ColumnType::Date => SqlValue::Date(None),
                ColumnType::Timestamp => SqlValue::Timestamp(None),
            });
        }

        match column.ty {
            ColumnType::Text => value
                .as_str()
                .map(|s| SqlValue::Text(Some(s.to_string())))
                .ok_or_else(|| type_error(column, value)),
            ColumnType::Int => value
                .as_i64()
                .map(|n| SqlValue::Int(Some(n)))
                .ok_or_else(|| type_error(column, value)),
            ColumnType::Float => value
                .as_f64()
                .map(|n| SqlValue::Float(Some(n)))
                .ok_or_else(|| type_error(column, value)),
            ColumnType::Bool => value
                .as_bool()
                .map(|b| SqlValue::Bool(Some(b)))
                .ok_or_else(|| type_error(column, value)),
            ColumnType::Date => value
                .as_str()
                .and_then(|s| s.parse::<NaiveDate>().ok())
                .map(|d| SqlValue::Date(Some(d)))
                .ok_or_else(|| type_error(column, value)),
            ColumnType::Timestamp => value
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|ts| SqlValue::Timestamp(Some(ts.with_timezone(&Utc))))
                .ok_or_else(|| type_error(column, value)),
        }
    }

    /// Borrow as a bindable SQL parameter
    pub fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            SqlValue::Text(v) => v,
            SqlValue::Int(v) => v,
            SqlValue::Float(v) => v,
            SqlValue::Bool(v) => v,
            SqlValue::Date(v) => v,
            SqlValue::Timestamp(v) => v,
        }
    }
}

fn type_error(column: &Column, value: &Value) -> crate::domain::KarooError {
    RelationalError::InsertFailed(format!(
        "Column {} expected {}, got {}",
        column.name,
        column.ty.postgres_type(),
        value
    ))
    .into()
}

/// Convert a chunk of rows into a flat parameter list, column-major within
/// each row, matching the statement built by [`build_insert_statement`]
pub fn bind_rows(kind: TableKind, rows: &[Value]) -> Result<Vec<SqlValue>> {
    let columns = kind.columns();
    let mut bindings = Vec::with_capacity(rows.len() * columns.len());

    for row in rows {
        for column in columns {
            let value = row.get(column.name).unwrap_or(&Value::Null);
            bindings.push(SqlValue::from_json(value, column)?);
        }
    }

    Ok(bindings)
}

/// Build a multi-row insert statement with numbered placeholders
pub fn build_insert_statement(kind: TableKind, row_count: usize) -> String {
    let columns = kind.columns();
    let column_list: Vec<&str> = columns.iter().map(|c| c.name).collect();
    let width = columns.len();

    let mut statement = format!(
        "INSERT INTO {} ({}) VALUES ",
        kind.table_name(),
        column_list.join(", ")
    );

    for row in 0..row_count {
        if row > 0 {
            statement.push_str(", ");
        }
        statement.push('(');
        for col in 0..width {
            if col > 0 {
                statement.push_str(", ");
            }
            statement.push_str(&format!("${}", row * width + col + 1));
        }
        statement.push(')');
    }

    statement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tables::ColumnType;
    use serde_json::json;

    const TEXT_COL: Column = Column {
        name: "facility_id",
        ty: ColumnType::Text,
        nullable: false,
        description: "",
    };

    const DATE_COL: Column = Column {
        name: "opened_date",
        ty: ColumnType::Date,
        nullable: true,
        description: "",
    };

    const TS_COL: Column = Column {
        name: "load_ts",
        ty: ColumnType::Timestamp,
        nullable: false,
        description: "",
    };

    #[test]
    fn test_from_json_scalars() {
        let value = SqlValue::from_json(&json!("FAC0001"), &TEXT_COL).unwrap();
        assert_eq!(value, SqlValue::Text(Some("FAC0001".to_string())));

        let int_col = Column {
            ty: ColumnType::Int,
            ..TEXT_COL
        };
        assert_eq!(
            SqlValue::from_json(&json!(42), &int_col).unwrap(),
            SqlValue::Int(Some(42))
        );

        let float_col = Column {
            ty: ColumnType::Float,
            ..TEXT_COL
        };
        assert_eq!(
            SqlValue::from_json(&json!(12.5), &float_col).unwrap(),
            SqlValue::Float(Some(12.5))
        );
    }

    #[test]
    fn test_from_json_null_binds_typed_none() {
        assert_eq!(
            SqlValue::from_json(&Value::Null, &DATE_COL).unwrap(),
            SqlValue::Date(None)
        );
        assert_eq!(
            SqlValue::from_json(&Value::Null, &TEXT_COL).unwrap(),
            SqlValue::Text(None)
        );
    }

    #[test]
    fn test_from_json_parses_dates_and_timestamps() {
        let date = SqlValue::from_json(&json!("2024-04-27"), &DATE_COL).unwrap();
        assert_eq!(
            date,
            SqlValue::Date(Some(NaiveDate::from_ymd_opt(2024, 4, 27).unwrap()))
        );

        let ts = SqlValue::from_json(&json!("2024-06-01T08:30:00Z"), &TS_COL).unwrap();
        match ts {
            SqlValue::Timestamp(Some(dt)) => {
                assert_eq!(dt.to_rfc3339(), "2024-06-01T08:30:00+00:00");
            }
            other => panic!("expected timestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_type_mismatch_is_error() {
        let result = SqlValue::from_json(&json!(123), &TEXT_COL);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("facility_id"));
    }

    #[test]
    fn test_build_insert_statement_numbering() {
        let statement = build_insert_statement(TableKind::Calendar, 2);
        let width = TableKind::Calendar.columns().len();

        assert!(statement.starts_with("INSERT INTO dim_calendar (dt, dow, week,"));
        assert!(statement.contains("($1, "));
        // Second row starts one past the first row's width
        assert!(statement.contains(&format!("(${}, ", width + 1)));
        assert!(statement.ends_with(&format!("${})", width * 2)));
    }

    #[test]
    fn test_bind_rows_flattens_in_column_order() {
        let rows = vec![json!({
            "dt": "2024-01-01",
            "dow": 1,
            "week": 1,
            "month": 1,
            "quarter": 1,
            "year": 2024,
            "is_weekend": false,
            "is_public_holiday": true,
            "is_payday": false,
            "school_term": 1,
            "season": "Summer"
        })];

        let bindings = bind_rows(TableKind::Calendar, &rows).unwrap();
        assert_eq!(bindings.len(), TableKind::Calendar.columns().len());
        assert_eq!(
            bindings[0],
            SqlValue::Date(Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
        );
        assert_eq!(bindings[1], SqlValue::Int(Some(1)));
        assert_eq!(bindings[10], SqlValue::Text(Some("Summer".to_string())));
    }
}
