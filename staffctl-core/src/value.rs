//! Dynamic row model shared by both database backends.
//!
//! Statements are bound with [`Value`] parameters and come back as a
//! [`ResultSet`]: column names plus one `Vec<Value>` per row. Typed records
//! in [`crate::models`] are built on top of this.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::error::{Result, StoreError};

/// A single SQL parameter or result cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            Value::Int(v) => Some(Decimal::from(*v)),
            Value::Float(f) => Decimal::from_f64(*f),
            Value::Text(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// All rows returned by one statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrowing view over each row with by-name access
    pub fn iter(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(move |values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    pub fn first(&self) -> Option<RowRef<'_>> {
        self.iter().next()
    }
}

/// One row of a [`ResultSet`]
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    fn require(&self, column: &str) -> Result<&'a Value> {
        self.get(column)
            .ok_or_else(|| StoreError::missing_column(column))
    }

    fn unexpected(column: &str, expected: &'static str, found: &Value) -> StoreError {
        StoreError::UnexpectedValue {
            column: column.to_owned(),
            expected,
            found: found.kind().to_owned(),
        }
    }

    pub fn i64(&self, column: &str) -> Result<i64> {
        let value = self.require(column)?;
        value
            .as_i64()
            .ok_or_else(|| Self::unexpected(column, "integer", value))
    }

    pub fn opt_i64(&self, column: &str) -> Result<Option<i64>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            value => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| Self::unexpected(column, "integer", value)),
        }
    }

    pub fn decimal(&self, column: &str) -> Result<Decimal> {
        let value = self.require(column)?;
        value
            .as_decimal()
            .ok_or_else(|| Self::unexpected(column, "decimal", value))
    }

    pub fn string(&self, column: &str) -> Result<String> {
        match self.require(column)? {
            Value::Text(s) => Ok(s.clone()),
            value => Err(Self::unexpected(column, "text", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet {
            columns: vec!["id".into(), "title".into(), "salary".into(), "manager_id".into()],
            rows: vec![vec![
                Value::Int(3),
                Value::Text("Engineer".into()),
                Value::Float(80000.5),
                Value::Null,
            ]],
        }
    }

    #[test]
    fn test_row_accessors() {
        let set = sample();
        let row = set.first().unwrap();

        assert_eq!(row.i64("id").unwrap(), 3);
        assert_eq!(row.string("title").unwrap(), "Engineer");
        assert_eq!(row.decimal("salary").unwrap(), Decimal::new(800005, 1));
        assert_eq!(row.opt_i64("manager_id").unwrap(), None);
    }

    #[test]
    fn test_row_accessor_errors() {
        let set = sample();
        let row = set.first().unwrap();

        assert!(matches!(
            row.i64("missing"),
            Err(StoreError::MissingColumn { .. })
        ));
        assert!(matches!(
            row.i64("title"),
            Err(StoreError::UnexpectedValue { expected: "integer", .. })
        ));
    }

    #[test]
    fn test_decimal_from_integer_cell() {
        assert_eq!(Value::Int(80000).as_decimal(), Some(Decimal::from(80000)));
        assert_eq!(Value::Decimal(Decimal::from(7)).as_i64(), Some(7));
        assert_eq!(Value::Decimal(Decimal::new(75, 1)).as_i64(), None);
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(4_i64)), Value::Int(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Decimal(Decimal::new(8000000, 2)).to_string(), "80000.00");
        assert_eq!(Value::Text("Sales".into()).to_string(), "Sales");
    }
}
