//! Typed records for the three persisted entities.
//!
//! Rows are owned by the database; these are snapshots decoded from
//! `RETURNING *` or listing results and are never cached.

use std::fmt;

use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::value::RowRef;

/// Organizational unit grouping roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

/// Job title with a salary, owned by a department
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub title: String,
    pub salary: Decimal,
    pub department_id: i64,
}

/// Person holding at most one role and reporting to at most one manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role_id: Option<i64>,
    pub manager_id: Option<i64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for a role insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub title: String,
    pub salary: Decimal,
    pub department_id: i64,
}

/// Input for an employee insert; `manager_id: None` is stored as NULL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role_id: i64,
    pub manager_id: Option<i64>,
}

/// One selectable entry when picking an employee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeChoice {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Display for EmployeeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

impl TryFrom<RowRef<'_>> for Department {
    type Error = StoreError;

    fn try_from(row: RowRef<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.i64("id")?,
            name: row.string("name")?,
        })
    }
}

impl TryFrom<RowRef<'_>> for Role {
    type Error = StoreError;

    fn try_from(row: RowRef<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.i64("id")?,
            title: row.string("title")?,
            salary: row.decimal("salary")?,
            department_id: row.i64("department_id")?,
        })
    }
}

impl TryFrom<RowRef<'_>> for Employee {
    type Error = StoreError;

    fn try_from(row: RowRef<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.i64("id")?,
            first_name: row.string("first_name")?,
            last_name: row.string("last_name")?,
            role_id: row.opt_i64("role_id")?,
            manager_id: row.opt_i64("manager_id")?,
        })
    }
}

impl TryFrom<RowRef<'_>> for EmployeeChoice {
    type Error = StoreError;

    fn try_from(row: RowRef<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.i64("id")?,
            first_name: row.string("first_name")?,
            last_name: row.string("last_name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ResultSet, Value};

    #[test]
    fn test_employee_from_row_with_nulls() {
        let set = ResultSet {
            columns: vec![
                "id".into(),
                "first_name".into(),
                "last_name".into(),
                "role_id".into(),
                "manager_id".into(),
            ],
            rows: vec![vec![
                Value::Int(7),
                Value::from("Ada"),
                Value::from("Lovelace"),
                Value::Int(2),
                Value::Null,
            ]],
        };

        let employee = Employee::try_from(set.first().unwrap()).unwrap();
        assert_eq!(employee.role_id, Some(2));
        assert_eq!(employee.manager_id, None);
        assert_eq!(employee.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_choice_label() {
        let choice = EmployeeChoice {
            id: 1,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
        };
        assert_eq!(choice.to_string(), "Grace Hopper");
    }
}
