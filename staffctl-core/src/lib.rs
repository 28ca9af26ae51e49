//! staffctl-core - department, role and employee data access
//!
//! One explicitly passed [`Store`] connection, seven single-statement query
//! operations, and a console table renderer for their results.

pub mod config;
pub mod error;
pub mod models;
pub mod queries;
pub mod store;
pub mod table;
pub mod value;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{ConnectTarget, PgParams};
pub use error::{Result, StoreError};
pub use models::{Department, Employee, EmployeeChoice, NewEmployee, NewRole, Role};
pub use store::Store;
pub use table::render_table;
pub use value::{ResultSet, RowRef, Value};
