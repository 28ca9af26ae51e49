//! Query operations - one statement each.
//!
//! - Listings return the raw [`ResultSet`] for table rendering
//! - Inserts use `RETURNING *` and decode the new row
//! - Referential integrity is left to the database constraints

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{Department, Employee, EmployeeChoice, NewEmployee, NewRole, Role};
use crate::store::Store;
use crate::value::{ResultSet, Value};

pub const LIST_DEPARTMENTS: &str = "SELECT id, name FROM department";

pub const LIST_ROLES: &str = r#"
    SELECT
        role.id,
        role.title,
        role.salary,
        department.name AS department
    FROM role
    INNER JOIN department ON role.department_id = department.id
"#;

// `||` yields NULL for employees without a manager on both backends
pub const LIST_EMPLOYEES: &str = r#"
    SELECT
        e.id,
        e.first_name,
        e.last_name,
        r.title AS role,
        d.name AS department,
        r.salary,
        m.first_name || ' ' || m.last_name AS manager
    FROM employee AS e
    LEFT JOIN role AS r ON e.role_id = r.id
    LEFT JOIN department AS d ON r.department_id = d.id
    LEFT JOIN employee AS m ON e.manager_id = m.id
"#;

pub const INSERT_DEPARTMENT: &str = "INSERT INTO department (name) VALUES ($1) RETURNING *";

pub const INSERT_ROLE: &str =
    "INSERT INTO role (title, salary, department_id) VALUES ($1, $2, $3) RETURNING *";

pub const INSERT_EMPLOYEE: &str = r#"
    INSERT INTO employee (first_name, last_name, role_id, manager_id)
    VALUES ($1, $2, $3, $4)
    RETURNING *
"#;

pub const EMPLOYEE_CHOICES: &str = "SELECT id, first_name, last_name FROM employee";

pub const UPDATE_EMPLOYEE_ROLE: &str =
    "UPDATE employee SET role_id = $1 WHERE id = $2 RETURNING id";

pub async fn list_departments(store: &mut Store) -> Result<ResultSet> {
    store.execute(LIST_DEPARTMENTS, &[]).await
}

pub async fn list_roles(store: &mut Store) -> Result<ResultSet> {
    store.execute(LIST_ROLES, &[]).await
}

pub async fn list_employees(store: &mut Store) -> Result<ResultSet> {
    store.execute(LIST_EMPLOYEES, &[]).await
}

pub async fn add_department(store: &mut Store, name: &str) -> Result<Department> {
    let set = store
        .execute(INSERT_DEPARTMENT, &[Value::from(name)])
        .await?;
    let department = Department::try_from(
        set.first()
            .ok_or_else(|| StoreError::empty_result("department insert"))?,
    )?;

    debug!(id = department.id, "department inserted");
    Ok(department)
}

pub async fn add_role(store: &mut Store, role: &NewRole) -> Result<Role> {
    let params = [
        Value::from(role.title.as_str()),
        Value::Decimal(role.salary),
        Value::Int(role.department_id),
    ];
    let set = store.execute(INSERT_ROLE, &params).await?;
    let role = Role::try_from(
        set.first()
            .ok_or_else(|| StoreError::empty_result("role insert"))?,
    )?;

    debug!(id = role.id, "role inserted");
    Ok(role)
}

pub async fn add_employee(store: &mut Store, employee: &NewEmployee) -> Result<Employee> {
    let params = [
        Value::from(employee.first_name.as_str()),
        Value::from(employee.last_name.as_str()),
        Value::Int(employee.role_id),
        Value::from(employee.manager_id),
    ];
    let set = store.execute(INSERT_EMPLOYEE, &params).await?;
    let employee = Employee::try_from(
        set.first()
            .ok_or_else(|| StoreError::empty_result("employee insert"))?,
    )?;

    debug!(id = employee.id, "employee inserted");
    Ok(employee)
}

/// Every employee as a selectable `"first last"` entry, in database order.
pub async fn employee_choices(store: &mut Store) -> Result<Vec<EmployeeChoice>> {
    let set = store.execute(EMPLOYEE_CHOICES, &[]).await?;
    set.iter().map(EmployeeChoice::try_from).collect()
}

/// Point one employee at a new role. Returns the number of rows changed
/// (0 when no employee has `employee_id`).
pub async fn update_employee_role(
    store: &mut Store,
    employee_id: i64,
    role_id: i64,
) -> Result<usize> {
    let set = store
        .execute(
            UPDATE_EMPLOYEE_ROLE,
            &[Value::Int(role_id), Value::Int(employee_id)],
        )
        .await?;

    debug!(employee_id, role_id, updated = set.len(), "employee role updated");
    Ok(set.len())
}
