//! Menu action handlers
//!
//! Each handler gathers its input, issues one query operation and renders
//! the outcome. Errors are returned to the menu loop, which reports them and
//! carries on.

use std::io::Write;

use anyhow::Result;
use staffctl_core::{queries, render_table, NewEmployee, NewRole, ResultSet, Store, Value};

use crate::menu::MenuAction;
use crate::prompt::{collect, Choice, Field, Prompter};

pub async fn dispatch<P, W>(
    action: MenuAction,
    store: &mut Store,
    prompter: &mut P,
    out: &mut W,
) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    match action {
        MenuAction::ViewDepartments => view_all_departments(store, out).await,
        MenuAction::ViewRoles => view_all_roles(store, out).await,
        MenuAction::ViewEmployees => view_all_employees(store, out).await,
        MenuAction::AddDepartment => add_department(store, prompter, out).await,
        MenuAction::AddRole => add_role(store, prompter, out).await,
        MenuAction::AddEmployee => add_employee(store, prompter, out).await,
        MenuAction::UpdateEmployeeRole => update_employee_role(store, prompter, out).await,
        MenuAction::Exit => Ok(()),
    }
}

fn print_table<W: Write>(out: &mut W, set: &ResultSet) -> Result<()> {
    out.write_all(render_table(set).as_bytes())?;
    Ok(())
}

async fn view_all_departments<W: Write>(store: &mut Store, out: &mut W) -> Result<()> {
    let set = queries::list_departments(store).await?;
    print_table(out, &set)
}

async fn view_all_roles<W: Write>(store: &mut Store, out: &mut W) -> Result<()> {
    let set = queries::list_roles(store).await?;
    print_table(out, &set)
}

async fn view_all_employees<W: Write>(store: &mut Store, out: &mut W) -> Result<()> {
    let set = queries::list_employees(store).await?;
    print_table(out, &set)
}

async fn add_department<P, W>(store: &mut Store, prompter: &mut P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let answers = collect(
        prompter,
        &[Field::text("name", "Enter the name of the department:")],
    )?;
    let name = answers.text("name")?;

    let department = queries::add_department(store, &name).await?;
    writeln!(
        out,
        "Department '{}' added successfully with ID {}",
        name, department.id
    )?;
    Ok(())
}

async fn add_role<P, W>(store: &mut Store, prompter: &mut P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let answers = collect(
        prompter,
        &[
            Field::text("title", "Enter the title of the role:"),
            Field::decimal("salary", "Enter the salary for the role:"),
            Field::integer("department_id", "Enter the department ID for the role:"),
        ],
    )?;
    let new_role = NewRole {
        title: answers.text("title")?,
        salary: answers.decimal("salary")?,
        department_id: answers.integer("department_id")?,
    };

    let role = queries::add_role(store, &new_role).await?;
    writeln!(
        out,
        "Role '{}' added successfully with ID {}",
        new_role.title, role.id
    )?;
    Ok(())
}

async fn add_employee<P, W>(store: &mut Store, prompter: &mut P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    let answers = collect(
        prompter,
        &[
            Field::text("first_name", "Enter the employee's first name:"),
            Field::text("last_name", "Enter the employee's last name:"),
            Field::integer("role_id", "Enter employee's role ID:"),
            Field::optional_integer(
                "manager_id",
                "Enter the employee's manager's ID (optional, leave blank if none):",
            ),
        ],
    )?;
    let new_employee = NewEmployee {
        first_name: answers.text("first_name")?,
        last_name: answers.text("last_name")?,
        role_id: answers.integer("role_id")?,
        manager_id: answers.optional_integer("manager_id")?,
    };

    let employee = queries::add_employee(store, &new_employee).await?;
    writeln!(
        out,
        "Employee '{} {}' added successfully with ID {}",
        new_employee.first_name, new_employee.last_name, employee.id
    )?;
    Ok(())
}

async fn update_employee_role<P, W>(store: &mut Store, prompter: &mut P, out: &mut W) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
{
    // Snapshot; may be stale if someone else edits the table meanwhile
    let choices: Vec<Choice> = queries::employee_choices(store)
        .await?
        .into_iter()
        .map(|employee| Choice {
            label: employee.to_string(),
            value: Value::Int(employee.id),
        })
        .collect();

    let answers = collect(
        prompter,
        &[
            Field::choice("employee_id", "Select the employee to update:", choices),
            Field::integer("role_id", "Enter the new role ID for the employee:"),
        ],
    )?;
    let employee_id = answers.integer("employee_id")?;
    let role_id = answers.integer("role_id")?;

    match queries::update_employee_role(store, employee_id, role_id).await? {
        0 => writeln!(out, "No employee with ID {employee_id}; nothing updated")?,
        _ => writeln!(out, "Employee's role updated successfully")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use staffctl_core::testing::memory_store;

    use super::*;
    use crate::prompt::scripted::{typed, Reply, ScriptedPrompter};

    #[tokio::test]
    async fn test_add_department_prompts_once() {
        let mut store = memory_store().await.unwrap();
        let mut prompter = ScriptedPrompter::new([typed("Research")]);
        let mut out = Vec::new();

        dispatch(MenuAction::AddDepartment, &mut store, &mut prompter, &mut out)
            .await
            .unwrap();

        assert_eq!(prompter.asked, vec!["Enter the name of the department:"]);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Department 'Research' added successfully with ID 1\n"
        );
    }

    #[tokio::test]
    async fn test_view_empty_table() {
        let mut store = memory_store().await.unwrap();
        let mut prompter = ScriptedPrompter::default();
        let mut out = Vec::new();

        dispatch(MenuAction::ViewEmployees, &mut store, &mut prompter, &mut out)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "(no rows)\n");
    }

    #[tokio::test]
    async fn test_update_offers_employees_by_full_name() {
        let mut store = memory_store().await.unwrap();
        queries::add_department(&mut store, "Ops").await.unwrap();
        let role = queries::add_role(
            &mut store,
            &NewRole {
                title: "Operator".into(),
                salary: 50000.into(),
                department_id: 1,
            },
        )
        .await
        .unwrap();
        for (first, last) in [("Ken", "Thompson"), ("Dennis", "Ritchie")] {
            queries::add_employee(
                &mut store,
                &NewEmployee {
                    first_name: first.into(),
                    last_name: last.into(),
                    role_id: role.id,
                    manager_id: None,
                },
            )
            .await
            .unwrap();
        }

        let mut prompter = ScriptedPrompter::new([Reply::Pick(1), typed("1")]);
        let mut out = Vec::new();

        dispatch(MenuAction::UpdateEmployeeRole, &mut store, &mut prompter, &mut out)
            .await
            .unwrap();

        assert_eq!(prompter.offered, vec![vec!["Ken Thompson", "Dennis Ritchie"]]);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Employee's role updated successfully\n"
        );
    }

    #[tokio::test]
    async fn test_add_role_with_unknown_department_fails() {
        let mut store = memory_store().await.unwrap();
        let mut prompter = ScriptedPrompter::new([typed("Ghost"), typed("10"), typed("7")]);
        let mut out = Vec::new();

        let err = dispatch(MenuAction::AddRole, &mut store, &mut prompter, &mut out)
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<staffctl_core::StoreError>().is_some());
        assert!(out.is_empty());
    }
}
