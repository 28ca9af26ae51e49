//! Menu loop
//!
//! One non-terminal state (awaiting a selection) and one terminal state.
//! Every operation returns here; only Exit, a lost connection, or a failed
//! menu prompt leaves the loop.

use std::fmt;
use std::io::Write;

use anyhow::Result;
use staffctl_core::{Store, StoreError};
use tracing::debug;

use crate::actions;
use crate::prompt::Prompter;

const MENU_MESSAGE: &str = "What would you like to do?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployeeRole,
    Exit,
}

impl MenuAction {
    /// Menu order
    pub const ALL: [MenuAction; 8] = [
        MenuAction::ViewDepartments,
        MenuAction::ViewRoles,
        MenuAction::ViewEmployees,
        MenuAction::AddDepartment,
        MenuAction::AddRole,
        MenuAction::AddEmployee,
        MenuAction::UpdateEmployeeRole,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ViewDepartments => "View all departments",
            MenuAction::ViewRoles => "View all roles",
            MenuAction::ViewEmployees => "View all employees",
            MenuAction::AddDepartment => "Add a department",
            MenuAction::AddRole => "Add a role",
            MenuAction::AddEmployee => "Add an employee",
            MenuAction::UpdateEmployeeRole => "Update an employee role",
            MenuAction::Exit => "Exit",
        }
    }

    /// Prefix printed in front of an operation's error
    pub fn failure_context(self) -> &'static str {
        match self {
            MenuAction::ViewDepartments => "Error viewing all departments",
            MenuAction::ViewRoles => "Error viewing all roles",
            MenuAction::ViewEmployees => "Error viewing all employees",
            MenuAction::AddDepartment => "Error adding department",
            MenuAction::AddRole => "Error adding role",
            MenuAction::AddEmployee => "Error adding employee",
            MenuAction::UpdateEmployeeRole => "Error updating employee role",
            MenuAction::Exit => "Error exiting",
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn select_action<P: Prompter + ?Sized>(prompter: &mut P) -> Result<MenuAction> {
    let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.label().to_string()).collect();
    let idx = prompter.select(MENU_MESSAGE, &labels)?;
    MenuAction::ALL
        .get(idx)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("menu selection {idx} out of range"))
}

/// A lost or unusable connection ends the session instead of the operation
fn is_connection_lost(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<StoreError>())
        .any(StoreError::is_connection_error)
}

/// Print a failed operation as `<context>: <message>` and carry on. A lost
/// connection is returned instead, with the context attached.
fn report_failure<E: Write>(action: MenuAction, err: anyhow::Error, errors: &mut E) -> Result<()> {
    if is_connection_lost(&err) {
        return Err(err.context(action.failure_context()));
    }
    debug!(action = %action, error = ?err, "operation failed");
    writeln!(errors, "{}: {}", action.failure_context(), err.root_cause())?;
    Ok(())
}

/// Run until Exit. Results go to `out`, failed operations to `errors`.
/// The caller owns `store` and closes it on every return path.
pub async fn run<P, W, E>(
    store: &mut Store,
    prompter: &mut P,
    out: &mut W,
    errors: &mut E,
) -> Result<()>
where
    P: Prompter + ?Sized,
    W: Write,
    E: Write,
{
    loop {
        let action = select_action(prompter)?;
        debug!(action = %action, "menu selection");

        if action == MenuAction::Exit {
            writeln!(out, "Goodbye!")?;
            return Ok(());
        }

        if let Err(err) = actions::dispatch(action, store, prompter, out).await {
            report_failure(action, err, errors)?;
        }
    }
}
