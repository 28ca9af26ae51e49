//! staffctl - interactive menu over the department / role / employee tables
//!
//! The binary wires these together: [`config::load_dotenv`], then
//! [`tracing_setup::init`], then one [`staffctl_core::Store`] handed to
//! [`menu::run`] with a [`prompt::TerminalPrompter`].

pub mod actions;
pub mod config;
pub mod menu;
pub mod prompt;
pub mod tracing_setup;

pub use menu::{run, MenuAction};
pub use prompt::{Prompter, TerminalPrompter};
