//! Interactive prompt layer
//!
//! Operations describe what they need as a list of [`Field`]s; [`collect`]
//! asks for each one through a [`Prompter`] and coerces the answer to the
//! declared kind. Answers come back as [`Value`]s so they can be bound to a
//! statement directly.
//!
//! The terminal implementation uses `inquire`. Tests drive the same code with
//! a scripted prompter.

use std::collections::HashMap;
use std::str::FromStr;

use inquire::{InquireError, Select, Text};
use rust_decimal::Decimal;
use staffctl_core::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum PromptError {
    /// Esc or Ctrl-C at a prompt
    #[error("prompt cancelled")]
    Cancelled,

    /// No interactive terminal to prompt on
    #[error("input is not an interactive terminal")]
    Unavailable,

    /// A single-choice field had nothing to choose from
    #[error("nothing to choose for '{field}'")]
    NoChoices { field: &'static str },

    /// An answer was read that the caller never asked for
    #[error("no answer collected for '{field}'")]
    Missing { field: &'static str },

    #[error("prompt I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Other(String),
}

impl From<InquireError> for PromptError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => Self::Cancelled,
            InquireError::NotTTY => Self::Unavailable,
            InquireError::IO(e) => Self::Io(e),
            other => Self::Other(other.to_string()),
        }
    }
}

/// Source of raw answers
pub trait Prompter {
    /// Free-form line of input
    fn input(&mut self, message: &str, help: Option<&str>) -> Result<String, PromptError>;

    /// Pick one of `options`; returns its index
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize, PromptError>;
}

/// `inquire`-backed prompter for a real terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, message: &str, help: Option<&str>) -> Result<String, PromptError> {
        let mut prompt = Text::new(message);
        if let Some(help) = help {
            prompt = prompt.with_help_message(help);
        }
        Ok(prompt.prompt()?)
    }

    fn select(&mut self, message: &str, options: &[String]) -> Result<usize, PromptError> {
        let choice = Select::new(message, options.to_vec()).raw_prompt()?;
        Ok(choice.index)
    }
}

/// One selectable option: visible label, bound value
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    /// Integer that may be left blank (collected as `Value::Null`)
    OptionalInteger,
    Choice(Vec<Choice>),
}

impl FieldKind {
    fn help(&self) -> Option<&'static str> {
        match self {
            FieldKind::OptionalInteger => Some("Leave blank for none"),
            _ => None,
        }
    }

    /// Convert typed input to the declared kind
    fn coerce(&self, raw: &str) -> Result<Value, String> {
        let trimmed = raw.trim();
        match self {
            FieldKind::Text => Ok(Value::Text(raw.to_string())),
            FieldKind::Integer => i64::from_str(trimmed)
                .map(Value::Int)
                .map_err(|_| format!("'{raw}' is not a whole number")),
            FieldKind::OptionalInteger if trimmed.is_empty() => Ok(Value::Null),
            FieldKind::OptionalInteger => i64::from_str(trimmed)
                .map(Value::Int)
                .map_err(|_| format!("'{raw}' is not a whole number (leave blank for none)")),
            FieldKind::Decimal => Decimal::from_str(trimmed)
                .map(Value::Decimal)
                .map_err(|_| format!("'{raw}' is not a number")),
            FieldKind::Choice(_) => Err("choice fields are selected, not typed".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub message: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub fn text(name: &'static str, message: &'static str) -> Self {
        Self { name, message, kind: FieldKind::Text }
    }

    pub fn integer(name: &'static str, message: &'static str) -> Self {
        Self { name, message, kind: FieldKind::Integer }
    }

    pub fn decimal(name: &'static str, message: &'static str) -> Self {
        Self { name, message, kind: FieldKind::Decimal }
    }

    pub fn optional_integer(name: &'static str, message: &'static str) -> Self {
        Self { name, message, kind: FieldKind::OptionalInteger }
    }

    pub fn choice(name: &'static str, message: &'static str, choices: Vec<Choice>) -> Self {
        Self { name, message, kind: FieldKind::Choice(choices) }
    }
}

/// Collected answers keyed by field name
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Answers {
    values: HashMap<&'static str, Value>,
}

impl Answers {
    pub fn get(&self, field: &'static str) -> Result<&Value, PromptError> {
        self.values.get(field).ok_or(PromptError::Missing { field })
    }

    pub fn text(&self, field: &'static str) -> Result<String, PromptError> {
        match self.get(field)? {
            Value::Text(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }

    pub fn integer(&self, field: &'static str) -> Result<i64, PromptError> {
        self.get(field)?.as_i64().ok_or(PromptError::Missing { field })
    }

    pub fn optional_integer(&self, field: &'static str) -> Result<Option<i64>, PromptError> {
        match self.get(field)? {
            Value::Null => Ok(None),
            value => value.as_i64().map(Some).ok_or(PromptError::Missing { field }),
        }
    }

    pub fn decimal(&self, field: &'static str) -> Result<Decimal, PromptError> {
        self.get(field)?.as_decimal().ok_or(PromptError::Missing { field })
    }
}

/// Ask for every field in order. Input that does not coerce is reported and
/// asked again; cancellation aborts the whole collection.
pub fn collect<P: Prompter + ?Sized>(prompter: &mut P, fields: &[Field]) -> Result<Answers, PromptError> {
    let mut answers = Answers::default();

    for field in fields {
        let value = match &field.kind {
            FieldKind::Choice(choices) => {
                if choices.is_empty() {
                    return Err(PromptError::NoChoices { field: field.name });
                }
                let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
                let idx = prompter.select(field.message, &labels)?;
                choices
                    .get(idx)
                    .map(|c| c.value.clone())
                    .ok_or(PromptError::Missing { field: field.name })?
            }
            kind => loop {
                let raw = prompter.input(field.message, kind.help())?;
                match kind.coerce(&raw) {
                    Ok(value) => break value,
                    Err(reason) => warn!(field = field.name, "{reason}; try again"),
                }
            },
        };
        answers.values.insert(field.name, value);
    }

    Ok(answers)
}


#[cfg(test)]
mod tests {
    use super::scripted::{typed, Reply, ScriptedPrompter};
    use super::*;

    #[test]
    fn test_collect_typed_fields() {
        let mut prompter = ScriptedPrompter::new([typed("Engineer"), typed(" 80000.50 "), typed("1")]);
        let answers = collect(
            &mut prompter,
            &[
                Field::text("title", "Enter the title of the role:"),
                Field::decimal("salary", "Enter the salary for the role:"),
                Field::integer("department_id", "Enter the department ID for the role:"),
            ],
        )
        .unwrap();

        assert_eq!(answers.text("title").unwrap(), "Engineer");
        assert_eq!(answers.decimal("salary").unwrap(), Decimal::new(8000050, 2));
        assert_eq!(answers.integer("department_id").unwrap(), 1);
    }

    #[test]
    fn test_invalid_number_is_reprompted() {
        let mut prompter = ScriptedPrompter::new([typed("lots"), typed("12.5"), typed("3")]);
        let answers = collect(&mut prompter, &[Field::integer("role_id", "Role ID:")]).unwrap();

        assert_eq!(answers.integer("role_id").unwrap(), 3);
        assert_eq!(prompter.asked.len(), 3);
    }

    #[test]
    fn test_blank_optional_is_null() {
        let mut prompter = ScriptedPrompter::new([typed("   ")]);
        let answers = collect(&mut prompter, &[Field::optional_integer("manager_id", "Manager ID:")]).unwrap();

        assert_eq!(answers.get("manager_id").unwrap(), &Value::Null);
        assert_eq!(answers.optional_integer("manager_id").unwrap(), None);
    }

    #[test]
    fn test_choice_maps_label_to_value() {
        let choices = vec![
            Choice { label: "Ada Lovelace".into(), value: Value::Int(10) },
            Choice { label: "Alan Turing".into(), value: Value::Int(20) },
        ];
        let mut prompter = ScriptedPrompter::new([Reply::Pick(1)]);
        let answers = collect(&mut prompter, &[Field::choice("employee_id", "Select:", choices)]).unwrap();

        assert_eq!(answers.integer("employee_id").unwrap(), 20);
        assert_eq!(prompter.offered[0], vec!["Ada Lovelace", "Alan Turing"]);
    }

    #[test]
    fn test_empty_choice_list_fails() {
        let mut prompter = ScriptedPrompter::default();
        let err = collect(&mut prompter, &[Field::choice("employee_id", "Select:", vec![])]).unwrap_err();
        assert!(matches!(err, PromptError::NoChoices { field: "employee_id" }));
    }

    #[test]
    fn test_cancel_aborts_collection() {
        let mut prompter = ScriptedPrompter::new([typed("Ada"), Reply::Cancel, typed("unused")]);
        let err = collect(
            &mut prompter,
            &[Field::text("first_name", "First:"), Field::text("last_name", "Last:")],
        )
        .unwrap_err();

        assert!(matches!(err, PromptError::Cancelled));
        assert_eq!(prompter.remaining(), 1);
    }

    #[test]
    fn test_missing_answer() {
        let answers = Answers::default();
        assert!(matches!(answers.integer("role_id"), Err(PromptError::Missing { field: "role_id" })));
    }
}
