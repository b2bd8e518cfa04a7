//! Nodes of the menu tree.
//!
//! An [`Item`] is anything a [`Menu`](crate::menu::Menu) can list and run:
//! sub-menus, application actions, or the exit entry. Items report failures
//! through [`ActionError`], whose variant decides who handles them.

use std::fmt;

use thiserror::Error;

use crate::io::terminal::InputOutput;

/// Outcome of running an item.
pub type ActionResult = Result<(), ActionError>;

/// Failure raised by an item's action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// User-facing misuse. The enclosing menu prints the message and keeps going.
    #[error("{0}")]
    Recoverable(String),
    /// Anything else. Propagates through every enclosing menu.
    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

impl ActionError {
    pub fn recoverable(message: impl Into<String>) -> Self {
        Self::Recoverable(message.into())
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable(_))
    }
}

/// A node in the menu tree.
pub trait Item {
    /// Label shown next to the item's number.
    fn display_name(&self) -> &str;

    /// Run the item against the terminal.
    fn perform(&self, io: &mut dyn InputOutput) -> ActionResult;

    /// Whether running this item ends the enclosing menu's loop.
    fn is_exit(&self) -> bool {
        false
    }
}

type Action = Box<dyn Fn(&mut dyn InputOutput) -> ActionResult>;

/// Leaf item backed by a closure.
pub struct ActionItem {
    name: String,
    action: Action,
    exit: bool,
}

impl ActionItem {
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut dyn InputOutput) -> ActionResult + 'static,
    {
        Self {
            name: name.into(),
            action: Box::new(action),
            exit: false,
        }
    }

    /// Make the enclosing menu return after this action completes normally.
    pub fn then_exit(mut self) -> Self {
        self.exit = true;
        self
    }
}

impl fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("name", &self.name)
            .field("exit", &self.exit)
            .finish_non_exhaustive()
    }
}

impl Item for ActionItem {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn perform(&self, io: &mut dyn InputOutput) -> ActionResult {
        (self.action)(io)
    }

    fn is_exit(&self) -> bool {
        self.exit
    }
}

/// Item that does nothing and ends the enclosing menu.
#[derive(Debug, Clone)]
pub struct ExitItem {
    name: String,
}

impl ExitItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ExitItem {
    fn default() -> Self {
        Self::new("Exit")
    }
}

impl Item for ExitItem {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn perform(&self, _io: &mut dyn InputOutput) -> ActionResult {
        Ok(())
    }

    fn is_exit(&self) -> bool {
        true
    }
}
