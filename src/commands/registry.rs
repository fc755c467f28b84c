//! Command registry: name → command, plus the ordered suggestion list.

use std::collections::HashMap;

use super::{
    command::{Command, RegisteredCommand},
    completion::Suggestion,
};
use crate::error::RegistrationError;

/// Registry of the commands known to one dispatcher.
///
/// Names are unique. Suggestions keep registration order, so the first
/// registered command is the first suggested.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    /// Map of command name to registered command.
    commands: HashMap<String, RegisteredCommand>,
    /// Command name suggestions in registration order.
    suggestions: Vec<Suggestion>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// All checks run before anything is stored, so a failed registration
    /// leaves the registry unchanged.
    pub fn register(&mut self, command: Command) -> Result<(), RegistrationError> {
        if let Err(err) = self.check(&command) {
            tracing::warn!(command = %command.name, error = %err, "rejected command registration");
            return Err(err);
        }

        let registered = RegisteredCommand::from_command(command);
        tracing::debug!(
            command = %registered.name,
            action = ?registered.action,
            "registered command"
        );
        self.suggestions.push(Suggestion::new(
            registered.name.clone(),
            registered.description.clone(),
        ));
        self.commands.insert(registered.name.clone(), registered);
        Ok(())
    }

    fn check(&self, command: &Command) -> Result<(), RegistrationError> {
        if command.name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        if self.contains(&command.name) {
            return Err(RegistrationError::DuplicateName(command.name.clone()));
        }
        if command.handler.is_some() && command.sub_dispatcher.is_some() {
            return Err(RegistrationError::ConflictingDispatch(command.name.clone()));
        }
        Ok(())
    }

    /// Get a command by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    /// Check if a command is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Command name suggestions in registration order.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.suggestions
            .iter()
            .filter_map(|suggestion| self.commands.get(&suggestion.text))
    }

    /// Get the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
