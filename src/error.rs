//! Error types for registration, dispatch and the run loop.

use thiserror::Error;

/// Errors returned by [`crate::commands::CommandRegistry::register`].
///
/// These describe configuration mistakes, so they are handed back to the caller
/// instead of being printed to the output sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The command has an empty name.
    #[error("Command name is missing")]
    MissingName,

    /// A command with the same name is already registered.
    #[error("Command {0} already registered")]
    DuplicateName(String),

    /// The command sets both a handler and a sub dispatcher.
    #[error("Command {0} sets both a handler and a sub dispatcher")]
    ConflictingDispatch(String),
}

/// Failures that can happen while dispatching a single input line.
///
/// The `Display` output of each variant is exactly the line written to the
/// dispatcher's output sink.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No command with this name is registered.
    #[error("Command {0} not found")]
    NotFound(String),

    /// The command's validation policy rejected the arguments.
    #[error("Invalid arguments [{}]", .0.join(" "))]
    InvalidArguments(Vec<String>),

    /// The command has neither a handler nor a sub dispatcher.
    #[error("Command {0} incomplete")]
    Incomplete(String),

    /// The handler returned an error. The whole context chain is shown.
    #[error("ERROR: {0:#}")]
    Handler(anyhow::Error),

    /// The sub dispatcher's run loop failed.
    #[error("ERROR: {0}")]
    SubDispatcher(#[source] CommanderError),
}

/// Errors that can end a run loop or fail setup.
#[derive(Debug, Error)]
pub enum CommanderError {
    /// The line editor could not be created or failed while reading.
    #[error("Line editor error: {0}")]
    Editor(String),

    /// IO error while reading configuration or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A command could not be registered.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Errors from rendering a prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// The template references a positional argument that was not supplied.
    #[error("Prompt template expects argument {0} but it was not supplied")]
    MissingArgument(usize),
}

/// Result type for commander operations.
pub type CommanderResult<T> = Result<T, CommanderError>;
