//! Commander: an interactive command dispatcher with nested command scopes
//! and context-sensitive completion.

pub mod cli;
pub mod commands;
pub mod config;
pub mod demo;
pub mod editor;
pub mod error;
pub mod prompt;

pub use commands::{Command, Dispatcher, Suggestion};
pub use error::{CommanderError, CommanderResult, DispatchError, RegistrationError};
