//! Interactive command system.
//!
//! Commands are registered on a [`Dispatcher`], which reads lines, splits them
//! on spaces, and routes `name args...` to the named command. A command either
//! runs a handler or hands its arguments to a sub dispatcher, whose run loop
//! takes over the terminal until its input ends.

pub mod command;
pub mod completion;
pub mod dispatcher;
pub mod parser;
pub mod registry;
pub mod validator;

pub use command::{Command, CommandAction, CommandHandler, RegisteredCommand};
pub use completion::{Suggestion, SuggestionSource, simple_suggestions};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use parser::tokenize;
pub use registry::CommandRegistry;
