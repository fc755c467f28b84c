//! Command definitions: what a user registers and what the registry stores.

use std::{collections::HashSet, fmt, rc::Rc};

use super::{completion::Suggestion, dispatcher::Dispatcher};

/// Handler trait for commands that perform work themselves.
///
/// Closures with the matching signature implement it automatically; implement
/// it on a struct when the handler carries its own state.
pub trait CommandHandler {
    /// Execute the command with the arguments that followed its name.
    fn handle(
        &self,
        dispatcher: &Dispatcher,
        command: &RegisteredCommand,
        args: &[String],
    ) -> anyhow::Result<()>;
}

impl<F> CommandHandler for F
where
    F: Fn(&Dispatcher, &RegisteredCommand, &[String]) -> anyhow::Result<()>,
{
    fn handle(
        &self,
        dispatcher: &Dispatcher,
        command: &RegisteredCommand,
        args: &[String],
    ) -> anyhow::Result<()> {
        self(dispatcher, command, args)
    }
}

/// Suggests arguments given the arguments already completed.
pub type ArgumentCompleter = Rc<dyn Fn(&[String]) -> Vec<Suggestion>>;

/// Decides whether a full argument list is acceptable.
pub type ArgumentValidator = Rc<dyn Fn(&[String]) -> bool>;

/// A command as handed to [`super::CommandRegistry::register`].
///
/// Every field except the name is optional. Setting both a handler and a sub
/// dispatcher is allowed here but rejected at registration.
#[derive(Clone)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) handler: Option<Rc<dyn CommandHandler>>,
    pub(crate) sub_dispatcher: Option<Dispatcher>,
    pub(crate) argument_completer: Option<ArgumentCompleter>,
    pub(crate) options: Option<Vec<String>>,
    pub(crate) validator: Option<ArgumentValidator>,
}

impl Command {
    /// Create a command with the given name and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            handler: None,
            sub_dispatcher: None,
            argument_completer: None,
            options: None,
            validator: None,
        }
    }

    /// Set the description shown next to the name in suggestions.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Run `handler` when the command is dispatched.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Dispatcher, &RegisteredCommand, &[String]) -> anyhow::Result<()> + 'static,
    {
        self.handler = Some(Rc::new(handler));
        self
    }

    /// Run a [`CommandHandler`] implementation when the command is dispatched.
    pub fn with_command_handler(mut self, handler: impl CommandHandler + 'static) -> Self {
        self.handler = Some(Rc::new(handler));
        self
    }

    /// Forward the remaining arguments to `dispatcher`, which runs its own loop
    /// with them as prefix arguments.
    pub fn with_sub_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.sub_dispatcher = Some(dispatcher);
        self
    }

    /// Provide argument suggestions while the user types.
    pub fn with_argument_completer<F>(mut self, completer: F) -> Self
    where
        F: Fn(&[String]) -> Vec<Suggestion> + 'static,
    {
        self.argument_completer = Some(Rc::new(completer));
        self
    }

    /// Restrict the first argument to a fixed set of values.
    ///
    /// Ignored for validation when a custom validator is also set.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Validate the full argument list with a custom predicate.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&[String]) -> bool + 'static,
    {
        self.validator = Some(Rc::new(validator));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("has_handler", &self.handler.is_some())
            .field("has_sub_dispatcher", &self.sub_dispatcher.is_some())
            .field("options", &self.options)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// What happens when a command is dispatched. Decided once at registration.
#[derive(Clone)]
pub enum CommandAction {
    /// Call a handler.
    Handler(Rc<dyn CommandHandler>),
    /// Enter another dispatcher's run loop.
    SubDispatcher(Dispatcher),
    /// Nothing to run; dispatching reports the command as incomplete.
    Incomplete,
}

impl fmt::Debug for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandAction::Handler(_) => f.write_str("Handler"),
            CommandAction::SubDispatcher(_) => f.write_str("SubDispatcher"),
            CommandAction::Incomplete => f.write_str("Incomplete"),
        }
    }
}

/// A command owned by a registry, with its action resolved and its option set
/// precomputed.
#[derive(Clone)]
pub struct RegisteredCommand {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) action: CommandAction,
    pub(crate) argument_completer: Option<ArgumentCompleter>,
    pub(crate) options: Option<Vec<String>>,
    pub(crate) option_set: Option<HashSet<String>>,
    pub(crate) validator: Option<ArgumentValidator>,
}

impl RegisteredCommand {
    /// Resolve the action and option set of an already checked command.
    pub(crate) fn from_command(command: Command) -> Self {
        let action = match (command.handler, command.sub_dispatcher) {
            (Some(handler), _) => CommandAction::Handler(handler),
            (None, Some(dispatcher)) => CommandAction::SubDispatcher(dispatcher),
            (None, None) => CommandAction::Incomplete,
        };
        let option_set = command
            .options
            .as_ref()
            .map(|options| options.iter().cloned().collect());

        Self {
            name: command.name,
            description: command.description,
            action,
            argument_completer: command.argument_completer,
            options: command.options,
            option_set,
            validator: command.validator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn action(&self) -> &CommandAction {
        &self.action
    }

    /// The allowed first arguments, in the order they were given.
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    /// Argument suggestions for the completed arguments, if the command has a completer.
    pub fn complete_arguments(&self, args: &[String]) -> Option<Vec<Suggestion>> {
        self.argument_completer
            .as_ref()
            .map(|completer| completer(args))
    }
}

impl fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("action", &self.action)
            .field("options", &self.options)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}
