//! Command dispatcher: the interactive run loop and per-line dispatch.

use std::{
    cell::RefCell,
    fmt,
    io::{self, Write},
    rc::Rc,
};

use super::{
    command::{Command, CommandAction, RegisteredCommand},
    completion::{self, Suggestion, SuggestionSource},
    parser::tokenize,
    registry::CommandRegistry,
    validator::is_valid,
};
use crate::{
    config::{CommanderConfig, CompletionConfig, EditorConfig},
    editor::{LineEditor, ReadOutcome, RustylineEditor},
    error::{CommanderResult, DispatchError, RegistrationError},
    prompt::PromptTemplate,
};

/// Runs an interactive loop over a set of registered commands.
///
/// `Dispatcher` is a cheap handle: clones share the same registry and state.
/// That is how a command refers to a sub dispatcher without owning it. All
/// state lives behind `Rc`/`RefCell`, so a dispatcher stays on the thread
/// that created it.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Rc<DispatcherInner>,
}

struct DispatcherInner {
    registry: RefCell<CommandRegistry>,
    prefix_args: RefCell<Vec<String>>,
    template: PromptTemplate,
    writer: RefCell<Box<dyn Write>>,
    completion: CompletionConfig,
    editor_config: EditorConfig,
    /// Created on the first `run` unless one was supplied.
    editor: RefCell<Option<Box<dyn LineEditor>>>,
}

impl Dispatcher {
    /// Create a dispatcher with the given prompt template and default settings.
    pub fn new(prefix_template: &str) -> Self {
        DispatcherBuilder::new(prefix_template).build()
    }

    /// Start building a dispatcher.
    pub fn builder(prefix_template: &str) -> DispatcherBuilder {
        DispatcherBuilder::new(prefix_template)
    }

    /// Register a command. See [`CommandRegistry::register`].
    pub fn add_command(&self, command: Command) -> Result<(), RegistrationError> {
        self.inner.registry.borrow_mut().register(command)
    }

    /// The prefix arguments of the current run; empty outside `run`.
    pub fn prefix_args(&self) -> Vec<String> {
        self.inner.prefix_args.borrow().clone()
    }

    /// Replace the sink that receives error and status lines.
    pub fn set_writer(&self, writer: impl Write + 'static) {
        *self.inner.writer.borrow_mut() = Box::new(writer);
    }

    /// Replace the line editor used by `run`.
    pub fn set_editor(&self, editor: impl LineEditor + 'static) {
        *self.inner.editor.borrow_mut() = Some(Box::new(editor));
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> Vec<RegisteredCommand> {
        self.inner.registry.borrow().commands().cloned().collect()
    }

    /// Registered command names, in registration order.
    pub fn command_names(&self) -> Vec<String> {
        self.inner
            .registry
            .borrow()
            .commands()
            .map(|command| command.name().to_string())
            .collect()
    }

    /// Look up a registered command.
    pub fn command(&self, name: &str) -> Option<RegisteredCommand> {
        self.inner.registry.borrow().get(name).cloned()
    }

    /// Whether `other` is a handle to the same dispatcher.
    pub fn ptr_eq(&self, other: &Dispatcher) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The prompt for the current prefix arguments.
    ///
    /// Without prefix arguments the template is shown with empty placeholders.
    /// If there are too few arguments for the template, the same static
    /// prompt is used.
    pub fn prompt(&self) -> String {
        let template = &self.inner.template;
        let prefix_args = self.inner.prefix_args.borrow();
        if prefix_args.is_empty() {
            return template.render_static();
        }
        template.render(prefix_args.as_slice()).unwrap_or_else(|err| {
            tracing::warn!(
                template = template.source(),
                error = %err,
                "prompt template does not match prefix arguments"
            );
            template.render_static()
        })
    }

    /// Process lines until the line editor reports end of input.
    ///
    /// `prefix_args` become this dispatcher's prefix state for the whole run
    /// and the previous prefix is restored when the loop ends, so a dispatcher
    /// re-entered from one of its own commands resumes with its outer prefix.
    /// Errors from individual commands are written to the output sink and the
    /// loop continues; only line editor failures are returned.
    pub fn run<I, S>(&self, prefix_args: I) -> CommanderResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefix_args: Vec<String> = prefix_args.into_iter().map(Into::into).collect();
        tracing::debug!(?prefix_args, "entering run loop");
        let previous = self.inner.prefix_args.replace(prefix_args);

        let result = self.run_loop();

        *self.inner.prefix_args.borrow_mut() = previous;
        result
    }

    fn run_loop(&self) -> CommanderResult<()> {
        loop {
            let prompt = self.prompt();
            match self.read_line(&prompt)? {
                ReadOutcome::Line(line) => self.dispatch_line(&line),
                outcome => {
                    tracing::debug!(?outcome, "leaving run loop");
                    return Ok(());
                }
            }
        }
    }

    fn read_line(&self, prompt: &str) -> CommanderResult<ReadOutcome> {
        let mut slot = self.inner.editor.borrow_mut();
        let editor: Box<dyn LineEditor> = match slot.take() {
            Some(editor) => editor,
            None => Box::new(RustylineEditor::with_config(&self.inner.editor_config)?),
        };
        let editor = slot.insert(editor);
        let source: Rc<dyn SuggestionSource> = Rc::new(self.clone());
        editor.read_line(prompt, source)
    }

    /// Dispatch one submitted line, writing any failure to the output sink.
    pub fn dispatch_line(&self, raw: &str) {
        if let Err(err) = self.execute(raw) {
            tracing::debug!(line = raw, error = %err, "dispatch failed");
            self.write_line(&err.to_string());
        }
    }

    /// Dispatch one line and return the outcome instead of reporting it.
    pub fn execute(&self, raw: &str) -> Result<(), DispatchError> {
        let tokens = tokenize(raw);
        let Some((name, args)) = tokens.split_first() else {
            return Ok(());
        };

        // Clone out of the registry so handlers may register commands.
        let command = self
            .command(name)
            .ok_or_else(|| DispatchError::NotFound(name.clone()))?;

        if !is_valid(&command, args) {
            return Err(DispatchError::InvalidArguments(args.to_vec()));
        }

        tracing::debug!(command = %name, ?args, action = ?command.action, "dispatching");
        match &command.action {
            CommandAction::Handler(handler) => handler
                .handle(self, &command, args)
                .map_err(DispatchError::Handler),
            CommandAction::SubDispatcher(child) => child
                .run(args.iter().cloned())
                .map_err(DispatchError::SubDispatcher),
            CommandAction::Incomplete => Err(DispatchError::Incomplete(name.clone())),
        }
    }

    /// Completion suggestions for the text before the cursor.
    pub fn complete(&self, text_before_cursor: &str, word_before_cursor: &str) -> Vec<Suggestion> {
        completion::complete(
            &self.inner.registry.borrow(),
            text_before_cursor,
            word_before_cursor,
            &self.inner.completion,
        )
    }

    /// Write one line to the output sink.
    pub fn write_line(&self, line: &str) {
        let mut writer = self.inner.writer.borrow_mut();
        if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
            tracing::warn!(error = %e, "failed to write to output sink");
        }
    }
}

impl SuggestionSource for Dispatcher {
    fn suggestions(&self, text_before_cursor: &str, word_before_cursor: &str) -> Vec<Suggestion> {
        self.complete(text_before_cursor, word_before_cursor)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("template", &self.inner.template.source())
            .field("prefix_args", &self.inner.prefix_args.borrow())
            .field("commands", &self.command_names())
            .finish()
    }
}

/// Builder for a [`Dispatcher`].
pub struct DispatcherBuilder {
    template: PromptTemplate,
    writer: Box<dyn Write>,
    completion: CompletionConfig,
    editor_config: EditorConfig,
    editor: Option<Box<dyn LineEditor>>,
}

impl DispatcherBuilder {
    pub fn new(prefix_template: &str) -> Self {
        Self {
            template: PromptTemplate::parse(prefix_template),
            writer: Box::new(io::stdout()),
            completion: CompletionConfig::default(),
            editor_config: EditorConfig::default(),
            editor: None,
        }
    }

    /// Apply the completion and editor sections of a configuration.
    pub fn config(mut self, config: &CommanderConfig) -> Self {
        self.completion = config.completion.clone();
        self.editor_config = config.editor.clone();
        self
    }

    pub fn completion(mut self, completion: CompletionConfig) -> Self {
        self.completion = completion;
        self
    }

    /// Set the sink for error and status lines. Defaults to stdout.
    pub fn writer(mut self, writer: impl Write + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Use this line editor instead of a terminal one.
    pub fn editor(mut self, editor: impl LineEditor + 'static) -> Self {
        self.editor = Some(Box::new(editor));
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            inner: Rc::new(DispatcherInner {
                registry: RefCell::new(CommandRegistry::new()),
                prefix_args: RefCell::new(Vec::new()),
                template: self.template,
                writer: RefCell::new(self.writer),
                completion: self.completion,
                editor_config: self.editor_config,
                editor: RefCell::new(self.editor),
            }),
        }
    }
}
