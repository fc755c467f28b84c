//! Line editor boundary.
//!
//! The dispatcher only needs three things from a line editor: a submitted
//! line, completion requests while the user types, and a signal that input
//! has ended. [`RustylineEditor`] provides them on a terminal.

use std::rc::Rc;

use rustyline::{
    Context, Editor, Helper,
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
};

use crate::{
    commands::{SuggestionSource, parser::word_before_cursor},
    config::{CompletionType, EditMode, EditorConfig},
    error::{CommanderError, CommanderResult},
};

/// What the line editor produced for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The user submitted a line.
    Line(String),
    /// The user pressed Ctrl-C.
    Interrupted,
    /// Input ended (Ctrl-D or end of stream).
    Eof,
}

/// A source of input lines for a dispatcher's run loop.
pub trait LineEditor {
    /// Show `prompt` and read one line. `completer` answers completion
    /// requests made while this line is being edited.
    fn read_line(
        &mut self,
        prompt: &str,
        completer: Rc<dyn SuggestionSource>,
    ) -> CommanderResult<ReadOutcome>;
}

/// Completion helper installed on the rustyline editor for one read.
pub struct CompletionHelper {
    source: Rc<dyn SuggestionSource>,
}

impl CompletionHelper {
    pub fn new(source: Rc<dyn SuggestionSource>) -> Self {
        Self { source }
    }
}

impl Completer for CompletionHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let text = &line[..pos];
        let word = word_before_cursor(text);
        let start = pos - word.len();
        let pairs = self
            .source
            .suggestions(text, word)
            .into_iter()
            .map(|suggestion| Pair {
                display: if suggestion.description.is_empty() {
                    suggestion.text.clone()
                } else {
                    format!("{:<16} {}", suggestion.text, suggestion.description)
                },
                replacement: suggestion.text,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CompletionHelper {
    type Hint = String;
}

impl Highlighter for CompletionHelper {}

impl Validator for CompletionHelper {}

impl Helper for CompletionHelper {}

/// Terminal line editor backed by `rustyline`.
pub struct RustylineEditor {
    editor: Editor<CompletionHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Create an editor with the given settings.
    pub fn with_config(config: &EditorConfig) -> CommanderResult<Self> {
        let edit_mode = match config.edit_mode {
            EditMode::Emacs => rustyline::EditMode::Emacs,
            EditMode::Vi => rustyline::EditMode::Vi,
        };
        let completion_type = match config.completion_type {
            CompletionType::List => rustyline::CompletionType::List,
            CompletionType::Circular => rustyline::CompletionType::Circular,
        };
        let rl_config = rustyline::Config::builder()
            .edit_mode(edit_mode)
            .completion_type(completion_type)
            .auto_add_history(config.auto_add_history)
            .max_history_size(config.max_history)
            .map_err(editor_error)?
            .build();

        let editor = Editor::with_config(rl_config).map_err(editor_error)?;
        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(
        &mut self,
        prompt: &str,
        completer: Rc<dyn SuggestionSource>,
    ) -> CommanderResult<ReadOutcome> {
        self.editor.set_helper(Some(CompletionHelper::new(completer)));
        let result = self.editor.readline(prompt);
        // The helper holds a dispatcher handle; drop it so the editor does not
        // keep its owner alive.
        self.editor.set_helper(None);

        match result {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(editor_error(e)),
        }
    }
}

fn editor_error(err: ReadlineError) -> CommanderError {
    CommanderError::Editor(err.to_string())
}
