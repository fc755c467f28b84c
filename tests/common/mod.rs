//! Shared test utilities: an in-memory output sink and a scripted line editor.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, Write},
    rc::Rc,
};

use commander::{
    CommanderError, CommanderResult,
    commands::{SuggestionSource, parser::word_before_cursor},
    editor::{LineEditor, ReadOutcome},
};

/// Output sink whose contents can be inspected after the run.
#[derive(Clone, Default)]
pub struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl SharedSink {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One scripted terminal event.
#[derive(Debug, Clone)]
pub enum Step {
    Line(&'static str),
    Interrupt,
    Eof,
    Fail(&'static str),
}

/// What the scripted editor observed.
#[derive(Debug, Default)]
pub struct Transcript {
    /// Prompt shown for every read, in order.
    pub prompts: Vec<String>,
    /// Suggestion texts computed for every submitted line, as if Tab was
    /// pressed right before Enter.
    pub completions: Vec<Vec<String>>,
}

/// Line editor that replays a script shared by every dispatcher in a test,
/// the way nested dispatchers share one terminal.
#[derive(Clone)]
pub struct ScriptedEditor {
    script: Rc<RefCell<VecDeque<Step>>>,
    transcript: Rc<RefCell<Transcript>>,
}

impl ScriptedEditor {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Rc::new(RefCell::new(steps.into_iter().collect())),
            transcript: Rc::new(RefCell::new(Transcript::default())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.transcript.borrow().prompts.clone()
    }

    pub fn completions(&self) -> Vec<Vec<String>> {
        self.transcript.borrow().completions.clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(
        &mut self,
        prompt: &str,
        completer: Rc<dyn SuggestionSource>,
    ) -> CommanderResult<ReadOutcome> {
        self.transcript.borrow_mut().prompts.push(prompt.to_string());
        let step = self.script.borrow_mut().pop_front().unwrap_or(Step::Eof);
        match step {
            Step::Line(line) => {
                let suggestions = completer
                    .suggestions(line, word_before_cursor(line))
                    .into_iter()
                    .map(|s| s.text)
                    .collect();
                self.transcript.borrow_mut().completions.push(suggestions);
                Ok(ReadOutcome::Line(line.to_string()))
            }
            Step::Interrupt => Ok(ReadOutcome::Interrupted),
            Step::Eof => Ok(ReadOutcome::Eof),
            Step::Fail(message) => Err(CommanderError::Editor(message.to_string())),
        }
    }
}
