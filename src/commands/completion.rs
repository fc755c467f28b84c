//! Completion engine: suggestions for the text typed so far.

use serde::{Deserialize, Serialize};

use super::{
    parser::{split_command_name, tokenize},
    registry::CommandRegistry,
};
use crate::config::CompletionConfig;

/// A completion candidate: the text to insert and a description to show next to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(default)]
    pub description: String,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }
}

/// Build suggestions without descriptions.
pub fn simple_suggestions<I, S>(texts: I) -> Vec<Suggestion>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts
        .into_iter()
        .map(|text| Suggestion::new(text, ""))
        .collect()
}

/// Anything that can answer completion requests from a line editor.
pub trait SuggestionSource {
    fn suggestions(&self, text_before_cursor: &str, word_before_cursor: &str) -> Vec<Suggestion>;
}

/// Keep the suggestions whose text starts with `word`. An empty word keeps everything.
pub fn filter_has_prefix(
    suggestions: Vec<Suggestion>,
    word: &str,
    config: &CompletionConfig,
) -> Vec<Suggestion> {
    if word.is_empty() {
        return suggestions;
    }
    if config.case_sensitive {
        suggestions
            .into_iter()
            .filter(|s| s.text.starts_with(word))
            .collect()
    } else {
        let word = word.to_lowercase();
        suggestions
            .into_iter()
            .filter(|s| s.text.to_lowercase().starts_with(&word))
            .collect()
    }
}

/// Compute suggestions for the current input.
///
/// Until a known command name has been typed, every command name is a
/// candidate. After that, the command's argument completer receives the
/// arguments completed so far; the word still being typed is left out so a
/// completer sees `[]` for `build li`. A known command without a completer
/// suggests nothing. The result is always filtered by `word_before_cursor`.
pub fn complete(
    registry: &CommandRegistry,
    text_before_cursor: &str,
    word_before_cursor: &str,
    config: &CompletionConfig,
) -> Vec<Suggestion> {
    let candidates = match split_command_name(text_before_cursor)
        .and_then(|(name, rest)| registry.get(name).map(|command| (command, rest)))
    {
        Some((command, rest)) => {
            let mut args = tokenize(rest);
            if !rest.is_empty() && !text_before_cursor.ends_with(' ') {
                args.pop();
            }
            command.complete_arguments(&args).unwrap_or_default()
        }
        None => registry.suggestions().to_vec(),
    };
    filter_has_prefix(candidates, word_before_cursor, config)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::commands::command::Command;

    fn texts(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.text.as_str()).collect()
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry
            .register(Command::new("bar").with_description("the bar"))
            .unwrap();
        registry.register(Command::new("baz")).unwrap();
        registry.register(Command::new("foo")).unwrap();
        registry
            .register(Command::new("build").with_argument_completer(|args| {
                match args.first().map(String::as_str) {
                    None => simple_suggestions(["linux", "windows"]),
                    Some("linux") => simple_suggestions(["x86", "x64", "arm"]),
                    Some("windows") => simple_suggestions(["x86", "x64"]),
                    Some(_) => Vec::new(),
                }
            }))
            .unwrap();
        registry
    }

    #[test]
    fn test_command_names_filtered_in_registration_order() {
        let result = complete(&registry(), "b", "b", &CompletionConfig::default());
        assert_eq!(texts(&result), ["bar", "baz", "build"]);
        assert_eq!(result[0].description, "the bar");
    }

    #[test]
    fn test_command_names_without_build() {
        let mut registry = CommandRegistry::new();
        for name in ["bar", "baz", "foo"] {
            registry.register(Command::new(name)).unwrap();
        }
        let result = complete(&registry, "b", "b", &CompletionConfig::default());
        assert_eq!(texts(&result), ["bar", "baz"]);
    }

    #[test]
    fn test_empty_input_suggests_every_command() {
        let result = complete(&registry(), "", "", &CompletionConfig::default());
        assert_eq!(texts(&result), ["bar", "baz", "foo", "build"]);
    }

    #[test]
    fn test_argument_completion_filters_last_word() {
        let result = complete(&registry(), "build li", "li", &CompletionConfig::default());
        assert_eq!(texts(&result), ["linux"]);
    }

    #[test]
    fn test_argument_completion_after_trailing_space() {
        let result = complete(&registry(), "build linux ", "", &CompletionConfig::default());
        assert_eq!(texts(&result), ["x86", "x64", "arm"]);
    }

    #[test]
    fn test_completer_receives_completed_arguments() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = seen.clone();
        let mut registry = CommandRegistry::new();
        registry
            .register(Command::new("env").with_argument_completer(move |args| {
                recorder.borrow_mut().push(args.to_vec());
                Vec::new()
            }))
            .unwrap();

        let config = CompletionConfig::default();
        complete(&registry, "env", "env", &config);
        complete(&registry, "env pr", "pr", &config);
        complete(&registry, "env   prod  ", "", &config);

        assert_eq!(
            *seen.borrow(),
            vec![Vec::<String>::new(), Vec::new(), vec!["prod".to_string()]]
        );
    }

    #[test]
    fn test_known_command_without_completer_suggests_nothing() {
        let result = complete(&registry(), "foo ", "", &CompletionConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_typing_full_command_name_filters_its_arguments() {
        let result = complete(&registry(), "build", "build", &CompletionConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_case_sensitivity_is_configurable() {
        let insensitive = CompletionConfig::default();
        let sensitive = CompletionConfig {
            case_sensitive: true,
        };
        assert_eq!(texts(&complete(&registry(), "B", "B", &insensitive)), ["bar", "baz", "build"]);
        assert!(complete(&registry(), "B", "B", &sensitive).is_empty());
    }

    #[test]
    fn test_simple_suggestions_have_empty_descriptions() {
        let suggestions = simple_suggestions(["prod", "dev"]);
        assert_eq!(suggestions[1], Suggestion::new("dev", ""));
    }
}
