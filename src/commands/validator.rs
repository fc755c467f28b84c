//! Argument validation policy.

use super::command::RegisteredCommand;

/// Check whether `args` (the tokens after the command name) are acceptable.
///
/// A custom validator wins outright. Otherwise an option set only constrains
/// the first argument, which must be present. Commands with neither accept
/// anything.
pub fn is_valid(command: &RegisteredCommand, args: &[String]) -> bool {
    if let Some(validator) = &command.validator {
        return validator(args);
    }
    match &command.option_set {
        Some(option_set) => args
            .first()
            .is_some_and(|first| option_set.contains(first.as_str())),
        None => true,
    }
}
