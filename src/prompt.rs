//! Prompt templates filled from a dispatcher's prefix arguments.
//!
//! Placeholders are `{}` for the next positional argument and `{N}` for an
//! explicit index. `{{` and `}}` produce literal braces; any other brace is
//! kept as written.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::PromptError;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{|\}\}|\{(\d*)\}").expect("Invalid Regex");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Argument(usize),
}

/// A parsed prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut next_positional = 0;
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            literal.push_str(&template[last..whole.start()]);
            last = whole.end();

            match (whole.as_str(), caps.get(1)) {
                ("{{", _) => literal.push('{'),
                ("}}", _) => literal.push('}'),
                (_, Some(index)) => {
                    let index = if index.as_str().is_empty() {
                        next_positional += 1;
                        next_positional - 1
                    } else {
                        match index.as_str().parse() {
                            Ok(index) => index,
                            Err(_) => {
                                literal.push_str(whole.as_str());
                                continue;
                            }
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Argument(index));
                }
                (other, None) => literal.push_str(other),
            }
        }
        literal.push_str(&template[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: template.to_string(),
            segments,
        }
    }

    /// The template as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fill the placeholders with `args`. Extra arguments are ignored.
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> Result<String, PromptError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Argument(index) => {
                    let arg = args
                        .get(*index)
                        .ok_or(PromptError::MissingArgument(*index))?;
                    out.push_str(arg.as_ref());
                }
            }
        }
        Ok(out)
    }

    /// The prompt shown when there are no prefix arguments: every placeholder is empty.
    pub fn render_static(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Literal(text) => Some(text.as_str()),
                Segment::Argument(_) => None,
            })
            .collect()
    }
}
