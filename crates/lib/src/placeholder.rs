//! Placeholder parsing and substitution for compiler arguments.
//!
//! Compiler arguments in the config file are templates: the binary path and
//! source entry point differ per target and are only known once the target's
//! output directory exists.
//!
//! # Placeholder Formats
//!
//! - `{output}` - path of the binary the compiler must produce
//! - `{source}` - path of the source entry point
//!
//! # Escaping
//!
//! `{{` produces a literal `{` and `}}` a literal `}`.
//!
//! # Example
//!
//! ```
//! use crossrel_lib::placeholder::{parse, Placeholder, Segment};
//!
//! let segments = parse("-o={output}").unwrap();
//! assert_eq!(segments, vec![
//!     Segment::Literal("-o=".to_string()),
//!     Segment::Placeholder(Placeholder::Output),
//! ]);
//! ```

use thiserror::Error;

/// A parsed placeholder reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
  /// `{output}` - the binary path
  Output,

  /// `{source}` - the source entry point
  Source,
}

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text (no placeholders)
  Literal(String),

  /// A placeholder to be resolved
  Placeholder(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  #[error("unmatched '}}' at position {0}")]
  UnmatchedClose(usize),

  #[error("unknown placeholder: {{{0}}}")]
  Unknown(String),
}

/// Values substituted for placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Substitutions<'a> {
  pub output: &'a str,
  pub source: &'a str,
}

impl Substitutions<'_> {
  fn resolve(&self, placeholder: Placeholder) -> &str {
    match placeholder {
      Placeholder::Output => self.output,
      Placeholder::Source => self.source,
    }
  }
}

/// Parse a string containing placeholders into segments.
///
/// # Errors
///
/// Returns an error for unclosed braces, a stray `}` or an unknown name.
pub fn parse(input: &str) -> Result<Vec<Segment>, PlaceholderError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    match ch {
      '{' => {
        if let Some((_, '{')) = chars.peek() {
          chars.next();
          literal.push('{');
          continue;
        }

        let mut name = String::new();
        let mut found_close = false;
        for (_, c) in chars.by_ref() {
          if c == '}' {
            found_close = true;
            break;
          }
          name.push(c);
        }
        if !found_close {
          return Err(PlaceholderError::Unclosed(pos));
        }

        if !literal.is_empty() {
          segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Placeholder(parse_name(&name)?));
      }
      '}' => {
        if let Some((_, '}')) = chars.peek() {
          chars.next();
          literal.push('}');
        } else {
          return Err(PlaceholderError::UnmatchedClose(pos));
        }
      }
      _ => literal.push(ch),
    }
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

fn parse_name(name: &str) -> Result<Placeholder, PlaceholderError> {
  match name.trim() {
    "output" => Ok(Placeholder::Output),
    "source" => Ok(Placeholder::Source),
    other => Err(PlaceholderError::Unknown(other.to_string())),
  }
}

/// Parse and substitute placeholders in one step.
pub fn substitute(input: &str, values: &Substitutions<'_>) -> Result<String, PlaceholderError> {
  let mut out = String::with_capacity(input.len());
  for segment in parse(input)? {
    match segment {
      Segment::Literal(text) => out.push_str(&text),
      Segment::Placeholder(p) => out.push_str(values.resolve(p)),
    }
  }
  Ok(out)
}
