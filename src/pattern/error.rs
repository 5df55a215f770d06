/*!
  Pattern compilation failures. A malformed pattern is a configuration bug in the caller's
  table, so the error carries the whole pattern text and the offending position: enough to
  report once, precisely, and give up.
*/

use std::error::Error;
use std::fmt::{Display, Formatter};


/// What went wrong while compiling a pattern.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PatternErrorKind {
  NoContent,           //< The pattern string is empty
  DuplicateQuantifier, //< `*` or `+` with no fresh edge to quantify
  NoTerminatingDevice, //< A character class is never closed
  BannedCharacter,     //< `.` or `[` inside a character class
  BadRange,            //< Class range endpoints out of order or of mixed class
  BadEscape,           //< Backslash before a non-metacharacter, or at the very end
}

impl PatternErrorKind {
  fn as_str(&self) -> &'static str {
    match self {
      PatternErrorKind::NoContent           => "empty pattern",
      PatternErrorKind::DuplicateQuantifier => "quantifier has nothing to repeat",
      PatternErrorKind::NoTerminatingDevice => "unterminated character class",
      PatternErrorKind::BannedCharacter     => "character not allowed inside a class",
      PatternErrorKind::BadRange            => "invalid class range",
      PatternErrorKind::BadEscape           => "invalid escape",
    }
  }
}


/// A pattern-compile failure: the kind, the byte index at which it was detected, and the
/// pattern text itself.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PatternError {
  kind:    PatternErrorKind,
  idx:     usize,
  pattern: String,
}

impl PatternError {

  pub(crate) fn new(kind: PatternErrorKind, idx: usize, pattern: &[u8]) -> PatternError {
    PatternError {
      kind,
      idx,
      pattern: String::from_utf8_lossy(pattern).into_owned(),
    }
  }


  pub fn kind(&self) -> PatternErrorKind {
    self.kind
  }


  /// Byte index into the pattern at which the error was detected.
  pub fn idx(&self) -> usize {
    self.idx
  }


  /// The pattern that failed to compile.
  pub fn pattern(&self) -> &str {
    &self.pattern
  }

}

impl Display for PatternError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} at character {} in pattern \"{}\"",
      self.kind.as_str(),
      self.idx,
      self.pattern
    )
  }
}

impl Error for PatternError {}
