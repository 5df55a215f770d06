/*!

  Tokenization errors. The first bad candidate aborts the run; there is no resynchronization,
  because downstream consumers want a complete token stream or nothing.

*/

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

use super::token::{underline, TokenKind};


/// Why a source failed to tokenize.
#[derive(Debug)]
pub enum LexError<K> {
  /// A candidate no pattern matched.
  UnknownLexeme {
    line:        usize,   //< 1-based source line number
    column:      usize,   //< 1-based start column
    text:        Vec<u8>, //< The offending candidate bytes
    source_line: Vec<u8>, //< The full line it came from
  },

  /// A candidate more than one pattern matched.
  AmbiguousLexeme {
    line:        usize,
    column:      usize,
    text:        Vec<u8>,
    source_line: Vec<u8>,
    kinds:       Vec<K>, //< Every kind that matched, in ascending order
  },

  /// The underlying reader failed.
  Read(io::Error),
}

impl<K> LexError<K> {

  /// The source line with a caret run under the offending candidate, when there is one.
  pub fn highlight(&self) -> Option<String> {
    match self {
      LexError::UnknownLexeme { column, text, source_line, .. }
      | LexError::AmbiguousLexeme { column, text, source_line, .. } => {
        Some(underline(source_line, *column, text.len()))
      }

      LexError::Read(_) => None,
    }
  }

}

impl<K: TokenKind> Display for LexError<K> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      LexError::UnknownLexeme { line, column, text, .. } => {
        write!(
          f,
          "unknown lexeme {:?} at line {}, column {}",
          String::from_utf8_lossy(text),
          line,
          column
        )
      }

      LexError::AmbiguousLexeme { line, column, text, kinds, .. } => {
        write!(
          f,
          "ambiguous lexeme {:?} at line {}, column {}: matches {:?}",
          String::from_utf8_lossy(text),
          line,
          column,
          kinds
        )
      }

      LexError::Read(error) => {
        write!(f, "input read failed: {}", error)
      }
    }
  }
}

impl<K: TokenKind> Error for LexError<K> {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      LexError::Read(error) => Some(error),
      _ => None,
    }
  }
}

impl<K> From<io::Error> for LexError<K> {
  fn from(error: io::Error) -> LexError<K> {
    LexError::Read(error)
  }
}
