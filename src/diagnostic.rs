/*!

  Rendering errors as source-annotated diagnostics. Everything here is pure string production;
  the library never writes to stdout or stderr on its own. Callers that want terminal output
  can emit the `Diagnostic` values through `codespan_reporting::term` themselves with whatever
  color choices they prefer.

*/

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::Buffer;

use crate::lexer::{LexError, TokenKind};
use crate::pattern::PatternError;


/// Identifies a source registered in a `SimpleFiles` database.
pub type FileId = usize;


/// Conversion into a positioned diagnostic over a registered source.
pub trait ToDiagnostic {
  fn to_diagnostic(&self, file: FileId) -> Diagnostic<FileId>;
}


impl ToDiagnostic for PatternError {
  /// `file` must hold the pattern text the error came from.
  fn to_diagnostic(&self, file: FileId) -> Diagnostic<FileId> {
    if self.pattern().is_empty() {
      // Nothing to underline in an empty pattern.
      return Diagnostic::error().with_message(self.to_string());
    }

    let end = (self.idx() + 1).min(self.pattern().len());
    Diagnostic::error()
        .with_message(self.to_string())
        .with_labels(vec![Label::primary(file, self.idx()..end).with_message("here")])
  }
}


impl<K: TokenKind> ToDiagnostic for LexError<K> {
  /// `file` must hold the source line the error came from.
  fn to_diagnostic(&self, file: FileId) -> Diagnostic<FileId> {
    match self {
      LexError::UnknownLexeme { column, text, .. } => {
        let start = column.saturating_sub(1);
        Diagnostic::error()
            .with_message(self.to_string())
            .with_labels(vec![
              Label::primary(file, start..start + text.len())
                  .with_message("no pattern matches this"),
            ])
      }

      LexError::AmbiguousLexeme { column, text, kinds, .. } => {
        let start = column.saturating_sub(1);
        Diagnostic::error()
            .with_message(self.to_string())
            .with_labels(vec![
              Label::primary(file, start..start + text.len())
                  .with_message("matched by more than one pattern"),
            ])
            .with_notes(kinds.iter().map(|kind| format!("candidate kind: {:?}", kind)).collect())
      }

      LexError::Read(_) => Diagnostic::error().with_message(self.to_string()),
    }
  }
}


/// Renders a pattern compilation error against its pattern text.
pub fn render_pattern_error(error: &PatternError) -> String {
  let mut files: SimpleFiles<&str, String> = SimpleFiles::new();
  let file = files.add("pattern", error.pattern().to_string());
  render(&files, &error.to_diagnostic(file))
}


/// Renders a tokenization error against the source line it carries.
pub fn render_lex_error<K: TokenKind>(error: &LexError<K>) -> String {
  let source = match error {
    LexError::UnknownLexeme { source_line, .. }
    | LexError::AmbiguousLexeme { source_line, .. } => printable_line(source_line),

    LexError::Read(_) => String::new(),
  };

  let mut files: SimpleFiles<&str, String> = SimpleFiles::new();
  let file = files.add("input", source);
  render(&files, &error.to_diagnostic(file))
}


/// Registers a raw source line as display text. Every byte becomes exactly one ASCII
/// character, so label ranges counted in source bytes stay in bounds and on character
/// boundaries; bytes outside printable ASCII show as `.`.
fn printable_line(line: &[u8]) -> String {
  line.iter()
      .map(|&b| if b == b' ' || b.is_ascii_graphic() { b as char } else { '.' })
      .collect()
}


fn render(files: &SimpleFiles<&str, String>, diagnostic: &Diagnostic<FileId>) -> String {
  let mut buffer = Buffer::no_color();
  let config = term::Config::default();

  if term::emit(&mut buffer, &config, files, diagnostic).is_err() {
    // The message alone still identifies the problem.
    return diagnostic.message.clone();
  }

  String::from_utf8_lossy(buffer.as_slice()).into_owned()
}


#[cfg(test)]
mod test {
  use super::*;
  use crate::pattern::compile;

  #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
  enum Kind {
    LineBreak,
    Word,
    Number,
  }

  impl TokenKind for Kind {
    fn end_of_line() -> Kind {
      Kind::LineBreak
    }
  }

  #[test]
  fn pattern_errors_render_with_a_label() {
    let error = compile("[z-a]", 0u32).expect_err("must fail");
    let rendered = render_pattern_error(&error);
    assert!(rendered.contains("invalid class range"));
    assert!(rendered.contains("[z-a]"));
    assert!(rendered.contains("^"));
  }

  #[test]
  fn empty_pattern_errors_render_without_a_label() {
    let error = compile("", 0u32).expect_err("must fail");
    let diagnostic = error.to_diagnostic(0);
    assert!(diagnostic.labels.is_empty());
    let rendered = render_pattern_error(&error);
    assert!(rendered.contains("empty pattern"));
  }

  #[test]
  fn unknown_lexemes_render_with_the_line() {
    let error: LexError<Kind> = LexError::UnknownLexeme {
      line: 1,
      column: 5,
      text: b"$".to_vec(),
      source_line: b"x = $".to_vec(),
    };
    let rendered = render_lex_error(&error);
    assert!(rendered.contains("unknown lexeme"));
    assert!(rendered.contains("x = $"));
    assert!(rendered.contains("no pattern matches this"));
  }

  #[test]
  fn ambiguous_lexemes_render_with_candidate_notes() {
    let error: LexError<Kind> = LexError::AmbiguousLexeme {
      line: 1,
      column: 1,
      text: b"42".to_vec(),
      source_line: b"42".to_vec(),
      kinds: vec![Kind::Word, Kind::Number],
    };
    let diagnostic = error.to_diagnostic(0);
    assert_eq!(diagnostic.notes.len(), 2);
    assert!(diagnostic.notes[0].contains("Word"));

    let rendered = render_lex_error(&error);
    assert!(rendered.contains("ambiguous lexeme"));
    assert!(rendered.contains("candidate kind"));
  }

  #[test]
  fn read_errors_render_message_only() {
    use std::io;

    let error: LexError<Kind> = LexError::Read(io::Error::new(io::ErrorKind::Other, "boom"));
    let diagnostic = error.to_diagnostic(0);
    assert!(diagnostic.labels.is_empty());
    let rendered = render_lex_error(&error);
    assert!(rendered.contains("input read failed"));
  }

  #[test]
  fn label_ranges_cover_the_offending_text() {
    let error: LexError<Kind> = LexError::UnknownLexeme {
      line: 1,
      column: 3,
      text: b"$$".to_vec(),
      source_line: b"a $$ b".to_vec(),
    };
    let diagnostic = error.to_diagnostic(7);
    assert_eq!(diagnostic.labels.len(), 1);
    assert_eq!(diagnostic.labels[0].file_id, 7);
    assert_eq!(diagnostic.labels[0].range, 2..4);
  }

  #[test]
  fn non_ascii_lines_render_one_column_per_byte() {
    let error: LexError<Kind> = LexError::UnknownLexeme {
      line: 1,
      column: 5,
      text: vec![0xE9],
      source_line: b"x = \xE9;".to_vec(),
    };
    let diagnostic = error.to_diagnostic(0);
    assert_eq!(diagnostic.labels[0].range, 4..5);

    let rendered = render_lex_error(&error);
    assert!(rendered.contains("x = .;"));
  }
}
