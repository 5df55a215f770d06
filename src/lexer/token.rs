/*!

  Tokens and the kind tag they carry. The kind type belongs to the caller; the lexer only needs
  it to be a small copyable tag with one distinguished value for the synthetic end-of-line
  token.

*/

use std::fmt::Debug;


/// A caller-supplied token tag. One value must be reserved for end-of-line tokens, which the
/// lexer emits itself after every source line.
pub trait TokenKind: Copy + Eq + Ord + Debug {
  /// The tag carried by synthetic end-of-line tokens.
  fn end_of_line() -> Self;
}


/// One classified lexeme, or a synthetic end-of-line marker. Text and source line are raw
/// bytes, exactly as read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token<K> {
  pub text:        Vec<u8>, //< The lexeme bytes, empty for end-of-line tokens
  pub line:        usize,   //< 1-based source line number
  pub column:      usize,   //< 1-based start column, 0 for end-of-line tokens
  pub source_line: Vec<u8>, //< The full source line the token came from
  pub kind:        K,       //< Which pattern matched
}

impl<K: TokenKind> Token<K> {

  /// The synthetic token closing `line`.
  pub(crate) fn end_of_line(line: usize) -> Token<K> {
    Token {
      text: Vec::new(),
      line,
      column: 0,
      source_line: Vec::new(),
      kind: K::end_of_line(),
    }
  }


  pub fn is_end_of_line(&self) -> bool {
    self.kind == K::end_of_line()
  }


  /// The source line with a caret run under this token's text.
  pub fn highlight(&self) -> String {
    underline(&self.source_line, self.column, self.text.len())
  }

}


/// Renders `source_line` with `width` carets starting under `column`. A zero width still gets
/// one caret so the position stays visible. Column and width count bytes; a line that is not
/// UTF-8 renders lossily.
pub(crate) fn underline(source_line: &[u8], column: usize, width: usize) -> String {
  let mut rendered = String::with_capacity(source_line.len() + column + width + 1);
  rendered.push_str(&String::from_utf8_lossy(source_line));
  rendered.push('\n');
  for _ in 1..column {
    rendered.push(' ');
  }
  for _ in 0..width.max(1) {
    rendered.push('^');
  }
  rendered
}


/**
  Drops every token from a `comment_kind` token through its end of line. End-of-line tokens
  are consumed by the filter too, so the output is a plain stream of meaningful tokens.
*/
pub fn strip_line_comments<K: TokenKind>(tokens: Vec<Token<K>>, comment_kind: K) -> Vec<Token<K>> {
  let mut kept: Vec<Token<K>> = Vec::with_capacity(tokens.len());
  let mut in_comment = false;

  for token in tokens {
    if token.kind == comment_kind {
      in_comment = true;
      continue;
    }
    if token.is_end_of_line() {
      in_comment = false;
      continue;
    }
    if !in_comment {
      kept.push(token);
    }
  }

  kept
}
