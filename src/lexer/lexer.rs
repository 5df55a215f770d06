/*!

  The tokenizer: reads lines off a `BufRead`, splits each into candidates, classifies every
  candidate against the pattern table, and closes each line with a synthetic end-of-line token.
  The first candidate that matches no pattern, or more than one, aborts the run with a
  positioned error.

*/

use std::io::BufRead;

use crate::debug_logln;
use crate::pattern::PatternTable;

use super::error::LexError;
use super::split::{split, GluedRanges};
use super::token::{Token, TokenKind};


/// A table-driven tokenizer. Built once, reusable across inputs.
pub struct Lexer<K> {
  table: PatternTable<K>, //< Compiled patterns and their kinds
  glued: GluedRanges,     //< Byte ranges that chain during splitting
}

impl<K: TokenKind> Lexer<K> {

  pub fn new(table: PatternTable<K>, glued: GluedRanges) -> Lexer<K> {
    Lexer { table, glued }
  }


  pub fn table(&self) -> &PatternTable<K> {
    &self.table
  }


  /**
    Tokenizes everything `reader` yields. Input is consumed as raw bytes, one line at a time,
    so any single-byte encoding works; lines may be arbitrarily long, and the stream ends when
    a read returns zero bytes. The result is either the complete token stream, end-of-line
    tokens included, or the first error.
  */
  pub fn tokenize<R: BufRead>(&self, mut reader: R) -> Result<Vec<Token<K>>, LexError<K>> {
    let mut tokens: Vec<Token<K>> = Vec::new();
    let mut line: Vec<u8> = Vec::new();
    let mut line_number = 0usize;

    loop {
      line.clear();
      let bytes_read = reader.read_until(b'\n', &mut line)?;
      if bytes_read == 0 {
        break;
      }
      line_number += 1;

      if line.ends_with(b"\n") {
        line.pop();
      }

      self.tokenize_line(&line, line_number, &mut tokens)?;
    }

    debug_logln!("tokenize: {} tokens over {} lines", tokens.len(), line_number);

    Ok(tokens)
  }


  /// Tokenizes an in-memory string. Read failures cannot occur on this path.
  pub fn tokenize_str(&self, source: &str) -> Result<Vec<Token<K>>, LexError<K>> {
    self.tokenize(source.as_bytes())
  }


  fn tokenize_line(
    &self,
    line: &[u8],
    line_number: usize,
    tokens: &mut Vec<Token<K>>,
  ) -> Result<(), LexError<K>> {
    for candidate in split(line, &self.glued) {
      let mut kinds = self.table.search(&candidate.text);

      match kinds.len() {
        0 => {
          return Err(LexError::UnknownLexeme {
            line: line_number,
            column: candidate.column,
            text: candidate.text,
            source_line: line.to_vec(),
          });
        }

        1 => {
          tokens.push(Token {
            text: candidate.text,
            line: line_number,
            column: candidate.column,
            source_line: line.to_vec(),
            kind: kinds[0],
          });
        }

        _ => {
          kinds.sort();
          return Err(LexError::AmbiguousLexeme {
            line: line_number,
            column: candidate.column,
            text: candidate.text,
            source_line: line.to_vec(),
            kinds,
          });
        }
      }
    }

    tokens.push(Token::end_of_line(line_number));
    Ok(())
  }

}


#[cfg(test)]
mod test {
  use super::super::split::glued_ranges;
  use super::super::token::strip_line_comments;
  use super::*;

  #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
  enum Idl {
    LineBreak,
    Word,
    Number,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Equals,
    Comment,
  }

  impl TokenKind for Idl {
    fn end_of_line() -> Idl {
      Idl::LineBreak
    }
  }

  fn idl_lexer() -> Lexer<Idl> {
    let table = PatternTable::build(&[
      ("[a-z][a-z0-9_]*", Idl::Word),
      ("[0-9]+", Idl::Number),
      ("{", Idl::OpenBrace),
      ("}", Idl::CloseBrace),
      (";", Idl::Semicolon),
      ("=", Idl::Equals),
      ("//", Idl::Comment),
    ])
    .expect("table builds");

    let glued = glued_ranges(&[(b'a', b'z'), (b'A', b'Z'), (b'0', b'9'), (b'_', b'_')]);
    Lexer::new(table, glued)
  }

  fn texts_and_kinds(tokens: &[Token<Idl>]) -> Vec<(&str, Idl)> {
    tokens.iter()
        .map(|token| (std::str::from_utf8(&token.text).expect("ascii text"), token.kind))
        .collect()
  }

  #[test]
  fn empty_input_yields_no_tokens() {
    let lexer = idl_lexer();
    let tokens = lexer.tokenize_str("").expect("tokenizes");
    assert!(tokens.is_empty());
  }

  #[test]
  fn a_line_becomes_tokens_and_a_line_break() {
    let lexer = idl_lexer();
    let tokens = lexer.tokenize_str("rate = 5;").expect("tokenizes");
    assert_eq!(
      texts_and_kinds(&tokens),
      vec![
        ("rate", Idl::Word),
        ("=", Idl::Equals),
        ("5", Idl::Number),
        (";", Idl::Semicolon),
        ("", Idl::LineBreak),
      ]
    );
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[0].column, 1);
    assert_eq!(tokens[2].column, 8);
    assert_eq!(tokens[0].source_line, b"rate = 5;".to_vec());
  }

  #[test]
  fn every_line_gets_its_own_line_break() {
    let lexer = idl_lexer();
    let tokens = lexer.tokenize_str("a\n\nb\n").expect("tokenizes");
    assert_eq!(
      texts_and_kinds(&tokens),
      vec![
        ("a", Idl::Word),
        ("", Idl::LineBreak),
        ("", Idl::LineBreak),
        ("b", Idl::Word),
        ("", Idl::LineBreak),
      ]
    );
    assert_eq!(tokens[1].line, 1);
    assert_eq!(tokens[2].line, 2);
    assert_eq!(tokens[4].line, 3);
  }

  #[test]
  fn a_final_line_without_newline_still_tokenizes() {
    let lexer = idl_lexer();
    let tokens = lexer.tokenize_str("a\nb").expect("tokenizes");
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[2].text, b"b".to_vec());
    assert_eq!(tokens[2].line, 2);
  }

  #[test]
  fn unknown_lexemes_abort_without_scanning_further() {
    let lexer = idl_lexer();
    let error = lexer.tokenize_str("x = $\ny = 1;").expect_err("must fail");
    match error {
      LexError::UnknownLexeme { line, column, text, source_line } => {
        assert_eq!(line, 1);
        assert_eq!(column, 5);
        assert_eq!(text, b"$".to_vec());
        assert_eq!(source_line, b"x = $".to_vec());
      }
      other => panic!("wrong error: {:?}", other),
    }
  }

  #[test]
  fn ambiguous_lexemes_report_sorted_kinds() {
    let table = PatternTable::build(&[
      ("[0-9]+", Idl::Number),
      ("[a-z0-9]+", Idl::Word),
    ])
    .expect("table builds");
    let lexer = Lexer::new(table, glued_ranges(&[(b'a', b'z'), (b'0', b'9')]));

    let error = lexer.tokenize_str("42").expect_err("must fail");
    match error {
      LexError::AmbiguousLexeme { line, column, text, kinds, .. } => {
        assert_eq!(line, 1);
        assert_eq!(column, 1);
        assert_eq!(text, b"42".to_vec());
        assert_eq!(kinds, vec![Idl::Word, Idl::Number]);
      }
      other => panic!("wrong error: {:?}", other),
    }
  }

  #[test]
  fn long_lines_pass_through_whole() {
    let lexer = idl_lexer();
    let source = "x".repeat(10_000);
    let tokens = lexer.tokenize_str(&source).expect("tokenizes");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text.len(), 10_000);
    assert_eq!(tokens[0].kind, Idl::Word);
  }

  #[test]
  fn comments_tokenize_and_strip_away() {
    let lexer = idl_lexer();
    let tokens = lexer
        .tokenize_str("x = 5; // trailing note\ny = 6;\n")
        .expect("tokenizes");

    let kept = strip_line_comments(tokens, Idl::Comment);
    assert_eq!(
      texts_and_kinds(&kept),
      vec![
        ("x", Idl::Word),
        ("=", Idl::Equals),
        ("5", Idl::Number),
        (";", Idl::Semicolon),
        ("y", Idl::Word),
        ("=", Idl::Equals),
        ("6", Idl::Number),
        (";", Idl::Semicolon),
      ]
    );
  }

  #[test]
  fn tokenize_accepts_any_buffered_reader() {
    use std::io::Cursor;

    let lexer = idl_lexer();
    let tokens = lexer.tokenize(Cursor::new(b"x;\n".to_vec())).expect("tokenizes");
    assert_eq!(tokens.len(), 3);
  }

  #[test]
  fn raw_byte_streams_tokenize_without_utf8() {
    let table = PatternTable::build(&[(".", Idl::Word)]).expect("table builds");
    let lexer = Lexer::new(table, glued_ranges(&[]));

    // 0xE9 is e-acute in a single-byte encoding and invalid on its own in UTF-8.
    let tokens = lexer.tokenize(&[0xE9, b'\n'][..]).expect("tokenizes");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text, vec![0xE9]);
    assert_eq!(tokens[0].kind, Idl::Word);
    assert_eq!(tokens[0].source_line, vec![0xE9]);
    assert!(tokens[1].is_end_of_line());
  }

  #[test]
  fn unknown_high_bytes_report_byte_columns() {
    let lexer = idl_lexer();
    let error = lexer.tokenize(&b"x = \xE9;\n"[..]).expect_err("must fail");
    match error {
      LexError::UnknownLexeme { line, column, text, .. } => {
        assert_eq!(line, 1);
        assert_eq!(column, 5);
        assert_eq!(text, vec![0xE9]);
      }
      other => panic!("wrong error: {:?}", other),
    }
  }

  #[test]
  fn braces_and_words_cover_an_idl_block() {
    let lexer = idl_lexer();
    let source = "interface power {\n  level = 3;\n}\n";
    let tokens = lexer.tokenize_str(source).expect("tokenizes");
    assert_eq!(
      texts_and_kinds(&tokens),
      vec![
        ("interface", Idl::Word),
        ("power", Idl::Word),
        ("{", Idl::OpenBrace),
        ("", Idl::LineBreak),
        ("level", Idl::Word),
        ("=", Idl::Equals),
        ("3", Idl::Number),
        (";", Idl::Semicolon),
        ("", Idl::LineBreak),
        ("}", Idl::CloseBrace),
        ("", Idl::LineBreak),
      ]
    );
  }
}
