/*!

  The lexing layer: line splitting, token types, and the table-driven tokenizer that ties them
  to the pattern engine.

  A `Lexer` owns a compiled `PatternTable` and a set of glued ranges. `tokenize` turns a
  buffered reader into a flat token stream, one synthetic end-of-line token per source line,
  or fails on the first unknown or ambiguous lexeme.

*/

pub mod error;
pub mod lexer;
pub mod split;
pub mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use split::{glued_ranges, split, Candidate, GluedRanges};
pub use token::{strip_line_comments, Token, TokenKind};
