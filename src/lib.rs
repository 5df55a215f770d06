/*!

`idlex` tokenizes line-structured text against a caller-supplied table of patterns. It is the
lexing layer of an IDL compiler frontend, but nothing in it knows about any particular grammar:
the caller decides the token kinds, the patterns, and which characters glue into identifier-like
runs.

The pipeline, leaf to root:

```text
pattern string --compile--> pattern graph (cyclic NFA over byte matchers)
line of text --split--> positioned candidates --search--> token kinds
reader --Lexer::tokenize--> tokens, or a structured error
```

Matching is a direct parallel simulation of every compiled graph at once. A candidate accepted
by no pattern or by more than one pattern stops tokenization with a typed error carrying the
full diagnostic payload; rendering lives in the `diagnostic` module and is strictly opt-in,
since the library itself never prints.

*/

mod debug;

pub mod diagnostic;
pub mod lexer;
pub mod pattern;

pub use lexer::{glued_ranges, strip_line_comments, Candidate, GluedRanges, LexError, Lexer,
                Token, TokenKind};
pub use pattern::{compile, search, CompiledPattern, Matcher, PatternError, PatternErrorKind,
                  PatternTable};
