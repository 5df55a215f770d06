/*!

  The pattern compiler turns a pattern string into its graph one character at a time. It keeps a
  frontier node ("head") and the edge appended most recently; quantifiers rewrite that edge
  instead of emitting anything new, which is where the cycles come from.

  Supported syntax:

  ```text
  c        the literal byte c
  .        any byte
  p+       one or more of the preceding element
  p*       zero or more of the preceding element
  [...]    a class of ranges (a-z, A-Z, 0-9) and literal members
  []       matches nothing at all
  \m       the metacharacter m itself, for m in \ [ ] ( ) * + -
  ```

  A whole table of `(pattern, kind)` rows compiles through `PatternTable::build`, which also
  records how long the build took.

*/

use std::time::Duration;

use quanta::Clock;

use crate::debug_logln;

use super::chars::Chars;
use super::error::{PatternError, PatternErrorKind};
use super::graph::{CompiledPattern, NodeCell};
use super::matcher::Matcher;
use super::search::search;


/// The characters a backslash may escape, inside or outside a class.
static METACHARACTERS: &[u8; 8] = b"\\[]()*+-";


/// Compiles one pattern into its graph, tagging the accepting node with `kind`.
pub fn compile<K: Copy>(pattern: &str, kind: K) -> Result<CompiledPattern<K>, PatternError> {
  Compiler::new(pattern, kind).build()
}


/// Single-use state for compiling one pattern.
pub struct Compiler<'a, K> {
  idx:        usize,                          //< Cursor into `self.pattern`
  pattern:    &'a [u8],                       //< Pattern string as bytes
  kind:       K,                              //< Kind the accepting node will carry
  entry:      NodeCell<K>,                    //< Entry node of the graph under construction
  head:       NodeCell<K>,                    //< Frontier: where the next edge departs
  previous:   Option<(NodeCell<K>, Matcher)>, //< Origin node and matcher of the newest edge
  quantified: bool,                           //< The newest edge was just quantified
}

impl<'a, K: Copy> Compiler<'a, K> {

  pub fn new(pattern: &'a str, kind: K) -> Compiler<'a, K> {
    let entry = NodeCell::fresh();
    let head = entry.clone();

    Compiler {
      idx: 0,
      pattern: pattern.as_bytes(),
      kind,
      entry,
      head,
      previous: None,
      quantified: false,
    }
  }


  pub fn build(mut self) -> Result<CompiledPattern<K>, PatternError> {
    if self.pattern.is_empty() {
      return Err(self.error(PatternErrorKind::NoContent, 0));
    }

    debug_logln!("compile: {:?}", String::from_utf8_lossy(self.pattern));

    while !self.exhausted() {
      match self.ci() {
        b'.' => self.advance(Matcher::Any),
        b'+' => self.repeat()?,
        b'*' => self.fold_back()?,

        b'[' => {
          let class = self.parse_class()?;
          self.advance(class);
        }

        b'\\' => {
          let literal = self.escaped()?;
          self.advance(Matcher::literal(literal));
        }

        c => self.advance(Matcher::literal(c)),
      }
    }

    // Wherever the frontier ended up is where the pattern completes.
    self.head.borrow_mut().accept = Some(self.kind);

    Ok(CompiledPattern::new(self.entry, self.kind))
  }

  // region Cursor helpers

  /// Returns the byte at index `idx`, or `0` past the end. `0` cannot occur in a pattern, so it
  /// doubles as the end marker.
  #[must_use]
  fn at(&self, idx: usize) -> u8 {
    if idx >= self.pattern.len() {
      return 0;
    }
    self.pattern[idx]
  }

  /// Same as `at()` but assumes `idx = self.idx`.
  #[must_use]
  fn c(&self) -> u8 {
    self.at(self.idx)
  }

  /// Same as `c()` but post-increments `self.idx`.
  #[must_use]
  fn ci(&mut self) -> u8 {
    self.idx += 1;
    self.at(self.idx - 1)
  }

  #[must_use]
  fn exhausted(&self) -> bool {
    self.idx >= self.pattern.len()
  }

  // endregion

  fn error(&self, kind: PatternErrorKind, idx: usize) -> PatternError {
    PatternError::new(kind, idx, self.pattern)
  }


  /// Hangs a fresh node off the frontier over `matcher` and moves the frontier onto it.
  fn advance(&mut self, matcher: Matcher) {
    let next = NodeCell::fresh();
    self.head.connect(matcher.clone(), &next);
    self.previous = Some((self.head.clone(), matcher));
    self.head = next;
    self.quantified = false;
  }


  /// `+`: the node the newest edge reaches loops back onto itself over the same matcher, so
  /// the element must occur at least once and may repeat.
  fn repeat(&mut self) -> Result<(), PatternError> {
    let (_, matcher) = self.quantifiable()?;
    self.head.connect(matcher.clone(), &self.head);
    self.previous = Some((self.head.clone(), matcher));
    self.quantified = true;
    Ok(())
  }


  /// `*`: the newest edge folds back onto its origin, which becomes the frontier again, so the
  /// element may occur any number of times including zero.
  fn fold_back(&mut self) -> Result<(), PatternError> {
    let (origin, matcher) = self.quantifiable()?;
    origin.connect(matcher.clone(), &origin);
    self.head = origin.clone();
    self.previous = Some((origin, matcher));
    self.quantified = true;
    Ok(())
  }


  /// A quantifier needs a fresh edge to act on: not another quantifier's output, and not the
  /// start of the pattern.
  fn quantifiable(&mut self) -> Result<(NodeCell<K>, Matcher), PatternError> {
    if self.quantified {
      return Err(self.error(PatternErrorKind::DuplicateQuantifier, self.idx - 1));
    }
    match self.previous.take() {
      Some(edge) => Ok(edge),
      None       => Err(self.error(PatternErrorKind::DuplicateQuantifier, self.idx - 1)),
    }
  }


  /**
    Parses the body of a `[...]` class. The opening bracket is already consumed; this consumes
    through the closing bracket.

    Ranges union in source order, then all literal members union in as one set, so `[a-z0-9_]`
    becomes `Union(Range(a,z), Range(0,9), Set{_})`. An immediately closed class stays `None`.
  */
  fn parse_class(&mut self) -> Result<Matcher, PatternError> {
    let open_idx = self.idx - 1;
    let mut matcher = Matcher::None;
    let mut members = Chars::new();

    loop {
      if self.exhausted() {
        return Err(self.error(PatternErrorKind::NoTerminatingDevice, open_idx));
      }

      let c_idx = self.idx;
      let c = self.ci();
      match c {
        b']' => break,

        b'.' | b'[' => {
          return Err(self.error(PatternErrorKind::BannedCharacter, c_idx));
        }

        b'\\' => {
          let literal = self.escaped()?;
          members.insert(literal);
        }

        // A range attempt: an alphanumeric low endpoint followed by a dash. Whatever comes
        // next is read as the high endpoint, so a trailing dash as in `[a-]` fails against `]`.
        c if c.is_ascii_alphanumeric() && self.c() == b'-' => {
          self.idx += 1; // step over the dash
          if self.exhausted() {
            return Err(self.error(PatternErrorKind::NoTerminatingDevice, open_idx));
          }
          let high_idx = self.idx;
          let high = self.ci();
          if !same_class(c, high) || high <= c {
            return Err(self.error(PatternErrorKind::BadRange, high_idx));
          }
          matcher = matcher.union(Matcher::Range(c, high));
        }

        c => {
          members.insert(c);
        }
      }
    }

    if !members.is_empty() {
      matcher = matcher.union(Matcher::Set(members));
    }

    Ok(matcher)
  }


  /// Consumes the character after a backslash, which must be an escapable metacharacter.
  fn escaped(&mut self) -> Result<u8, PatternError> {
    if self.exhausted() {
      // A trailing backslash escapes nothing.
      return Err(self.error(PatternErrorKind::BadEscape, self.idx - 1));
    }
    let c_idx = self.idx;
    let c = self.ci();
    if METACHARACTERS.contains(&c) {
      Ok(c)
    } else {
      Err(self.error(PatternErrorKind::BadEscape, c_idx))
    }
  }

}


/// Both endpoints lowercase, both uppercase, or both digits.
fn same_class(low: u8, high: u8) -> bool {
  (low.is_ascii_lowercase() && high.is_ascii_lowercase())
      || (low.is_ascii_uppercase() && high.is_ascii_uppercase())
      || (low.is_ascii_digit() && high.is_ascii_digit())
}


/// An ordered table of compiled patterns, plus how long compiling it took.
pub struct PatternTable<K> {
  patterns:   Vec<CompiledPattern<K>>,
  build_time: Duration, //< Wall-clock time spent compiling the table
}

impl<K: Copy> PatternTable<K> {

  /// Compiles every `(pattern, kind)` row in order. The first malformed pattern aborts the
  /// whole build with its error.
  pub fn build(rows: &[(&str, K)]) -> Result<PatternTable<K>, PatternError> {
    // Timing
    let timer: Clock = Clock::new();
    let build_start_time = timer.start();

    let mut patterns = Vec::with_capacity(rows.len());
    for (pattern, kind) in rows {
      patterns.push(compile(pattern, *kind)?);
    }

    let build_time = timer.delta(build_start_time, timer.end());
    debug_logln!("table: compiled {} patterns in {:?}", patterns.len(), build_time);

    Ok(PatternTable { patterns, build_time })
  }


  pub fn patterns(&self) -> &[CompiledPattern<K>] {
    &self.patterns
  }


  pub fn len(&self) -> usize {
    self.patterns.len()
  }


  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }


  /// Wall-clock time spent compiling the table.
  pub fn build_time(&self) -> Duration {
    self.build_time
  }


  /// Classifies the bytes of `word` against every pattern in the table.
  pub fn search(&self, word: &[u8]) -> Vec<K>
    where K: Eq
  {
    search(word, &self.patterns)
  }

}
