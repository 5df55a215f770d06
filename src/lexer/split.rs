/*!

  Before any pattern runs, a line is chopped into candidate lexemes. The line is raw bytes;
  whitespace always separates. Everything else splits byte by byte, except for two kinds of
  glue:

  * a byte identical to the one before it extends the candidate, so `//` and `==` arrive at
    the matcher whole, and
  * bytes from the configured glued ranges chain together, which is what keeps an identifier
    like `supply_voltage_3` in one piece.

  Mixing the two does not glue: in `a.b` the dot touches letters on both sides and still splits
  off on its own.

*/

use std::mem;

use ranges::{GenericRange, Ranges};

use crate::debug_logln;


/// Inclusive byte ranges whose members chain into a single candidate.
pub type GluedRanges = Ranges<u8>;


/// Builds a glued-range set from inclusive `(low, high)` pairs.
pub fn glued_ranges(pairs: &[(u8, u8)]) -> GluedRanges {
  let mut glued: GluedRanges = Ranges::new();
  for &(low, high) in pairs {
    glued += GenericRange::from(low..=high);
  }
  glued
}


/// A candidate lexeme cut from a line: its bytes and its 1-based start column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
  pub column: usize,   //< 1-based column of the first byte
  pub text:   Vec<u8>, //< The candidate bytes, exactly as they appear in the line
}


/**
  Splits one line (no trailing newline) into candidates. The line is raw bytes and the
  candidates reproduce those bytes exactly; nothing is decoded or re-encoded. Returns them in
  source order with their 1-based start columns.
*/
pub fn split(line: &[u8], glued: &GluedRanges) -> Vec<Candidate> {
  let mut candidates: Vec<Candidate> = Vec::new();
  let mut buffer: Vec<u8> = Vec::new();
  let mut column = 0usize;
  // Whether the buffer is currently chaining glued-range bytes. Starts true so that a fresh
  // buffer can absorb a glued byte without a preceding flush.
  let mut is_glued = true;

  for (i, &c) in line.iter().enumerate() {
    match c {
      b' ' | b'\t' | b'\n' => {
        flush(&mut candidates, &mut buffer, column);
      }

      // A repeat of the last buffered byte extends the buffer, which is how `//`, `==` and
      // their kin survive as one candidate.
      c if !buffer.is_empty() && buffer.last() == Some(&c) && !is_glued => {
        buffer.push(c);
      }

      c if glued.contains(&c) && is_glued => {
        if buffer.is_empty() {
          column = i + 1;
        }
        buffer.push(c);
      }

      c => {
        flush(&mut candidates, &mut buffer, column);
        column = i + 1;
        buffer.push(c);
        is_glued = glued.contains(&c);
      }
    }
  }
  flush(&mut candidates, &mut buffer, column);

  debug_logln!(
    "split: {} candidates from {:?}",
    candidates.len(),
    String::from_utf8_lossy(line)
  );

  candidates
}


/// Moves the buffered candidate, if any, into the output.
fn flush(candidates: &mut Vec<Candidate>, buffer: &mut Vec<u8>, column: usize) {
  if !buffer.is_empty() {
    candidates.push(Candidate {
      column,
      text: mem::take(buffer),
    });
  }
}
