/*!

  Classifying a word means walking every pattern graph at once. The walk keeps a set of live
  nodes, one step per input byte, and at the end reads the kind tags off whichever live nodes
  accept. No backtracking, no prefix matches: the whole word matches or the pattern is out.

*/

use std::collections::HashSet;

use crate::debug_logln;

use super::graph::{CompiledPattern, NodeCell};


/**
  Runs the bytes of `word` through every compiled pattern in `table` simultaneously and returns
  the kinds of the patterns that match the whole word, deduplicated, in table order.

  The empty word matches any pattern whose entry node accepts, so `a*` and `.*` match `b""`.
*/
pub fn search<K: Copy + Eq>(word: &[u8], table: &[CompiledPattern<K>]) -> Vec<K> {
  let mut states: Vec<NodeCell<K>> =
      table.iter().map(|compiled| compiled.entry().clone()).collect();

  for &c in word {
    let mut next_states: Vec<NodeCell<K>> = Vec::with_capacity(states.len());
    // Loops route distinct states into the same node; each node advances once per step.
    let mut seen: HashSet<NodeCell<K>> = HashSet::with_capacity(states.len());

    for state in &states {
      for target in state.borrow().matching_targets(c) {
        if seen.insert(target.clone()) {
          next_states.push(target);
        }
      }
    }

    if next_states.is_empty() {
      // A dead end anywhere kills the whole word. Prefixes never count.
      return Vec::new();
    }

    states = next_states;
  }

  let mut kinds: Vec<K> = Vec::new();
  for state in &states {
    if let Some(kind) = state.borrow().accept {
      if !kinds.contains(&kind) {
        kinds.push(kind);
      }
    }
  }

  debug_logln!("search: {} live states, {} kinds", states.len(), kinds.len());

  kinds
}


#[cfg(test)]
mod test {
  use super::*;
  use crate::pattern::compiler::compile;

  fn table(rows: &[(&str, u32)]) -> Vec<CompiledPattern<u32>> {
    rows.iter()
        .map(|(pattern, kind)| compile(pattern, *kind).expect("pattern compiles"))
        .collect()
  }

  #[test]
  fn literal_patterns_match_exactly() {
    let table = table(&[("ab", 1)]);
    assert_eq!(search(b"ab", &table), vec![1]);
    assert_eq!(search(b"a", &table), Vec::<u32>::new());
    assert_eq!(search(b"abc", &table), Vec::<u32>::new());
    assert_eq!(search(b"ba", &table), Vec::<u32>::new());
  }

  #[test]
  fn star_matches_zero_or_more() {
    let table = table(&[("a*", 1)]);
    assert_eq!(search(b"", &table), vec![1]);
    assert_eq!(search(b"a", &table), vec![1]);
    assert_eq!(search(b"aaaa", &table), vec![1]);
    assert_eq!(search(b"ab", &table), Vec::<u32>::new());
  }

  #[test]
  fn plus_needs_at_least_one() {
    let table = table(&[("a+", 1)]);
    assert_eq!(search(b"", &table), Vec::<u32>::new());
    assert_eq!(search(b"a", &table), vec![1]);
    assert_eq!(search(b"aaa", &table), vec![1]);
  }

  #[test]
  fn dot_matches_any_single_byte() {
    let table = table(&[(".", 1)]);
    assert_eq!(search(b"a", &table), vec![1]);
    assert_eq!(search(b"%", &table), vec![1]);
    assert_eq!(search(&[0xE9], &table), vec![1]);
    assert_eq!(search(&[0xFF], &table), vec![1]);
    assert_eq!(search(b"", &table), Vec::<u32>::new());
    assert_eq!(search(b"ab", &table), Vec::<u32>::new());
  }

  #[test]
  fn dot_star_matches_everything_including_nothing() {
    let table = table(&[(".*", 1)]);
    assert_eq!(search(b"", &table), vec![1]);
    assert_eq!(search(b"anything at all", &table), vec![1]);
  }

  #[test]
  fn class_ranges_bound_the_match() {
    let table = table(&[("[a-c]", 1)]);
    assert_eq!(search(b"a", &table), vec![1]);
    assert_eq!(search(b"c", &table), vec![1]);
    assert_eq!(search(b"d", &table), Vec::<u32>::new());
  }

  #[test]
  fn identifier_pattern_matches_identifiers() {
    let table = table(&[("[a-z][a-z0-9_]*", 1)]);
    assert_eq!(search(b"x", &table), vec![1]);
    assert_eq!(search(b"voltage_3", &table), vec![1]);
    assert_eq!(search(b"3x", &table), Vec::<u32>::new());
    assert_eq!(search(b"x-y", &table), Vec::<u32>::new());
  }

  #[test]
  fn ambiguous_words_report_every_kind_in_table_order() {
    let table = table(&[("ab", 1), ("a.", 2)]);
    assert_eq!(search(b"ab", &table), vec![1, 2]);
    assert_eq!(search(b"ax", &table), vec![2]);
  }

  #[test]
  fn duplicate_kinds_collapse() {
    let table = table(&[("ab", 1), ("a.", 1)]);
    assert_eq!(search(b"ab", &table), vec![1]);
  }

  #[test]
  fn empty_table_matches_nothing() {
    let table: Vec<CompiledPattern<u32>> = Vec::new();
    assert_eq!(search(b"ab", &table), Vec::<u32>::new());
    assert_eq!(search(b"", &table), Vec::<u32>::new());
  }

  #[test]
  fn empty_class_matches_no_word() {
    let table = table(&[("[]", 1)]);
    assert_eq!(search(b"", &table), Vec::<u32>::new());
    assert_eq!(search(b"a", &table), Vec::<u32>::new());
  }

  #[test]
  fn long_repetition_stays_linear() {
    let table = table(&[("a+", 1), (".*", 2)]);
    let word = "a".repeat(10_000);
    assert_eq!(search(word.as_bytes(), &table), vec![1, 2]);
  }
}
