/*!

  `Chars` is a set of bytes represented compactly as a bitfield of 4 `u64`s: the byte `n` is in
  the set if and only if the `n`th bit is set. It is the payload of the explicit-set matcher
  variant, so it carries a total order (word-lexicographic over the bitfield) that lets matchers
  serve as deterministic map keys.

*/

use std::fmt::{Display, Formatter};


/// Set of bytes.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Chars {
  b: [u64; 4] //< 256 bits, bit n set iff byte n is in the set
}


impl Chars {

  pub fn new() -> Chars {
    Chars { b: [0; 4] }
  }


  pub fn from_bytes(bytes: &[u8]) -> Chars {
    let mut result = Chars::new();
    for &c in bytes {
      result.insert(c);
    }

    result
  }


  pub fn contains(&self, c: u8) -> bool {
    return (self.b[(c >> 6) as usize] & (1 << (c & 0x3F))) != 0;
  }


  pub fn insert(&mut self, c: u8) -> &mut Chars {
    self.b[(c >> 6) as usize] |= 1 << (c & 0x3F);
    return self;
  }


  /// Inserts every byte from `lo` through `hi` inclusive.
  pub fn insert_pair(&mut self, lo: u8, hi: u8) -> &mut Chars {
    for c in lo..=hi {
      self.insert(c);
    }
    return self;
  }


  pub fn is_empty(&self) -> bool {
    self.b[0] == 0 &&
    self.b[1] == 0 &&
    self.b[2] == 0 &&
    self.b[3] == 0
  }


  pub fn len(&self) -> usize {
    self.b.iter().map(|word| word.count_ones() as usize).sum()
  }

}


/// Yields the members of a `Chars` in increasing byte order.
pub struct CharsIterator {
  chars: Chars,
  next:  u16, //< Next byte value to test, stops at 256
}

impl Iterator for CharsIterator {
  type Item = u8;

  fn next(&mut self) -> Option<u8> {
    while self.next < 256 {
      let c = self.next as u8;
      self.next += 1;
      if self.chars.contains(c) {
        return Some(c);
      }
    }
    None
  }
}

impl IntoIterator for Chars {
  type Item = u8;
  type IntoIter = CharsIterator;

  fn into_iter(self) -> CharsIterator {
    CharsIterator { chars: self, next: 0 }
  }
}


impl Display for Chars {
  /// Renders as `{...}` with non-printable members escaped.
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{")?;
    for c in self.into_iter() {
      if c.is_ascii_graphic() || c == b' ' {
        write!(f, "{}", c as char)?;
      } else {
        write!(f, "\\x{:02X}", c)?;
      }
    }
    write!(f, "}}")
  }
}
