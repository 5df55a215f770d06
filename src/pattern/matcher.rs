/*!

  A `Matcher` labels one edge of a pattern graph and decides which single bytes may cross it.
  Matchers are pure values: combining two produces a union, and the derived total order (variant
  tag first, then fields) keeps edge maps deterministic.

*/

use std::fmt::{Display, Formatter};

use super::chars::Chars;


/// The set of bytes a single graph edge accepts.
///
/// Variant declaration order is load-bearing: the derived `Ord` compares the tag first, so
/// `Range < Set < Any < None < Union`.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Matcher {
  /// An inclusive byte range, as written `[a-z]`.
  Range(u8, u8),
  /// An explicit set of bytes.
  Set(Chars),
  /// Accepts every byte, the `.` pattern.
  Any,
  /// Accepts nothing, the empty class `[]`.
  None,
  /// Accepts whatever any of its members accepts.
  Union(Vec<Matcher>),
}


impl Matcher {

  /// The matcher for one literal byte.
  pub fn literal(c: u8) -> Matcher {
    Matcher::Set(Chars::from_bytes(&[c]))
  }


  /// Whether this matcher accepts the byte `c`.
  pub fn contains(&self, c: u8) -> bool {
    match self {
      Matcher::Range(low, high) => *low <= c && c <= *high,
      Matcher::Set(chars)       => chars.contains(c),
      Matcher::Any              => true,
      Matcher::None             => false,
      Matcher::Union(members)   => members.iter().any(|m| m.contains(c)),
    }
  }


  /**
    Combines two matchers into one accepting the union of both.

    `None` is the identity. Unioning anything into an existing union appends it as a member;
    two non-union matchers form a fresh two-member union.
  */
  pub fn union(self, other: Matcher) -> Matcher {
    match (self, other) {
      (Matcher::None, other) => other,
      (this, Matcher::None)  => this,

      (Matcher::Union(mut members), other) => {
        members.push(other);
        Matcher::Union(members)
      }

      (this, Matcher::Union(mut members)) => {
        members.push(this);
        Matcher::Union(members)
      }

      (this, other) => Matcher::Union(vec![this, other]),
    }
  }

}


impl Display for Matcher {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Matcher::Range(low, high) => write!(f, "[{}-{}]", *low as char, *high as char),
      Matcher::Set(chars)       => write!(f, "{}", chars),
      Matcher::Any              => write!(f, "."),
      Matcher::None             => write!(f, "[]"),

      Matcher::Union(members) => {
        write!(f, "(")?;
        for (i, member) in members.iter().enumerate() {
          if i > 0 {
            write!(f, "|")?;
          }
          write!(f, "{}", member)?;
        }
        write!(f, ")")
      }
    }
  }
}
