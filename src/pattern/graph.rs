/*!

  The pattern graph is a small NFA: nodes joined by matcher-labeled edges, with accepting nodes
  carrying the token kind of the pattern they complete. Quantifiers make the graph cyclic (`a+`
  loops a node onto itself), so nodes live behind shared, identity-compared handles rather than
  in an ownership tree.

*/

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use smallvec::SmallVec;

use super::matcher::Matcher;


/// Ordered edge map of a node. Keyed by the matcher's total order, so one node holds at most
/// one edge per distinct matcher and iterates deterministically.
pub type Edges<K> = BTreeMap<Matcher, NodeCell<K>>;


/// Shared handle to a graph node.
///
/// Equality and hashing are pointer identity: two handles are equal exactly when they designate
/// the same node. That is what lets the search deduplicate its working set and what lets a node
/// appear as its own successor.
pub struct NodeCell<K>(Rc<RefCell<Node<K>>>);

impl<K> NodeCell<K> {

  pub fn new(node: Node<K>) -> NodeCell<K> {
    NodeCell(Rc::new(RefCell::new(node)))
  }

  /// A handle to a fresh empty node.
  pub fn fresh() -> NodeCell<K> {
    NodeCell::new(Node::new())
  }

  pub fn borrow(&self) -> Ref<Node<K>> {
    self.0.borrow()
  }

  pub fn borrow_mut(&self) -> RefMut<Node<K>> {
    self.0.borrow_mut()
  }

  /// Adds (or replaces) the edge labeled `matcher` from this node to `target`. `target` may be
  /// this node itself, which forms a loop.
  pub fn connect(&self, matcher: Matcher, target: &NodeCell<K>) {
    self.borrow_mut().edges.insert(matcher, target.clone());
  }

}

impl<K> Clone for NodeCell<K> {
  // Written out because `derive` would demand `K: Clone` for a pointer copy.
  fn clone(&self) -> NodeCell<K> {
    NodeCell(self.0.clone())
  }
}

impl<K> PartialEq for NodeCell<K> {
  /// Pointer equality, not value equality.
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl<K> Eq for NodeCell<K> {}

impl<K> Hash for NodeCell<K> {
  /// Hashes the node's address, consistent with pointer equality.
  fn hash<H: Hasher>(&self, state: &mut H) {
    Rc::as_ptr(&self.0).hash(state);
  }
}

impl<K> Debug for NodeCell<K> {
  /// Shallow by necessity: graphs are cyclic, so a structural `Debug` would not terminate.
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "NodeCell({:p})", Rc::as_ptr(&self.0))
  }
}


/// One node of a pattern graph. A populated `accept` marks it accepting.
#[derive(Debug)]
pub struct Node<K> {
  pub edges:  Edges<K>,  //< Outgoing edges
  pub accept: Option<K>, //< The token kind this node completes, if any
}

impl<K> Node<K> {

  pub fn new() -> Node<K> {
    Node {
      edges:  BTreeMap::new(),
      accept: None,
    }
  }


  pub fn is_accepting(&self) -> bool {
    self.accept.is_some()
  }


  /// Collects the successors of every edge whose matcher accepts `c`. A node may carry several
  /// overlapping matchers; all of them fire.
  pub fn matching_targets(&self, c: u8) -> SmallVec<[NodeCell<K>; 4]> {
    let mut targets = SmallVec::new();
    for (matcher, target) in &self.edges {
      if matcher.contains(c) {
        targets.push(target.clone());
      }
    }

    targets
  }

}

impl<K> Default for Node<K> {
  fn default() -> Node<K> {
    Node::new()
  }
}


/// The product of compiling one pattern string: the graph's entry node plus the token kind its
/// accepting node is tagged with. Every compilation builds its own nodes, so no graph is ever
/// shared between two `CompiledPattern`s.
#[derive(Clone, Debug)]
pub struct CompiledPattern<K> {
  entry: NodeCell<K>,
  kind:  K,
}

impl<K: Copy> CompiledPattern<K> {

  pub(crate) fn new(entry: NodeCell<K>, kind: K) -> CompiledPattern<K> {
    CompiledPattern { entry, kind }
  }

  pub fn entry(&self) -> &NodeCell<K> {
    &self.entry
  }

  pub fn kind(&self) -> K {
    self.kind
  }

}
