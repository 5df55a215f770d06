/*!

  The pattern engine: matchers describing which bytes an edge accepts, the graph a pattern
  string compiles into, and the parallel search that classifies a word against a whole table of
  compiled patterns at once.

*/

pub mod chars;
pub mod compiler;
pub mod error;
pub mod graph;
pub mod matcher;
pub mod search;

pub use chars::Chars;
pub use compiler::{compile, Compiler, PatternTable};
pub use error::{PatternError, PatternErrorKind};
pub use graph::{CompiledPattern, Edges, Node, NodeCell};
pub use matcher::Matcher;
pub use search::search;
