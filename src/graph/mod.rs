/// Accepted-word checks: minimum length, include letters, consist percentage.
pub mod filter;
/// The word index: insertion, membership, search entry points and dumping.
pub mod index;
/// Letter nodes, their ids, and sibling-chain iteration.
pub mod node;
/// Index-based node storage.
pub(crate) mod node_arena;
/// Compiled, normalized form of a [`SearchSpec`](spec::SearchSpec).
pub(crate) mod query;
/// Explicit-stack traversal and its results.
pub mod search;
/// Lock-guarded handle for interleaving inserts with searches.
#[cfg(feature = "shared")]
pub mod shared;
/// Search descriptions.
pub mod spec;
/// Derived queries around a single word.
pub mod variation;
/// Conversions from caller input to stored letters.
pub mod word;

pub use filter::matches_spec;
pub use index::WordIndex;
pub use node::{LetterNode, NodeId, SiblingIter};
pub use search::{CancelToken, SearchError, Tile, WordMatch};
#[cfg(feature = "shared")]
pub use shared::SharedWordIndex;
pub use spec::{SearchSpec, SearchType};
pub use variation::{SpecGroup, Variation, VariationGroup};
pub use word::IntoWord;
