//! # wordgraph
//!
//! A word list stored as a letter graph and searched for word-game style
//! queries: positional patterns with `?` and `*` wildcards, anagrams and
//! subanagrams with blank tiles, filtered by length, required letters,
//! forbidden letters and letter-class percentages.
//!
//! Each position of every word is a node. Nodes that start the same position
//! after a shared prefix form a sibling chain; the next position hangs off the
//! node's child link. The graph is an arena of nodes addressed by index, and
//! searching is an explicit-stack walk, so neither long words nor wide graphs
//! touch the call stack.
//!
//! ## Quick Start
//!
//! ```
//! use wordgraph::{SearchSpec, WordIndex};
//!
//! let index: WordIndex = ["CAT", "BAT", "EAT", "HATE", "ACT", "TAC"].into_iter().collect();
//! assert!(index.contains("cat"));
//!
//! // Lowercase marks letters a wildcard stood in for.
//! assert_eq!(index.search(&SearchSpec::pattern("?AT")), vec!["bAT", "cAT", "eAT"]);
//!
//! let mut anagrams = index.search(&SearchSpec::anagram("TCA"));
//! anagrams.sort();
//! assert_eq!(anagrams, vec!["ACT", "CAT", "TAC"]);
//! ```
//!
//! ## Structured Results
//!
//! [`WordIndex::search_matches`] reports the same hits as [`WordMatch`]es,
//! which keep the stored word and the inferred positions apart:
//!
//! ```
//! use wordgraph::{SearchSpec, WordIndex};
//!
//! let index: WordIndex = ["QUIZ", "QUIT"].into_iter().collect();
//! let hits = index.search_matches(&SearchSpec::pattern("QUI?"));
//! assert_eq!(hits[0].word(), "QUIT");
//! assert_eq!(hits[0].inferred_positions().collect::<Vec<_>>(), vec![3]);
//! assert_eq!(hits[0].to_string(), "QUIt");
//! ```

#![warn(missing_docs)]

/// Word graph, search specs, traversal and derived queries.
pub mod graph;

pub use graph::{
    matches_spec, CancelToken, IntoWord, LetterNode, NodeId, SearchError, SearchSpec, SearchType,
    SiblingIter, SpecGroup, Tile, Variation, VariationGroup, WordIndex, WordMatch,
};

#[cfg(feature = "shared")]
pub use graph::SharedWordIndex;
