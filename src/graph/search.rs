//! Explicit-stack traversal of the letter graph.
//!
//! Every frame on the stack owns its partial word and the part of the query it
//! still has to satisfy, so frames can be pushed and popped in any order and a
//! wide or deep graph never grows the call stack.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use smallvec::SmallVec;

use super::node::NodeId;
use super::node_arena::NodeArena;
use super::query::{PatternBuf, Query, BLANK, STAR};
use super::spec::SearchType;

/// How many frames are popped between two looks at the cancel token.
const CANCEL_POLL_INTERVAL: usize = 256;

/// One position of a matched word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    letter: char,
    inferred: bool,
}

impl Tile {
    pub(crate) fn new(letter: char, inferred: bool) -> Self {
        Tile { letter, inferred }
    }

    /// The stored (upper-case) letter.
    #[inline]
    pub fn letter(self) -> char {
        self.letter
    }

    /// True if a wildcard or blank filled this position.
    #[inline]
    pub fn is_inferred(self) -> bool {
        self.inferred
    }

    /// The letter as it appears in rendered output: lower-cased when inferred.
    pub fn rendered(self) -> char {
        if !self.inferred {
            return self.letter;
        }
        let mut lower = self.letter.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(ch), None) => ch,
            _ => self.letter,
        }
    }
}

/// A word found by a search, with the positions that were filled by
/// wildcards or blanks.
///
/// `Display` renders the word the way [`WordIndex::search`] reports it:
/// literal matches upper-case, inferred letters lower-case.
///
/// [`WordIndex::search`]: super::index::WordIndex::search
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WordMatch {
    tiles: SmallVec<[Tile; 16]>,
}

impl WordMatch {
    /// The word in its stored, all upper-case form.
    pub fn word(&self) -> String {
        self.tiles.iter().map(|tile| tile.letter).collect()
    }

    /// Every position of the word, in order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Indices of the positions that a wildcard or blank filled.
    pub fn inferred_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.inferred)
            .map(|(i, _)| i)
    }

    /// Number of letters in the word.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a match produced by a search.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn letters(&self) -> SmallVec<[char; 32]> {
        self.tiles.iter().map(|tile| tile.letter).collect()
    }
}

impl fmt::Display for WordMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        self.tiles
            .iter()
            .try_for_each(|tile| f.write_char(tile.rendered()))
    }
}

/// A shareable flag that stops a running search.
///
/// Clones observe the same flag, so one clone can be handed to the searching
/// thread and another kept by whoever may want to stop it.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks every search watching this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once [`cancel`](CancelToken::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Errors that can end a cancellable search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The search's [`CancelToken`] fired before the traversal finished.
    Cancelled,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Cancelled => write!(f, "search cancelled"),
        }
    }
}

impl Error for SearchError {}

/// A pending visit: try every sibling in the chain starting at `node`.
struct Frame {
    node: NodeId,
    tiles: SmallVec<[Tile; 16]>,
    /// Pattern still to match, or letters still unused for the anagram kinds.
    unmatched: PatternBuf,
}

enum Hits {
    /// Pattern matches, deduplicated and ordered by their rendering.
    Ordered(BTreeMap<String, WordMatch>),
    /// Anagram matches in discovery order.
    Discovered(Vec<WordMatch>),
}

impl Hits {
    fn for_kind(kind: SearchType) -> Self {
        match kind {
            SearchType::Pattern => Hits::Ordered(BTreeMap::new()),
            SearchType::Anagram | SearchType::Subanagram => Hits::Discovered(Vec::new()),
        }
    }

    fn push(&mut self, found: WordMatch) {
        match self {
            Hits::Ordered(set) => {
                set.entry(found.to_string()).or_insert(found);
            }
            Hits::Discovered(list) => list.push(found),
        }
    }

    fn into_matches(self) -> Vec<WordMatch> {
        match self {
            Hits::Ordered(set) => set.into_values().collect(),
            Hits::Discovered(list) => list,
        }
    }
}

struct Traversal<'a> {
    arena: &'a NodeArena,
    query: &'a Query,
    stack: Vec<Frame>,
    hits: Hits,
}

/// Runs `query` over the graph whose first position starts at `root`.
///
/// Only fails when `cancel` is given and fires.
pub(crate) fn run(
    arena: &NodeArena,
    root: Option<NodeId>,
    query: &Query,
    cancel: Option<&CancelToken>,
) -> Result<Vec<WordMatch>, SearchError> {
    let cancelled = || cancel.is_some_and(CancelToken::is_cancelled);
    if cancelled() {
        return Err(SearchError::Cancelled);
    }
    let Some(root) = root else {
        return Ok(Vec::new());
    };

    let mut traversal = Traversal {
        arena,
        query,
        stack: vec![Frame {
            node: root,
            tiles: SmallVec::new(),
            unmatched: query.pattern.clone(),
        }],
        hits: Hits::for_kind(query.kind),
    };

    let mut visited = 0usize;
    while let Some(frame) = traversal.stack.pop() {
        visited += 1;
        if visited % CANCEL_POLL_INTERVAL == 0 && cancelled() {
            log::debug!("search cancelled after {visited} frames");
            return Err(SearchError::Cancelled);
        }
        if frame.tiles.len() >= query.max_length {
            continue;
        }
        match query.kind {
            SearchType::Pattern => traversal.expand_pattern(frame),
            SearchType::Anagram | SearchType::Subanagram => traversal.expand_anagram(frame),
        }
    }

    let matches = traversal.hits.into_matches();
    log::trace!(
        "{:?} search for {:?}: {visited} frames, {} matches",
        query.kind,
        query.pattern.iter().collect::<String>(),
        matches.len()
    );
    Ok(matches)
}

impl Traversal<'_> {
    fn push(&mut self, node: NodeId, tiles: SmallVec<[Tile; 16]>, unmatched: PatternBuf) {
        self.stack.push(Frame {
            node,
            tiles,
            unmatched,
        });
    }

    fn accept(&mut self, tiles: SmallVec<[Tile; 16]>) {
        let found = WordMatch { tiles };
        if self.query.constraints.matches(&found.letters()) {
            self.hits.push(found);
        }
    }

    fn expand_pattern(&mut self, frame: Frame) {
        let arena = self.arena;
        let query = self.query;

        let Some(&next) = frame.unmatched.first() else {
            return;
        };
        let rest = PatternBuf::from_slice(&frame.unmatched[1..]);
        // A star may also match nothing: retry this chain without it.
        if next == STAR {
            self.push(frame.node, frame.tiles.clone(), rest.clone());
        }
        // Consuming `next` completes the pattern, save for a trailing star.
        let completes = rest.is_empty() || rest[..] == [STAR];

        for (_, node) in arena.siblings(Some(frame.node)) {
            let letter = node.letter();
            if query.excludes(letter) {
                continue;
            }
            let inferred = if next == letter {
                false
            } else if next == STAR || next == BLANK {
                true
            } else {
                continue;
            };

            let mut tiles = frame.tiles.clone();
            tiles.push(Tile::new(letter, inferred));

            if let Some(child) = node.child() {
                if next == STAR {
                    self.push(child, tiles.clone(), frame.unmatched.clone());
                }
                self.push(child, tiles.clone(), rest.clone());
            }
            if node.is_terminal() && completes {
                self.accept(tiles);
            }
        }
    }

    fn expand_anagram(&mut self, frame: Frame) {
        let arena = self.arena;
        let query = self.query;

        for (_, node) in arena.siblings(Some(frame.node)) {
            let letter = node.letter();
            if query.excludes(letter) {
                continue;
            }
            let exact = frame.unmatched.iter().position(|&ch| ch == letter);
            let consumed = exact.or_else(|| frame.unmatched.iter().position(|&ch| ch == BLANK));
            if consumed.is_none() && !query.open_wildcard {
                continue;
            }

            let mut tiles = frame.tiles.clone();
            tiles.push(Tile::new(letter, exact.is_none()));
            let mut unmatched = frame.unmatched.clone();
            if let Some(index) = consumed {
                unmatched.remove(index);
            }

            let completes = node.is_terminal()
                && (query.kind == SearchType::Subanagram || unmatched.is_empty());
            if let Some(child) = node.child() {
                if query.open_wildcard || !unmatched.is_empty() {
                    self.push(child, tiles.clone(), unmatched);
                }
            }
            if completes {
                self.accept(tiles);
            }
        }
    }
}
