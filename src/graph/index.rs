use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use itertools::{Itertools, Position};

use super::node::{LetterNode, NodeId, SiblingIter};
use super::node_arena::NodeArena;
use super::query::Query;
use super::search::{self, CancelToken, SearchError, WordMatch};
use super::spec::SearchSpec;
use super::word::{is_comment, normalize_word, IntoWord};

/// A word list stored as a letter graph, queryable by pattern, anagram and
/// subanagram.
///
/// Each position of every word is a [`LetterNode`]; alternatives at the same
/// position form a sibling chain and the next position hangs off `child`.
/// Nodes live in an arena and refer to each other by [`NodeId`].
///
/// Letters are stored upper-case. Search output uses lower case to mark the
/// letters a wildcard or blank stood in for.
///
/// The index is built with `&mut self` and searched with `&self`, so any
/// number of threads may search one finished index at once.
///
/// # Examples
///
/// ```
/// use wordgraph::{SearchSpec, WordIndex};
///
/// let mut index = WordIndex::new();
/// for word in ["CAT", "BAT", "EAT", "HATE"] {
///     index.insert(word);
/// }
/// assert!(index.contains("HATE"));
/// assert!(!index.contains("HAT"));
///
/// let found = index.search(&SearchSpec::pattern("?AT"));
/// assert_eq!(found, vec!["bAT", "cAT", "eAT"]);
/// ```
#[derive(Clone)]
pub struct WordIndex {
    arena: NodeArena,
    root: Option<NodeId>,
    word_count: usize,
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl WordIndex {
    /// Creates an index with no words.
    pub fn new() -> Self {
        WordIndex {
            arena: NodeArena::new(),
            root: None,
            word_count: 0,
        }
    }

    /// Adds a word to the index.
    ///
    /// Returns `true` if the word was added, `false` if it was already present
    /// or is not a word: empty input, or input holding anything besides
    /// letters, is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordgraph::WordIndex;
    ///
    /// let mut index = WordIndex::new();
    /// assert!(index.insert("fake"));
    /// assert!(!index.insert("FAKE")); // already present
    /// assert!(!index.insert("")); // ignored
    /// assert!(index.contains("FAKE"));
    /// ```
    pub fn insert(&mut self, word: impl IntoWord) -> bool {
        let Some(word) = normalize_word(word) else {
            log::debug!("ignoring empty or non-alphabetic word");
            return false;
        };

        let mut parent = None;
        let mut added = false;
        for (position, letter) in word.iter().copied().with_position() {
            let id = self.find_or_insert(parent, letter);
            if matches!(position, Position::Last | Position::Only) {
                added = self.arena[id].set_terminal();
            }
            parent = Some(id);
        }
        self.word_count += usize::from(added);
        added
    }

    /// Returns the node for `letter` in the chain below `parent` (or the root
    /// chain), appending one to the chain if the letter is not there yet.
    fn find_or_insert(&mut self, parent: Option<NodeId>, letter: char) -> NodeId {
        let head = match parent {
            None => self.root,
            Some(parent) => self.arena[parent].child(),
        };

        let Some(head) = head else {
            let id = self.arena.alloc(LetterNode::new(letter));
            match parent {
                None => self.root = Some(id),
                Some(parent) => self.arena[parent].set_child(id),
            }
            return id;
        };

        let mut last = head;
        for (id, node) in self.arena.siblings(Some(head)) {
            if node.letter() == letter {
                return id;
            }
            last = id;
        }
        let id = self.arena.alloc(LetterNode::new(letter));
        self.arena[last].set_sibling(id);
        id
    }

    /// Returns `true` if the given word is in the index.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordgraph::WordIndex;
    ///
    /// let index: WordIndex = ["BAKE", "CAKE"].into_iter().collect();
    /// assert!(index.contains("CAKE"));
    /// assert!(index.contains("cake"));
    /// assert!(!index.contains("CAK"));
    /// assert!(!index.contains(""));
    /// ```
    pub fn contains(&self, word: impl IntoWord) -> bool {
        let Some(word) = normalize_word(word) else {
            return false;
        };

        let mut head = self.root;
        let mut terminal = false;
        for &letter in &word {
            let Some((_, node)) = self.arena.siblings(head).find(|(_, n)| n.letter() == letter)
            else {
                return false;
            };
            terminal = node.is_terminal();
            head = node.child();
        }
        terminal
    }

    /// Finds every word matching `spec`.
    ///
    /// Letters matched literally come back upper-case; letters a `?`, `*` or
    /// blank stood in for come back lower-case. `Pattern` results are
    /// deduplicated and sorted; anagram results keep the order the traversal
    /// found them in.
    ///
    /// A spec whose pattern contains anything besides letters, `?` and `*`
    /// matches nothing.
    pub fn search(&self, spec: &SearchSpec) -> Vec<String> {
        render(self.search_matches(spec))
    }

    /// Like [`search`](WordIndex::search), but reports which positions were
    /// inferred instead of encoding it in letter case.
    pub fn search_matches(&self, spec: &SearchSpec) -> Vec<WordMatch> {
        // Without a token the traversal has nothing to be cancelled by.
        self.run(spec, None).unwrap_or_default()
    }

    /// Like [`search`](WordIndex::search), but gives up as soon as `cancel`
    /// fires. A cancelled search returns no partial results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Cancelled`] if the token was cancelled before
    /// or during the traversal.
    pub fn search_cancellable(
        &self,
        spec: &SearchSpec,
        cancel: &CancelToken,
    ) -> Result<Vec<String>, SearchError> {
        self.run(spec, Some(cancel)).map(render)
    }

    /// Structured counterpart of [`search_cancellable`](WordIndex::search_cancellable).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Cancelled`] if the token was cancelled.
    pub fn search_matches_cancellable(
        &self,
        spec: &SearchSpec,
        cancel: &CancelToken,
    ) -> Result<Vec<WordMatch>, SearchError> {
        self.run(spec, Some(cancel))
    }

    fn run(
        &self,
        spec: &SearchSpec,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<WordMatch>, SearchError> {
        match Query::compile(spec) {
            Some(query) => search::run(&self.arena, self.root, &query, cancel),
            None => Ok(Vec::new()),
        }
    }

    /// Builds an index from a word list, one word per line.
    ///
    /// Surrounding whitespace is trimmed; empty lines and lines starting with
    /// `#` are skipped, as are lines that are not words.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading.
    pub fn from_reader(mut reader: impl BufRead) -> io::Result<WordIndex> {
        let mut index = WordIndex::new();
        let mut lines = 0usize;

        // Reuse one buffer rather than allocating a String per line.
        let mut buf = String::with_capacity(80);
        while reader.read_line(&mut buf)? > 0 {
            let word = buf.trim();
            if !word.is_empty() && !is_comment(word) {
                lines += 1;
                index.insert(word);
            }
            buf.clear();
        }

        log::debug!(
            "loaded {} words from {lines} lines into {} nodes",
            index.word_count(),
            index.node_count()
        );
        Ok(index)
    }

    /// Builds an index from the word list file at `path`.
    ///
    /// See [`from_reader`](WordIndex::from_reader) for the file format.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wordgraph::WordIndex;
    ///
    /// let index = WordIndex::from_file("twl06.txt").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<WordIndex> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Number of distinct words in the index.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of letter nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// True if no word has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// First node of the first-letter chain, or `None` for an empty index.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this index.
    pub fn node(&self, id: NodeId) -> &LetterNode {
        &self.arena[id]
    }

    /// Iterates the sibling chain starting at `head`.
    pub fn siblings(&self, head: Option<NodeId>) -> SiblingIter<'_> {
        self.arena.siblings(head)
    }

    /// Renders the graph as indented text, for diagnostics.
    ///
    /// Each node prints as its letter followed by `*` if a word ends there.
    /// A node with no child ends the line; the next line is indented to the
    /// depth where its letter belongs.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordgraph::WordIndex;
    ///
    /// let index: WordIndex = ["CAT", "CAR", "DO"].into_iter().collect();
    /// assert_eq!(index.dump(), "C A T*\n    R*\nD O*\n");
    /// ```
    pub fn dump(&self) -> String {
        let Some(root) = self.root else {
            return String::from("(empty)\n");
        };

        let mut out = String::new();
        let mut stack = vec![(root, 0usize)];
        let mut line_start = true;
        while let Some((id, depth)) = stack.pop() {
            let node = &self.arena[id];
            if line_start {
                out.extend(std::iter::repeat("  ").take(depth));
            }
            out.push(node.letter());
            out.push(if node.is_terminal() { '*' } else { ' ' });

            // The sibling waits until this node's whole subtree is printed.
            if let Some(sibling) = node.sibling() {
                stack.push((sibling, depth));
            }
            match node.child() {
                Some(child) => {
                    stack.push((child, depth + 1));
                    line_start = false;
                }
                None => {
                    out.push('\n');
                    line_start = true;
                }
            }
        }
        out
    }
}

fn render(matches: Vec<WordMatch>) -> Vec<String> {
    matches.iter().map(ToString::to_string).collect()
}

impl<W: IntoWord> FromIterator<W> for WordIndex {
    fn from_iter<I: IntoIterator<Item = W>>(words: I) -> Self {
        let mut index = WordIndex::new();
        index.extend(words);
        index
    }
}

impl<W: IntoWord> Extend<W> for WordIndex {
    fn extend<I: IntoIterator<Item = W>>(&mut self, words: I) {
        for word in words {
            self.insert(word);
        }
    }
}

impl fmt::Debug for WordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordIndex")
            .field("word_count", &self.word_count)
            .field("node_count", &self.node_count())
            .finish()
    }
}

impl fmt::Display for WordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn index_of(words: &[&str]) -> WordIndex {
        words.iter().collect()
    }

    #[test]
    fn basic_word_lookup() {
        let index = index_of(&["BAKE", "CAKE", "FAKE", "LAKE"]);
        assert!(index.contains("BAKE"));
        assert!(index.contains("CAKE"));
        assert!(!index.contains("MAKE"));
        assert!(!index.contains("BAK"));
        assert!(!index.contains("BAKES"));
    }

    #[test]
    fn empty_index() {
        let index = WordIndex::new();
        assert!(index.is_empty());
        assert!(!index.contains("A"));
        assert!(!index.contains(""));
        assert_eq!(index.node_count(), 0);
        assert!(index.search(&SearchSpec::pattern("*")).is_empty());
        assert!(index.search(&SearchSpec::anagram("A")).is_empty());
    }

    #[test]
    fn empty_word_is_ignored() {
        let mut index = WordIndex::new();
        assert!(!index.insert(""));
        assert!(index.is_empty());
        assert!(!index.contains(""));
    }

    #[test]
    fn non_alphabetic_words_are_ignored() {
        let mut index = WordIndex::new();
        assert!(!index.insert("C?T"));
        assert!(!index.insert("CA*"));
        assert!(!index.insert("AB1"));
        assert!(index.is_empty());
        assert!(!index.contains("C?T"));
    }

    #[test]
    fn insert_is_case_normalized() {
        let mut index = WordIndex::new();
        assert!(index.insert("zap"));
        assert!(index.contains("ZAP"));
        assert!(index.contains("Zap"));
        assert_eq!(index.search(&SearchSpec::pattern("ZAP")), vec!["ZAP"]);
    }

    #[test]
    fn insert_returns_false_for_duplicate() {
        let mut index = index_of(&["BAKE", "CAKE"]);
        let nodes = index.node_count();
        assert!(!index.insert("BAKE"));
        assert!(!index.insert("CAKE"));
        assert_eq!(index.word_count(), 2);
        assert_eq!(index.node_count(), nodes);
    }

    #[test]
    fn add_prefix_of_existing() {
        let mut index = index_of(&["CART"]);
        assert!(!index.contains("CAR"));
        assert!(index.insert("CAR"));
        assert!(index.contains("CAR"));
        assert!(index.contains("CART"));
        assert_eq!(index.node_count(), 4);
    }

    #[test]
    fn add_extension_of_existing() {
        let mut index = index_of(&["CAR"]);
        assert!(index.insert("CART"));
        assert!(index.contains("CAR"));
        assert!(index.contains("CART"));
    }

    #[test]
    fn prefixes_are_shared() {
        let index = index_of(&["TEST", "TESTER", "TESTS", "TEA"]);
        // The TESTER chain, plus S after TEST and A after TE.
        assert_eq!(index.node_count(), 8);
    }

    #[test]
    fn sibling_letters_are_unique_per_chain() {
        let index = index_of(&["AB", "AC", "AB", "AD", "AC", "BA"]);
        let mut chains = vec![index.root()];
        while let Some(head) = chains.pop() {
            let letters: Vec<char> = index.siblings(head).map(|(_, n)| n.letter()).collect();
            assert!(letters.iter().all_unique(), "{letters:?}");
            chains.extend(index.siblings(head).map(|(_, n)| n.child()));
        }
    }

    #[test]
    fn walk_nodes_by_hand() {
        let index = index_of(&["TEST", "TESTER", "WTEST"]);
        let step = |head: Option<NodeId>, letter: char| {
            index
                .siblings(head)
                .find(|(_, n)| n.letter() == letter)
                .map(|(id, _)| index.node(id))
                .unwrap()
        };
        let t = step(index.root(), 'T');
        assert!(!t.is_terminal());
        let e = step(t.child(), 'E');
        let s = step(e.child(), 'S');
        let t2 = step(s.child(), 'T');
        assert!(t2.is_terminal());
        let e2 = step(t2.child(), 'E');
        assert!(!e2.is_terminal());
        let r = step(e2.child(), 'R');
        assert!(r.is_terminal());
        assert_eq!(r.child(), None);
        assert!(index.siblings(index.root()).any(|(_, n)| n.letter() == 'W'));
    }

    #[test]
    fn insertion_order_does_not_change_membership_or_patterns() {
        const WORDS: [&str; 5] = ["ALFA", "ALE", "BRAVO", "BRA", "CHARLIE"];
        let reference = index_of(&WORDS);
        let reference_found = reference.search(&SearchSpec::pattern("*A*"));
        for order in WORDS.iter().permutations(WORDS.len()) {
            let index: WordIndex = order.into_iter().collect();
            for word in WORDS {
                assert!(index.contains(word));
            }
            assert!(!index.contains("AL"));
            assert_eq!(index.search(&SearchSpec::pattern("*A*")), reference_found);
        }
    }

    #[test]
    fn from_reader_skips_comments_and_blank_lines() {
        let list = "# a comment\nCAT\n\n   \n  dog  \n  # indented comment\nC4T\nCAT\n";
        let index = WordIndex::from_reader(list.as_bytes()).unwrap();
        assert_eq!(index.word_count(), 2);
        assert!(index.contains("CAT"));
        assert!(index.contains("DOG"));
        assert!(!index.contains("C4T"));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = WordIndex::from_file("/nonexistent/words.txt").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn extend_adds_words() {
        let mut index = index_of(&["ONE"]);
        index.extend(vec![String::from("TWO"), String::from("THREE")]);
        assert_eq!(index.word_count(), 3);
        assert!(index.contains("THREE"));
    }

    #[test]
    fn dump_layout() {
        assert_eq!(WordIndex::new().dump(), "(empty)\n");
        let index = index_of(&["CAT", "CAR", "DO"]);
        assert_eq!(index.dump(), "C A T*\n    R*\nD O*\n");
        let index = index_of(&["A", "AT", "ATE", "BE"]);
        assert_eq!(index.dump(), "A*T*E*\nB E*\n");
        assert_eq!(index.to_string(), index.dump());
    }

    #[test]
    fn debug_shows_counts() {
        let index = index_of(&["AB", "AC"]);
        assert_eq!(
            format!("{index:?}"),
            "WordIndex { word_count: 2, node_count: 3 }"
        );
    }

    #[test]
    fn word_index_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WordIndex>();
    }

    #[test]
    fn cancelled_token_stops_search() {
        let index = index_of(&["CAT", "ACT"]);
        let token = CancelToken::new();
        let spec = SearchSpec::anagram("TAC");
        assert_eq!(
            index.search_cancellable(&spec, &token).unwrap(),
            index.search(&spec)
        );
        token.cancel();
        assert_eq!(
            index.search_cancellable(&spec, &token),
            Err(SearchError::Cancelled)
        );
        assert_eq!(
            index.search_matches_cancellable(&spec, &token),
            Err(SearchError::Cancelled)
        );
    }

    #[test]
    fn long_words_do_not_overflow_the_stack() {
        let long: String = std::iter::repeat('A').take(2_000).collect();
        let mut index = WordIndex::new();
        assert!(index.insert(long.as_str()));
        assert!(index.contains(long.as_str()));
        let found = index.search(&SearchSpec::pattern("A*"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].len(), 2_000);
    }
}
