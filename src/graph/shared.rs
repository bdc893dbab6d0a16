//! A [`WordIndex`] that can keep growing while other threads search it.

use std::sync::Arc;

use parking_lot::RwLock;

use super::index::WordIndex;
use super::search::{CancelToken, SearchError, WordMatch};
use super::spec::SearchSpec;
use super::variation::{Variation, VariationGroup};
use super::word::IntoWord;

/// A cloneable handle to a lock-guarded [`WordIndex`].
///
/// Inserts take the write lock; lookups and searches share the read lock, so
/// a search always sees the graph either before or after any given insert.
/// If the index is fully built before searching starts, plain `&WordIndex`
/// shared across threads needs no lock at all.
///
/// # Examples
///
/// ```
/// use wordgraph::{SearchSpec, SharedWordIndex};
///
/// let index = SharedWordIndex::default();
/// let writer = index.clone();
/// std::thread::spawn(move || {
///     writer.insert("QI");
/// })
/// .join()
/// .unwrap();
/// assert_eq!(index.search(&SearchSpec::pattern("Q?")), vec!["Qi"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedWordIndex {
    inner: Arc<RwLock<WordIndex>>,
}

impl SharedWordIndex {
    /// Wraps an existing index.
    pub fn new(index: WordIndex) -> Self {
        SharedWordIndex {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// See [`WordIndex::insert`].
    pub fn insert(&self, word: impl IntoWord) -> bool {
        self.inner.write().insert(word)
    }

    /// See [`WordIndex::contains`].
    pub fn contains(&self, word: impl IntoWord) -> bool {
        self.inner.read().contains(word)
    }

    /// See [`WordIndex::search`].
    pub fn search(&self, spec: &SearchSpec) -> Vec<String> {
        self.inner.read().search(spec)
    }

    /// See [`WordIndex::search_matches`].
    pub fn search_matches(&self, spec: &SearchSpec) -> Vec<WordMatch> {
        self.inner.read().search_matches(spec)
    }

    /// See [`WordIndex::search_cancellable`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Cancelled`] if the token fires.
    pub fn search_cancellable(
        &self,
        spec: &SearchSpec,
        cancel: &CancelToken,
    ) -> Result<Vec<String>, SearchError> {
        self.inner.read().search_cancellable(spec, cancel)
    }

    /// See [`WordIndex::variations`].
    pub fn variations(&self, word: &str, variation: Variation) -> Vec<VariationGroup> {
        self.inner.read().variations(word, variation)
    }

    /// Number of distinct words currently in the index.
    pub fn word_count(&self) -> usize {
        self.inner.read().word_count()
    }

    /// Runs `f` with shared access to the whole index.
    pub fn with_index<R>(&self, f: impl FnOnce(&WordIndex) -> R) -> R {
        f(&self.inner.read())
    }
}

impl From<WordIndex> for SharedWordIndex {
    fn from(index: WordIndex) -> Self {
        SharedWordIndex::new(index)
    }
}
