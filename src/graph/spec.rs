/// The class of lexical query a [`SearchSpec`] asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchType {
    /// Positional match. `?` stands for exactly one letter, `*` for any
    /// number of letters. A pattern without wildcards is a membership test.
    #[default]
    Pattern,
    /// Words using every pattern letter exactly once. `?` is a blank tile.
    Anagram,
    /// Words using a subset of the pattern letters. `?` is a blank tile.
    Subanagram,
}

/// A query against a [`WordIndex`](super::index::WordIndex).
///
/// Letters in `pattern` and in the letter sets are compared case-insensitively;
/// the index upper-cases everything before matching.
///
/// # Examples
///
/// ```
/// use wordgraph::SearchSpec;
///
/// let spec = SearchSpec::anagram("RETAINS?")
///     .with_min_length(8)
///     .excluding("Q")
///     .consisting_of("AEIOU", 40);
/// assert_eq!(spec.consist_percent, 40);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSpec {
    /// Which kind of match to run.
    pub search_type: SearchType,
    /// Letters and wildcards to match against.
    pub pattern: String,
    /// Shortest accepted word, checked after traversal.
    pub min_length: usize,
    /// Longest accepted word (inclusive). Traversal never goes deeper.
    pub max_length: usize,
    /// Letters that must all appear; repeats require repeated occurrences.
    pub include_letters: String,
    /// Letters that may not appear anywhere in a result.
    pub exclude_letters: String,
    /// Letters counted by `consist_percent`.
    pub consist_letters: String,
    /// Minimum share of the word, in whole percent, drawn from
    /// `consist_letters`. Zero disables the check.
    pub consist_percent: u32,
}

impl Default for SearchSpec {
    fn default() -> Self {
        SearchSpec {
            search_type: SearchType::Pattern,
            pattern: String::new(),
            min_length: 0,
            max_length: usize::MAX,
            include_letters: String::new(),
            exclude_letters: String::new(),
            consist_letters: String::new(),
            consist_percent: 0,
        }
    }
}

impl SearchSpec {
    /// A query of the given type with no extra constraints.
    pub fn new(search_type: SearchType, pattern: impl Into<String>) -> Self {
        SearchSpec {
            search_type,
            pattern: pattern.into(),
            ..SearchSpec::default()
        }
    }

    /// A positional pattern query.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::new(SearchType::Pattern, pattern)
    }

    /// An anagram query.
    pub fn anagram(pattern: impl Into<String>) -> Self {
        Self::new(SearchType::Anagram, pattern)
    }

    /// A subanagram query.
    pub fn subanagram(pattern: impl Into<String>) -> Self {
        Self::new(SearchType::Subanagram, pattern)
    }

    /// Sets the shortest accepted word length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Sets the longest accepted word length.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Restricts results to exactly `length` letters.
    pub fn with_length(self, length: usize) -> Self {
        self.with_min_length(length).with_max_length(length)
    }

    /// Sets the letters every result must contain.
    pub fn including(mut self, letters: impl Into<String>) -> Self {
        self.include_letters = letters.into();
        self
    }

    /// Sets the letters no result may contain.
    pub fn excluding(mut self, letters: impl Into<String>) -> Self {
        self.exclude_letters = letters.into();
        self
    }

    /// Requires at least `percent` of each word's letters to come from `letters`.
    pub fn consisting_of(mut self, letters: impl Into<String>, percent: u32) -> Self {
        self.consist_letters = letters.into();
        self.consist_percent = percent;
        self
    }
}
