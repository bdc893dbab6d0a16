use smallvec::SmallVec;

/// Letter buffer used for words on their way into or out of the graph.
pub(crate) type Letters = SmallVec<[char; 32]>;

/// Trait for types that can be used as a word when inserting into or querying
/// a [`WordIndex`](super::index::WordIndex).
///
/// Implemented for common string and `char` sequence types so that
/// [`insert`](super::index::WordIndex::insert) and
/// [`contains`](super::index::WordIndex::contains) accept them directly.
pub trait IntoWord {
    /// Collects this word into a character buffer.
    fn collect_word(self) -> SmallVec<[char; 32]>;
}

impl IntoWord for &str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &&str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &[char] {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.iter().copied().collect()
    }
}

impl IntoWord for Vec<char> {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.into_iter().collect()
    }
}

impl<const N: usize> IntoWord for [char; N] {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.into_iter().collect()
    }
}

/// Upper-cases a word for storage or lookup.
///
/// Returns `None` if the word is empty or contains anything other than
/// alphabetic characters. Lowercase is reserved for marking wildcard-filled
/// positions in search output, so nothing lowercase is ever stored.
pub(crate) fn normalize_word(word: impl IntoWord) -> Option<Letters> {
    let raw = word.collect_word();
    if raw.is_empty() || !raw.iter().all(|ch| ch.is_alphabetic()) {
        return None;
    }
    Some(raw.into_iter().flat_map(char::to_uppercase).collect())
}

/// Upper-cases every letter of `letters`, leaving other characters alone.
pub(crate) fn upper_letters(letters: &str) -> impl Iterator<Item = char> + '_ {
    letters.chars().flat_map(char::to_uppercase)
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
