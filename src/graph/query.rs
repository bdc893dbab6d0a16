//! Normalization of a [`SearchSpec`] into the form the traversal consumes.

use hashbrown::HashSet;
use smallvec::SmallVec;

use super::filter::Constraints;
use super::spec::{SearchSpec, SearchType};
use super::word::upper_letters;

/// Matches any run of letters, including none.
pub(crate) const STAR: char = '*';
/// Matches exactly one letter.
pub(crate) const BLANK: char = '?';

pub(crate) type PatternBuf = SmallVec<[char; 16]>;

/// A search spec with its pattern rewritten for traversal and its letter
/// sets upper-cased.
#[derive(Debug)]
pub(crate) struct Query {
    pub kind: SearchType,
    /// Remaining pattern for `Pattern`, letter multiset for the anagram kinds.
    pub pattern: PatternBuf,
    /// Set for anagram kinds whose pattern contained `*`.
    pub open_wildcard: bool,
    pub exclude: HashSet<char>,
    pub max_length: usize,
    pub constraints: Constraints,
}

impl Query {
    /// Returns `None` when the pattern holds a character that can never match.
    pub fn compile(spec: &SearchSpec) -> Option<Query> {
        let mut pattern: PatternBuf = upper_letters(&spec.pattern).collect();
        if let Some(&bad) = pattern
            .iter()
            .find(|&&ch| ch != STAR && ch != BLANK && !ch.is_alphabetic())
        {
            log::debug!("pattern {:?} contains unmatchable {bad:?}", spec.pattern);
            return None;
        }

        let mut open_wildcard = false;
        match spec.search_type {
            SearchType::Pattern => {
                if pattern.is_empty() {
                    pattern.push(STAR);
                } else {
                    pattern.dedup_by(|a, b| *a == STAR && *b == STAR);
                }
            }
            SearchType::Anagram | SearchType::Subanagram => {
                open_wildcard = pattern.contains(&STAR);
                pattern.retain(|ch| *ch != STAR);
            }
        }

        Some(Query {
            kind: spec.search_type,
            pattern,
            open_wildcard,
            exclude: upper_letters(&spec.exclude_letters).collect(),
            max_length: spec.max_length,
            constraints: Constraints::from_spec(spec),
        })
    }

    #[inline]
    pub fn excludes(&self, letter: char) -> bool {
        self.exclude.contains(&letter)
    }
}
