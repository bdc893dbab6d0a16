//! Checks applied to words the traversal has already accepted.
//!
//! Length limits above `max_length` and excluded letters are guaranteed by
//! the traversal itself and are not re-checked here.

use hashbrown::HashSet;
use smallvec::SmallVec;

use super::spec::SearchSpec;
use super::word::upper_letters;

#[derive(Debug, Clone)]
pub(crate) struct Constraints {
    min_length: usize,
    include: SmallVec<[char; 8]>,
    consist: HashSet<char>,
    consist_percent: u32,
}

impl Constraints {
    pub fn from_spec(spec: &SearchSpec) -> Self {
        Constraints {
            min_length: spec.min_length,
            include: upper_letters(&spec.include_letters).collect(),
            consist: upper_letters(&spec.consist_letters).collect(),
            consist_percent: spec.consist_percent,
        }
    }

    /// `letters` must already be upper-cased.
    pub fn matches(&self, letters: &[char]) -> bool {
        if letters.len() < self.min_length {
            return false;
        }

        // Each required letter consumes the first unconsumed occurrence.
        if !self.include.is_empty() {
            let mut scratch: SmallVec<[char; 32]> = SmallVec::from_slice(letters);
            for required in &self.include {
                match scratch.iter().position(|ch| ch == required) {
                    Some(index) => {
                        scratch.remove(index);
                    }
                    None => return false,
                }
            }
        }

        if self.consist_percent > 0 {
            if letters.is_empty() {
                return false;
            }
            let consist = letters.iter().filter(|ch| self.consist.contains(*ch)).count();
            // Truncating division: 2 of 3 is 66%, not 67%.
            let percent = consist * 100 / letters.len();
            if percent < self.consist_percent as usize {
                return false;
            }
        }

        true
    }
}

/// Determines whether `word` satisfies the minimum length, include letters and
/// consist constraints of `spec`.
///
/// Only those attributes are checked; everything else about a search result is
/// established while the graph is traversed.
///
/// # Examples
///
/// ```
/// use wordgraph::{matches_spec, SearchSpec};
///
/// let spec = SearchSpec::pattern("*").consisting_of("AEIOU", 50);
/// assert!(matches_spec("AREA", &spec));
/// assert!(!matches_spec("BRATS", &spec));
/// ```
pub fn matches_spec(word: &str, spec: &SearchSpec) -> bool {
    let letters: SmallVec<[char; 32]> = upper_letters(word).collect();
    Constraints::from_spec(spec).matches(&letters)
}
