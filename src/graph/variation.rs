//! Families of related-word queries built around a single word: its hooks,
//! anagrams, one-blank variants and so on.

use hashbrown::HashSet;
use smallvec::{smallvec, SmallVec};

use super::index::WordIndex;
use super::query::{BLANK, STAR};
use super::spec::SearchSpec;

/// A kind of derived query around one word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variation {
    /// Anagrams of the word.
    Anagrams,
    /// Words made from a subset of the word's letters.
    Subanagrams,
    /// Words formed by adding one letter at the front or back.
    Hooks,
    /// Anagrams of the word plus one extra letter.
    AnagramHooks,
    /// Anagrams of the word with any one letter replaced by a blank.
    BlankAnagrams,
    /// The word with any one letter replaced.
    BlankMatches,
    /// Words that contain the word at their start or end, with at least one
    /// extra letter.
    Extensions,
    /// The word with two adjacent letters swapped.
    Transpositions,
}

/// A titled list of queries whose results are shown together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecGroup {
    /// Heading for the group, e.g. "Front Hooks".
    pub title: &'static str,
    /// Queries run in order; their results are concatenated.
    pub specs: Vec<SearchSpec>,
}

/// The words found for one [`SpecGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariationGroup {
    /// Heading copied from the spec group.
    pub title: &'static str,
    /// Results in query order, each rendered string at most once.
    pub words: Vec<String>,
}

impl Variation {
    /// Every variation, in menu order.
    pub const ALL: [Variation; 8] = [
        Variation::Anagrams,
        Variation::Subanagrams,
        Variation::Hooks,
        Variation::AnagramHooks,
        Variation::BlankAnagrams,
        Variation::BlankMatches,
        Variation::Extensions,
        Variation::Transpositions,
    ];

    /// Caption for a window listing this variation of `word`.
    pub fn caption(self, word: &str) -> String {
        let name = match self {
            Variation::Anagrams => "Anagrams",
            Variation::Subanagrams => "Subanagrams",
            Variation::Hooks => "Hooks",
            Variation::AnagramHooks => "Anagram Hooks",
            Variation::BlankAnagrams => "Blank Anagrams",
            Variation::BlankMatches => "Blank Matches",
            Variation::Extensions => "Extensions",
            Variation::Transpositions => "Transpositions",
        };
        format!("{name} for: {word}")
    }

    /// Builds the queries for this variation of `word`.
    ///
    /// Hooks and extensions produce a front and a back group; every other
    /// variation produces a single group.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordgraph::{SearchType, Variation};
    ///
    /// let groups = Variation::Hooks.specs("CAT");
    /// assert_eq!(groups[0].title, "Front Hooks");
    /// assert_eq!(groups[0].specs[0].pattern, "?CAT");
    /// assert_eq!(groups[1].specs[0].pattern, "CAT?");
    /// assert_eq!(groups[1].specs[0].search_type, SearchType::Pattern);
    /// ```
    pub fn specs(self, word: &str) -> SmallVec<[SpecGroup; 2]> {
        let letters: Vec<char> = word.chars().collect();
        let single = |title: &'static str, specs: Vec<SearchSpec>| -> SmallVec<[SpecGroup; 2]> {
            smallvec![SpecGroup { title, specs }]
        };
        let pair = |front_title: &'static str,
                    front: SearchSpec,
                    back_title: &'static str,
                    back: SearchSpec|
         -> SmallVec<[SpecGroup; 2]> {
            smallvec![
                SpecGroup {
                    title: front_title,
                    specs: vec![front],
                },
                SpecGroup {
                    title: back_title,
                    specs: vec![back],
                },
            ]
        };

        match self {
            Variation::Anagrams => single("Anagrams", vec![SearchSpec::anagram(word)]),
            Variation::Subanagrams => single("Subanagrams", vec![SearchSpec::subanagram(word)]),
            Variation::Hooks => pair(
                "Front Hooks",
                SearchSpec::pattern(format!("{BLANK}{word}")),
                "Back Hooks",
                SearchSpec::pattern(format!("{word}{BLANK}")),
            ),
            Variation::AnagramHooks => single(
                "Anagram Hooks",
                vec![SearchSpec::anagram(format!("{BLANK}{word}"))],
            ),
            Variation::BlankAnagrams => single(
                "Blank Anagrams",
                blanked(&letters).map(SearchSpec::anagram).collect(),
            ),
            Variation::BlankMatches => single(
                "Blank Matches",
                blanked(&letters).map(SearchSpec::pattern).collect(),
            ),
            Variation::Extensions => pair(
                "Front Extensions",
                SearchSpec::pattern(format!("{STAR}{BLANK}{word}")),
                "Back Extensions",
                SearchSpec::pattern(format!("{word}{BLANK}{STAR}")),
            ),
            Variation::Transpositions => single(
                "Transpositions",
                transposed(&letters).map(SearchSpec::pattern).collect(),
            ),
        }
    }
}

/// The word once per position, with that position replaced by a blank.
fn blanked(letters: &[char]) -> impl Iterator<Item = String> + '_ {
    (0..letters.len()).map(move |i| {
        letters
            .iter()
            .enumerate()
            .map(|(j, &ch)| if i == j { BLANK } else { ch })
            .collect()
    })
}

/// The word once per adjacent pair, with that pair swapped.
fn transposed(letters: &[char]) -> impl Iterator<Item = String> + '_ {
    (1..letters.len()).map(move |i| {
        let mut swapped = letters.to_vec();
        swapped.swap(i - 1, i);
        swapped.into_iter().collect()
    })
}

impl WordIndex {
    /// Runs every query of `variation` around `word` and collects the results
    /// group by group.
    ///
    /// Within a group, a word already produced by an earlier query is not
    /// repeated.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordgraph::{Variation, WordIndex};
    ///
    /// let index: WordIndex = ["AT", "BAT", "CAT", "ATE"].into_iter().collect();
    /// let hooks = index.variations("AT", Variation::Hooks);
    /// assert_eq!(hooks[0].words, vec!["bAT", "cAT"]);
    /// assert_eq!(hooks[1].words, vec!["ATe"]);
    /// ```
    pub fn variations(&self, word: &str, variation: Variation) -> Vec<VariationGroup> {
        variation
            .specs(word)
            .into_iter()
            .map(|group| {
                let mut seen = HashSet::new();
                let words = group
                    .specs
                    .iter()
                    .flat_map(|spec| self.search(spec))
                    .filter(|found| seen.insert(found.clone()))
                    .collect();
                VariationGroup {
                    title: group.title,
                    words,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::spec::SearchType;

    fn patterns(group: &SpecGroup) -> Vec<&str> {
        group.specs.iter().map(|spec| spec.pattern.as_str()).collect()
    }

    fn index() -> WordIndex {
        [
            "AT", "ATE", "BAT", "CAT", "ACT", "TAB", "TA", "EAT", "TEA", "ETA", "CATS", "SCAT",
            "CAST", "ACTS", "TACT", "CAP", "COT", "CUT", "BATS",
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn single_group_variations() {
        for variation in [
            Variation::Anagrams,
            Variation::Subanagrams,
            Variation::AnagramHooks,
            Variation::BlankAnagrams,
            Variation::BlankMatches,
            Variation::Transpositions,
        ] {
            assert_eq!(variation.specs("CAT").len(), 1, "{variation:?}");
        }
        assert_eq!(Variation::Hooks.specs("CAT").len(), 2);
        assert_eq!(Variation::Extensions.specs("CAT").len(), 2);
    }

    #[test]
    fn blank_specs_cover_every_position() {
        let groups = Variation::BlankMatches.specs("CAT");
        assert_eq!(patterns(&groups[0]), vec!["?AT", "C?T", "CA?"]);
        assert!(groups[0]
            .specs
            .iter()
            .all(|spec| spec.search_type == SearchType::Pattern));

        let groups = Variation::BlankAnagrams.specs("CAT");
        assert_eq!(patterns(&groups[0]), vec!["?AT", "C?T", "CA?"]);
        assert!(groups[0]
            .specs
            .iter()
            .all(|spec| spec.search_type == SearchType::Anagram));
    }

    #[test]
    fn transposition_specs_swap_adjacent_pairs() {
        let groups = Variation::Transpositions.specs("CATS");
        assert_eq!(patterns(&groups[0]), vec!["ACTS", "CTAS", "CAST"]);
        assert!(Variation::Transpositions.specs("A")[0].specs.is_empty());
    }

    #[test]
    fn extension_specs() {
        let groups = Variation::Extensions.specs("AT");
        assert_eq!(groups[0].title, "Front Extensions");
        assert_eq!(patterns(&groups[0]), vec!["*?AT"]);
        assert_eq!(groups[1].title, "Back Extensions");
        assert_eq!(patterns(&groups[1]), vec!["AT?*"]);
    }

    #[test]
    fn caption_names_the_word() {
        assert_eq!(Variation::AnagramHooks.caption("CAT"), "Anagram Hooks for: CAT");
        assert_eq!(Variation::ALL.len(), 8);
    }

    #[test]
    fn hooks() {
        let groups = index().variations("AT", Variation::Hooks);
        assert_eq!(groups[0].title, "Front Hooks");
        assert_eq!(groups[0].words, vec!["bAT", "cAT", "eAT"]);
        assert_eq!(groups[1].title, "Back Hooks");
        assert_eq!(groups[1].words, vec!["ATe"]);
    }

    #[test]
    fn extensions() {
        let groups = index().variations("AT", Variation::Extensions);
        assert_eq!(groups[0].words, vec!["bAT", "cAT", "eAT", "scAT"]);
        assert_eq!(groups[1].words, vec!["ATe"]);
    }

    #[test]
    fn transpositions_find_swapped_words() {
        let groups = index().variations("CATS", Variation::Transpositions);
        assert_eq!(groups[0].words, vec!["ACTS", "CAST"]);
    }

    #[test]
    fn blank_matches_keep_each_marking() {
        let groups = index().variations("CAT", Variation::BlankMatches);
        assert_eq!(
            groups[0].words,
            vec!["bAT", "cAT", "eAT", "CaT", "CoT", "CuT", "CAp", "CAt"]
        );
    }

    #[test]
    fn blank_anagrams_deduplicate_across_queries() {
        // "?A" and "A?" are the same tiles and find the same words.
        let groups = index().variations("AA", Variation::BlankAnagrams);
        assert_eq!(Variation::BlankAnagrams.specs("AA")[0].specs.len(), 2);
        assert_eq!(groups[0].words, vec!["tA", "At"]);
    }

    #[test]
    fn anagram_hooks() {
        let groups = index().variations("AT", Variation::AnagramHooks);
        let mut words: Vec<String> = groups[0].words.iter().map(|w| w.to_uppercase()).collect();
        words.sort();
        assert_eq!(words, vec!["ACT", "ATE", "BAT", "CAT", "EAT", "ETA", "TAB", "TEA"]);
    }
}
