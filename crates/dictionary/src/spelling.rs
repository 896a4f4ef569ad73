use std::collections::HashSet;
use std::path::Path;

const ENGLISH_WORDS: &str = include_str!("../data/words.txt");
const MAX_EDIT_DISTANCE: usize = 2;
const DEFAULT_LIMIT: usize = 5;

/// Suggests known words close to a misspelled one.
///
/// The word list is ordered by frequency, most common first, so a word's position is its rank.
#[derive(Debug, Clone)]
pub struct SpellChecker {
    words: Vec<String>,
    known: HashSet<String>,
    limit: usize,
}

impl SpellChecker {
    /// Builds a checker from the bundled english word list.
    pub fn english() -> Self {
        Self::from_word_list(ENGLISH_WORDS)
    }

    /// One word per line. Blank lines and lines starting with `#` are skipped.
    pub fn from_word_list(list: &str) -> Self {
        let mut words = Vec::new();
        let mut known = HashSet::new();
        for line in list.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let word = line.to_lowercase();
            if known.insert(word.clone()) {
                words.push(word);
            }
        }
        Self {
            words,
            known,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let list = std::fs::read_to_string(path)?;
        Ok(Self::from_word_list(&list))
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.known.contains(&word.to_lowercase())
    }

    /// Ranked corrections for `word`, possibly empty.
    ///
    /// A known word is its own only candidate. Otherwise the closest edit distance that has
    /// any known words wins, ordered by frequency.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        let word = word.to_lowercase();
        if self.known.contains(&word) {
            return vec![word];
        }
        let length = word.chars().count();
        for distance in 1..=MAX_EDIT_DISTANCE {
            let found: Vec<String> = self
                .words
                .iter()
                .filter(|candidate| candidate.chars().count().abs_diff(length) <= distance)
                .filter(|candidate| strsim::damerau_levenshtein(&word, candidate) == distance)
                .take(self.limit)
                .cloned()
                .collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_word_is_its_own_candidate() {
        let checker = SpellChecker::from_word_list("the\nhouse\n");
        assert_eq!(checker.candidates("House"), ["house"]);
    }

    #[test]
    fn test_closest_distance_wins() {
        let checker = SpellChecker::from_word_list("hose\nhouse\nmouse\nhorse");
        // "housee" is one deletion from house, two from horse/mouse
        assert_eq!(checker.candidates("housee"), ["house"]);
    }

    #[test]
    fn test_candidates_follow_frequency_order() {
        let checker = SpellChecker::from_word_list("cat\nbat\nhat\nrat");
        assert_eq!(checker.candidates("zat"), ["cat", "bat", "hat", "rat"]);
        assert_eq!(checker.with_limit(2).candidates("zat"), ["cat", "bat"]);
    }

    #[test]
    fn test_transposition_counts_as_one_edit() {
        let checker = SpellChecker::from_word_list("their\nthere");
        assert_eq!(checker.candidates("thier"), ["their"]);
    }

    #[test]
    fn test_no_candidates_is_empty() {
        let checker = SpellChecker::from_word_list("apple\nbanana");
        assert!(checker.candidates("xyzzyqq").is_empty());
    }

    #[test]
    fn test_word_list_parsing() {
        let checker = SpellChecker::from_word_list("# comment\n\nThe\nthe\n  of  \n");
        assert_eq!(checker.len(), 2);
        assert!(checker.is_known("THE"));
        assert!(checker.is_known("of"));
        assert!(!checker.is_known("# comment"));
    }

    #[test]
    fn test_bundled_list() {
        let checker = SpellChecker::english();
        assert!(!checker.is_empty());
        assert!(checker.is_known("the"));
        assert!(checker.len() > 10_000);
        assert!(checker.candidates("wrold").contains(&"world".to_owned()));
    }

    #[test]
    fn test_bundled_list_corrects_common_misspellings() {
        let checker = SpellChecker::english();
        for (typo, expected) in [
            ("definately", "definitely"),
            ("seperate", "separate"),
            ("accomodate", "accommodate"),
            ("elephnt", "elephant"),
            ("beautful", "beautiful"),
            ("recieve", "receive"),
            ("occured", "occurred"),
        ] {
            assert!(!checker.is_known(typo), "{typo} should not be a known word");
            assert_eq!(checker.candidates(typo).first().map(String::as_str), Some(expected));
        }
        assert!(checker.candidates("wierd").contains(&"weird".to_owned()));
    }
}
