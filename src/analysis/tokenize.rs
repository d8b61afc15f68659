//! Word list extraction for tag brainstorming.
//!
//! Turns free text into the distinct, lower-cased content words it uses.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Short prepositions and conjunctions that never make useful tags.
const FUNCTION_WORDS: &[&str] = &[
    "in", "ali", "k", "h", "s", "z", "pa", "o", "za", "pri", "po", "pred", "nad", "pod", "brez",
    "v", "iz", "na", "zaradi", "razen", "med", "a", "oziroma",
];

static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.,:;?!<>+'_()]").expect("valid punctuation regex"));

fn keep(word: &str) -> bool {
    !FUNCTION_WORDS.contains(&word)
        && word.chars().count() > 2
        && !PUNCTUATION_RE.is_match(word)
        && !word.chars().all(|c| c.is_ascii_digit())
}

/// Distinct words of `text`, lower-cased and sorted.
///
/// Commas are removed before splitting. Words of two characters or fewer,
/// function words, numbers and words still carrying punctuation are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(',', "")
        .split_whitespace()
        .filter(|w| keep(w))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_filters_and_sorts() {
        let text = "Predsednik Pahor je v torek,\n\n  obiskal Maribor in Maribor.\nLeta 2017 pred volitvami (drugič)";
        assert_eq!(
            tokenize(text),
            vec!["leta", "maribor", "obiskal", "pahor", "predsednik", "torek", "volitvami"]
        );
    }

    #[test]
    fn test_comma_is_removed_not_a_separator() {
        assert_eq!(tokenize("ena,dva"), vec!["enadva"]);
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("  \n ").is_empty());
    }
}
