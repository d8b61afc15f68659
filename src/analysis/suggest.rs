//! Tag suggestions from phrase frequencies of an article.
//!
//! Phrases of one to three words are counted. Phrases made of capitalised
//! words are proposed as names, all-caps words as abbreviations; the rest
//! are counted lower-cased, single words split by length.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static ONE_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));
static TWO_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w+\W+\w+\b").expect("valid regex"));
static THREE_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w+\W+\w+\W+\w+\b").expect("valid regex"));

/// `(count, phrase)` pairs, highest count first.
pub type Ranked = Vec<(usize, String)>;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Suggestions {
    pub names: Ranked,
    pub abbreviations: Ranked,
    pub three_words: Ranked,
    pub two_words: Ranked,
    /// Single words longer than three characters.
    pub long_words: Ranked,
    /// Single words of two or three characters.
    pub short_words: Ranked,
}

/// At least one cased character and no lower-case one.
fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

fn is_name_word(word: &str) -> bool {
    let single_capital = word.chars().count() == 1 && is_upper(word);
    let capitalised = word.chars().next().is_some_and(char::is_uppercase) && !is_upper(word);
    single_capital || capitalised
}

/// Matches of `re` in `text` and in `text` with its first `1..shifts` words
/// dropped, so that every word starts a phrase once.
fn phrases(re: &Regex, text: &str, shifts: usize) -> Vec<String> {
    let words: Vec<&str> = text.split(' ').collect();
    (0..shifts)
        .flat_map(|shift| {
            let shifted = words.get(shift..).unwrap_or_default().join(" ");
            re.find_iter(&shifted)
                .map(|m| m.as_str().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

fn rank(counts: HashMap<String, usize>) -> Ranked {
    let mut ranked: Ranked = counts.into_iter().map(|(p, c)| (c, p)).collect();
    ranked.sort_by(|a, b| b.cmp(a));
    ranked
}

/// Count the phrases of `text`. Whitespace should already be collapsed to
/// single spaces.
pub fn suggest(text: &str) -> Suggestions {
    let mut names: HashMap<String, usize> = HashMap::new();
    let mut abbreviations: HashMap<String, usize> = HashMap::new();
    let mut three: HashMap<String, usize> = HashMap::new();
    let mut two: HashMap<String, usize> = HashMap::new();
    let mut long: HashMap<String, usize> = HashMap::new();
    let mut short: HashMap<String, usize> = HashMap::new();

    for (re, shifts, counter) in [
        (&*THREE_WORD_RE, 3, &mut three),
        (&*TWO_WORD_RE, 2, &mut two),
    ] {
        for phrase in phrases(re, text, shifts) {
            if phrase.split_whitespace().all(is_name_word) {
                *names.entry(phrase).or_default() += 1;
            } else {
                *counter.entry(phrase.to_lowercase()).or_default() += 1;
            }
        }
    }

    for word in ONE_WORD_RE.find_iter(text).map(|m| m.as_str()) {
        if word.chars().count() > 1 && is_upper(word) {
            *abbreviations.entry(word.to_string()).or_default() += 1;
            continue;
        }
        let lowered = word.to_lowercase();
        if lowered.chars().all(char::is_numeric) {
            continue;
        }
        match lowered.chars().count() {
            n if n > 3 => *long.entry(lowered).or_default() += 1,
            n if n > 1 => *short.entry(lowered).or_default() += 1,
            _ => {}
        }
    }

    Suggestions {
        names: rank(names),
        abbreviations: rank(abbreviations),
        three_words: rank(three),
        two_words: rank(two),
        long_words: rank(long),
        short_words: rank(short),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Borut Pahor je sprejel predsednika NZS. Borut Pahor in predsednik NZS sta govorila o EU in 2017 letu";

    #[test]
    fn test_names() {
        let s = suggest(TEXT);
        assert_eq!(s.names.first(), Some(&(2, "Borut Pahor".to_string())));
    }

    #[test]
    fn test_abbreviations_keep_case() {
        let s = suggest(TEXT);
        assert!(s.abbreviations.contains(&(2, "NZS".to_string())));
        assert!(s.abbreviations.contains(&(1, "EU".to_string())));
    }

    #[test]
    fn test_single_words_split_by_length() {
        let s = suggest(TEXT);
        assert!(s.long_words.contains(&(2, "borut".to_string())));
        assert!(s.long_words.contains(&(1, "predsednika".to_string())));
        assert!(s.short_words.contains(&(2, "in".to_string())));
        assert!(s.short_words.iter().all(|(_, w)| w != "o"));
        assert!(s.long_words.iter().all(|(_, w)| w != "2017"));
    }

    #[test]
    fn test_phrases_from_every_position() {
        let s = suggest("ena dva tri");
        let two: Vec<&str> = s.two_words.iter().map(|(_, p)| p.as_str()).collect();
        assert!(two.contains(&"ena dva"));
        assert!(two.contains(&"dva tri"));
        assert_eq!(s.three_words, vec![(1, "ena dva tri".to_string())]);
    }

    #[test]
    fn test_ranking_descending() {
        let s = suggest("aaaa bbbb aaaa cccc aaaa bbbb");
        let counts: Vec<usize> = s.long_words.iter().map(|(c, _)| *c).collect();
        assert_eq!(counts, vec![3, 2, 1]);
        assert!(s.short_words.is_empty());
    }

    #[test]
    fn test_is_name_word() {
        assert!(is_name_word("Pahor"));
        assert!(is_name_word("J"));
        assert!(!is_name_word("NZS"));
        assert!(!is_name_word("pahor"));
    }
}
