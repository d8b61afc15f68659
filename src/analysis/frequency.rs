//! Weighted word frequencies over article or comment texts.
//!
//! Each document carries a multiplier so that a word can be counted once per
//! occurrence, or once per page view (giving impressions), or weighted by the
//! article's hotness.

use crate::analysis::stopwords::is_stopword;
use crate::models::Article;
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// What every occurrence of a word in an article is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Multiplier {
    Views,
    /// Hotness with its fraction dropped.
    Hotness,
    None,
}

impl Multiplier {
    pub fn weight(self, article: &Article) -> u64 {
        match self {
            Multiplier::Views => article.views,
            Multiplier::Hotness => article.hotness.max(0.0) as u64,
            Multiplier::None => 1,
        }
    }
}

/// The text counted for an article: title, label, lead and body.
pub fn article_words_source(article: &Article) -> String {
    [
        article.title.as_str(),
        article.label.as_str(),
        article.lead.as_str(),
        article.content.as_str(),
    ]
    .join(" ")
}

/// Count the words of each `(text, multiplier)` document.
///
/// Words are lower-cased; anything that is not purely alphanumeric, or is
/// in `stopwords`, is left out.
pub fn word_frequencies<'a, I>(documents: I, stopwords: &[&str]) -> HashMap<String, u64>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut frequencies: HashMap<String, u64> = HashMap::new();
    for (text, multiplier) in documents {
        let lowered = text.to_lowercase();
        for word in WORD_RE.find_iter(&lowered).map(|m| m.as_str()) {
            if word.chars().all(char::is_alphanumeric) && !is_stopword(stopwords, word) {
                *frequencies.entry(word.to_string()).or_default() += multiplier;
            }
        }
    }
    frequencies
}

/// The `n` most frequent words, highest count first; ties in word order.
pub fn most_common(frequencies: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut sorted: Vec<(String, u64)> = frequencies
        .iter()
        .map(|(word, count)| (word.clone(), *count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stopwords::SLOVENE;

    #[test]
    fn test_counts_with_multiplier() {
        let docs = vec![("Pahor in Janša", 10), ("pahor je rekel", 1)];
        let freqs = word_frequencies(docs, SLOVENE);
        assert_eq!(freqs.get("pahor"), Some(&11));
        assert_eq!(freqs.get("janša"), Some(&10));
        assert_eq!(freqs.get("rekel"), Some(&1));
        assert!(!freqs.contains_key("in"));
        assert!(!freqs.contains_key("je"));
    }

    #[test]
    fn test_skips_underscored_tokens() {
        let freqs = word_frequencies(vec![("foo_bar baz", 1)], &[]);
        assert!(!freqs.contains_key("foo_bar"));
        assert_eq!(freqs.get("baz"), Some(&1));
    }

    #[test]
    fn test_most_common_order() {
        let freqs = word_frequencies(vec![("b a c b a d", 1)], &[]);
        let top = most_common(&freqs, 3);
        assert_eq!(
            top,
            vec![
                ("a".to_string(), 2),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
        assert_eq!(most_common(&freqs, 10).len(), 4);
    }

    #[test]
    fn test_multiplier_weight() {
        let article = Article {
            views: 1200,
            hotness: 3.9,
            ..Article::default()
        };
        assert_eq!(Multiplier::Views.weight(&article), 1200);
        assert_eq!(Multiplier::Hotness.weight(&article), 3);
        assert_eq!(Multiplier::None.weight(&article), 1);
    }

    #[test]
    fn test_article_words_source() {
        let article = Article {
            title: "Naslov".to_string(),
            label: "Oznaka".to_string(),
            lead: "Uvod".to_string(),
            content: "Besedilo\n".to_string(),
            ..Article::default()
        };
        assert_eq!(article_words_source(&article), "Naslov Oznaka Uvod Besedilo\n");
    }
}
