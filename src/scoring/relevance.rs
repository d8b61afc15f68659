//! Tag relevance index.
//!
//! Starts at 1.0 and loses `1 / N` for each of the `N` tags that cannot be
//! found in the article text. Tags are matched on stemmed word prefixes so
//! that inflected Slovene forms ("Sloveniji", "Slovenije") still count as a
//! hit for the tag "Slovenija".

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Words longer than this are matched on a prefix instead of literally.
const STEM_MIN_LEN: usize = 3;

/// Characters dropped from the end of a long word to form its stem.
const STEM_SUFFIX_LEN: usize = 2;

fn word_fragment(word: &str) -> String {
    let len = word.chars().count();
    if len > STEM_MIN_LEN {
        let stem: String = word.chars().take(len - STEM_SUFFIX_LEN).collect();
        format!(r"{}\w+", regex::escape(&stem))
    } else {
        regex::escape(word)
    }
}

/// Build the case-insensitive search pattern for one tag.
///
/// Returns `None` for a tag with no words; such a tag never matches.
pub fn tag_pattern(tag: &str) -> Option<Regex> {
    let fragments: Vec<String> = tag.split_whitespace().map(word_fragment).collect();
    if fragments.is_empty() {
        return None;
    }

    let source = fragments.join(r"\s+");
    match RegexBuilder::new(&source).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(tag, error = %e, "Tag pattern did not compile; treating tag as absent");
            None
        }
    }
}

/// Relevance of `tags` to `article`. Zero tags score exactly 0.
///
/// The result is not clamped: it reaches 0 (up to rounding) when no tag
/// is found.
pub fn relevance<S: AsRef<str>>(tags: &[S], article: &str) -> f64 {
    relevance_with_important(tags, "", article, None)
}

/// Relevance with the optional bonus for tags that also appear in the
/// bold/italic excerpt of the article.
///
/// # Arguments
///
/// * `tags` - The article's tags, in page order
/// * `important` - Bold/italic fragments of the body, `", "` joined
/// * `article` - Text searched for the tags (title, label, lead and body)
/// * `important_bonus` - Added once per tag found in `important`; `None`
///   ignores `important` entirely
///
/// # Returns
///
/// `1.0` minus `1 / N` for each of the `N` tags not found in `article`,
/// plus any bonus. Zero tags score exactly `0.0`.
///
/// # Examples
///
/// ```ignore
/// let tags = ["Borut Pahor", "UEFA"];
/// assert_eq!(relevance_with_important(&tags, "", "Boruta Pahorja", None), 0.5);
/// let with_bonus = relevance_with_important(&tags, "Borut Pahor", "Borut Pahor", Some(0.1));
/// assert!((with_bonus - 0.6).abs() < 1e-12);
/// ```
pub fn relevance_with_important<S: AsRef<str>>(
    tags: &[S],
    important: &str,
    article: &str,
    important_bonus: Option<f64>,
) -> f64 {
    if tags.is_empty() {
        return 0.0;
    }

    let penalty = 1.0 / tags.len() as f64;
    let mut score = 1.0;

    for tag in tags {
        let Some(pattern) = tag_pattern(tag.as_ref()) else {
            score -= penalty;
            continue;
        };
        if !pattern.is_match(article) {
            score -= penalty;
        }
        if let Some(bonus) = important_bonus {
            if !important.is_empty() && pattern.is_match(important) {
                score += bonus;
            }
        }
    }

    score
}
