//! Tag quality scores stored alongside every article.
//!
//! # Submodules
//!
//! - [`relevance`]: how many of an article's tags actually occur in its text
//! - [`similarity`]: how many tag pairs are near duplicates of each other
//! - [`matcher`]: the Ratcliff/Obershelp ratio behind the similarity score
//!
//! Both scores are pure functions of their inputs. Scrapers and importers
//! call [`score_article`] once per article and keep the two numbers.

pub mod matcher;
pub mod relevance;
pub mod similarity;

use crate::config::ScoringConfig;

/// The pair of numbers kept on each article record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagScores {
    pub relevance: f64,
    pub similarity: usize,
}

/// Score one article's tags against its full text.
///
/// `important` is the bold/italic excerpt; it only matters when
/// `config.important_bonus` is set.
pub fn score_article<S: AsRef<str>>(
    config: &ScoringConfig,
    tags: &[S],
    important: &str,
    article_text: &str,
) -> TagScores {
    TagScores {
        relevance: relevance::relevance_with_important(
            tags,
            important,
            article_text,
            config.important_bonus,
        ),
        similarity: similarity::similarity_with_threshold(tags, config.similarity_threshold),
    }
}
