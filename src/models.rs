//! Data models for scraped articles and their reader comments.
//!
//! - [`Article`]: one article with its metadata, text, tags and tag scores
//! - [`Comment`]: one reader comment, threaded by the hash of its root comment

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A news article as kept in the store.
///
/// `tags` preserves page order. `similarity` and `relevance` are the tag
/// scores computed when the article was scraped or imported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Numeric id taken from the end of the article URL.
    pub idnum: u64,
    pub address: String,
    /// Path between the host and the article slug, e.g. `novice/slovenija`.
    pub section: String,
    pub author: String,
    /// Further authors joined with `", "`.
    pub coauthors: String,
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    /// Publication time, `HH:MM:SS`.
    pub hour: String,
    pub title: String,
    /// Kicker shown above the title.
    pub label: String,
    pub lead: String,
    pub content: String,
    /// Bold and italic fragments of the body, joined with `", "`.
    pub important: String,
    pub tags: Vec<String>,
    pub similarity: usize,
    pub relevance: f64,
    pub views: u64,
    pub comments: u64,
    pub shares: u64,
    pub hotness: f64,
    /// Date the record was last refreshed from the site.
    pub refreshed: String,
}

impl Article {
    /// Title, label, lead and body separated by blank lines; the text the
    /// relevance score searches.
    pub fn full_text(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            self.title, self.label, self.lead, self.content
        )
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

/// A reader comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Address of the article the comment belongs to.
    pub address: String,
    pub user: String,
    pub text: String,
    /// `YYYY-M-D` as shown on the page, unpadded.
    pub date: String,
    /// `HH:MM:SS`.
    pub time: String,
    pub up: i64,
    pub down: i64,
    /// Hash of the thread's first comment; `None` for thread roots.
    pub reply_to: Option<String>,
    /// Identity of the comment, see [`Comment::compute_hash`].
    pub hash: String,
}

impl Comment {
    pub fn new(
        address: &str,
        user: &str,
        text: &str,
        date: &str,
        time: &str,
        up: i64,
        down: i64,
    ) -> Self {
        Self {
            address: address.to_string(),
            user: user.to_string(),
            text: text.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            up,
            down,
            reply_to: None,
            hash: Self::compute_hash(user, text, date, time),
        }
    }

    /// Hex SHA-256 of user, text, date and time, each field followed by a NUL
    /// byte so that no two field splits hash alike. Votes are left out so
    /// re-scraping a comment with new votes yields the same hash.
    pub fn compute_hash(user: &str, text: &str, date: &str, time: &str) -> String {
        let mut hasher = Sha256::new();
        for field in [user, text, date, time] {
            hasher.update(field.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_layout() {
        let article = Article {
            title: "Naslov".to_string(),
            label: "Nadnaslov".to_string(),
            lead: "Uvod".to_string(),
            content: "Vsebina\n".to_string(),
            ..Article::default()
        };
        assert_eq!(article.full_text(), "Naslov\n\nNadnaslov\n\nUvod\n\nVsebina\n");
    }

    #[test]
    fn test_tag_count() {
        let article = Article {
            tags: vec!["UEFA".to_string(), "FIFA".to_string()],
            ..Article::default()
        };
        assert_eq!(article.tag_count(), 2);
    }

    #[test]
    fn test_comment_hash_ignores_votes() {
        let a = Comment::new("http://siol.net/a-1", "janez", "Bravo", "2017-5-6", "12:34:00", 3, 1);
        let b = Comment::new("http://siol.net/a-1", "janez", "Bravo", "2017-5-6", "12:34:00", 9, 0);
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.hash.len(), 64);
        assert!(a.reply_to.is_none());
    }

    #[test]
    fn test_comment_hash_depends_on_text() {
        let a = Comment::new("x", "janez", "Bravo", "2017-5-6", "12:34:00", 0, 0);
        let b = Comment::new("x", "janez", "Bravo!", "2017-5-6", "12:34:00", 0, 0);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_comment_hash_keeps_field_boundaries() {
        let a = Comment::compute_hash("ab", "c", "2017-5-6", "12:34:00");
        let b = Comment::compute_hash("a", "bc", "2017-5-6", "12:34:00");
        assert_ne!(a, b);
    }

    #[test]
    fn test_article_json_roundtrip_keeps_scores() {
        let article = Article {
            idnum: 452121,
            tags: vec!["UEFA".to_string()],
            relevance: 0.5,
            similarity: 2,
            ..Article::default()
        };
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }
}
