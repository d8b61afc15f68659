//! JSON-file article store.
//!
//! Articles are keyed by their numeric id; comments are kept per article id
//! and de-duplicated by hash. The whole store is read into memory, changed,
//! and written back in one piece.

use crate::models::{Article, Comment};
use crate::utils::{ensure_parent_dir, parse_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ArticleStore {
    articles: BTreeMap<u64, Article>,
    #[serde(default)]
    comments: BTreeMap<u64, Vec<Comment>>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the store at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - JSON file written by [`ArticleStore::save`]
    ///
    /// # Returns
    ///
    /// The stored articles and comments, or an empty store when the file
    /// does not exist yet. Files written before comments were kept load
    /// with no comments.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The content is not a valid store
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut store = ArticleStore::load(Path::new("articles.json")).await?;
    /// store.insert_or_ignore(article);
    /// store.save(Path::new("articles.json")).await?;
    /// ```
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !fs::try_exists(path).await? {
            info!("No store file yet; starting empty");
            return Ok(Self::new());
        }
        let raw = fs::read_to_string(path).await?;
        let store: Self = serde_json::from_str(&raw)
            .map_err(|e| format!("failed to parse store '{}': {e}", path.display()))?;
        info!(
            articles = store.articles.len(),
            comments = store.comment_count(),
            "Loaded store"
        );
        Ok(store)
    }

    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        ensure_parent_dir(path).await?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).await?;
        info!(articles = self.articles.len(), "Wrote store");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, idnum: u64) -> Option<&Article> {
        self.articles.get(&idnum)
    }

    pub fn find_by_address(&self, address: &str) -> Option<&Article> {
        let address = address.trim();
        self.articles.values().find(|a| a.address == address)
    }

    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.articles.values()
    }

    /// Add a new article. When the id is already stored only its author is
    /// refreshed, and `false` is returned.
    pub fn insert_or_ignore(&mut self, article: Article) -> bool {
        match self.articles.get_mut(&article.idnum) {
            Some(existing) => {
                if !article.author.is_empty() {
                    existing.author = article.author;
                }
                debug!(idnum = existing.idnum, "Article already stored");
                false
            }
            None => {
                self.articles.insert(article.idnum, article);
                true
            }
        }
    }

    /// Overwrite a stored article. Returns `false` when the id is unknown.
    pub fn update(&mut self, article: Article) -> bool {
        match self.articles.get_mut(&article.idnum) {
            Some(existing) => {
                *existing = article;
                true
            }
            None => false,
        }
    }

    /// Drop an article together with its comments.
    pub fn remove(&mut self, idnum: u64) -> Option<Article> {
        self.comments.remove(&idnum);
        self.articles.remove(&idnum)
    }

    /// Attach comments to an article, skipping hashes already present.
    /// Returns how many were new.
    pub fn add_comments(&mut self, idnum: u64, comments: Vec<Comment>) -> usize {
        let stored = self.comments.entry(idnum).or_default();
        let mut seen: BTreeSet<String> = stored.iter().map(|c| c.hash.clone()).collect();

        let mut added = 0;
        for comment in comments {
            if seen.insert(comment.hash.clone()) {
                stored.push(comment);
                added += 1;
            }
        }
        added
    }

    /// Articles dated within `from..=to`, newest first.
    pub fn articles_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Article> {
        let mut selected: Vec<&Article> = self
            .articles
            .values()
            .filter(|a| match parse_date(&a.date) {
                Ok(date) => from <= date && date <= to,
                Err(e) => {
                    warn!(idnum = a.idnum, error = %e, "Stored article has unusable date");
                    false
                }
            })
            .collect();
        selected.sort_by(|a, b| {
            let key = |x: &Article| (parse_date(&x.date).ok(), x.hour.clone());
            key(b).cmp(&key(a))
        });
        selected
    }

    /// Every distinct tag used by a stored article, sorted.
    pub fn tag_vocabulary(&self) -> Vec<String> {
        self.articles
            .values()
            .flat_map(|a| a.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All comments with the id of the article they belong to.
    pub fn comments(&self) -> impl Iterator<Item = (u64, &Comment)> {
        self.comments
            .iter()
            .flat_map(|(idnum, list)| list.iter().map(move |c| (*idnum, c)))
    }

    pub fn comment_count(&self) -> usize {
        self.comments.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(idnum: u64, date: &str, hour: &str) -> Article {
        Article {
            idnum,
            address: format!("http://siol.net/novice/slovenija/clanek-{idnum}"),
            author: "Janez Novak".to_string(),
            date: date.to_string(),
            hour: hour.to_string(),
            ..Article::default()
        }
    }

    fn comment(user: &str, text: &str) -> Comment {
        Comment::new("x", user, text, "2017-5-6", "12:00:00", 0, 0)
    }

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_insert_or_ignore_refreshes_author_only() {
        let mut store = ArticleStore::new();
        assert!(store.insert_or_ignore(article(1, "2017-05-06", "10:00:00")));

        let mut again = article(1, "2017-05-06", "10:00:00");
        again.author = "Marija Kranjc".to_string();
        again.title = "Drug naslov".to_string();
        assert!(!store.insert_or_ignore(again));

        let stored = store.get(1).unwrap();
        assert_eq!(stored.author, "Marija Kranjc");
        assert_eq!(stored.title, "");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_requires_existing() {
        let mut store = ArticleStore::new();
        assert!(!store.update(article(7, "2017-05-06", "")));
        assert!(store.is_empty());

        store.insert_or_ignore(article(7, "2017-05-06", ""));
        let mut changed = article(7, "2017-05-06", "");
        changed.views = 99;
        assert!(store.update(changed));
        assert_eq!(store.get(7).unwrap().views, 99);
    }

    #[test]
    fn test_remove_drops_comments() {
        let mut store = ArticleStore::new();
        store.insert_or_ignore(article(3, "2017-05-06", ""));
        store.add_comments(3, vec![comment("a", "b")]);
        assert_eq!(store.comment_count(), 1);

        assert!(store.remove(3).is_some());
        assert_eq!(store.comment_count(), 0);
        assert!(store.remove(3).is_none());
    }

    #[test]
    fn test_add_comments_dedupes_by_hash() {
        let mut store = ArticleStore::new();
        assert_eq!(store.add_comments(1, vec![comment("a", "x"), comment("a", "x")]), 1);
        assert_eq!(store.add_comments(1, vec![comment("a", "x"), comment("b", "y")]), 1);
        let users: Vec<_> = store.comments().map(|(id, c)| (id, c.user.as_str())).collect();
        assert_eq!(users, vec![(1, "a"), (1, "b")]);
    }

    #[test]
    fn test_articles_between_newest_first() {
        let mut store = ArticleStore::new();
        store.insert_or_ignore(article(1, "2017-05-05", "09:00:00"));
        store.insert_or_ignore(article(2, "2017-05-06", "08:00:00"));
        store.insert_or_ignore(article(3, "2017-05-06", "18:00:00"));
        store.insert_or_ignore(article(4, "2017-05-09", "10:00:00"));
        store.insert_or_ignore(article(5, "bad", "10:00:00"));

        let ids: Vec<u64> = store
            .articles_between(d("2017-5-5"), d("2017-5-6"))
            .iter()
            .map(|a| a.idnum)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_tag_vocabulary_sorted_distinct() {
        let mut store = ArticleStore::new();
        let mut a = article(1, "2017-05-06", "");
        a.tags = vec!["UEFA".to_string(), "Borut Pahor".to_string()];
        let mut b = article(2, "2017-05-06", "");
        b.tags = vec!["UEFA".to_string()];
        store.insert_or_ignore(a);
        store.insert_or_ignore(b);
        assert_eq!(store.tag_vocabulary(), vec!["Borut Pahor", "UEFA"]);
    }

    #[test]
    fn test_find_by_address() {
        let mut store = ArticleStore::new();
        store.insert_or_ignore(article(42, "2017-05-06", ""));
        assert!(store
            .find_by_address(" http://siol.net/novice/slovenija/clanek-42\n")
            .is_some());
        assert!(store.find_by_address("http://siol.net/drugo-1").is_none());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArticleStore::load(&tmp.path().join("none.json")).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data/articles.json");

        let mut store = ArticleStore::new();
        let mut a = article(452121, "2017-05-06", "12:34:56");
        a.tags = vec!["UEFA".to_string()];
        a.relevance = 0.5;
        store.insert_or_ignore(a.clone());
        store.add_comments(452121, vec![comment("janez", "Bravo!")]);
        store.save(&path).await.unwrap();

        let loaded = ArticleStore::load(&path).await.unwrap();
        assert_eq!(loaded.get(452121), Some(&a));
        assert_eq!(loaded.comment_count(), 1);
    }
}
