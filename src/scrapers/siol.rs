//! siol.net article scraper.
//!
//! # URL Pattern
//!
//! Every day has an archive page, `http://siol.net/pregled-dneva/2017-5-6`
//! (month and day unpadded), listing that day's articles under
//! `ul.timemachine__article_list`. Article URLs end in the numeric article id,
//! e.g. `http://siol.net/novice/slovenija/nzs-dobila-predsednika-452121`.
//!
//! # Comments
//!
//! Short comment threads are rendered on the article page itself. Long ones
//! are replaced by an `a.comments__show_all` link to a dedicated page with
//! the same markup.

use super::{fetch_page, is_unreachable};
use crate::config::{AppConfig, ScoringConfig};
use crate::error::ToolError;
use crate::models::{Article, Comment};
use crate::scoring::score_article;
use crate::utils::{date_range, first_number, strip_tags, unpadded_date};
use chrono::{Local, NaiveDate};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

const ARCHIVE_PATH: &str = "pregled-dneva";

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").expect("valid id regex"));
static SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.net/(.+)/").expect("valid section regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+-\d+-\d+)T").expect("valid date regex"));
static HOUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"T(\d+:\d+:\d+)").expect("valid hour regex"));
/// `<strong>`/`<em>` (and their `st*`/`em*` relatives) up to the next closing tag.
static IMPORTANT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[se][tm]\w*>(.+?)</").expect("valid emphasis regex"));
static VIEWS_FALLBACK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"article__views.+</div>").expect("valid views regex"));
static COMMENT_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\.").expect("valid comment date regex"));
static COMMENT_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ob\s(.+)").expect("valid comment time regex"));

/// An article together with the comments found for it.
#[derive(Debug, Clone)]
pub struct ScrapedArticle {
    pub article: Article,
    pub comments: Vec<Comment>,
}

/// Result of fetching one article URL.
#[derive(Debug)]
pub enum FetchOutcome {
    Found(Box<ScrapedArticle>),
    /// The page could not be fetched within the allowed attempts.
    Unreachable,
    /// The page loaded but is not an article (the site redirects removed
    /// articles to their section front page).
    Redirected,
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(css, error = ?e, "Invalid CSS selector");
            None
        }
    }
}

fn select<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    parse_selector(css)
        .map(|s| document.select(&s).collect())
        .unwrap_or_default()
}

fn select_within<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    parse_selector(css)
        .map(|s| element.select(&s).collect())
        .unwrap_or_default()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    select(document, css).first().map(|e| element_text(*e))
}

/// Undo the entity escaping of serialized markup.
fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", "\u{a0}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Archive page listing the articles published on `date`.
pub fn day_index_url(base_url: &str, date: NaiveDate) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        ARCHIVE_PATH,
        unpadded_date(date)
    )
}

/// Absolute article URLs listed on a daily archive page.
pub fn parse_day_index(html: &str, base_url: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let base = Url::parse(base_url)?;
    let document = Html::parse_document(html);

    let mut urls = Vec::new();
    for link in select(&document, "ul.timemachine__article_list a[href][title]") {
        if let Some(href) = link.value().attr("href") {
            match base.join(href) {
                Ok(resolved) => urls.push(resolved.to_string()),
                Err(e) => warn!(href, error = %e, "Skipping unresolvable article link"),
            }
        }
    }
    Ok(urls)
}

/// Articles of the former economy section live under the business section now.
pub fn canonical_address(url: &str) -> String {
    url.trim()
        .replace("/novice/gospodarstvo/", "/posel-danes/novice/")
}

/// Numeric article id at the end of the address.
pub fn article_id(address: &str) -> Result<u64, ToolError> {
    ID_RE
        .captures(address.trim())
        .and_then(|c| c[1].parse().ok())
        .ok_or_else(|| ToolError::MissingId(address.to_string()))
}

/// Everything between the host and the final slug, e.g. `novice/slovenija`.
pub fn section_of(address: &str) -> String {
    SECTION_RE
        .captures(address)
        .map(|c| c[1].to_string())
        .unwrap_or_default()
}

/// Body lines that carry article text: no block wrappers, links or embeds.
fn body_lines(content_html: &str) -> Vec<&str> {
    content_html
        .lines()
        .filter(|line| {
            !line.contains("<div")
                && !line.contains("</div>")
                && !line.contains("<a href")
                && !line.contains("iframe")
        })
        .collect()
}

/// Parse an article page into an [`Article`] with its tag scores.
///
/// # Arguments
///
/// * `html` - The full article page
/// * `address` - Article URL; the id and section are taken from it
/// * `scoring` - Threshold and bonus used for the tag scores
/// * `refreshed` - Date recorded as the day the data was taken from the site
///
/// # Returns
///
/// The article with every field filled in. Missing counters (views, shares,
/// comments, hotness) default to zero and missing authors to empty strings.
///
/// # Errors
///
/// - [`ToolError::MissingId`] if `address` does not end in a number
/// - [`ToolError::MissingField`] if the page has no `<time>` element, no
///   publication date in it, or no `<h1>` title
///
/// # Examples
///
/// ```ignore
/// let article = parse_article(&html, url, &config.scoring, "2017-05-07")?;
/// println!("{} tags, relevance {:.2}", article.tag_count(), article.relevance);
/// ```
pub fn parse_article(
    html: &str,
    address: &str,
    scoring: &ScoringConfig,
    refreshed: &str,
) -> Result<Article, ToolError> {
    let document = Html::parse_document(html);
    let missing = |field: &'static str| ToolError::MissingField {
        address: address.to_string(),
        field,
    };

    let idnum = article_id(address)?;
    let section = section_of(address);

    let mut authors: Vec<String> = select(&document, "h3.article__author_name")
        .into_iter()
        .chain(select(&document, "h3.article__authors_name"))
        .map(element_text)
        .collect();
    if let Some(promo) = first_text(&document, "div.article__promo span") {
        authors.insert(0, promo);
    }
    let author = authors.first().cloned().unwrap_or_default();
    let coauthors = authors.iter().skip(1).join(", ");

    let time_html = select(&document, "time")
        .first()
        .map(|e| e.html())
        .ok_or_else(|| missing("publication time"))?;
    let date = DATE_RE
        .captures(&time_html)
        .map(|c| c[1].to_string())
        .ok_or_else(|| missing("publication date"))?;
    let hour = HOUR_RE
        .captures(&time_html)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    let title = first_text(&document, "h1").ok_or_else(|| missing("title"))?;
    let label = first_text(&document, "span.article__label").unwrap_or_default();
    let lead = first_text(&document, "p").unwrap_or_default();

    let content_html = select(&document, "div.article__content")
        .first()
        .map(|e| e.html())
        .unwrap_or_default();
    let lines = body_lines(&content_html);

    let content: String = lines
        .iter()
        .map(|line| decode_entities(&strip_tags(line)) + "\n")
        .collect();

    let important = lines
        .iter()
        .flat_map(|line| IMPORTANT_RE.captures_iter(line))
        .map(|c| decode_entities(&c[1]).replace('\u{a0}', " "))
        .unique()
        .join(", ");

    let tags: Vec<String> = select(&document, "a.tags__link")
        .into_iter()
        .map(element_text)
        .collect();

    let views = first_text(&document, "div.article__views")
        .and_then(|t| first_number(&t))
        .or_else(|| {
            VIEWS_FALLBACK_RE
                .find(html)
                .and_then(|m| first_number(m.as_str()))
        })
        .unwrap_or(0);
    let shares = first_text(&document, "span.article__total_shares")
        .and_then(|t| first_number(&t))
        .unwrap_or(0);
    let comments = first_text(&document, "span.comments__post_count")
        .and_then(|t| first_number(&t))
        .unwrap_or(0);
    let hotness = first_text(&document, "div.article__hotness span")
        .and_then(|t| t.replace(',', ".").trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    let mut article = Article {
        idnum,
        address: address.to_string(),
        section,
        author,
        coauthors,
        date,
        hour,
        title,
        label,
        lead,
        content,
        important,
        tags,
        similarity: 0,
        relevance: 0.0,
        views,
        comments,
        shares,
        hotness,
        refreshed: refreshed.to_string(),
    };

    let scores = score_article(
        scoring,
        &article.tags,
        &article.important,
        &article.full_text(),
    );
    article.relevance = scores.relevance;
    article.similarity = scores.similarity;

    debug!(
        idnum,
        tags = article.tag_count(),
        relevance = article.relevance,
        similarity = article.similarity,
        "Parsed article"
    );
    Ok(article)
}

/// `"6. 5. 2017. ob 13:05"` → (`"2017-5-6"`, `"13:05:00"`).
///
/// The date is built from every number followed by a dot, in reverse order.
fn comment_timestamp(stamp: &str) -> (String, String) {
    let date = COMMENT_DATE_RE
        .captures_iter(stamp)
        .map(|c| c[1].to_string())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .join("-");
    let time = COMMENT_TIME_RE
        .captures(stamp)
        .map(|c| format!("{}:00", c[1].trim()))
        .unwrap_or_default();
    (date, time)
}

/// Parse the comment threads of an article or comments page.
///
/// The first comment of each thread is its root; every later comment in the
/// thread replies to it.
pub fn parse_comments(html: &str, address: &str) -> Vec<Comment> {
    let document = Html::parse_document(html);
    let Some(container) = select(&document, "div.comments.cf").into_iter().next() else {
        return Vec::new();
    };

    let mut comments = Vec::new();
    for thread in select_within(container, "div.comments__inner--toplevel") {
        let users = select_within(thread, "span.comments__username");
        let texts = select_within(thread, "p.comments__text");
        let stamps = select_within(thread, "span.comments__timestamp");
        let votes = select_within(thread, "span.vote_count");
        let vote = |k: usize| {
            votes
                .get(k)
                .and_then(|v| element_text(*v).parse::<i64>().ok())
                .unwrap_or(0)
        };

        let mut root: Option<String> = None;
        for (i, ((user, text), stamp)) in users.iter().zip(&texts).zip(&stamps).enumerate() {
            let (date, time) = comment_timestamp(&element_text(*stamp));
            let mut comment = Comment::new(
                address,
                &element_text(*user),
                &element_text(*text),
                &date,
                &time,
                vote(2 * i),
                vote(2 * i + 1),
            );
            match &root {
                None => root = Some(comment.hash.clone()),
                Some(hash) => comment.reply_to = Some(hash.clone()),
            }
            comments.push(comment);
        }
    }
    comments
}

/// Link to the dedicated comments page, when the article has one.
pub fn comments_page_url(html: &str, base_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let href = select(&document, "a.comments__show_all")
        .first()
        .and_then(|a| a.value().attr("href").map(str::to_string))?;
    Url::parse(base_url)
        .ok()?
        .join(&href)
        .ok()
        .map(|u| u.to_string())
}

/// The article's own address as declared in its meta tags.
///
/// `None` means the page is not an article on this site.
pub fn canonical_meta_address(html: &str, base_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let base = base_url.trim_end_matches('/');

    let og_url = select(&document, r#"meta[property="og:url"]"#)
        .into_iter()
        .filter_map(|m| m.value().attr("content"))
        .find(|c| c.starts_with(base));
    let any = || {
        select(&document, "meta[content]")
            .into_iter()
            .filter_map(|m| m.value().attr("content"))
            .find(|c| c.starts_with(base))
    };
    og_url.or_else(any).map(str::to_string)
}

/// Scraper bound to one site and one HTTP client.
#[derive(Debug, Clone)]
pub struct SiolScraper {
    client: Client,
    base_url: String,
    attempts: usize,
    scoring: ScoringConfig,
}

impl SiolScraper {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            attempts: config.fetch_attempts,
            scoring: config.scoring.clone(),
        })
    }

    /// Whether `url` still serves a page. `Ok(false)` only when the site
    /// answered with an error status; network failures are returned as
    /// errors since they say nothing about the page.
    #[instrument(level = "info", skip(self))]
    pub async fn is_reachable(&self, url: &str) -> Result<bool, Box<dyn Error>> {
        match fetch_page(&self.client, url, 1).await {
            Ok(_) => Ok(true),
            Err(e) if is_unreachable(e.as_ref()) => {
                debug!(error = %e, "Page gone");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Article URLs published on `date`.
    #[instrument(level = "info", skip(self), fields(%date))]
    pub async fn index_day(&self, date: NaiveDate) -> Result<Vec<String>, Box<dyn Error>> {
        let url = day_index_url(&self.base_url, date);
        let html = fetch_page(&self.client, &url, self.attempts).await?;
        let urls = parse_day_index(&html, &self.base_url)?;
        info!(count = urls.len(), %url, "Indexed article URLs");
        Ok(urls)
    }

    /// Article URLs of every day from `start` to `end`, in date order.
    pub async fn index_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<String>, Box<dyn Error>> {
        let mut urls = Vec::new();
        for day in date_range(start, end) {
            urls.extend(self.index_day(day).await?);
        }
        info!(count = urls.len(), %start, %end, "Indexed date range");
        Ok(urls)
    }

    /// Fetch and parse a newly listed article.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_article(&self, url: &str) -> Result<FetchOutcome, Box<dyn Error>> {
        let address = canonical_address(url);
        let html = match fetch_page(&self.client, &address, self.attempts).await {
            Ok(html) => html,
            Err(e) if is_unreachable(e.as_ref()) => return Ok(FetchOutcome::Unreachable),
            Err(e) => return Err(e),
        };
        let scraped = self.scrape(&html, &address).await?;
        Ok(FetchOutcome::Found(Box::new(scraped)))
    }

    /// Fetch an already stored article again, taking its address from the
    /// page's meta tags so that moved articles keep a correct address.
    #[instrument(level = "info", skip(self))]
    pub async fn refetch_article(&self, url: &str) -> Result<FetchOutcome, Box<dyn Error>> {
        let html = match fetch_page(&self.client, url.trim(), self.attempts).await {
            Ok(html) => html,
            Err(e) if is_unreachable(e.as_ref()) => return Ok(FetchOutcome::Unreachable),
            Err(e) => return Err(e),
        };
        let Some(address) = canonical_meta_address(&html, &self.base_url) else {
            return Ok(FetchOutcome::Redirected);
        };
        let scraped = self.scrape(&html, &address).await?;
        Ok(FetchOutcome::Found(Box::new(scraped)))
    }

    async fn scrape(&self, html: &str, address: &str) -> Result<ScrapedArticle, Box<dyn Error>> {
        let today = Local::now().date_naive().to_string();
        let article = parse_article(html, address, &self.scoring, &today)?;

        let comments = match comments_page_url(html, &self.base_url) {
            Some(url) => {
                debug!(%url, "Following link to full comments page");
                let page = fetch_page(&self.client, &url, self.attempts).await?;
                parse_comments(&page, address)
            }
            None => parse_comments(html, address),
        };

        info!(
            idnum = article.idnum,
            comments = comments.len(),
            "Scraped article"
        );
        Ok(ScrapedArticle { article, comments })
    }

    /// Fetch many new articles, one after another.
    ///
    /// Failures are logged and skipped; the URLs that could not be reached
    /// are returned alongside the articles.
    #[instrument(level = "info", skip_all, fields(count = urls.len()))]
    pub async fn fetch_articles(&self, urls: Vec<String>) -> (Vec<ScrapedArticle>, Vec<String>) {
        let outcomes: Vec<(String, Option<FetchOutcome>)> = stream::iter(urls)
            .then(|url: String| async move {
                match self.fetch_article(&url).await {
                    Ok(outcome) => (url, Some(outcome)),
                    Err(e) => {
                        error!(error = %e, %url, "Article fetch failed");
                        (url, None)
                    }
                }
            })
            .collect()
            .await;

        let mut articles = Vec::new();
        let mut unreachable = Vec::new();
        for (url, outcome) in outcomes {
            match outcome {
                Some(FetchOutcome::Found(scraped)) => articles.push(*scraped),
                Some(FetchOutcome::Unreachable) => {
                    warn!(%url, "Article not found");
                    unreachable.push(url);
                }
                Some(FetchOutcome::Redirected) | None => {}
            }
        }

        info!(
            fetched = articles.len(),
            unreachable = unreachable.len(),
            "Fetched article contents"
        );
        (articles, unreachable)
    }
}
