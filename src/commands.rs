//! One function per subcommand.
//!
//! Each command loads what it needs, does its work, and writes its results.
//! Per-article failures are logged and skipped; only setup failures (bad
//! dates, unreadable inputs, an unwritable store) end a command early.

use crate::analysis::frequency::{self, Multiplier};
use crate::analysis::{conjugate, stopwords, suggest, tokenize};
use crate::cli::Command;
use crate::config::AppConfig;
use crate::importers::spreadsheet;
use crate::outputs::{append_text, csv, suggestions, urls};
use crate::scoring::score_article;
use crate::scoring::similarity::similar_pairs;
use crate::scrapers::siol::{FetchOutcome, ScrapedArticle, SiolScraper, article_id};
use crate::store::ArticleStore;
use crate::utils::{collapse_whitespace, default_daily_range, parse_range, truncate_for_log};
use chrono::{Local, NaiveDate};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Run the selected subcommand.
pub async fn run(command: Command, store: &Path, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    match command {
        Command::FetchUrls { from, to, output } => fetch_urls(config, &from, &to, &output).await,
        Command::Import { urls } => import(config, store, &urls).await,
        Command::Update { urls } => update(config, store, &urls).await,
        Command::ImportSheet { input } => import_sheet(config, store, &input).await,
        Command::Daily {
            from,
            to,
            output,
            store_new,
        } => {
            let range = match (from, to) {
                (Some(from), Some(to)) => parse_range(&from, &to)?,
                _ => default_daily_range(Local::now().date_naive()),
            };
            daily(config, range, &output, store_new.as_deref()).await
        }
        Command::Export {
            from,
            to,
            sections,
            output,
        } => export(store, &from, &to, &sections, &output).await,
        Command::Check { urls } => check(config, &urls).await,
        Command::Score {
            tags,
            text,
            text_file,
            important,
        } => {
            let text = match (text, text_file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path).await?,
                (None, None) => return Err("either --text or --text-file is required".into()),
            };
            score(config, &tags, &text, &important);
            Ok(())
        }
        Command::Frequency {
            from,
            to,
            comments,
            multiplier,
            output,
        } => {
            let range = match (from, to) {
                (Some(from), Some(to)) => Some(parse_range(&from, &to)?),
                _ => None,
            };
            word_frequency(config, store, range, comments, multiplier, output).await
        }
        Command::Suggest { urls, output } => suggest_tags(config, store, &urls, &output).await,
        Command::Tokenize { input, output } => tokenize_file(&input, &output).await,
        Command::Conjugate { input, output } => conjugate_file(&input, &output).await,
    }
}

#[instrument(level = "info", skip_all, fields(%from, %to))]
pub async fn fetch_urls(
    config: &AppConfig,
    from: &str,
    to: &str,
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    let (start, end) = parse_range(from, to)?;
    let scraper = SiolScraper::new(config)?;
    let found = scraper.index_range(start, end).await?;
    urls::append_url_list(output, start, end, &found).await?;
    info!(count = found.len(), path = %output.display(), "URLs appended");
    Ok(())
}

/// Store scraped articles; returns how many were new.
fn store_scraped(store: &mut ArticleStore, scraped: Vec<ScrapedArticle>) -> usize {
    let mut inserted = 0;
    for ScrapedArticle { article, comments } in scraped {
        let idnum = article.idnum;
        if store.insert_or_ignore(article) {
            inserted += 1;
        }
        let added = store.add_comments(idnum, comments);
        debug!(idnum, comments = added, "Stored comments");
    }
    inserted
}

async fn record_not_found(config: &AppConfig, unreachable: &[String]) {
    let path = Path::new(&config.not_found_file);
    for url in unreachable {
        if let Err(e) = urls::append_not_found(path, url).await {
            warn!(%url, error = %e, "Could not record unreachable article");
        }
    }
}

#[instrument(level = "info", skip(config))]
pub async fn import(config: &AppConfig, store_path: &Path, url_list: &Path) -> Result<(), Box<dyn Error>> {
    let list = urls::read_url_list(url_list).await?;
    let mut store = ArticleStore::load(store_path).await?;
    let scraper = SiolScraper::new(config)?;

    let (scraped, unreachable) = scraper.fetch_articles(list).await;
    let fetched = scraped.len();
    let inserted = store_scraped(&mut store, scraped);
    record_not_found(config, &unreachable).await;

    store.save(store_path).await?;
    info!(
        fetched,
        inserted,
        unreachable = unreachable.len(),
        vocabulary = store.tag_vocabulary().len(),
        "Import finished"
    );
    Ok(())
}

/// Drop a gone article from the store and note it in the not-found list.
async fn retire(config: &AppConfig, store: &mut ArticleStore, url: &str) {
    record_not_found(config, &[url.to_string()]).await;
    match article_id(url) {
        Ok(idnum) => match store.remove(idnum) {
            Some(_) => info!(idnum, %url, "Removed gone article"),
            None => info!(%url, "Article gone but not in store"),
        },
        Err(e) => warn!(error = %e, "Cannot tell which article to remove"),
    }
}

#[instrument(level = "info", skip(config))]
pub async fn update(config: &AppConfig, store_path: &Path, url_list: &Path) -> Result<(), Box<dyn Error>> {
    let list = urls::read_url_list(url_list).await?;
    let mut store = ArticleStore::load(store_path).await?;
    let scraper = SiolScraper::new(config)?;

    let outcomes: Vec<(String, Result<FetchOutcome, Box<dyn Error>>)> = stream::iter(list)
        .then(|url: String| {
            let scraper = &scraper;
            async move {
                let outcome = scraper.refetch_article(&url).await;
                (url, outcome)
            }
        })
        .collect()
        .await;

    let (mut updated, mut removed) = (0, 0);
    for (url, outcome) in outcomes {
        match outcome {
            Ok(FetchOutcome::Found(scraped)) => {
                let ScrapedArticle { article, comments } = *scraped;
                let idnum = article.idnum;
                if store.get(idnum).is_some() {
                    store.update(article);
                } else {
                    store.insert_or_ignore(article);
                }
                store.add_comments(idnum, comments);
                updated += 1;
            }
            Ok(FetchOutcome::Unreachable) | Ok(FetchOutcome::Redirected) => {
                retire(config, &mut store, &url).await;
                removed += 1;
            }
            Err(e) => warn!(%url, error = %e, "Update failed; keeping stored version"),
        }
    }

    store.save(store_path).await?;
    info!(updated, removed, "Update finished");
    Ok(())
}

#[instrument(level = "info", skip(config))]
pub async fn import_sheet(config: &AppConfig, store_path: &Path, input: &Path) -> Result<(), Box<dyn Error>> {
    let mut store = ArticleStore::load(store_path).await?;
    spreadsheet::import_file(input, &mut store, &config.scoring).await?;
    store.save(store_path).await?;
    info!(
        articles = store.len(),
        vocabulary = store.tag_vocabulary().len(),
        "Spreadsheet import finished"
    );
    Ok(())
}

#[instrument(level = "info", skip_all, fields(from = %range.0, to = %range.1))]
pub async fn daily(
    config: &AppConfig,
    range: (NaiveDate, NaiveDate),
    output: &Path,
    store_new: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let scraper = SiolScraper::new(config)?;
    let found = scraper.index_range(range.0, range.1).await?;
    let (scraped, unreachable) = scraper.fetch_articles(found).await;
    record_not_found(config, &unreachable).await;

    let articles: Vec<_> = scraped.iter().map(|s| s.article.clone()).collect();
    csv::write_daily(&articles, output).await?;

    if let Some(path) = store_new {
        let mut fresh = ArticleStore::new();
        store_scraped(&mut fresh, scraped);
        fresh.save(path).await?;
    }
    info!(articles = articles.len(), "Daily sheet ready");
    Ok(())
}

#[instrument(level = "info", skip(output))]
pub async fn export(
    store_path: &Path,
    from: &str,
    to: &str,
    sections: &[String],
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    let (start, end) = parse_range(from, to)?;
    let store = ArticleStore::load(store_path).await?;
    let selected: Vec<_> = store
        .articles_between(start, end)
        .into_iter()
        .filter(|a| sections.is_empty() || sections.iter().any(|s| a.section.contains(s.as_str())))
        .collect();
    csv::write_export(&selected, output).await
}

#[instrument(level = "info", skip(config))]
pub async fn check(config: &AppConfig, url_list: &Path) -> Result<(), Box<dyn Error>> {
    let list = urls::read_url_list(url_list).await?;
    let scraper = SiolScraper::new(config)?;

    let mut gone = Vec::new();
    let mut failed = 0;
    for (i, url) in list.iter().enumerate() {
        if i > 0 && i % 100 == 0 {
            info!(checked = i, total = list.len(), "Checking URLs");
        }
        match scraper.is_reachable(url).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(%url, "Article not found");
                gone.push(url.clone());
            }
            Err(e) => {
                warn!(%url, error = %e, "Could not check article; not recorded");
                failed += 1;
            }
        }
    }
    record_not_found(config, &gone).await;
    info!(
        checked = list.len(),
        gone = gone.len(),
        failed,
        "Check finished"
    );
    Ok(())
}

pub fn score(config: &AppConfig, tags: &[String], text: &str, important: &str) {
    let scores = score_article(&config.scoring, tags, important, text);
    debug!(text = %truncate_for_log(text, 200), "Scored text");
    println!("relevance: {:.4}", scores.relevance);
    println!("similarity: {}", scores.similarity);
    for (a, b) in similar_pairs(tags, config.scoring.similarity_threshold) {
        println!("  near duplicates: {a} / {b}");
    }
}

fn frequency_file_name(range: Option<(NaiveDate, NaiveDate)>, comments: bool) -> PathBuf {
    let name = match (range, comments) {
        (Some((from, to)), false) => format!("most_freq_words_from_{from}_to_{to}.txt"),
        (Some((from, to)), true) => format!("most_freq_words_comments_from_{from}_to_{to}.txt"),
        (None, false) => "most_freq_words.txt".to_string(),
        (None, true) => "most_freq_words_comments.txt".to_string(),
    };
    PathBuf::from(name)
}

#[instrument(level = "info", skip(config, output))]
pub async fn word_frequency(
    config: &AppConfig,
    store_path: &Path,
    range: Option<(NaiveDate, NaiveDate)>,
    comments: bool,
    multiplier: Multiplier,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let store = ArticleStore::load(store_path).await?;
    let articles: Vec<_> = match range {
        Some((from, to)) => store.articles_between(from, to),
        None => store.articles().collect(),
    };

    let documents: Vec<(String, u64)> = if comments {
        let in_scope: HashMap<u64, u64> = articles
            .iter()
            .map(|a| (a.idnum, multiplier.weight(a)))
            .collect();
        store
            .comments()
            .filter_map(|(idnum, c)| in_scope.get(&idnum).map(|w| (c.text.clone(), *w)))
            .collect()
    } else {
        articles
            .iter()
            .map(|a| (frequency::article_words_source(a), multiplier.weight(a)))
            .collect()
    };

    let stop = stopwords::words(config.frequency.stopwords);
    let freqs = frequency::word_frequencies(documents.iter().map(|(t, m)| (t.as_str(), *m)), stop);
    let top = frequency::most_common(&freqs, config.frequency.top);

    for (word, count) in top.iter().take(10) {
        info!(%word, count, "Frequent word");
    }

    let output = output.unwrap_or_else(|| frequency_file_name(range, comments));
    let body: String = top.iter().map(|(word, _)| format!("{word}\n")).collect();
    fs::write(&output, body).await?;
    info!(
        documents = documents.len(),
        words = top.len(),
        path = %output.display(),
        "Most frequent words saved"
    );
    Ok(())
}

#[instrument(level = "info", skip(config))]
pub async fn suggest_tags(
    config: &AppConfig,
    store_path: &Path,
    url_list: &Path,
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    let list = urls::read_url_list(url_list).await?;
    let store = ArticleStore::load(store_path).await?;

    let mut report = String::new();
    for url in &list {
        let stored = match article_id(url) {
            Ok(idnum) => store.get(idnum),
            Err(_) => store.find_by_address(url),
        };
        let Some(article) = stored else {
            warn!(%url, "Article not in store; no suggestions");
            continue;
        };
        let text = collapse_whitespace(&frequency::article_words_source(article));
        let found = suggest::suggest(&text);
        report.push_str(&suggestions::render(
            url,
            &found,
            &article.important,
            config.suggest.cutoff,
        ));
    }

    append_text(output, &report).await?;
    info!(articles = list.len(), path = %output.display(), "Suggestions appended");
    Ok(())
}

#[instrument(level = "info")]
pub async fn tokenize_file(input: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(input).await?;
    let words = tokenize::tokenize(&text);
    fs::write(output, words.join(", ")).await?;
    info!(words = words.len(), "Tokenized words saved");
    Ok(())
}

#[instrument(level = "info")]
pub async fn conjugate_file(input: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(input).await?;
    let forms = conjugate::conjugate_list(&text);
    fs::write(output, forms.join(", ")).await?;
    info!(forms = forms.len(), "Conjugated words saved");
    Ok(())
}
