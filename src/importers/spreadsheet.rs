//! Import from a CSV export of the legacy article spreadsheet.
//!
//! The first row is a header. Columns used (zero based):
//!
//! | col | content |
//! |-----|---------|
//! | 0 | article id; rows with an empty id are skipped |
//! | 1 | date as `D/M/YYYY` |
//! | 2 | address without scheme |
//! | 3 | author |
//! | 4 | further authors, `"; "` separated, behind a one-char marker |
//! | 7, 8 | section and subsection |
//! | 9, 11, 12, 13 | title, label, lead, content |
//! | 15 | number of tags |
//! | 16.. | tags; all but the first carry a one-char marker |
//!
//! The sheet has no bold/italic excerpt, so `important` stays empty.

use crate::config::ScoringConfig;
use crate::error::ToolError;
use crate::models::Article;
use crate::scoring::score_article;
use crate::store::ArticleStore;
use crate::utils::parse_date;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::error::Error;
use std::io::Read;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

const COL_ID: usize = 0;
const COL_DATE: usize = 1;
const COL_ADDRESS: usize = 2;
const COL_AUTHOR: usize = 3;
const COL_COAUTHORS: usize = 4;
const COL_SECTION: usize = 7;
const COL_SUBSECTION: usize = 8;
const COL_TITLE: usize = 9;
const COL_LABEL: usize = 11;
const COL_LEAD: usize = 12;
const COL_CONTENT: usize = 13;
const COL_TAG_COUNT: usize = 15;
const COL_TAGS: usize = 16;

/// Counts reported after an import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Spreadsheet cells holding whole numbers may come out as `"12.0"`.
fn parse_count(cell: &str) -> Option<u64> {
    cell.parse::<u64>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

fn drop_marker(cell: &str) -> String {
    cell.chars().skip(1).collect()
}

/// Build an article from one data row. `Ok(None)` for rows without an id.
///
/// `row` is the 1-based line number used in error messages.
pub fn parse_row(
    record: &StringRecord,
    row: usize,
    scoring: &ScoringConfig,
) -> Result<Option<Article>, ToolError> {
    let cell = |i: usize| record.get(i).unwrap_or("");
    let bad = |reason: &str| ToolError::BadRow {
        row,
        reason: reason.to_string(),
    };

    if cell(COL_ID).is_empty() {
        return Ok(None);
    }
    let idnum = parse_count(cell(COL_ID)).ok_or_else(|| bad("article id is not a number"))?;

    let date = cell(COL_DATE).split('/').rev().collect::<Vec<_>>().join("-");
    parse_date(&date).map_err(|_| bad("date is not D/M/YYYY"))?;

    if cell(COL_ADDRESS).is_empty() {
        return Err(bad("address is empty"));
    }
    let address = format!("http://{}", cell(COL_ADDRESS));

    let section = match (cell(COL_SECTION), cell(COL_SUBSECTION)) {
        ("", _) | (_, "") => String::new(),
        (s, sub) => format!("{}/{}", s.to_lowercase(), sub.to_lowercase()),
    };

    let coauthors = match cell(COL_COAUTHORS) {
        "" => String::new(),
        c => drop_marker(c).split("; ").collect::<Vec<_>>().join(", "),
    };

    let tag_count = parse_count(cell(COL_TAG_COUNT)).ok_or_else(|| bad("tag count is not a number"))?;
    // the count cannot reach past the last cell of the row
    let tag_count = usize::try_from(tag_count).unwrap_or(usize::MAX);
    let tags: Vec<String> = record
        .iter()
        .enumerate()
        .skip(COL_TAGS)
        .take(tag_count)
        .filter_map(|(i, tag)| match tag {
            "" => None,
            tag if i == COL_TAGS => Some(tag.to_string()),
            tag => Some(drop_marker(tag)),
        })
        .collect();

    let mut article = Article {
        idnum,
        address,
        section,
        author: cell(COL_AUTHOR).to_string(),
        coauthors,
        date,
        title: cell(COL_TITLE).to_string(),
        label: cell(COL_LABEL).to_string(),
        lead: cell(COL_LEAD).to_string(),
        content: cell(COL_CONTENT).to_string(),
        tags,
        ..Article::default()
    };

    let scores = score_article(scoring, &article.tags, "", &article.full_text());
    article.relevance = scores.relevance;
    article.similarity = scores.similarity;
    Ok(Some(article))
}

/// Parse every usable row of a spreadsheet export. Bad rows are logged and
/// skipped; the second element counts them.
pub fn read_articles<R: Read>(
    reader: R,
    scoring: &ScoringConfig,
) -> (Vec<Article>, usize) {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut articles = Vec::new();
    let mut skipped = 0;
    for (index, record) in rdr.records().enumerate() {
        // header is line 1
        let row = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row, error = %e, "Unreadable spreadsheet row; skipping");
                skipped += 1;
                continue;
            }
        };
        match parse_row(&record, row, scoring) {
            Ok(Some(article)) => articles.push(article),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Malformed spreadsheet row; skipping");
                skipped += 1;
            }
        }
    }
    (articles, skipped)
}

/// Import a spreadsheet export into `store`. Articles already stored only
/// get their author refreshed.
#[instrument(level = "info", skip(store, scoring), fields(path = %path.display()))]
pub async fn import_file(
    path: &Path,
    store: &mut ArticleStore,
    scoring: &ScoringConfig,
) -> Result<ImportSummary, Box<dyn Error>> {
    let bytes = fs::read(path).await?;
    let (articles, skipped) = read_articles(bytes.as_slice(), scoring);

    let mut summary = ImportSummary {
        rows: articles.len() + skipped,
        skipped,
        ..ImportSummary::default()
    };
    for article in articles {
        if store.insert_or_ignore(article) {
            summary.inserted += 1;
        }
    }

    info!(
        rows = summary.rows,
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Imported spreadsheet"
    );
    Ok(summary)
}
