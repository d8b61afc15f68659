//! Spreadsheet-friendly CSV reports.
//!
//! - [`write_export`]: full article rows for a date range
//! - [`write_daily`]: the address/author checklist of the daily run

use crate::models::Article;
use crate::utils::ensure_parent_dir;
use csv::Writer;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const EXPORT_HEADER: [&str; 11] = [
    "ID", "Address", "Section", "Author", "Coauthors", "Time", "Title", "Label", "Lead",
    "Content", "Tags",
];

fn export_row(article: &Article) -> [String; 11] {
    [
        article.idnum.to_string(),
        article.address.clone(),
        article.section.clone(),
        article.author.clone(),
        article.coauthors.clone(),
        article.date.clone(),
        article.title.clone(),
        article.label.clone(),
        article.lead.clone(),
        article.content.clone(),
        article.tags.join(", "),
    ]
}

/// Render the export table, header included.
pub fn export_to_bytes<'a, I>(articles: I) -> Result<Vec<u8>, Box<dyn Error>>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;
    for article in articles {
        writer.write_record(export_row(article))?;
    }
    Ok(writer.into_inner().map_err(|e| e.to_string())?)
}

/// Write every given article as one row of the export table.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_export(articles: &[&Article], path: &Path) -> Result<(), Box<dyn Error>> {
    let bytes = export_to_bytes(articles.iter().copied())?;
    ensure_parent_dir(path).await?;
    fs::write(path, bytes).await?;
    info!(rows = articles.len(), "Wrote export");
    Ok(())
}

/// Write `address, author` rows without a header, one per article.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_daily(articles: &[Article], path: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_writer(Vec::new());
    for article in articles {
        writer.write_record([article.address.as_str(), article.author.as_str()])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;

    ensure_parent_dir(path).await?;
    fs::write(path, bytes).await?;
    info!(rows = articles.len(), "Wrote daily sheet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            idnum: 452121,
            address: "http://siol.net/novice/slovenija/nzs-452121".to_string(),
            section: "novice/slovenija".to_string(),
            author: "Janez Novak".to_string(),
            date: "2017-05-06".to_string(),
            title: "NZS, nov predsednik".to_string(),
            content: "Vrstica ena\nVrstica dva\n".to_string(),
            tags: vec!["NZS".to_string(), "UEFA".to_string()],
            ..Article::default()
        }
    }

    #[test]
    fn test_export_layout_and_quoting() {
        let a = article();
        let bytes = export_to_bytes([&a]).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), EXPORT_HEADER);

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "452121");
        assert_eq!(&rows[0][5], "2017-05-06");
        assert_eq!(&rows[0][6], "NZS, nov predsednik");
        assert_eq!(&rows[0][9], "Vrstica ena\nVrstica dva\n");
        assert_eq!(&rows[0][10], "NZS, UEFA");
    }

    #[tokio::test]
    async fn test_write_daily() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out/daily.csv");
        write_daily(&[article()], &path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "http://siol.net/novice/slovenija/nzs-452121,Janez Novak\n");
    }

    #[tokio::test]
    async fn test_write_export_empty_has_header() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("export.csv");
        write_export(&[], &path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.starts_with("ID,Address,Section"));
        assert_eq!(written.lines().count(), 1);
    }
}
