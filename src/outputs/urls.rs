//! Plain-text URL lists.
//!
//! Index runs append a dated block of article URLs to a list file; import,
//! update and check runs read such lists back. Unreachable articles are
//! appended to a separate not-found list.

use super::append_text;
use chrono::{Local, NaiveDate};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// The block appended for one index run.
pub fn url_block(fetched_on: &str, from: NaiveDate, to: NaiveDate, urls: &[String]) -> String {
    let mut block = format!("\nURLs fetched on {fetched_on}\nArticles from {from} to {to}\n");
    for url in urls {
        block.push_str(url);
        block.push('\n');
    }
    block
}

#[instrument(level = "info", skip_all, fields(path = %path.display(), %from, %to, count = urls.len()))]
pub async fn append_url_list(
    path: &Path,
    from: NaiveDate,
    to: NaiveDate,
    urls: &[String],
) -> Result<(), Box<dyn Error>> {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    append_text(path, &url_block(&now, from, to, urls)).await?;
    info!("Appended URL list");
    Ok(())
}

/// URLs of a list file; header and blank lines are skipped.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_url_list(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| format!("failed to read URL list '{}': {e}", path.display()))?;
    let urls: Vec<String> = raw
        .lines()
        .filter(|line| line.contains("http://") || line.contains("https://"))
        .map(|line| line.trim().to_string())
        .collect();
    info!(count = urls.len(), "Read URL list");
    Ok(urls)
}

pub async fn append_not_found(path: &Path, url: &str) -> Result<(), Box<dyn Error>> {
    append_text(path, &format!("{}\n", url.trim())).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        crate::utils::parse_date(s).unwrap()
    }

    #[test]
    fn test_url_block_layout() {
        let urls = vec!["http://siol.net/a-1".to_string()];
        assert_eq!(
            url_block("2017-05-08 07:00:00", d("2017-5-5"), d("2017-5-7"), &urls),
            "\nURLs fetched on 2017-05-08 07:00:00\nArticles from 2017-05-05 to 2017-05-07\nhttp://siol.net/a-1\n"
        );
    }

    #[tokio::test]
    async fn test_append_then_read_skips_headers() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("articles.txt");
        let first = vec!["http://siol.net/a-1".to_string()];
        let second = vec!["http://siol.net/b-2".to_string(), "https://siol.net/c-3".to_string()];

        append_url_list(&path, d("2017-5-5"), d("2017-5-5"), &first).await.unwrap();
        append_url_list(&path, d("2017-5-6"), d("2017-5-6"), &second).await.unwrap();

        let urls = read_url_list(&path).await.unwrap();
        assert_eq!(
            urls,
            vec!["http://siol.net/a-1", "http://siol.net/b-2", "https://siol.net/c-3"]
        );
    }

    #[tokio::test]
    async fn test_append_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("articles_404.txt");
        append_not_found(&path, "http://siol.net/a-1\n").await.unwrap();
        append_not_found(&path, "http://siol.net/b-2").await.unwrap();
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "http://siol.net/a-1\nhttp://siol.net/b-2\n");
    }

    #[tokio::test]
    async fn test_read_missing_list_fails() {
        assert!(read_url_list(Path::new("/nonexistent/list.txt")).await.is_err());
    }
}
