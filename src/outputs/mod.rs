//! Files written for editors.
//!
//! # Submodules
//!
//! - [`csv`]: article export table and the daily address/author sheet
//! - [`urls`]: appendable lists of article URLs and of unreachable articles
//! - [`suggestions`]: per-article tag suggestion report

pub mod csv;
pub mod suggestions;
pub mod urls;

use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Append `text` to `path`, creating the file and its directory if needed.
pub async fn append_text(path: &Path, text: &str) -> Result<(), Box<dyn Error>> {
    ensure_parent_dir(path).await?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(text.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
