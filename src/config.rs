//! YAML configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup against the live site.
//!
//! ```yaml
//! base_url: http://siol.net
//! fetch_attempts: 5
//! scoring:
//!   similarity_threshold: 0.75
//!   important_bonus: 0.1
//! frequency:
//!   top: 500
//!   stopwords: slovene
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scheme and host that relative article links are resolved against.
    pub base_url: String,
    /// How many times a page is requested before it is given up on.
    pub fetch_attempts: usize,
    /// File that unreachable article URLs are appended to.
    pub not_found_file: String,
    pub scoring: ScoringConfig,
    pub frequency: FrequencyConfig,
    pub suggest: SuggestConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://siol.net".to_string(),
            fetch_attempts: 5,
            not_found_file: "articles_404.txt".to_string(),
            scoring: ScoringConfig::default(),
            frequency: FrequencyConfig::default(),
            suggest: SuggestConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Tag pairs whose ratio is strictly above this count as near duplicates.
    pub similarity_threshold: f64,
    /// Added to relevance for every tag also found in the bold/italic
    /// excerpt. Off unless set.
    pub important_bonus: Option<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: crate::scoring::similarity::DEFAULT_THRESHOLD,
            important_bonus: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwordList {
    /// General Slovene function words.
    Slovene,
    /// The ad-server list: Slovene function words plus site boilerplate.
    Adserver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    /// Number of words written to the frequency report.
    pub top: usize,
    pub stopwords: StopwordList,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            top: 500,
            stopwords: StopwordList::Adserver,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Phrase sections are cut to this many entries; names and
    /// abbreviations are listed in full.
    pub cutoff: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self { cutoff: 10 }
    }
}

/// Load the configuration, falling back to defaults when no path is given.
#[instrument(level = "info")]
pub fn load_config(path: Option<&str>) -> Result<AppConfig, Box<dyn Error>> {
    let Some(path) = path else {
        info!("No config file given; using defaults");
        return Ok(AppConfig::default());
    };

    let raw = std::fs::read_to_string(Path::new(path))
        .map_err(|e| format!("failed to read config file '{path}': {e}"))?;
    let config: AppConfig = serde_yaml::from_str(&raw)
        .map_err(|e| format!("failed to parse config file '{path}': {e}"))?;

    if config.fetch_attempts == 0 {
        return Err("fetch_attempts must be at least 1".into());
    }
    if !(0.0..=1.0).contains(&config.scoring.similarity_threshold) {
        return Err("scoring.similarity_threshold must be within 0..=1".into());
    }

    info!(path, "Loaded configuration");
    Ok(config)
}
