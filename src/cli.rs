//! Command-line interface definitions for the siol.net tag tools.
//!
//! Global options select the article store and the YAML configuration; both
//! can also be given through environment variables. Every tool is a
//! subcommand.

use crate::analysis::frequency::Multiplier;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Collect last week's article URLs, then scrape them into the store
/// siol_tags fetch-urls --from 2017-5-1 --to 2017-5-7
/// siol_tags import --urls articles.txt
///
/// # Score a tag set against a text
/// siol_tags score --tag "Borut Pahor" --tag UEFA --text-file article.txt
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Article store file
    #[arg(short, long, env = "SIOL_STORE", default_value = "articles.json", global = true)]
    pub store: PathBuf,

    /// Optional path to config.yaml file
    #[arg(short, long, env = "SIOL_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append the article URLs published in a date range to a list file
    FetchUrls {
        /// First day, YYYY-M-D
        #[arg(long)]
        from: String,
        /// Last day, YYYY-M-D
        #[arg(long)]
        to: String,
        #[arg(short, long, default_value = "articles.txt")]
        output: PathBuf,
    },

    /// Scrape, score and store the articles of a URL list
    Import {
        #[arg(short, long)]
        urls: PathBuf,
    },

    /// Scrape stored articles again; gone articles are removed
    Update {
        #[arg(short, long)]
        urls: PathBuf,
    },

    /// Import articles from a CSV export of the legacy spreadsheet
    ImportSheet {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Scrape the previous working day(s) into an address/author sheet
    Daily {
        #[arg(long, requires = "to")]
        from: Option<String>,
        #[arg(long, requires = "from")]
        to: Option<String>,
        #[arg(short, long, default_value = "daily.csv")]
        output: PathBuf,
        /// Also write the scraped articles to a fresh store file
        #[arg(long)]
        store_new: Option<PathBuf>,
    },

    /// Export stored articles of a date range as CSV
    Export {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Keep only sections containing this text; may be repeated
        #[arg(long = "section")]
        sections: Vec<String>,
        #[arg(short, long, default_value = "export.csv")]
        output: PathBuf,
    },

    /// Record the URLs of a list that cannot be reached
    Check {
        #[arg(short, long)]
        urls: PathBuf,
    },

    /// Print tag relevance and similarity for a text
    #[command(group(ArgGroup::new("source").required(true).args(["text", "text_file"])))]
    Score {
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        text_file: Option<PathBuf>,
        /// Bold/italic excerpt, used when an important bonus is configured
        #[arg(long, default_value = "")]
        important: String,
    },

    /// Count the most frequent words of stored articles or comments
    Frequency {
        #[arg(long, requires = "to")]
        from: Option<String>,
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Count comment texts instead of article texts
        #[arg(long)]
        comments: bool,
        #[arg(short, long, value_enum, default_value_t = Multiplier::None)]
        multiplier: Multiplier,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write tag suggestions for the stored articles of a URL list
    Suggest {
        #[arg(short, long)]
        urls: PathBuf,
        #[arg(short, long, default_value = "suggested.txt")]
        output: PathBuf,
    },

    /// Distinct content words of a text file
    Tokenize {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value = "words_tokenized.txt")]
        output: PathBuf,
    },

    /// Declined forms of a comma separated word list
    Conjugate {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value = "words_conjugated.txt")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "siol_tags",
            "fetch-urls",
            "--from",
            "2017-5-1",
            "--to",
            "2017-5-7",
        ]);

        assert_eq!(cli.store, PathBuf::from("articles.json"));
        match cli.command {
            Command::FetchUrls { from, to, output } => {
                assert_eq!(from, "2017-5-1");
                assert_eq!(to, "2017-5-7");
                assert_eq!(output, PathBuf::from("articles.txt"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "siol_tags",
            "import",
            "-u",
            "list.txt",
            "-s",
            "/tmp/store.json",
            "-c",
            "siol.yaml",
        ]);

        assert_eq!(cli.store, PathBuf::from("/tmp/store.json"));
        assert_eq!(cli.config.as_deref(), Some("siol.yaml"));
        assert!(matches!(cli.command, Command::Import { .. }));
    }

    #[test]
    fn test_score_requires_text_source() {
        assert!(Cli::try_parse_from(["siol_tags", "score", "--tag", "UEFA"]).is_err());

        let cli = Cli::try_parse_from([
            "siol_tags", "score", "-t", "UEFA", "-t", "FIFA", "--text", "UEFA",
        ])
        .unwrap();
        match cli.command {
            Command::Score { tags, text, .. } => {
                assert_eq!(tags, vec!["UEFA", "FIFA"]);
                assert_eq!(text.as_deref(), Some("UEFA"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_range_flags_come_in_pairs() {
        assert!(Cli::try_parse_from(["siol_tags", "daily", "--from", "2017-5-1"]).is_err());
        assert!(Cli::try_parse_from(["siol_tags", "daily"]).is_ok());
    }

    #[test]
    fn test_frequency_multiplier() {
        let cli = Cli::parse_from(["siol_tags", "frequency", "--comments", "-m", "views"]);
        match cli.command {
            Command::Frequency {
                comments,
                multiplier,
                ..
            } => {
                assert!(comments);
                assert_eq!(multiplier, Multiplier::Views);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_export_sections_repeat() {
        let cli = Cli::parse_from([
            "siol_tags", "export", "--from", "2017-5-1", "--to", "2017-5-7", "--section", "/dom",
            "--section", "/vrt",
        ]);
        match cli.command {
            Command::Export { sections, .. } => assert_eq!(sections, vec!["/dom", "/vrt"]),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
