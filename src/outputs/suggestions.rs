//! Text report of tag suggestions, one block per article.

use crate::analysis::suggest::{Ranked, Suggestions};
use std::fmt::Write;

fn ranked_lines(out: &mut String, ranked: &Ranked, cutoff: Option<usize>) {
    let limit = cutoff.unwrap_or(ranked.len());
    for (count, phrase) in ranked.iter().take(limit) {
        // writing to a String cannot fail
        let _ = writeln!(out, "{count} {phrase}");
    }
}

/// Render the block for one article.
///
/// Names and abbreviations are listed in full; phrase and word sections are
/// cut to `cutoff` entries. `important` is the article's `", "` joined
/// excerpt, shown one fragment per line.
pub fn render(address: &str, suggestions: &Suggestions, important: &str, cutoff: usize) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}\n\n", address.trim());

    out.push_str("SUGGESTED NAMES\n");
    ranked_lines(&mut out, &suggestions.names, None);
    out.push_str("\nSUGGESTED ABBREVIATIONS\n");
    ranked_lines(&mut out, &suggestions.abbreviations, None);
    out.push_str("\nSUGGESTED IMPORTANT TEXT\n");
    out.push_str(&important.replace(", ", "\n"));
    out.push('\n');

    let sections = [
        ("THREE-WORD PHRASES", &suggestions.three_words),
        ("TWO-WORD PHRASES", &suggestions.two_words),
        ("ONE-WORD PHRASES, LENGTH > 3", &suggestions.long_words),
        ("ONE-WORD PHRASES, LENGTH <= 3", &suggestions.short_words),
    ];
    for (title, ranked) in sections {
        let _ = writeln!(out, "\n{title}");
        ranked_lines(&mut out, ranked, Some(cutoff));
    }
    out.push_str("\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(items: &[(usize, &str)]) -> Ranked {
        items.iter().map(|(c, p)| (*c, p.to_string())).collect()
    }

    #[test]
    fn test_render_layout() {
        let suggestions = Suggestions {
            names: ranked(&[(2, "Borut Pahor"), (1, "Janez Janša")]),
            abbreviations: ranked(&[(3, "NZS")]),
            three_words: ranked(&[(2, "a b c"), (1, "b c d")]),
            two_words: ranked(&[(1, "a b")]),
            long_words: ranked(&[]),
            short_words: ranked(&[(4, "in")]),
        };
        let text = render("http://siol.net/a-1\n", &suggestions, "Borut Pahor, NZS", 1);
        assert_eq!(
            text,
            "http://siol.net/a-1\n\n\
             SUGGESTED NAMES\n2 Borut Pahor\n1 Janez Janša\n\
             \nSUGGESTED ABBREVIATIONS\n3 NZS\n\
             \nSUGGESTED IMPORTANT TEXT\nBorut Pahor\nNZS\n\
             \nTHREE-WORD PHRASES\n2 a b c\n\
             \nTWO-WORD PHRASES\n1 a b\n\
             \nONE-WORD PHRASES, LENGTH > 3\n\
             \nONE-WORD PHRASES, LENGTH <= 3\n4 in\n\n\n"
        );
    }
}
