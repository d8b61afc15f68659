//! Tag similarity index: how many tag pairs look like near duplicates.

use super::matcher::ratio;

/// Pairs whose ratio is strictly above this are near duplicates.
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Number of unordered tag pairs more similar than [`DEFAULT_THRESHOLD`].
pub fn similarity<S: AsRef<str>>(tags: &[S]) -> usize {
    similarity_with_threshold(tags, DEFAULT_THRESHOLD)
}

/// Every ordered pair `(i, j)`, `i != j`, is compared on its lower-cased
/// text and counted on its own; the total is halved (floor) so a pair that
/// passes in both directions counts once.
pub fn similarity_with_threshold<S: AsRef<str>>(tags: &[S], threshold: f64) -> usize {
    let lowered: Vec<String> = tags.iter().map(|t| t.as_ref().to_lowercase()).collect();

    let mut count = 0usize;
    for (i, a) in lowered.iter().enumerate() {
        for (j, b) in lowered.iter().enumerate() {
            if i != j && ratio(a, b) > threshold {
                count += 1;
            }
        }
    }
    count / 2
}

/// The near-duplicate pairs themselves, for reviewers who want to merge them.
///
/// A pair is listed once, in input order, when either direction passes.
pub fn similar_pairs<S: AsRef<str>>(tags: &[S], threshold: f64) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (i, a) in tags.iter().enumerate() {
        for b in &tags[i + 1..] {
            let (a, b) = (a.as_ref(), b.as_ref());
            let (la, lb) = (a.to_lowercase(), b.to_lowercase());
            if ratio(&la, &lb) > threshold || ratio(&lb, &la) > threshold {
                pairs.push((a.to_string(), b.to_string()));
            }
        }
    }
    pairs
}
