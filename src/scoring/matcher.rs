//! Ratcliff/Obershelp sequence matching.
//!
//! A character-level port of the longest-matching-blocks algorithm used by
//! Python's `difflib.SequenceMatcher` with no junk predicate. Stored tag
//! similarity scores were tuned against that exact ratio, so this keeps the
//! same block search order, the same tie breaking and the same "popular
//! element" heuristic for long second sequences.

use std::collections::HashMap;

/// Second sequences at least this long have their popular characters
/// dropped from the index.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matched run: `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Matcher over a fixed pair of strings.
#[derive(Debug)]
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// Positions of each character of `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|_, idxs| idxs.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);

        // j2len[j] = length of the longest match ending with a[i-1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let k = prev + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular characters are missing from b2j; grow the block over them.
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Block {
            a_start: besti,
            b_start: bestj,
            size: bestsize,
        }
    }

    /// All non-overlapping matching blocks, ordered by position.
    pub fn matching_blocks(&self) -> Vec<Block> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.find_longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            let (i, j, k) = (block.a_start, block.b_start, block.size);
            blocks.push(block);
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        blocks.sort_by_key(|b| (b.a_start, b.b_start));
        blocks
    }

    /// `2 * M / T`, where `M` is the number of matched characters and `T`
    /// the combined length. Two empty strings are identical (1.0).
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|b| b.size).sum();
        2.0 * matches as f64 / total as f64
    }
}

/// Convenience wrapper for a one-off ratio.
pub fn ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(a, b).ratio()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(ratio("uefa", "uefa"), 1.0);
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", ""), 0.0);
        assert_eq!(ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_known_ratios() {
        // difflib.SequenceMatcher(None, "abcd", "bcde").ratio() == 0.75
        assert_eq!(ratio("abcd", "bcde"), 0.75);
        // "h" + "llo" match: 2 * 4 / 10
        assert_eq!(ratio("hello", "hallo"), 0.8);
        assert_eq!(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_matching_blocks_split_around_longest() {
        let m = SequenceMatcher::new("abxcd", "abcd");
        let blocks = m.matching_blocks();
        assert_eq!(
            blocks,
            vec![
                Block { a_start: 0, b_start: 0, size: 2 },
                Block { a_start: 3, b_start: 2, size: 2 },
            ]
        );
    }

    #[test]
    fn test_non_ascii_counts_characters() {
        // "jan" + "a" match: 2 * 4 / 10
        let r = ratio("janša", "jansa");
        assert!((r - 0.8).abs() < 1e-12);
        let r = ratio("boštjan", "bostjan");
        assert!((r - 12.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_popular_characters_still_extend_long_matches() {
        // Every character of b is popular, so the index is empty and the
        // block can only be found by extension.
        let s = "ab".repeat(150);
        assert_eq!(ratio(&s, &s), 1.0);
    }

    #[test]
    fn test_rotated_string() {
        assert_eq!(ratio("abcd", "bcda"), 0.75);
        assert_eq!(ratio("bcda", "abcd"), 0.75);
    }
}
