//! Naive declension of Slovene nouns and adjectives.
//!
//! The gender is guessed from the final letter only, so irregular words get
//! wrong forms. The result is meant as a starting list of tag variants to
//! review by hand.

use std::iter;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Feminine endings declined like adjectives.
const FEMININE_ADJECTIVAL: &[&str] = &["lna", "ska", "čna", "sna", "šna", "ška", "mna", "tna"];

/// Neuter endings declined like adjectives.
const NEUTER_ADJECTIVAL: &[&str] = &["rno", "sko", "ško", "lno", "čno", "sno", "šno"];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

fn forms(word: &str, root: &str, endings: &[&str]) -> Vec<String> {
    iter::once(word.to_string())
        .chain(endings.iter().map(|e| format!("{root}{e}")))
        .collect()
}

/// Genitive plural of a feminine noun, with the fill vowel some stems take
/// (`igla` → `igel`).
fn feminine_genitive_plural(root: &[char]) -> String {
    let n = root.len();
    let at = |back: usize| n.checked_sub(back).map(|i| root[i]);
    let head = |len: usize| root[..len].iter().collect::<String>();

    match (at(1), at(2), at(3)) {
        (Some('l'), _, _) => format!("{}el", head(n - 1)),
        (Some('j'), Some(c2), Some(c3)) if !is_vowel(c2) && !is_vowel(c3) => {
            format!("{}e{}", head(n - 2), root[n - 2..].iter().collect::<String>())
        }
        _ => head(n),
    }
}

/// The word followed by its declined forms.
///
/// An empty word yields nothing; a word whose ending matches no rule yields
/// only itself.
pub fn conjugate(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let Some(&last) = chars.last() else {
        return Vec::new();
    };
    let n = chars.len();
    let cut = |k: usize| chars[..n - k].iter().collect::<String>();
    let ends = |suffixes: &[&str]| suffixes.iter().any(|s| word.ends_with(s));

    match last {
        'a' => {
            let root = cut(1);
            if ends(FEMININE_ADJECTIVAL) {
                return forms(word, &root, &["e", "i", "o", "im", "ih", "imi"]);
            }
            let mut out = forms(word, &root, &["e", "i", "o", "am", "ah", "ami"]);
            if !root.is_empty() {
                out.push(feminine_genitive_plural(&chars[..n - 1]));
            }
            out
        }
        'o' => {
            let root = cut(1);
            if ends(NEUTER_ADJECTIVAL) {
                forms(word, &root, &["ega", "emu", "em", "im", "i", "ih", "imi"])
            } else {
                forms(word, &root, &["", "a", "u", "om", "ih", "i"])
            }
        }
        'e' => forms(word, &cut(1), &["", "a", "u", "em", "ih", "i"]),
        'i' => forms(word, &cut(1), &["ega", "emu", "em", "im", "ih", "imi"]),
        c if !is_vowel(c) => {
            // Mobile e: drop the vowel before the final consonant.
            let mobile_root = || format!("{}{}", cut(2), last);
            if ends(&["šč", "ec"]) {
                forms(word, &mobile_root(), &["a", "u", "em", "i", "ev", "e", "ih"])
            } else if (n >= 5 && word.ends_with("ek")) || ends(&["eter", "ster", "zem"]) {
                forms(word, &mobile_root(), &["a", "u", "om", "i", "ov", "e", "ih"])
            } else if c == 'r' {
                forms(word, word, &["ja", "ju", "jem", "ji", "jev", "je", "jih"])
            } else if c == 'j' {
                forms(word, word, &["a", "u", "em", "i", "ev", "e", "ih"])
            } else {
                forms(word, word, &["a", "u", "om", "i", "ov", "e", "ih"])
            }
        }
        _ => vec![word.to_string()],
    }
}

/// Decline every word of a comma separated list. Spaces are ignored.
pub fn conjugate_list(input: &str) -> Vec<String> {
    input
        .replace(' ', "")
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .flat_map(conjugate)
        .collect()
}
