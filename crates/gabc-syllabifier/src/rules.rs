//! Rule-based Portuguese syllabification, used when no dictionary knows a word.

use gabc_core::{Syllabification, SyllabifyError};

const VOWELS: &str = "aeiouáéíóúâêôãõàü";
const ACUTE_OR_CIRCUMFLEX: &str = "áéíóúâêô";
const TILDE: &str = "ãõ";

const DIPHTHONGS: [&str; 15] = [
    "ai", "au", "ei", "eu", "oi", "ou", "ui", "iu", "ão", "éu", "êu", "uê", "ué", "üe", "üi",
];
const TRIPHTHONGS: [&str; 4] = ["uai", "uão", "uei", "uõe"];
/// Consonant pairs that open a syllable. `qu` and `gu` count when the `u` is
/// silent before another vowel.
const ONSETS: [&str; 18] = [
    "pr", "pl", "br", "bl", "cr", "cl", "dr", "fr", "gr", "gl", "tr", "vr", "fl", "ch", "lh", "nh", "qu", "gu",
];

/// Words the scanner gets wrong, with their stressed syllable.
const EXCEPTIONS: [(&str, &str, usize); 11] = [
    ("alegria", "a/le/gri/a", 3),
    ("português", "por/tu/guês", 3),
    ("paraguaio", "pa/ra/gua/io", 3),
    ("enxaguei", "en/xa/guei", 3),
    ("sosseguei", "sos/se/guei", 3),
    ("misericórdia", "mi/se/ri/cór/di/a", 4),
    ("glória", "gló/ri/a", 1),
    ("uruguaio", "u/ru/gua/io", 3),
    ("quais", "quais", 1),
    ("iguais", "i/guais", 2),
    ("ameaçou", "a/me/a/çou", 4),
];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// A vowel that carries a syllable: the `u` of `que`, `gui`, `qua` does not.
fn is_nucleus(chars: &[char], i: usize) -> bool {
    let c = chars[i];
    if c == 'u' && i > 0 && matches!(chars[i - 1], 'q' | 'g') && chars.get(i + 1).is_some_and(|&n| is_vowel(n)) {
        return false;
    }
    is_vowel(c)
}

fn window(chars: &[char], from: usize, len: usize) -> Option<String> {
    chars.get(from..from + len).map(|w| w.iter().collect())
}

/// Splits a lowercase word into syllables and picks the stressed one.
pub fn syllabify(word: &str) -> Result<Syllabification, SyllabifyError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(SyllabifyError::Empty);
    }
    if let Some((_, slashed, tonic)) = EXCEPTIONS.iter().find(|(w, _, _)| *w == word) {
        return Ok(Syllabification::new(*slashed, *tonic));
    }

    let syllables = split(word);
    let tonic = tonic_index(word, &syllables);
    Ok(Syllabification::new(syllables.join("/"), tonic))
}

/// Vowel-nucleus scan. Diphthongs and triphthongs stay together, vowels in
/// hiatus split, and the consonants between two nuclei go to the next
/// syllable only as far as they form a valid onset: V-CV, VC-CV or V-CCV,
/// VCC-CV or VC-CCV.
pub fn split(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < n {
        if !is_nucleus(&chars, i) {
            i += 1;
            continue;
        }
        let len = if window(&chars, i, 3).is_some_and(|w| TRIPHTHONGS.contains(&w.as_str())) {
            3
        } else if window(&chars, i, 2).is_some_and(|w| DIPHTHONGS.contains(&w.as_str())) {
            2
        } else {
            1
        };
        let end = i + len;

        let mut next = end;
        while next < n && !is_nucleus(&chars, next) {
            next += 1;
        }
        // trailing consonants close the last syllable
        if next == n {
            break;
        }

        let cut = match next - end {
            0 | 1 => end,
            _ => {
                let pair: String = chars[next - 2..next].iter().collect();
                if ONSETS.contains(&pair.as_str()) {
                    next - 2
                } else {
                    next - 1
                }
            }
        };
        out.push(chars[start..cut].iter().collect());
        start = cut;
        i = next;
    }

    if start < n {
        out.push(chars[start..n].iter().collect());
    }
    out
}

/// 1-based stressed syllable: a written accent wins, otherwise words ending
/// in a, e, o (plural s), am, em, ens are paroxytone and the rest oxytone.
pub fn tonic_index(word: &str, syllables: &[String]) -> usize {
    let marked = |set: &str| syllables.iter().position(|s| s.chars().any(|c| set.contains(c)));
    if let Some(i) = marked(ACUTE_OR_CIRCUMFLEX).or_else(|| marked(TILDE)) {
        return i + 1;
    }

    let n = syllables.len();
    let paroxytone = ["a", "e", "o", "as", "es", "os", "am", "em", "ens"]
        .iter()
        .any(|end| word.ends_with(end));
    if paroxytone && n > 1 {
        n - 1
    } else {
        n.max(1)
    }
}
