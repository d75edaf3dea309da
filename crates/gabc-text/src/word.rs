use std::collections::HashMap;

use gabc_core::{Deadline, GabcError, Result, Syllabification, Syllabifier, Syllable, SyllabifyError};

/// Outcome of partitioning a token into letters and everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedWord {
    /// Lowercase letters, in order, ready for the syllabifier.
    Letters(String),
    /// Pure punctuation or digits: nothing to syllabify.
    NoLetters,
}

/// Per-word working state between the raw token and its syllables.
#[derive(Clone, Debug, Default)]
pub struct WordMap {
    word: String,
    original: Vec<char>,
    letters: Vec<char>,
    upper: HashMap<usize, char>,
    not_letters: HashMap<usize, char>,
    syllabification: Option<Syllabification>,
    split: Vec<String>,
}

impl WordMap {
    pub fn new(word: &str) -> Self {
        Self { word: word.to_string(), ..Self::default() }
    }

    /// Records letter case and the position of every non-letter.
    pub fn parse(&mut self) -> ParsedWord {
        self.original = self.word.chars().collect();
        self.letters.clear();
        self.upper.clear();
        self.not_letters.clear();

        for (i, &c) in self.original.iter().enumerate() {
            if !c.is_alphabetic() {
                self.not_letters.insert(i, c);
                continue;
            }
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) if l != c => {
                    self.upper.insert(i, c);
                    self.letters.push(l);
                }
                _ => self.letters.push(c),
            }
        }

        if self.letters.is_empty() {
            ParsedWord::NoLetters
        } else {
            ParsedWord::Letters(self.letters.iter().collect())
        }
    }

    /// Asks the syllabifier for boundaries and stress, then checks the answer
    /// actually describes this word.
    pub fn syllabify(&mut self, syllabifier: &dyn Syllabifier, deadline: &Deadline) -> Result<()> {
        let letters: String = self.letters.iter().collect();
        let answer = deadline
            .check()
            .and_then(|_| syllabifier.syllabify(&letters, deadline))
            .map_err(|e| match e {
                SyllabifyError::TimedOut | SyllabifyError::Cancelled => GabcError::Timeout,
                source => GabcError::Syllabifier { word: self.word.clone(), source },
            })?;

        let bad = |reason: &'static str| GabcError::BadSyllabification {
            word: self.word.clone(),
            slashed: answer.slashed.clone(),
            tonic: answer.tonic_index,
            reason,
        };
        if answer.slashed.split('/').any(str::is_empty) {
            return Err(bad("empty syllable"));
        }
        if !answer.slashed.chars().filter(|&c| c != '/').eq(self.letters.iter().copied()) {
            return Err(bad("letters differ from the word"));
        }
        if answer.tonic_index == 0 || answer.tonic_index > answer.syllable_count() {
            return Err(bad("tonic index out of range"));
        }

        self.syllabification = Some(answer);
        Ok(())
    }

    /// Rebuilds the original token with `/` between syllables, restoring case
    /// and putting punctuation back where it was.
    pub fn recompose(&mut self) {
        let slashed: Vec<char> = self
            .syllabification
            .as_ref()
            .map(|s| s.slashed.chars().collect())
            .unwrap_or_default();
        let mut out = String::with_capacity(self.word.len() + slashed.len());
        let mut k = 0;

        for (i, &c) in self.original.iter().enumerate() {
            if let Some(&p) = self.not_letters.get(&i) {
                out.push(p);
                continue;
            }
            // letters outside the syllabified form only happen on a skipped word
            let letter = slashed.get(k).copied().unwrap_or(c);
            out.push(self.upper.get(&i).copied().unwrap_or(letter));
            k += 1;
            if slashed.get(k) == Some(&'/') {
                out.push('/');
                k += 1;
            }
        }

        self.split = out.split('/').map(str::to_string).collect();
    }

    pub fn syllables(&self) -> Vec<Syllable> {
        let tonic = self.syllabification.as_ref().map_or(0, |s| s.tonic_index);
        let n = self.split.len();
        self.split
            .iter()
            .enumerate()
            .map(|(i, text)| Syllable {
                text: text.clone(),
                is_tonic: i + 1 == tonic,
                is_first: i == 0,
                is_last: i + 1 == n,
                note: None,
            })
            .collect()
    }
}

/// Turns one whitespace-delimited token into syllables.
///
/// A token without letters is not sent to the syllabifier; it comes back as a
/// single unstressed syllable so its characters stay in the score. At the end
/// of a phrase such a token lengthens the unstressed run before the cadence.
pub fn map_word(word: &str, syllabifier: &dyn Syllabifier, deadline: &Deadline) -> Result<Vec<Syllable>> {
    let mut map = WordMap::new(word);
    if let ParsedWord::Letters(_) = map.parse() {
        map.syllabify(syllabifier, deadline)?;
    }
    map.recompose();
    Ok(map.syllables())
}
