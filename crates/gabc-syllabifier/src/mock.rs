use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use gabc_core::{Deadline, Syllabification, Syllabifier, SyllabifyError};

/// Fixed word list for tests; anything else is `Unknown`.
#[derive(Debug, Default)]
pub struct MockSyllabifier {
    words: HashMap<String, Syllabification>,
    saves: AtomicUsize,
}

impl MockSyllabifier {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, usize)>) -> Self {
        let words = entries
            .into_iter()
            .map(|(w, s, t)| (w.to_string(), Syllabification::new(s, t)))
            .collect();
        Self { words, saves: AtomicUsize::new(0) }
    }

    /// "Na verdade, é digno e justo" and a few other preface words.
    pub fn with_defaults() -> Self {
        Self::new([
            ("na", "na", 1),
            ("verdade", "ver/da/de", 2),
            ("é", "é", 1),
            ("digno", "dig/no", 1),
            ("e", "e", 1),
            ("justo", "jus/to", 1),
            ("por", "por", 1),
            ("isso", "is/so", 1),
            ("cristo", "cris/to", 1),
            ("senhor", "se/nhor", 2),
            ("nosso", "nos/so", 1),
        ])
    }

    /// Adds or replaces one entry.
    pub fn with(mut self, word: &str, slashed: &str, tonic_index: usize) -> Self {
        self.words.insert(word.to_string(), Syllabification::new(slashed, tonic_index));
        self
    }

    /// How many times `save` was called.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Syllabifier for MockSyllabifier {
    fn syllabify(&self, word: &str, deadline: &Deadline) -> Result<Syllabification, SyllabifyError> {
        deadline.check()?;
        self.words.get(word).cloned().ok_or_else(|| SyllabifyError::Unknown(word.to_string()))
    }

    fn save(&self) -> Result<(), SyllabifyError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
