//! Syllabification backends for the preface composer.

mod dictionary;
mod mock;
pub mod rules;

pub use dictionary::{DictionarySyllabifier, StorePaths, LITURGICAL_FILE, NOT_SYLLABIFIED_FILE, USER_FILE};
pub use mock::MockSyllabifier;
