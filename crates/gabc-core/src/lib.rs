//! Shared model of the preface composer: syllables, phrases, paragraphs,
//! phrase roles, staff notes and the error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

mod error;
pub mod staff;
mod syllabifier;

pub use error::{GabcError, SyllabifyError, CODE_BLANK_FIELD, CODE_INVALID_JSON};
pub use staff::Note;
pub use syllabifier::{Deadline, Syllabification, Syllabifier};

pub type Result<T, E = GabcError> = std::result::Result<T, E>;

/// One sung syllable, with the original casing and attached punctuation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllable {
    pub text: String,
    pub is_tonic: bool,
    /// First syllable of its word.
    pub is_first: bool,
    /// Last syllable of its word. Both flags set means a one-syllable word.
    pub is_last: bool,
    pub note: Option<Note>,
}

impl Syllable {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    /// `text(code)`, or the bare text while no note is assigned.
    pub fn gabc(&self) -> String {
        match self.note {
            Some(n) => format!("{}({})", self.text, n.code()),
            None => self.text.clone(),
        }
    }
}

/// Unsung text lifted out of a phrase, with the phrase text that preceded it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub text: String,
    /// Non-whitespace characters of the phrase before the directive, concatenated.
    pub before: String,
}

/// One input line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub text: String,
    pub syllables: Vec<Syllable>,
    pub directives: Vec<Directive>,
}

impl Phrase {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }
}

/// Consecutive non-blank lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub phrases: Vec<Phrase>,
}

impl Paragraph {
    pub fn text(&self) -> String {
        self.phrases.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join(" / ")
    }
}

/// Liturgical function of a phrase inside the preface melody.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Opening call and response; always the same text.
    Dialogue,
    /// Intonation, reciting tone, short cadence.
    Firsts,
    /// Reciting tone, mediant cadence.
    Mediant,
    /// Reciting tone, final cadence.
    Last,
    /// Opening of the closing paragraph, usually "Por isso".
    Conclusion,
}

impl Role {
    /// Bar closing a phrase of this role.
    pub fn bar(self) -> &'static str {
        match self {
            Role::Firsts => staff::HALF_BAR,
            Role::Mediant | Role::Conclusion => staff::QUARTER_BAR,
            Role::Last => staff::WHOLE_BAR,
            Role::Dialogue => staff::DOUBLE_BAR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Dialogue => "dialogue",
            Role::Firsts => "firsts",
            Role::Mediant => "mediant",
            Role::Last => "last",
            Role::Conclusion => "conclusion",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A phrase tagged with the role that decides its melody.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedPhrase {
    pub role: Role,
    pub phrase: Phrase,
    /// Closes its paragraph; a paragraph break follows in the score.
    pub ends_paragraph: bool,
}

impl TypedPhrase {
    pub fn new(role: Role, phrase: Phrase) -> Self {
        Self { role, ends_paragraph: role == Role::Last, phrase }
    }
}
