use thiserror::Error;

use crate::Role;

/// Failures reported by a syllabification backend.
#[derive(Debug, Error)]
pub enum SyllabifyError {
    #[error("no syllabification known for {0:?}")]
    Unknown(String),
    #[error("input word is empty")]
    Empty,
    #[error("syllabification cancelled")]
    Cancelled,
    #[error("syllabification deadline exceeded")]
    TimedOut,
    #[error("accessing {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },
    #[error("parsing {path}: {source}")]
    Parse { path: String, #[source] source: Box<dyn std::error::Error + Send + Sync> },
}

/// Everything that can abort the generation of a preface.
#[derive(Debug, Error)]
pub enum GabcError {
    #[error("no incoming text to be parsed")]
    NoText,
    #[error("each phrase must end with a structure mark (=, *, //, +): {0}")]
    NoMarks(String),
    #[error("each paragraph must have at least three phrases, not counting the conclusion phrase: {0}")]
    ShortParagraph(String),
    #[error("{role} phrase is too short to apply the whole melody: {text}")]
    ShortPhrase { role: Role, text: String },
    #[error("missing closing parenthesis in: {0}")]
    UnbalancedDirective(String),
    #[error("syllabifier answered {slashed:?} with tonic {tonic} for {word:?}: {reason}")]
    BadSyllabification { word: String, slashed: String, tonic: usize, reason: &'static str },
    #[error("syllabifying word {word:?}: {source}")]
    Syllabifier { word: String, #[source] source: SyllabifyError },
    #[error("context deadline exceeded")]
    Timeout,
    #[error("saving learned syllables: {0}")]
    Store(#[source] SyllabifyError),
}

impl GabcError {
    /// Stable code reported to API clients.
    pub fn code(&self) -> u16 {
        match self {
            GabcError::ShortPhrase { .. } => 100,
            GabcError::ShortParagraph(_) => 101,
            GabcError::NoText => 102,
            GabcError::NoMarks(_) => 106,
            GabcError::UnbalancedDirective(_) => 107,
            GabcError::BadSyllabification { .. } => 108,
            GabcError::Syllabifier { .. } => 109,
            GabcError::Store(_) => 110,
            GabcError::Timeout => 201,
        }
    }

    /// True when the text itself has to change for generation to succeed.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GabcError::NoText
                | GabcError::NoMarks(_)
                | GabcError::ShortParagraph(_)
                | GabcError::ShortPhrase { .. }
                | GabcError::UnbalancedDirective(_)
                | GabcError::Syllabifier { source: SyllabifyError::Unknown(_) | SyllabifyError::Empty, .. }
        )
    }
}

/// Code for a JSON body that could not be decoded.
pub const CODE_INVALID_JSON: u16 = 104;
/// Code for a required request field left blank.
pub const CODE_BLANK_FIELD: u16 = 105;
