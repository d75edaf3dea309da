use gabc_core::{GabcError, Paragraph, Phrase, Result, Role, TypedPhrase};
use tracing::debug;

/// Opening words that turn the first phrase of the last paragraph into a conclusion.
pub const CONCLUSION_CUE: &str = "Por isso";

/// Types phrases by their position in the paragraph: the last phrase closes
/// with the final cadence, the one before it takes the mediant, and all
/// earlier ones the short cadence.
pub fn type_phrases(paragraphs: &[Paragraph]) -> Result<Vec<TypedPhrase>> {
    let mut typed = Vec::new();

    for (n, paragraph) in paragraphs.iter().enumerate() {
        let mut phrases: &[Phrase] = &paragraph.phrases;

        if n + 1 == paragraphs.len() {
            if let Some((first, rest)) = phrases.split_first() {
                if first.text.starts_with(CONCLUSION_CUE) {
                    typed.push(TypedPhrase::new(Role::Conclusion, first.clone()));
                    phrases = rest;
                }
            }
        }

        // the conclusion phrase does not count
        if phrases.len() < 3 {
            return Err(GabcError::ShortParagraph(paragraph.text()));
        }

        let count = phrases.len();
        for (i, phrase) in phrases.iter().enumerate() {
            let role = match count - 1 - i {
                0 => Role::Last,
                1 => Role::Mediant,
                _ => Role::Firsts,
            };
            typed.push(TypedPhrase::new(role, phrase.clone()));
        }
        debug!(paragraph = n, phrases = count, "paragraph typed");
    }
    Ok(typed)
}

/// Structure marks a phrase may end with when the roles are chosen by hand.
const MARKS: [(&str, Role); 4] = [("//", Role::Last), ("=", Role::Firsts), ("*", Role::Mediant), ("+", Role::Conclusion)];

/// Reads the role from the trailing structure mark and strips it from the text.
pub fn classify_marked(line: &str) -> Result<(Role, String)> {
    let line = line.trim_end();
    MARKS
        .iter()
        .find_map(|(mark, role)| line.strip_suffix(mark).map(|text| (*role, text.trim_end().to_string())))
        .ok_or_else(|| GabcError::NoMarks(line.to_string()))
}

/// Types every phrase by its own mark; paragraph positions play no part.
pub fn type_marked(paragraphs: &[Paragraph]) -> Result<Vec<TypedPhrase>> {
    let mut typed = Vec::new();
    for phrase in paragraphs.iter().flat_map(|p| p.phrases.iter()) {
        let (role, text) = classify_marked(&phrase.text)?;
        typed.push(TypedPhrase::new(role, Phrase { text, ..phrase.clone() }));
    }
    Ok(typed)
}
