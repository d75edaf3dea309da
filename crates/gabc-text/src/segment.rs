use gabc_core::{GabcError, Paragraph, Phrase, Result};

/// Splits lined text into paragraphs of phrases. Each non-blank line is a
/// phrase; blank lines (any number of them) close the current paragraph.
pub fn distribute_text(lined_text: &str) -> Result<Vec<Paragraph>> {
    if lined_text.trim().is_empty() {
        return Err(GabcError::NoText);
    }

    let mut paragraphs = Vec::new();
    let mut current: Vec<Phrase> = Vec::new();

    for line in lined_text.lines() {
        let text = line.trim();
        if !text.is_empty() {
            current.push(Phrase::new(text));
        } else if !current.is_empty() {
            paragraphs.push(Paragraph { phrases: std::mem::take(&mut current) });
        }
    }
    if !current.is_empty() {
        paragraphs.push(Paragraph { phrases: current });
    }

    if paragraphs.is_empty() {
        return Err(GabcError::NoText);
    }
    Ok(paragraphs)
}
