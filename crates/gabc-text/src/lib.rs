//! Text side of the composer: splitting the input into paragraphs and
//! phrases, lifting stage directions out, and mapping words to syllables.

use gabc_core::{Deadline, Paragraph, Phrase, Result, Syllabifier};
use tracing::debug;

mod directive;
mod segment;
mod word;

pub use directive::extract_directives;
pub use segment::distribute_text;
pub use word::{map_word, ParsedWord, WordMap};

/// Fills `phrase.syllables` from its (directive-free) text, word by word.
pub fn build_phrase_syllables(phrase: &mut Phrase, syllabifier: &dyn Syllabifier, deadline: &Deadline) -> Result<()> {
    let mut syllables = Vec::new();
    for word in phrase.text.split_whitespace() {
        syllables.extend(map_word(word, syllabifier, deadline)?);
    }
    debug!(phrase = %phrase.text, syllables = syllables.len(), "built phrase syllables");
    phrase.syllables = syllables;
    Ok(())
}

/// Extracts directives and builds syllables for every phrase of every paragraph.
pub fn prepare_paragraphs(paragraphs: &mut [Paragraph], syllabifier: &dyn Syllabifier, deadline: &Deadline) -> Result<()> {
    for phrase in paragraphs.iter_mut().flat_map(|p| p.phrases.iter_mut()) {
        extract_directives(phrase)?;
        build_phrase_syllables(phrase, syllabifier, deadline)?;
    }
    Ok(())
}
