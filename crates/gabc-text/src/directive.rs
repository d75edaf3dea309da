use gabc_core::{Directive, GabcError, Phrase, Result};

/// Lifts every `(...)` stage direction out of the phrase text, left to right.
///
/// Each directive remembers the non-whitespace text that preceded it, so the
/// composer can put it back after the melody is applied.
pub fn extract_directives(phrase: &mut Phrase) -> Result<()> {
    while let Some(open) = phrase.text.find('(') {
        let after = &phrase.text[open + 1..];
        let close = after
            .find(')')
            .ok_or_else(|| GabcError::UnbalancedDirective(phrase.text.clone()))?;

        let left = &phrase.text[..open];
        let right = &after[close + 1..];
        let directive = Directive {
            text: after[..close].to_string(),
            before: left.split_whitespace().collect(),
        };

        let rest = [left.trim(), right.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        phrase.directives.push(directive);
        phrase.text = rest;
    }
    Ok(())
}
