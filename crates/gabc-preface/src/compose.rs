use gabc_core::staff::{spoken_span, DOUBLE_BAR, PARAGRAPH_BREAK, QUARTER_BAR, VERSICLE, WHOLE_BAR};
use gabc_core::{Directive, Syllable, TypedPhrase};
use tracing::debug;

use crate::DialogueMode;

/// Joins notated syllables into one phrase, a space after each word, and
/// closes it with `end`.
///
/// Directives go back after the syllable where the letters sung so far end
/// with the text that preceded them; the last syllable is skipped so nothing
/// lands between it and the bar. Unplaced directives are appended at the end.
pub fn join_syllables(syllables: &[Syllable], directives: &[Directive], end: &str) -> String {
    let mut out = String::new();
    let mut sung = String::new();
    let mut pending = directives.iter().peekable();

    for (i, s) in syllables.iter().enumerate() {
        out.push_str(&s.gabc());
        if s.is_last {
            out.push(' ');
        }
        if i + 1 == syllables.len() {
            break;
        }
        sung.push_str(&s.text);
        if let Some(d) = pending.next_if(|d| sung.ends_with(&d.before)) {
            out.push_str(&spoken_span(&d.text));
            out.push_str(QUARTER_BAR);
            out.push(' ');
        }
    }

    for d in pending {
        debug!(directive = %d.text, "directive placed at the end of the phrase");
        out.push_str(&spoken_span(&d.text));
    }
    out.push_str(end);
    out
}

/// One phrase with its role's bar.
pub fn render_phrase(typed: &TypedPhrase) -> String {
    join_syllables(&typed.phrase.syllables, &typed.phrase.directives, typed.role.bar())
}

/// Phrases one per line; a paragraph closes with a line break in the score
/// and a blank line. The piece ends on a double bar.
pub fn compose_body(phrases: &[TypedPhrase]) -> String {
    let mut body = String::new();
    for typed in phrases {
        body.push_str(&render_phrase(typed));
        if typed.ends_paragraph {
            body.push_str(PARAGRAPH_BREAK);
            body.push_str("\n\n");
        } else {
            body.push('\n');
        }
    }
    close_piece(body)
}

/// Turns the trailing whole bar and paragraph break into the final double bar.
pub fn close_piece(body: String) -> String {
    let paragraph_end = format!("{WHOLE_BAR}{PARAGRAPH_BREAK}\n\n");
    match body.strip_suffix(&paragraph_end) {
        Some(rest) => format!("{rest}{DOUBLE_BAR}"),
        None => body.trim_end_matches('\n').to_string(),
    }
}

/// Dialogue, blank line, then the body sung by the celebrant.
pub fn compose_preface(mode: DialogueMode, phrases: &[TypedPhrase]) -> String {
    format!("{}\n\n{VERSICLE} {}", mode.gabc(), compose_body(phrases))
}
