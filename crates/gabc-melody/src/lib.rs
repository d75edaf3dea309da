//! Preface tone melodies.
//!
//! Every role reads its phrase from the end: the cadence is fixed relative to
//! the last stressed syllable, and whatever is left at the start of the phrase
//! is sung on the reciting tone. A [`Cursor`] walks the syllables backward and
//! reports [`Short`] the moment a required syllable does not exist.

use gabc_core::{GabcError, Note, Phrase, Result, Role, Syllable};
use tracing::trace;

/* =========================
   Cursor
   ========================= */

/// The phrase ran out of syllables before the melody did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Short;

/// Backward walk over an immutable syllable slice, collecting one note per syllable.
#[derive(Debug)]
pub struct Cursor<'a> {
    syllables: &'a [Syllable],
    notes: Vec<Option<Note>>,
    at: Option<usize>,
}

impl<'a> Cursor<'a> {
    /// Starts on the last syllable.
    pub fn new(syllables: &'a [Syllable]) -> std::result::Result<Self, Short> {
        let at = syllables.len().checked_sub(1).ok_or(Short)?;
        Ok(Self { syllables, notes: vec![None; syllables.len()], at: Some(at) })
    }

    pub fn index(&self) -> Option<usize> {
        self.at
    }

    pub fn current(&self) -> std::result::Result<&'a Syllable, Short> {
        self.at.map(|i| &self.syllables[i]).ok_or(Short)
    }

    /// Syllable `n` positions before the cursor.
    pub fn behind(&self, n: usize) -> Option<&'a Syllable> {
        self.at.and_then(|i| i.checked_sub(n)).map(|i| &self.syllables[i])
    }

    /// Notes the current syllable and steps back; running past the start is allowed.
    pub fn put(&mut self, note: Note) -> std::result::Result<(), Short> {
        let i = self.at.ok_or(Short)?;
        self.notes[i] = Some(note);
        self.at = i.checked_sub(1);
        Ok(())
    }

    /// Like [`Cursor::put`], but another syllable must follow.
    pub fn step(&mut self, note: Note) -> std::result::Result<(), Short> {
        self.put(note)?;
        self.at.map(|_| ()).ok_or(Short)
    }

    /// Unstressed syllables after the last tonic.
    pub fn trailing_unstressed(&mut self, note: Note) -> std::result::Result<(), Short> {
        while !self.current()?.is_tonic {
            self.step(note)?;
        }
        Ok(())
    }

    /// Reciting tone down to, not including, the first syllable.
    pub fn recite_to_first(&mut self, note: Note) {
        while let Some(i) = self.at.filter(|&i| i > 0) {
            self.notes[i] = Some(note);
            self.at = Some(i - 1);
        }
    }

    /// Reciting tone on everything left, first syllable included.
    pub fn recite_rest(&mut self, note: Note) {
        while self.put(note).is_ok() {}
    }

    pub fn finish(self) -> Vec<Option<Note>> {
        self.notes
    }
}

/* =========================
   Role melodies
   ========================= */

/// Intonation, reciting tone on Do and the short cadence.
fn firsts(c: &mut Cursor) -> std::result::Result<(), Short> {
    c.trailing_unstressed(Note::Si)?;
    c.step(Note::LaSi)?;
    c.step(Note::SiLa)?;

    if c.current()?.is_tonic {
        c.step(Note::Do)?;
    } else if c.behind(1).is_some_and(|before| before.is_tonic && !before.is_last) {
        // a paroxytone right before the cadence keeps the lower note
        c.step(Note::Si)?;
    }

    c.recite_to_first(Note::Do);
    c.put(Note::La)
}

/// Reciting tone on Si and the final cadence.
fn last(c: &mut Cursor) -> std::result::Result<(), Short> {
    c.trailing_unstressed(Note::La)?;
    let tonic = if c.current()?.is_last { Note::LaSiLa } else { Note::LaSi };
    c.step(tonic)?;
    c.step(Note::Si)?;
    c.step(Note::SolLa)?;
    c.step(Note::LaSol)?;

    c.recite_to_first(Note::Si);
    c.put(Note::Si)
}

// Latin prefaces show no strict rule for where the mediant notes fall; this
// placement follows current Brazilian practice.
fn mediant(c: &mut Cursor) -> std::result::Result<(), Short> {
    c.trailing_unstressed(Note::Si)?;

    if c.index().is_some_and(|i| i >= 3) {
        c.put(Note::Do)?;
        c.put(Note::Si)?;
        c.put(Note::La)?;
    } else {
        c.put(Note::LaSiDo)?;
    }

    c.recite_rest(Note::Si);
    Ok(())
}

fn conclusion(c: &mut Cursor) -> std::result::Result<(), Short> {
    c.trailing_unstressed(Note::La)?;
    c.step(Note::SolLa)?;
    c.recite_rest(Note::La);
    Ok(())
}

/// Notes for every syllable of a phrase sung in `role`, without touching the phrase.
pub fn melody_notes(role: Role, syllables: &[Syllable]) -> std::result::Result<Vec<Option<Note>>, Short> {
    let mut c = Cursor::new(syllables)?;
    match role {
        Role::Firsts => firsts(&mut c)?,
        Role::Mediant => mediant(&mut c)?,
        Role::Last => last(&mut c)?,
        Role::Conclusion => conclusion(&mut c)?,
        // the dialogue comes already notated
        Role::Dialogue => return Ok(syllables.iter().map(|s| s.note).collect()),
    }
    Ok(c.finish())
}

/// Stamps the melody of `role` onto the phrase's syllables.
pub fn apply_melody(role: Role, phrase: &mut Phrase) -> Result<()> {
    let notes = melody_notes(role, &phrase.syllables)
        .map_err(|Short| GabcError::ShortPhrase { role, text: phrase.text.clone() })?;
    for (s, n) in phrase.syllables.iter_mut().zip(notes) {
        s.note = n;
    }
    trace!(%role, phrase = %phrase.text, "melody applied");
    Ok(())
}
