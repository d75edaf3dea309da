use serde::{Deserialize, Serialize};

/// Notes of the preface tone on a C clef, 3rd line. The reciting tone sits on Do (`h`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Note {
    Do,
    Si,
    La,
    Sol,
    LaSi,
    LaSiLa,
    SiLa,
    LaSol,
    SolLa,
    LaSiDo,
}

impl Note {
    /// GABC pitch letters, without the surrounding parentheses.
    pub fn code(self) -> &'static str {
        match self {
            Note::Do => "h",
            Note::Si => "g",
            Note::La => "f",
            Note::Sol => "e",
            Note::LaSi => "fg",
            Note::LaSiLa => "fgf",
            Note::SiLa => "gf",
            Note::LaSol => "fe",
            Note::SolLa => "ef",
            Note::LaSiDo => "fgh",
        }
    }
}

/* =========================
   Bars and inline markup
   ========================= */

pub const HALF_BAR: &str = "(;)";
pub const QUARTER_BAR: &str = "(,)";
pub const WHOLE_BAR: &str = "(:)";
pub const DOUBLE_BAR: &str = "(::)";
/// Line break in the score; closes a paragraph after a whole bar.
pub const PARAGRAPH_BREAK: &str = "(Z)";
/// Versicle sign placed before a part sung by the celebrant.
pub const VERSICLE: &str = "<c><sp>V/</sp></c>";

/// Non-sung text rendered in italics and in the score's colour.
pub fn spoken_span(text: &str) -> String {
    format!("||<i><c>{text}</c></i>||")
}
