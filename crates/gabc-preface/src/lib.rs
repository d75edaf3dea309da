//! Preface of the Mass in GABC: classifies each line of the text, applies the
//! preface tone and writes the score after the opening dialogue.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use gabc_core::{Deadline, GabcError, Paragraph, Result, Syllabifier, TypedPhrase};
use gabc_melody::apply_melody;
use gabc_text::{build_phrase_syllables, distribute_text, extract_directives, prepare_paragraphs};

mod classify;
mod compose;
mod dialogue;

pub use classify::{classify_marked, type_marked, type_phrases, CONCLUSION_CUE};
pub use compose::{close_piece, compose_body, compose_preface, join_syllables, render_phrase};
pub use dialogue::DialogueMode;

/// How phrase roles are decided.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// By position inside each paragraph.
    #[default]
    Positional,
    /// By a structure mark at the end of each line (`=`, `*`, `//`, `+`).
    Marked,
}

#[derive(Clone, Debug, Default)]
pub struct GenerateOptions {
    pub dialogue: DialogueMode,
    pub layout: Layout,
}

/// A composed preface and the pieces it was built from.
#[derive(Clone, Debug)]
pub struct Preface {
    pub text: String,
    pub paragraphs: Vec<Paragraph>,
    pub phrases: Vec<TypedPhrase>,
    pub gabc: String,
}

/// Composes prefaces with one shared syllabifier.
#[derive(Clone)]
pub struct Generator {
    syllabifier: Arc<dyn Syllabifier>,
}

impl Generator {
    pub fn new(syllabifier: Arc<dyn Syllabifier>) -> Self {
        Self { syllabifier }
    }

    pub fn syllabifier(&self) -> &dyn Syllabifier {
        self.syllabifier.as_ref()
    }

    /// Positional layout, no deadline.
    pub fn generate(&self, dialogue: &str, lined_text: &str) -> Result<String> {
        let opts = GenerateOptions { dialogue: DialogueMode::from_name(dialogue), layout: Layout::Positional };
        Ok(self.compose(&opts, lined_text, &Deadline::none())?.gabc)
    }

    /// Runs the whole pipeline. Nothing is composed unless every phrase
    /// could be syllabified and sung.
    pub fn compose(&self, opts: &GenerateOptions, lined_text: &str, deadline: &Deadline) -> Result<Preface> {
        let syllabifier = self.syllabifier();
        let mut paragraphs = distribute_text(lined_text)?;

        let mut phrases = match opts.layout {
            Layout::Positional => {
                prepare_paragraphs(&mut paragraphs, syllabifier, deadline)?;
                save(syllabifier)?;
                type_phrases(&paragraphs)?
            }
            Layout::Marked => {
                let mut typed = type_marked(&paragraphs)?;
                for t in &mut typed {
                    extract_directives(&mut t.phrase)?;
                    build_phrase_syllables(&mut t.phrase, syllabifier, deadline)?;
                }
                save(syllabifier)?;
                typed
            }
        };

        for typed in &mut phrases {
            apply_melody(typed.role, &mut typed.phrase)?;
            debug!(role = %typed.role, phrase = %typed.phrase.text, "phrase sung");
        }

        let gabc = compose_preface(opts.dialogue, &phrases);
        info!(
            paragraphs = paragraphs.len(),
            phrases = phrases.len(),
            dialogue = opts.dialogue.name(),
            "preface composed"
        );
        Ok(Preface { text: lined_text.to_string(), paragraphs, phrases, gabc })
    }
}

fn save(syllabifier: &dyn Syllabifier) -> Result<()> {
    syllabifier.save().map_err(|e| {
        warn!(error = %e, "saving learned syllables failed");
        GabcError::Store(e)
    })
}

/// Composes a preface: `dialogue_mode` is `"regional"` or anything else for solemn.
pub fn generate(dialogue_mode: &str, lined_text: &str, syllabifier: Arc<dyn Syllabifier>) -> Result<String> {
    Generator::new(syllabifier).generate(dialogue_mode, lined_text)
}

/* =========================
   Wire types
   ========================= */

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct PrefaceRequest {
    #[serde(default)]
    pub dialogue: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub layout: Layout,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PrefaceResponse {
    pub gabc: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error_code: u16,
    pub error_message: String,
}

impl From<&GabcError> for ErrorResponse {
    fn from(e: &GabcError) -> Self {
        Self { error_code: e.code(), error_message: e.to_string() }
    }
}

/// Entry point shared by the CLI and the HTTP service.
pub fn handle_preface(generator: &Generator, req: &PrefaceRequest, deadline: &Deadline) -> Result<PrefaceResponse> {
    let opts = GenerateOptions { dialogue: DialogueMode::from_name(&req.dialogue), layout: req.layout };
    let preface = generator.compose(&opts, &req.text, deadline)?;
    Ok(PrefaceResponse { gabc: preface.gabc })
}
