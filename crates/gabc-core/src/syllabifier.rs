use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::SyllabifyError;

/// A word split into syllables: `ver/da/de` with the stressed syllable counted from 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllabification {
    pub slashed: String,
    pub tonic_index: usize,
}

impl Syllabification {
    pub fn new(slashed: impl Into<String>, tonic_index: usize) -> Self {
        Self { slashed: slashed.into(), tonic_index }
    }

    pub fn syllable_count(&self) -> usize {
        self.slashed.split('/').count()
    }
}

/// Source of syllable boundaries and lexical stress.
///
/// Implementations hold their own learned-word cache behind a lock, so one
/// instance can be shared by concurrent generation requests.
pub trait Syllabifier: Send + Sync {
    /// `word` is lowercase and letters only.
    fn syllabify(&self, word: &str, deadline: &Deadline) -> Result<Syllabification, SyllabifyError>;

    /// Reads any persisted dictionaries. Called once before first use.
    fn load(&self) -> Result<(), SyllabifyError> {
        Ok(())
    }

    /// Persists words learned since the last save. Called once per request.
    fn save(&self) -> Result<(), SyllabifyError> {
        Ok(())
    }
}

impl<S: Syllabifier + ?Sized> Syllabifier for Arc<S> {
    fn syllabify(&self, word: &str, deadline: &Deadline) -> Result<Syllabification, SyllabifyError> {
        (**self).syllabify(word, deadline)
    }
    fn load(&self) -> Result<(), SyllabifyError> {
        (**self).load()
    }
    fn save(&self) -> Result<(), SyllabifyError> {
        (**self).save()
    }
}

/// Caller-supplied time limit and cancellation flag for one generation request.
#[derive(Clone, Debug, Default)]
pub struct Deadline {
    at: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl Deadline {
    /// Never expires unless cancelled.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn after(timeout: Duration) -> Self {
        Self { at: Some(Instant::now() + timeout), cancelled: Arc::default() }
    }

    /// Cancels every clone of this deadline.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn check(&self) -> Result<(), SyllabifyError> {
        if self.cancelled.load(Ordering::SeqCst) {
            return Err(SyllabifyError::Cancelled);
        }
        match self.at {
            Some(at) if Instant::now() >= at => Err(SyllabifyError::TimedOut),
            _ => Ok(()),
        }
    }
}
