use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use gabc_core::{Deadline, Syllabification, Syllabifier, SyllabifyError};
use tracing::{debug, info, warn};

use crate::rules;

pub const LITURGICAL_FILE: &str = "liturgical_syllables.json";
pub const USER_FILE: &str = "user_syllables.json";
pub const NOT_SYLLABIFIED_FILE: &str = "not_syllabified.txt";

/// Where the three persisted stores live.
#[derive(Clone, Debug)]
pub struct StorePaths {
    /// Curated words; never written.
    pub liturgical: PathBuf,
    /// Words learned at runtime.
    pub user: PathBuf,
    /// One word per line that nothing could syllabify.
    pub not_syllabified: PathBuf,
}

impl StorePaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            liturgical: dir.join(LITURGICAL_FILE),
            user: dir.join(USER_FILE),
            not_syllabified: dir.join(NOT_SYLLABIFIED_FILE),
        }
    }
}

#[derive(Debug, Default)]
struct Store {
    liturgical: HashMap<String, Syllabification>,
    user: BTreeMap<String, Syllabification>,
    not_syllabified: Vec<String>,
}

/// Dictionary-backed syllabifier with a rule-based fallback for unknown words.
///
/// Lookups and the insertion of learned words happen under one lock, so the
/// instance can be shared across requests.
#[derive(Debug)]
pub struct DictionarySyllabifier {
    paths: StorePaths,
    fallback: bool,
    store: Mutex<Store>,
}

impl DictionarySyllabifier {
    pub fn new(paths: StorePaths) -> Self {
        Self { paths, fallback: true, store: Mutex::default() }
    }

    /// With the fallback off, only dictionary words are accepted.
    pub fn with_fallback(mut self, on: bool) -> Self {
        self.fallback = on;
        self
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Adds a curated entry in memory; used to seed tests and tools.
    pub fn insert_liturgical(&self, word: &str, syllabification: Syllabification) {
        self.lock().liturgical.insert(word.to_string(), syllabification);
    }

    pub fn learned(&self) -> BTreeMap<String, Syllabification> {
        self.lock().user.clone()
    }

    pub fn not_syllabified(&self) -> Vec<String> {
        self.lock().not_syllabified.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // a panic mid-lookup leaves the maps consistent; keep serving
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Syllabifier for DictionarySyllabifier {
    fn syllabify(&self, word: &str, deadline: &Deadline) -> Result<Syllabification, SyllabifyError> {
        let mut store = self.lock();

        if let Some(s) = store.user.get(word).or_else(|| store.liturgical.get(word)) {
            return Ok(s.clone());
        }

        deadline.check()?;
        let found = if self.fallback {
            rules::syllabify(word)
        } else {
            Err(SyllabifyError::Unknown(word.to_string()))
        };

        match found {
            Ok(s) => {
                debug!(word, slashed = %s.slashed, tonic = s.tonic_index, "learned word");
                store.user.insert(word.to_string(), s.clone());
                Ok(s)
            }
            Err(e) => {
                warn!(word, error = %e, "word could not be syllabified");
                if !store.not_syllabified.iter().any(|w| w == word) {
                    store.not_syllabified.push(word.to_string());
                }
                Err(e)
            }
        }
    }

    fn load(&self) -> Result<(), SyllabifyError> {
        let liturgical: HashMap<String, Syllabification> = read_json(&self.paths.liturgical)?;
        let user: BTreeMap<String, Syllabification> = match read_json(&self.paths.user) {
            Err(SyllabifyError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => BTreeMap::new(),
            other => other?,
        };
        let not_syllabified = match fs::read_to_string(&self.paths.not_syllabified) {
            Ok(s) => s.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(io_err(&self.paths.not_syllabified, source)),
        };

        info!(liturgical = liturgical.len(), user = user.len(), "syllable dictionaries loaded");
        let mut store = self.lock();
        store.liturgical = liturgical;
        store.user = user;
        store.not_syllabified = not_syllabified;
        Ok(())
    }

    fn save(&self) -> Result<(), SyllabifyError> {
        let store = self.lock();
        let data = serde_json::to_string_pretty(&store.user)
            .map_err(|e| SyllabifyError::Parse { path: self.paths.user.display().to_string(), source: e.into() })?;
        fs::write(&self.paths.user, data).map_err(|e| io_err(&self.paths.user, e))?;

        let mut failures = store.not_syllabified.join("\n");
        if !failures.is_empty() {
            failures.push('\n');
        }
        fs::write(&self.paths.not_syllabified, failures).map_err(|e| io_err(&self.paths.not_syllabified, e))?;
        debug!(user = store.user.len(), "user syllables saved");
        Ok(())
    }
}

fn io_err(path: &Path, source: std::io::Error) -> SyllabifyError {
    SyllabifyError::Io { path: path.display().to_string(), source }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SyllabifyError> {
    let data = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&data).map_err(|e| SyllabifyError::Parse { path: path.display().to_string(), source: e.into() })
}
