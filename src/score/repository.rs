//! Score record storage
//!
//! Backends:
//! - JSON file (native)
//! - In-memory JSON string (tests, hosts without storage)
//! - Browser LocalStorage (wasm32)

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::container::ScoreContainer;
use crate::error::PersistenceError;

/// Where the score record lives between sessions
pub trait ScoreRepository {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<ScoreContainer>, PersistenceError>;

    fn save(&mut self, scores: &ScoreContainer) -> Result<(), PersistenceError>;
}

/// Score record stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileScoreRepository {
    path: PathBuf,
}

impl JsonFileScoreRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreRepository for JsonFileScoreRepository {
    fn load(&self) -> Result<Option<ScoreContainer>, PersistenceError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let scores = serde_json::from_str(&json)?;
        log::info!("Loaded scores from {}", self.path.display());
        Ok(Some(scores))
    }

    fn save(&mut self, scores: &ScoreContainer) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(scores)?;
        std::fs::write(&self.path, json)?;
        log::info!("Scores saved to {}", self.path.display());
        Ok(())
    }
}

/// Score record kept as a JSON string in memory.
///
/// Clones share the same slot, so a test can keep a handle after passing
/// one to a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreRepository {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with raw stored text (may be deliberately invalid)
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(json.into()))),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ScoreRepository for MemoryScoreRepository {
    fn load(&self) -> Result<Option<ScoreContainer>, PersistenceError> {
        match self.slot.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, scores: &ScoreContainer) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(scores)?;
        *self.slot.borrow_mut() = Some(json);
        Ok(())
    }
}

/// Score record in browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageScoreRepository;

#[cfg(target_arch = "wasm32")]
impl LocalStorageScoreRepository {
    const STORAGE_KEY: &'static str = "merge_drop_scores";

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Storage("LocalStorage unavailable".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreRepository for LocalStorageScoreRepository {
    fn load(&self) -> Result<Option<ScoreContainer>, PersistenceError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(Some(serde_json::from_str(&json)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(PersistenceError::Storage(format!("{:?}", e))),
        }
    }

    fn save(&mut self, scores: &ScoreContainer) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(scores)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| PersistenceError::Storage(format!("{:?}", e)))?;
        log::info!("Scores saved to LocalStorage");
        Ok(())
    }
}
