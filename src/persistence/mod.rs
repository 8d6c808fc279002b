//! High score persistence
//!
//! Backends:
//! - `MemoryStore`: in-process, counts saves (tests, headless runs)
//! - `FileStore`: JSON file on disk (native)
//! - `platform::web::LocalStorageStore`: browser LocalStorage (wasm32)
//!
//! Loading never fails: absent or malformed data is an empty table.

mod file;

pub use file::FileStore;

use crate::highscores::HighScores;

/// Storage backend errors. These never reach the player; the
/// `HighScoreStore` surface logs them and falls back to defaults.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable")]
    Unavailable,
}

/// Key-value store for the high score table
pub trait HighScoreStore {
    /// Load the table; absent or malformed data yields an empty one
    fn load(&mut self) -> HighScores;

    /// Persist the whole table
    fn save(&mut self, scores: &HighScores);
}

/// In-memory store holding the last saved JSON
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored data, as if written by an earlier session
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            saves: 0,
        }
    }

    /// Number of `save` calls that reached the store
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn raw(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> HighScores {
        self.json
            .as_deref()
            .map(HighScores::from_json)
            .unwrap_or_default()
    }

    fn save(&mut self, scores: &HighScores) {
        match scores.to_json() {
            Ok(json) => {
                self.json = Some(json);
                self.saves += 1;
            }
            Err(e) => log::warn!("Failed to encode high scores: {}", e),
        }
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&mut self) -> HighScores {
        (**self).load()
    }

    fn save(&mut self, scores: &HighScores) {
        (**self).save(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().is_empty());

        let mut scores = HighScores::new();
        scores.record(Difficulty::clamped(5), 17);
        store.save(&scores);

        assert_eq!(store.save_count(), 1);
        assert_eq!(store.raw(), Some(r#"{"5":17}"#));
        assert_eq!(store.load(), scores);
    }

    #[test]
    fn test_memory_store_malformed_data() {
        let mut store = MemoryStore::with_json("{{{");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn HighScoreStore> = Box::new(MemoryStore::with_json(r#"{"2":8}"#));
        assert_eq!(store.load().best(Difficulty::clamped(2)), 8);
    }
}
