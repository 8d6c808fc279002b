//! JSON file backend

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HighScoreStore, StoreError};
use crate::highscores::HighScores;

/// High scores stored as a JSON file. Writes go to a temporary sibling and
/// are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents, None if the file does not exist
    pub fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write(&self, scores: &HighScores) -> Result<(), StoreError> {
        let json = scores.to_json()?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> HighScores {
        match self.read() {
            Ok(Some(json)) => {
                let scores = HighScores::from_json(&json);
                log::info!("Loaded high scores from {}", self.path.display());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                HighScores::new()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                HighScores::new()
            }
        }
    }

    fn save(&mut self, scores: &HighScores) {
        match self.write(scores) {
            Ok(()) => log::info!("High scores saved to {}", self.path.display()),
            Err(e) => log::warn!("Could not save high scores: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "triangle-dodge-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let mut store = FileStore::new(temp_path("missing"));
        assert!(store.read().unwrap().is_none());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = FileStore::new(&path);
        let mut scores = HighScores::new();
        scores.record(Difficulty::clamped(3), 42);
        store.save(&scores);

        let mut reopened = FileStore::new(&path);
        assert_eq!(reopened.load(), scores);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{\"3\": ").unwrap();
        let mut store = FileStore::new(&path);
        assert!(store.load().is_empty());
        let _ = fs::remove_file(&path);
    }
}
