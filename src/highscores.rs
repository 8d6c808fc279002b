//! Best score per difficulty
//!
//! Serialized as a JSON object keyed by difficulty, e.g. `{"3":42}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::sim::Difficulty;

/// High score table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    entries: BTreeMap<u8, u64>,
}

impl HighScores {
    /// Storage key used by browser builds
    pub const STORAGE_KEY: &'static str = "triangleDodgerHighScores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Best recorded score, 0 when none exists
    pub fn best(&self, difficulty: Difficulty) -> u64 {
        self.entries.get(&difficulty.get()).copied().unwrap_or(0)
    }

    /// Whether a score beats the stored entry (a missing entry counts as 0)
    pub fn qualifies(&self, difficulty: Difficulty, score: u64) -> bool {
        score > self.best(difficulty)
    }

    /// Record a finished round. Returns true if the table changed.
    pub fn record(&mut self, difficulty: Difficulty, score: u64) -> bool {
        if !self.qualifies(difficulty, score) {
            return false;
        }
        self.entries.insert(difficulty.get(), score);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, u64)> + '_ {
        self.entries
            .iter()
            .map(|(&d, &s)| (Difficulty::clamped(d as i64), s))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse stored data. Anything malformed yields an empty table; entries
    /// for out-of-range difficulties are dropped.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(mut scores) => {
                scores
                    .entries
                    .retain(|d, _| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(d));
                scores
            }
            Err(e) => {
                log::warn!("Discarding malformed high scores: {}", e);
                Self::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(n: i64) -> Difficulty {
        Difficulty::clamped(n)
    }

    #[test]
    fn test_record_only_improves() {
        let mut scores = HighScores::new();
        assert_eq!(scores.best(d(3)), 0);
        assert!(scores.record(d(3), 30));
        assert!(!scores.record(d(3), 30));
        assert!(!scores.record(d(3), 12));
        assert_eq!(scores.best(d(3)), 30);
        assert!(scores.record(d(3), 42));
        assert_eq!(scores.best(d(3)), 42);
        assert_eq!(scores.best(d(4)), 0);
    }

    #[test]
    fn test_zero_score_creates_no_entry() {
        let mut scores = HighScores::new();
        assert!(!scores.record(d(1), 0));
        assert!(scores.is_empty());
        assert!(scores.record(d(1), 1));
        assert!(!scores.is_empty());
    }

    #[test]
    fn test_json_format() {
        let mut scores = HighScores::new();
        scores.record(d(3), 42);
        scores.record(d(10), 7);
        let json = scores.to_json().unwrap();
        assert_eq!(json, r#"{"3":42,"10":7}"#);
        assert_eq!(HighScores::from_json(&json), scores);
    }

    #[test]
    fn test_malformed_json_is_empty() {
        assert!(HighScores::from_json("").is_empty());
        assert!(HighScores::from_json("not json").is_empty());
        assert!(HighScores::from_json("[1,2,3]").is_empty());
        assert!(HighScores::from_json(r#"{"3":"lots"}"#).is_empty());
        assert!(HighScores::from_json("null").is_empty());
    }

    #[test]
    fn test_out_of_range_keys_dropped() {
        let scores = HighScores::from_json(r#"{"0":5,"3":9,"11":100}"#);
        assert_eq!(scores.iter().count(), 1);
        assert_eq!(scores.best(d(3)), 9);
    }

    proptest! {
        #[test]
        fn prop_best_never_decreases(
            rounds in proptest::collection::vec((1i64..=10, 0u64..500), 0..64),
        ) {
            let mut scores = HighScores::new();
            for (difficulty, score) in rounds {
                let before = scores.best(d(difficulty));
                scores.record(d(difficulty), score);
                let after = scores.best(d(difficulty));
                prop_assert!(after >= before);
                prop_assert!(after >= score);
            }
        }
    }
}
