//! Game settings
//!
//! Tunables with defaults from [`crate::consts`]. Loaded from JSON; missing
//! fields take defaults and malformed input falls back to defaults entirely.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial menu difficulty selection
    pub difficulty: Difficulty,
    /// Pursuer pool capacity, at most `MAX_POOL_CAPACITY`
    pub max_entities: usize,
    /// Player easing fraction per tick, in (0, 1]
    pub easing_factor: f32,
    /// Player collision radius
    pub player_radius: f32,
    /// RNG seed; None picks one at startup
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            max_entities: MAX_ENTITIES,
            easing_factor: EASING_FACTOR,
            player_radius: PLAYER_RADIUS,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Pull out-of-range values back to something playable
    pub fn sanitized(mut self) -> Self {
        if !(self.easing_factor > 0.0 && self.easing_factor <= 1.0) {
            log::warn!(
                "easing_factor {} out of range, using {}",
                self.easing_factor,
                EASING_FACTOR
            );
            self.easing_factor = EASING_FACTOR;
        }
        if self.max_entities > MAX_POOL_CAPACITY {
            log::warn!(
                "max_entities {} too large, using {}",
                self.max_entities,
                MAX_POOL_CAPACITY
            );
            self.max_entities = MAX_POOL_CAPACITY;
        }
        if !(self.player_radius.is_finite() && self.player_radius >= 0.0) {
            self.player_radius = PLAYER_RADIUS;
        }
        self
    }

    /// Read settings from the file named by `TRIANGLE_DODGE_SETTINGS` (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("TRIANGLE_DODGE_SETTINGS") else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{"difficulty": 8}"#);
        assert_eq!(s.difficulty.get(), 8);
        assert_eq!(s.max_entities, MAX_ENTITIES);
        assert_eq!(s.easing_factor, EASING_FACTOR);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_difficulty_clamped_on_load() {
        assert_eq!(Settings::from_json(r#"{"difficulty": 40}"#).difficulty.get(), 10);
        assert_eq!(Settings::from_json(r#"{"difficulty": -2}"#).difficulty.get(), 1);
    }

    #[test]
    fn test_malformed_json_is_default() {
        assert_eq!(Settings::from_json("nope"), Settings::default());
        assert_eq!(
            Settings::from_json(r#"{"max_entities": "many"}"#),
            Settings::default()
        );
    }

    #[test]
    fn test_bad_easing_is_replaced() {
        let s = Settings::from_json(r#"{"easing_factor": 0.0, "player_radius": -1}"#);
        assert_eq!(s.easing_factor, EASING_FACTOR);
        assert_eq!(s.player_radius, PLAYER_RADIUS);
        let s = Settings::from_json(r#"{"easing_factor": 1.0, "seed": 9}"#);
        assert_eq!(s.easing_factor, 1.0);
        assert_eq!(s.seed, Some(9));
    }

    #[test]
    fn test_oversized_pool_is_capped() {
        let s = Settings::from_json(r#"{"max_entities": 4294967297}"#);
        assert_eq!(s.max_entities, MAX_POOL_CAPACITY);
        let s = Settings::from_json(r#"{"max_entities": 250}"#);
        assert_eq!(s.max_entities, 250);
        let s = Settings::from_json(r#"{"max_entities": 0}"#);
        assert_eq!(s.max_entities, 0);
    }

    #[test]
    fn test_serializes_difficulty_as_number() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains(r#""difficulty":3"#));
    }
}
