//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web. Natively, read from the JSON file
//! named by `HARD_MAZE_SETTINGS`. `HARD_MAZE_SEED` overrides the seed for one
//! run and is never written back.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_RESHUFFLE_DIVISOR;
use crate::difficulty::Difficulty;
use crate::error::SettingsError;
use crate::sim::GeneratorConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last selected difficulty
    pub difficulty: Difficulty,
    /// Carver reshuffle divisor (countdown bound = dimension / divisor)
    pub reshuffle_divisor: usize,
    /// Fixed session seed, random when unset
    pub seed: Option<u64>,
    /// Shade cells the player has already visited
    pub show_trail: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            reshuffle_divisor: DEFAULT_RESHUFFLE_DIVISOR,
            seed: None,
            show_trail: true,
        }
    }
}

impl Settings {
    /// Carver configuration derived from these settings
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            reshuffle_divisor: self.reshuffle_divisor,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.reshuffle_divisor == 0 {
            return Err(SettingsError::Invalid(
                "reshuffle_divisor must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse, falling back to defaults (with a warning) on any problem
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Copy used to start a single run, with `seed` replaced when an override is given.
    /// The original stays untouched so saving it does not persist the override.
    pub fn for_run(&self, seed_override: Option<u64>) -> Self {
        Self {
            seed: seed_override.or(self.seed),
            ..self.clone()
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hard_maze_settings";

    /// Settings file path (native)
    #[allow(dead_code)]
    const PATH_ENV: &'static str = "HARD_MAZE_SETTINGS";

    /// Seed override (native)
    #[allow(dead_code)]
    const SEED_ENV: &'static str = "HARD_MAZE_SEED";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `HARD_MAZE_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::PATH_ENV) {
            Ok(path) => Self::load_from(std::path::Path::new(&path)),
            Err(_) => Self::default(),
        }
    }

    /// Load settings from a JSON file, defaults when missing or invalid
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), SettingsError::from(e));
                Self::default()
            }
        }
    }

    /// One-run seed from `HARD_MAZE_SEED`, if set and numeric
    #[cfg(not(target_arch = "wasm32"))]
    pub fn seed_override() -> Option<u64> {
        let seed = std::env::var(Self::SEED_ENV).ok()?;
        match seed.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("Ignoring {}={:?}: {}", Self::SEED_ENV, seed, e);
                None
            }
        }
    }

    /// Write settings back to the file named by `HARD_MAZE_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            return;
        };
        match self.save_to(std::path::Path::new(&path)) {
            Ok(()) => log::info!("Settings saved to {}", path),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }

    /// Write settings as pretty JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.difficulty, Difficulty::Extreme);
        assert_eq!(s.reshuffle_divisor, 8);
        assert_eq!(s.seed, None);
        assert!(s.show_trail);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"difficulty":"Easy","seed":42}"#).unwrap();
        assert_eq!(s.difficulty, Difficulty::Easy);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.reshuffle_divisor, 8);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let err = Settings::from_json(r#"{"reshuffle_divisor":0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert_eq!(
            Settings::from_json_or_default(r#"{"reshuffle_divisor":0}"#),
            Settings::default()
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_round_trip() {
        let s = Settings {
            difficulty: Difficulty::Hard,
            reshuffle_divisor: 4,
            seed: Some(7),
            show_trail: false,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_generator_config() {
        let s = Settings {
            reshuffle_divisor: 3,
            ..Settings::default()
        };
        assert_eq!(s.generator_config().reshuffle_divisor, 3);
    }

    #[test]
    fn test_for_run_overrides_seed_only() {
        let s = Settings {
            difficulty: Difficulty::Medium,
            ..Settings::default()
        };
        let run = s.for_run(Some(42));
        assert_eq!(run.seed, Some(42));
        assert_eq!(run.difficulty, Difficulty::Medium);
        assert_eq!(s.seed, None);

        let pinned = Settings {
            seed: Some(7),
            ..Settings::default()
        };
        assert_eq!(pinned.for_run(None).seed, Some(7));
        assert_eq!(pinned.for_run(Some(9)).seed, Some(9));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_seed_override_not_persisted() {
        let name = format!("hard_maze_settings_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, "{}").unwrap();

        let mut settings = Settings::load_from(&path);
        let run = settings.for_run(Some(42));
        assert_eq!(run.seed, Some(42));

        settings.difficulty = Difficulty::Easy;
        settings.save_to(&path).unwrap();
        let reloaded = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(reloaded.seed, None);
        assert_eq!(reloaded.difficulty, Difficulty::Easy);
    }
}
