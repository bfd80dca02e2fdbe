//! Game settings and preferences
//!
//! Persisted as a JSON file next to the high-score store. A missing or
//! unreadable file falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;
use crate::tuning::{MovementModel, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game balance
    pub tuning: Tuning,

    // === Session ===
    /// RNG seed; `None` picks one from the clock at startup
    pub seed: Option<u64>,
    /// Nominal tick interval for the driver
    pub tick_interval_ms: u64,

    // === Storage ===
    /// Where the high-score table lives
    pub high_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),

            seed: None,
            tick_interval_ms: TICK_INTERVAL_MS,

            high_score_path: PathBuf::from("pyoro_scores.json"),
        }
    }
}

impl Settings {
    /// Settings using the given movement model
    pub fn with_movement(movement: MovementModel) -> Self {
        let mut settings = Self::default();
        settings.tuning.movement = movement;
        settings
    }

    /// Fixed timestep in seconds derived from the tick interval
    pub fn tick_dt(&self) -> f32 {
        self.tick_interval_ms.max(1) as f32 / 1000.0
    }

    /// Seed to use for a new session
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Self>(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                let tuning = &settings.tuning;
                if tuning.bean_speed_min >= tuning.bean_speed_max {
                    log::warn!(
                        "Empty bean speed range [{}, {}), every bean uses {}",
                        tuning.bean_speed_min,
                        tuning.bean_speed_max,
                        tuning.bean_speed_min
                    );
                }
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings file {} ({})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tuning.movement, MovementModel::StepQueue);
        assert!((settings.tick_dt() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_with_movement() {
        let settings = Settings::with_movement(MovementModel::Continuous);
        assert_eq!(settings.tuning.movement, MovementModel::Continuous);
    }

    #[test]
    fn test_fixed_seed_is_used() {
        let settings = Settings {
            seed: Some(1234),
            ..Default::default()
        };
        assert_eq!(settings.effective_seed(), 1234);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let settings = Settings::load(Path::new("/definitely/not/here/pyoro.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("pyoro-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let mut settings = Settings::with_movement(MovementModel::Continuous);
        settings.seed = Some(99);
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings =
            serde_json::from_str(r#"{"seed": 7, "tuning": {"death_delay": 2.5}}"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tuning.death_delay, 2.5);
        assert_eq!(settings.tuning.step_size, 0.25);
        assert_eq!(settings.tick_interval_ms, 16);
    }
}
