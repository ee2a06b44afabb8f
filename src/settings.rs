//! Cosmetic effect preferences
//!
//! Persisted separately from the coin balance. Settings only budget cosmetic
//! entities (particles, starfield); gameplay constants are not configurable.

use serde::{Deserialize, Serialize};

use crate::consts::STAR_COUNT;
use crate::platform::Storage;

/// Effects quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EffectsPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl EffectsPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectsPreset::Low => "Low",
            EffectsPreset::Medium => "Medium",
            EffectsPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(EffectsPreset::Low),
            "medium" | "med" => Some(EffectsPreset::Medium),
            "high" => Some(EffectsPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            EffectsPreset::Low => 100,
            EffectsPreset::Medium => 500,
            EffectsPreset::High => 2000,
        }
    }

    /// Fraction of the full starfield to populate
    pub fn star_density(&self) -> f32 {
        match self {
            EffectsPreset::Low => 0.25,
            EffectsPreset::Medium => 1.0,
            EffectsPreset::High => 1.0,
        }
    }
}

/// Effect preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub quality: EffectsPreset,
    /// Explosion/impact particles
    pub particles: bool,
    /// Scrolling background stars
    pub starfield: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: EffectsPreset::Medium,
            particles: true,
            starfield: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pioneer_settings";

    /// Create settings from a preset
    pub fn from_preset(preset: EffectsPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective number of background stars
    pub fn star_count(&self) -> usize {
        if !self.starfield {
            0
        } else {
            (STAR_COUNT as f32 * self.quality.star_density()).round() as usize
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(storage: &Storage) -> Self {
        if let Some(json) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &mut Storage) {
        match serde_json::to_string(self) {
            Ok(json) => {
                storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_cap_respects_toggle() {
        let mut settings = Settings::from_preset(EffectsPreset::High);
        assert_eq!(settings.max_particles(), 2000);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_star_count() {
        assert_eq!(Settings::default().star_count(), STAR_COUNT);
        assert_eq!(Settings::from_preset(EffectsPreset::Low).star_count(), 25);
        let settings = Settings {
            starfield: false,
            ..Settings::default()
        };
        assert_eq!(settings.star_count(), 0);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(EffectsPreset::from_str("MED"), Some(EffectsPreset::Medium));
        assert_eq!(EffectsPreset::from_str("ultra"), None);
        assert_eq!(EffectsPreset::High.as_str(), "High");
    }

    #[test]
    fn test_settings_round_trip_through_storage() {
        let mut storage = Storage::in_memory();
        let settings = Settings::from_preset(EffectsPreset::Low);
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        let mut storage = Storage::in_memory();
        storage.set_item(Settings::STORAGE_KEY, "{not json");
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
