//! Scene and chat preferences
//!
//! Persisted in LocalStorage on the web build.

use serde::{Deserialize, Serialize};

use crate::chat::client::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::consts::{GALAXY_COUNT, STARS_COUNT};
use crate::scene::{AnimationParams, GalaxyConfig, StarConfig};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Background galaxy points for this preset (0 = no galaxy)
    pub fn galaxy_points(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => GALAXY_COUNT / 2,
            QualityPreset::High => GALAXY_COUNT,
        }
    }

    /// Background stars for this preset
    pub fn star_points(&self) -> usize {
        match self {
            QualityPreset::Low => STARS_COUNT / 3,
            QualityPreset::Medium => STARS_COUNT * 2 / 3,
            QualityPreset::High => STARS_COUNT,
        }
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Reduced motion (no brightness flicker)
    pub reduced_motion: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Chat ===
    /// Chat panel expanded
    pub chat_open: bool,
    /// Remote model name
    pub model: String,
    /// Remote API base URL
    pub api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            reduced_motion: false,
            show_fps: false,
            chat_open: true,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Disk animation tunables (respects reduced_motion)
    pub fn animation_params(&self) -> AnimationParams {
        if self.reduced_motion {
            AnimationParams::reduced_motion()
        } else {
            AnimationParams::default()
        }
    }

    /// Galaxy configuration, or None when the preset disables it
    pub fn galaxy_config(&self) -> Option<GalaxyConfig> {
        match self.quality.galaxy_points() {
            0 => None,
            count => Some(GalaxyConfig {
                count,
                ..GalaxyConfig::default()
            }),
        }
    }

    /// Star shell sized for the preset
    pub fn star_config(&self) -> StarConfig {
        StarConfig {
            count: self.quality.star_points(),
            ..StarConfig::default()
        }
    }

    /// Load, apply `change` and persist. Returns the updated settings.
    pub fn update(change: impl FnOnce(&mut Settings)) -> Self {
        let mut settings = Self::load();
        change(&mut settings);
        settings.save();
        settings
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "event_horizon_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_low_preset_drops_galaxy() {
        assert!(Settings::from_preset(QualityPreset::Low).galaxy_config().is_none());
        let medium = Settings::from_preset(QualityPreset::Medium).galaxy_config().unwrap();
        assert_eq!(medium.count, GALAXY_COUNT / 2);
    }

    #[test]
    fn test_star_counts_follow_preset() {
        assert_eq!(Settings::from_preset(QualityPreset::Low).star_config().count, 1000);
        assert_eq!(Settings::from_preset(QualityPreset::Medium).star_config().count, 2000);
        assert_eq!(Settings::default().star_config().count, STARS_COUNT);
    }

    #[test]
    fn test_update_applies_change() {
        let settings = Settings::update(|s| {
            s.chat_open = false;
            s.quality = QualityPreset::Low;
        });
        assert!(!settings.chat_open);
        assert_eq!(settings.quality, QualityPreset::Low);
    }

    #[test]
    fn test_reduced_motion_disables_flicker() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.animation_params().flicker_enabled);
        assert!(Settings::default().animation_params().flicker_enabled);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"quality":"Low"}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(settings.chat_open);
    }
}
