//! Presentation settings and preferences
//!
//! Physics presets are fixed; only how the toys look and sound is
//! configurable. Stored as JSON: a file for the native binary, LocalStorage
//! (driven from the JS side) for the web build.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
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

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 30,
            QualityPreset::Medium => 100,
            QualityPreset::High => 250,
        }
    }
}

/// Errors from loading or saving settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "settings I/O error: {}", err),
            SettingsError::Parse(err) => write!(f, "invalid settings JSON: {}", err),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            SettingsError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Sparkle bursts on hits and captures
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background loop volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key used by the web front-end
    pub const STORAGE_KEY: &'static str = "coinfall_settings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from(path.as_ref()) {
            Ok(settings) => settings,
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring settings at {}: {}", path.as_ref().display(), err);
                Self::default()
            }
        }
    }

    /// Save to a JSON file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }

    fn clamp_volumes(&mut self) {
        self.master_volume = sanitize_volume(self.master_volume);
        self.sfx_volume = sanitize_volume(self.sfx_volume);
        self.music_volume = sanitize_volume(self.music_volume);
    }
}

fn sanitize_volume(vol: f32) -> f32 {
    if vol.is_finite() { vol.clamp(0.0, 1.0) } else { 0.0 }
}
