//! Player preferences
//!
//! Persisted separately from the best score, as JSON under its own key.
//! Nothing here affects the simulation.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Bubble particles on flap and crash
    pub particles: bool,
    /// Screen glitch bursts
    pub glitch_effects: bool,
    /// Minimize flicker and motion
    pub reduced_motion: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            glitch_effects: true,
            reduced_motion: false,

            master_volume: 1.0,
            sfx_volume: 0.3,
            music_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Store key
    pub const STORAGE_KEY: &'static str = "flappyBunnySettings";

    /// Effective glitch (respects reduced_motion)
    pub fn effective_glitch(&self) -> bool {
        self.glitch_effects && !self.reduced_motion
    }

    /// Effective sound effect gain
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music gain
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match Self::try_load(store) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not load settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn try_load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Self>, StoreError> {
        match store.get(Self::STORAGE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_missing() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            particles: false,
            muted: true,
            ..Default::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{{{").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{ "reduced_motion": true }"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert!(settings.reduced_motion);
        assert!(settings.particles);
        assert!(!settings.effective_glitch());
    }

    #[test]
    fn test_muted_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }
}
