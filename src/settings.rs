//! Player settings and preferences
//!
//! Audio preferences and the snake skin, persisted under separate storage
//! keys so either can be reset without touching the other.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KEY_SETTINGS, KEY_SKIN, PersistError, Storage};

/// Selectable snake skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Skin {
    #[default]
    Classic,
    BlueIce,
    RedFire,
    PurpleGalaxy,
    Golden,
    PinkCandy,
    DarkShadow,
    Rainbow,
}

impl Skin {
    pub const ALL: [Skin; 8] = [
        Skin::Classic,
        Skin::BlueIce,
        Skin::RedFire,
        Skin::PurpleGalaxy,
        Skin::Golden,
        Skin::PinkCandy,
        Skin::DarkShadow,
        Skin::Rainbow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Classic => "Classic Green",
            Skin::BlueIce => "Blue Ice",
            Skin::RedFire => "Red Fire",
            Skin::PurpleGalaxy => "Purple Galaxy",
            Skin::Golden => "Golden",
            Skin::PinkCandy => "Pink Candy",
            Skin::DarkShadow => "Dark Shadow",
            Skin::Rainbow => "Rainbow",
        }
    }

    /// Accepts the storage id (`BLUE_ICE`) or the display name (`Blue Ice`)
    pub fn from_name(s: &str) -> Option<Self> {
        let key = s.to_lowercase().replace(['_', ' ', '-'], "");
        Skin::ALL.into_iter().find(|skin| {
            skin.as_str().to_lowercase().replace(' ', "") == key
                || (key == "classic" && *skin == Skin::Classic)
        })
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub music_enabled: bool,
    pub sound_enabled: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sound_volume: f32,
    /// Stored under its own key
    #[serde(skip)]
    pub skin: Skin,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
            music_volume: 0.3,
            sound_volume: 0.5,
            skin: Skin::Classic,
        }
    }
}

impl Settings {
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = volume.clamp(0.0, 1.0);
    }

    /// Effective sound effect volume (0 when disabled)
    pub fn effective_sound_volume(&self) -> f32 {
        if self.sound_enabled { self.sound_volume } else { 0.0 }
    }

    /// Effective music volume (0 when disabled)
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_enabled { self.music_volume } else { 0.0 }
    }

    /// Load settings and skin; anything missing or corrupt falls back to defaults
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let mut settings: Self = persistence::load_or_default(storage, KEY_SETTINGS);
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        settings.sound_volume = settings.sound_volume.clamp(0.0, 1.0);
        settings.skin = persistence::load_or_default(storage, KEY_SKIN);
        log::info!("Loaded settings (skin: {})", settings.skin.as_str());
        settings
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), PersistError> {
        persistence::save_json(storage, KEY_SETTINGS, self)?;
        persistence::save_json(storage, KEY_SKIN, &self.skin)?;
        log::info!("Settings saved");
        Ok(())
    }
}
