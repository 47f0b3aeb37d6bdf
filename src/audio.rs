//! Audio cue mapping
//!
//! Turns simulation events into named sounds and music tracks at the volume
//! the player's settings allow. Decoding and output belong to the host.

use crate::settings::Settings;
use crate::sim::{GameEvent, Mode, PowerUpKind};

/// Music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Classic,
    Arcade,
    Survival,
    Zen,
    GameOver,
}

impl MusicTrack {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Classic => MusicTrack::Classic,
            Mode::Arcade => MusicTrack::Arcade,
            Mode::Survival => MusicTrack::Survival,
            Mode::Zen => MusicTrack::Zen,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu",
            MusicTrack::Classic => "classic",
            MusicTrack::Arcade => "arcade",
            MusicTrack::Survival => "survival",
            MusicTrack::Zen => "zen",
            MusicTrack::GameOver => "gameover",
        }
    }
}

/// Something the host should play
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Playback {
    Sound { name: &'static str, volume: f32 },
    /// Replaces whatever track is playing
    Music { track: MusicTrack, volume: f32 },
}

/// Maps game events to playback requests
#[derive(Debug, Clone)]
pub struct SoundBoard {
    sound_enabled: bool,
    music_enabled: bool,
    sound_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for SoundBoard {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl SoundBoard {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sound_enabled: settings.sound_enabled,
            music_enabled: settings.music_enabled,
            sound_volume: settings.sound_volume,
            music_volume: settings.music_volume,
            muted: false,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn sound_volume(&self) -> f32 {
        if self.muted || !self.sound_enabled {
            0.0
        } else {
            self.sound_volume
        }
    }

    fn music_volume(&self) -> f32 {
        if self.muted || !self.music_enabled {
            0.0
        } else {
            self.music_volume
        }
    }

    /// Track to start for a mode (or the menu when no game is running)
    pub fn music(&self, track: MusicTrack) -> Option<Playback> {
        let volume = self.music_volume();
        (volume > 0.0).then_some(Playback::Music { track, volume })
    }

    /// Playback requests for one event; empty when silenced
    pub fn play(&self, event: GameEvent) -> Vec<Playback> {
        if event == GameEvent::GameOver {
            return self.music(MusicTrack::GameOver).into_iter().collect();
        }

        let volume = self.sound_volume();
        if volume <= 0.0 {
            return Vec::new();
        }
        let sound = |name| Playback::Sound { name, volume };

        match event {
            // Generic pickup chime, then the kind-specific one
            GameEvent::PowerUpCollect(kind) => {
                vec![sound("powerupCollect"), sound(power_up_sound(kind))]
            }
            other => vec![sound(other.cue_name())],
        }
    }
}

fn power_up_sound(kind: PowerUpKind) -> &'static str {
    GameEvent::PowerUpCollect(kind).cue_name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_uses_cue_name_and_volume() {
        let board = SoundBoard::default();
        assert_eq!(
            board.play(GameEvent::EatGolden),
            vec![Playback::Sound {
                name: "eatGolden",
                volume: 0.5
            }]
        );
    }

    #[test]
    fn test_power_up_plays_two_sounds() {
        let board = SoundBoard::default();
        let names: Vec<_> = board
            .play(GameEvent::PowerUpCollect(PowerUpKind::Shrink))
            .into_iter()
            .filter_map(|p| match p {
                Playback::Sound { name, .. } => Some(name),
                Playback::Music { .. } => None,
            })
            .collect();
        assert_eq!(names, vec!["powerupCollect", "powerupShrink"]);
    }

    #[test]
    fn test_game_over_switches_music() {
        let board = SoundBoard::default();
        assert_eq!(
            board.play(GameEvent::GameOver),
            vec![Playback::Music {
                track: MusicTrack::GameOver,
                volume: 0.3
            }]
        );
    }

    #[test]
    fn test_disabled_sound_and_mute() {
        let mut settings = Settings::default();
        settings.sound_enabled = false;
        let mut board = SoundBoard::new(&settings);
        assert!(board.play(GameEvent::EatFood).is_empty());
        assert!(board.music(MusicTrack::for_mode(Mode::Zen)).is_some());

        board.set_muted(true);
        assert!(board.music(MusicTrack::Menu).is_none());
        assert!(board.play(GameEvent::GameOver).is_empty());
    }

    #[test]
    fn test_mode_tracks() {
        assert_eq!(MusicTrack::for_mode(Mode::Survival).name(), "survival");
        assert_eq!(MusicTrack::GameOver.name(), "gameover");
    }
}
