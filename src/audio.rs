//! Audio cues and the sink that plays them
//!
//! The simulation only names cues. A host plugs in an `AudioSink` to turn them
//! into sound; the headless build uses `LogAudio`, which applies the volume
//! settings and logs what would play.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Hero left the ground
    Jump,
    /// Coin collected
    Pickup,
    /// Hero lost a heart
    Hurt,
    /// Goal reached
    LevelComplete,
    /// Out of hearts
    Lose,
    /// Final level cleared
    Win,
}

/// Background music cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// Title screen theme
    Intro,
    /// Gameplay theme (loops)
    Theme,
    /// Silence
    Stop,
}

/// Whatever actually makes noise
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    fn music(&mut self, cue: MusicCue);
}

/// Forward every audio event in `events` to `sink`; other events are skipped
pub fn dispatch(events: &[GameEvent], sink: &mut impl AudioSink) {
    for event in events {
        match *event {
            GameEvent::Sound(cue) => sink.play(cue),
            GameEvent::Music(cue) => sink.music(cue),
            _ => {}
        }
    }
}

/// Audio sink that logs cues at their effective volume
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    current_music: Option<MusicCue>,
    played: u64,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            current_music: None,
            played: 0,
        }
    }

    /// Build from the user's audio settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Music cue currently in effect, if any has been requested
    pub fn current_music(&self) -> Option<MusicCue> {
        self.current_music
    }

    /// Number of sound effects that were audible
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("sfx {:?} @ {:.2}", cue, vol);
    }

    fn music(&mut self, cue: MusicCue) {
        if self.current_music == Some(cue) {
            return;
        }
        self.current_music = Some(cue);
        log::info!(
            "music {:?} @ {:.2}",
            cue,
            self.effective_volume(self.music_volume)
        );
    }
}
