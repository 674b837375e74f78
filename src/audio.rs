//! Audio intents
//!
//! The core never plays sound itself. It asks an `AudioBackend` to play one of
//! three fixed cues; playback failures (autoplay policy, missing device) are
//! logged and swallowed here so they never reach the frame loop.

use std::fmt;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ambient loop, started on the first pointer interaction
    Background,
    /// Coin nudged or platform clicked
    Hit,
    /// Coin spawned or captured
    Success,
}

impl SoundEffect {
    /// Gain before user volume is applied
    pub fn base_gain(&self) -> f32 {
        match self {
            SoundEffect::Background => 0.1,
            SoundEffect::Hit => 0.2,
            SoundEffect::Success => 0.3,
        }
    }

    /// Asset path served next to the web build
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundEffect::Background => "/sounds/background.mp3",
            SoundEffect::Hit => "/sounds/hit.mp3",
            SoundEffect::Success => "/sounds/success.mp3",
        }
    }

    pub fn is_looping(&self) -> bool {
        matches!(self, SoundEffect::Background)
    }
}

/// Playback rejected by a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No output device or audio context
    Unavailable,
    /// The platform refused playback (e.g. autoplay policy)
    Rejected(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "audio output unavailable"),
            AudioError::Rejected(reason) => write!(f, "playback rejected: {}", reason),
        }
    }
}

impl std::error::Error for AudioError {}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Start `effect` at `gain`; one-shots restart from the beginning
    fn play(&mut self, effect: SoundEffect, gain: f32, looping: bool) -> Result<(), AudioError>;

    /// Stop a (looping) effect; default is a no-op
    fn stop(&mut self, _effect: SoundEffect) {}
}

/// Backend for headless runs: every cue becomes a debug log line
#[derive(Debug, Default)]
pub struct LogBackend {
    played: usize,
}

impl LogBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far
    pub fn played(&self) -> usize {
        self.played
    }
}

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, gain: f32, looping: bool) -> Result<(), AudioError> {
        self.played += 1;
        log::debug!(
            "Audio: {:?} ({}) gain {:.3}{}",
            effect,
            effect.asset_path(),
            gain,
            if looping { " [loop]" } else { "" }
        );
        Ok(())
    }
}

/// Volume handling and one-shot bookkeeping over a backend
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    background_started: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            background_started: false,
        }
    }

    /// Manager with volumes taken from user settings
    pub fn with_settings(backend: B, settings: &crate::settings::Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &crate::settings::Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set background music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Final gain handed to the backend
    pub fn effective_gain(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = match effect {
            SoundEffect::Background => self.music_volume,
            SoundEffect::Hit | SoundEffect::Success => self.sfx_volume,
        };
        effect.base_gain() * self.master_volume * channel
    }

    /// Play a one-shot cue
    pub fn play(&mut self, effect: SoundEffect) {
        if effect == SoundEffect::Background {
            self.start_background();
            return;
        }
        let gain = self.effective_gain(effect);
        if gain <= 0.0 {
            return;
        }
        self.dispatch(effect, gain);
    }

    /// Start the background loop; later calls do nothing
    ///
    /// A rejected start still counts, so a blocked loop is not retried on
    /// every click.
    pub fn start_background(&mut self) {
        if self.background_started {
            return;
        }
        self.background_started = true;
        let gain = self.effective_gain(SoundEffect::Background);
        self.dispatch(SoundEffect::Background, gain);
    }

    /// Scene teardown
    pub fn stop_background(&mut self) {
        if self.background_started {
            self.backend.stop(SoundEffect::Background);
        }
    }

    pub fn background_started(&self) -> bool {
        self.background_started
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn dispatch(&mut self, effect: SoundEffect, gain: f32) {
        if let Err(err) = self.backend.play(effect, gain, effect.is_looping()) {
            log::warn!("{:?} audio play prevented: {}", effect, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls; optionally rejects everything
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(SoundEffect, f32, bool)>,
        stopped: Vec<SoundEffect>,
        reject: bool,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, gain: f32, looping: bool) -> Result<(), AudioError> {
            self.calls.push((effect, gain, looping));
            if self.reject {
                Err(AudioError::Rejected("autoplay".into()))
            } else {
                Ok(())
            }
        }

        fn stop(&mut self, effect: SoundEffect) {
            self.stopped.push(effect);
        }
    }

    #[test]
    fn test_background_starts_once() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.start_background();
        audio.play(SoundEffect::Background);
        audio.start_background();
        assert_eq!(audio.backend().calls.len(), 1);
        let (effect, gain, looping) = audio.backend().calls[0];
        assert_eq!(effect, SoundEffect::Background);
        assert!(looping);
        assert!((gain - 0.1 * 0.8 * 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_gain_applies_volumes() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(1.0);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::Success);
        let (_, gain, looping) = audio.backend().calls[0];
        assert!((gain - 0.15).abs() < 1e-6);
        assert!(!looping);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Hit);
        assert!(audio.backend().calls.is_empty());
    }

    #[test]
    fn test_rejection_is_swallowed() {
        let backend = Recorder {
            reject: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(backend);
        audio.play(SoundEffect::Hit);
        audio.start_background();
        audio.start_background();
        assert_eq!(audio.backend().calls.len(), 2);
        assert!(audio.background_started());
    }

    #[test]
    fn test_stop_background_only_after_start() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.stop_background();
        assert!(audio.backend().stopped.is_empty());
        audio.start_background();
        audio.stop_background();
        assert_eq!(audio.backend().stopped, vec![SoundEffect::Background]);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AudioError::Unavailable.to_string(), "audio output unavailable");
        assert_eq!(
            AudioError::Rejected("autoplay".into()).to_string(),
            "playback rejected: autoplay"
        );
    }
}
