//! Event dispatch
//!
//! The simulation only returns `SimEvent` records; this turns them into
//! sound cues and particle bursts, outside the physics step.

use crate::audio::{AudioBackend, AudioManager, SoundEffect};
use crate::particles::{BurstSpec, ParticleField};
use crate::settings::Settings;
use crate::sim::{RandomSource, Rgb, SceneKind, SimEvent};

/// Per-scene particle styling
#[derive(Debug, Clone, Copy)]
pub struct BurstStyle {
    pub hit: BurstSpec,
    /// `None` when the scene has no captures worth celebrating
    pub capture: Option<BurstSpec>,
    /// Fixed hit colour; `None` uses the coin's own colour
    pub hit_color: Option<Rgb>,
}

impl BurstStyle {
    pub fn for_kind(kind: SceneKind) -> Self {
        match kind {
            SceneKind::LavaLamp => Self {
                hit: BurstSpec::LAVA_HIT,
                capture: None,
                hit_color: Some(Rgb::GOLD),
            },
            SceneKind::GaltonBoard => Self {
                hit: BurstSpec::GALTON_HIT,
                capture: Some(BurstSpec::GALTON_CAPTURE),
                hit_color: None,
            },
        }
    }
}

/// Audio + particles for one scene
pub struct Feedback<B: AudioBackend> {
    audio: AudioManager<B>,
    particles: ParticleField,
    style: BurstStyle,
}

impl<B: AudioBackend> Feedback<B> {
    pub fn new(kind: SceneKind, backend: B, settings: &Settings) -> Self {
        Self {
            audio: AudioManager::with_settings(backend, settings),
            particles: ParticleField::new(settings.max_particles()),
            style: BurstStyle::for_kind(kind),
        }
    }

    /// React to one batch of events, in order
    pub fn dispatch(&mut self, events: &[SimEvent], rng: &mut dyn RandomSource) {
        for event in events {
            match event {
                SimEvent::BackgroundStarted => self.audio.start_background(),
                SimEvent::Spawned { .. } => self.audio.play(SoundEffect::Success),
                SimEvent::Hit { pos, color, .. } => {
                    self.audio.play(SoundEffect::Hit);
                    let color = self.style.hit_color.unwrap_or(*color);
                    self.particles.burst(*pos, color, &self.style.hit, rng);
                }
                SimEvent::Captured { pos, color, .. } => {
                    self.audio.play(SoundEffect::Success);
                    if let Some(spec) = &self.style.capture {
                        self.particles.burst(*pos, *color, spec, rng);
                    }
                }
                SimEvent::PlatformTilted { .. } => self.audio.play(SoundEffect::Hit),
            }
        }
    }

    /// Advance particles by one frame
    pub fn update(&mut self, dt: f32) {
        self.particles.update(dt);
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.audio.apply_settings(settings);
        self.particles.set_max_particles(settings.max_particles());
    }

    /// Scene teardown
    pub fn shutdown(&mut self) {
        self.audio.stop_background();
        self.particles.clear();
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }
}
